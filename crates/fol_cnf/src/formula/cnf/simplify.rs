use crate::formula::sentence::{implies, not, Operands, Sentence};

impl Sentence {
    /// Rewrites implications and equivalences with `∧`, `∨` and `¬`
    ///
    /// `A => B` becomes `¬A ∨ B` and `A <=> B` becomes `(A => B) ∧ (B => A)`
    /// (simplified further). A one-operand equivalence is `A <=> A`.
    pub fn simplified(&self) -> Sentence {
        match self {
            Sentence::Implies(a, b) => Sentence::Or(Operands::pair(
                not(a.simplified()),
                b.simplified(),
            )),
            Sentence::Iff(ops) => {
                // a1 => a2, a2 => a3, ..., an => a1
                let implications = ops
                    .iter()
                    .zip(ops.iter().cycle().skip(1))
                    .map(|(a, b)| implies(a.clone(), b.clone()).simplified());
                Sentence::And(Operands::new_unchecked(implications))
            }
            _ => self.map_children(Sentence::simplified),
        }
    }

    /// No `=>` nor `<=>` left
    pub fn is_simplified(&self) -> bool {
        self.subformulas()
            .all(|s| !matches!(s, Sentence::Implies(..) | Sentence::Iff(..)))
    }
}
