use crate::formula::sentence::{not, Sentence};

impl Sentence {
    /// Pushes negations down to the atoms
    ///
    /// When `negate` holds the result is equivalent to `¬self`. Implications
    /// and equivalences met on the way are [simplified](Sentence::simplified)
    /// first.
    pub fn negated_inwards(&self, negate: bool) -> Sentence {
        match self {
            Sentence::Predicate(_) if negate => not(self.clone()),
            Sentence::Predicate(_) => self.clone(),
            Sentence::Not(inner) => inner.negated_inwards(!negate),
            Sentence::And(ops) => {
                let ops = ops.map(|s| s.negated_inwards(negate));
                if negate {
                    Sentence::Or(ops)
                } else {
                    Sentence::And(ops)
                }
            }
            Sentence::Or(ops) => {
                let ops = ops.map(|s| s.negated_inwards(negate));
                if negate {
                    Sentence::And(ops)
                } else {
                    Sentence::Or(ops)
                }
            }
            Sentence::ForAll(v, body) => {
                let body = body.negated_inwards(negate).into();
                if negate {
                    Sentence::Exists(v.clone(), body)
                } else {
                    Sentence::ForAll(v.clone(), body)
                }
            }
            Sentence::Exists(v, body) => {
                let body = body.negated_inwards(negate).into();
                if negate {
                    Sentence::ForAll(v.clone(), body)
                } else {
                    Sentence::Exists(v.clone(), body)
                }
            }
            Sentence::Implies(..) | Sentence::Iff(..) => self.simplified().negated_inwards(negate),
        }
    }

    /// Negation normal form
    pub fn nnf(&self) -> Sentence {
        self.negated_inwards(false)
    }

    /// Every `¬` sits right on top of an atom and there is no `=>` nor `<=>`
    pub fn is_nnf(&self) -> bool {
        self.subformulas().all(|s| match s {
            Sentence::Implies(..) | Sentence::Iff(..) => false,
            Sentence::Not(inner) => inner.is_predicate(),
            _ => true,
        })
    }
}
