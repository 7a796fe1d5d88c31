use crate::formula::sentence::Sentence;

impl Sentence {
    /// Drops vacuous quantifiers and flattens nested `∧`/`∨`
    ///
    /// A conjunction or disjunction left with a single operand is replaced by
    /// it.
    pub fn cleaned(&self) -> Sentence {
        match self {
            Sentence::ForAll(v, body) | Sentence::Exists(v, body) => {
                let body = body.cleaned();
                if body.has_free_variable(v) {
                    self.quantified(v.clone(), body)
                } else {
                    body
                }
            }
            Sentence::And(ops) => Sentence::and_flat(&ops.map(Sentence::cleaned)),
            Sentence::Or(ops) => Sentence::or_flat(&ops.map(Sentence::cleaned)),
            _ => self.map_children(Sentence::cleaned),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{
        sentence::{ands, exists, forall, ors, predicate, Sentence},
        term::Term,
        variable::Variable,
    };

    fn p(name: &str) -> Sentence {
        predicate::<Term>(name, [])
    }

    #[test]
    fn vacuous_quantifiers() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let px = predicate("P", [&x]);
        let s = forall(y.clone(), exists(x.clone(), px.clone()));
        assert_eq!(s.cleaned(), exists(x, px));
    }

    #[test]
    fn flattening() {
        let s = (p("P") & (p("Q") & p("R"))) | (p("S") | p("P"));
        let expected = ors([ands([p("P"), p("Q"), p("R")]).unwrap(), p("S"), p("P")]).unwrap();
        assert_eq!(s.cleaned(), expected);
        assert_eq!(ands([p("P")]).unwrap().cleaned(), p("P"));
    }

    #[test]
    fn idempotent() {
        let x = Variable::new("x");
        let s = forall(
            x.clone(),
            ands([p("P") & p("Q"), predicate("R", [&x]) | (p("S") | p("S"))]).unwrap(),
        );
        let once = s.cleaned();
        assert_eq!(once.cleaned(), once);
    }
}
