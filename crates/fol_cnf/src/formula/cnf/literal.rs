use std::fmt;

use if_chain::if_chain;
use serde::{Deserialize, Serialize};

use crate::{
    error::BaseError,
    formula::{
        manipulation::{UnificationFailure, VarSubst},
        sentence::{Predicate, Sentence},
        variable::Variable,
        term::Term,
    },
};

/// An atom or its negation
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct Literal {
    predicate: Predicate,
    negated: bool,
}

impl Literal {
    pub fn new(predicate: Predicate, negated: bool) -> Self {
        Self { predicate, negated }
    }

    pub fn positive(predicate: Predicate) -> Self {
        Self::new(predicate, false)
    }

    pub fn negative(predicate: Predicate) -> Self {
        Self::new(predicate, true)
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Same atom, opposite polarity
    pub fn complement(&self) -> Self {
        Self::new(self.predicate.clone(), !self.negated)
    }

    pub fn variables_iter(&self) -> impl Iterator<Item = &Variable> {
        let mut pile: Vec<&Term> = self.predicate.args().iter().collect();
        std::iter::from_fn(move || loop {
            match pile.pop()? {
                Term::Var(v) => return Some(v),
                Term::Fun(f) => pile.extend(f.args()),
            }
        })
    }

    /// Unifies two literals of the same polarity
    pub fn unify(&self, other: &Literal) -> Result<VarSubst, UnificationFailure> {
        if self.negated != other.negated {
            return Err(UnificationFailure::PolarityMismatch);
        }
        self.predicate.unify(&other.predicate)
    }

    pub fn to_sentence(&self) -> Sentence {
        let atom = Sentence::Predicate(self.predicate.clone());
        if self.negated {
            !atom
        } else {
            atom
        }
    }
}

impl TryFrom<&Sentence> for Literal {
    type Error = BaseError;

    fn try_from(value: &Sentence) -> Result<Self, Self::Error> {
        if_chain! {
            if let Sentence::Not(inner) = value;
            if let Sentence::Predicate(p) = inner.as_ref();
            then {
                Ok(Literal::negative(p.clone()))
            } else {
                match value {
                    Sentence::Predicate(p) => Ok(Literal::positive(p.clone())),
                    _ => Err(BaseError::NotClausal(value.to_string())),
                }
            }
        }
    }
}

impl From<Literal> for Sentence {
    fn from(value: Literal) -> Self {
        value.to_sentence()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "¬{}", self.predicate)
        } else {
            self.predicate.fmt(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{
        manipulation::UnificationFailure,
        sentence::{not, predicate, Sentence},
        term::Term,
        variable::Variable,
    };

    use super::Literal;

    #[test]
    fn from_sentence() {
        let x = Variable::new("x");
        let px = predicate("P", [&x]);
        let pos = Literal::try_from(&px).unwrap();
        let neg = Literal::try_from(&not(px.clone())).unwrap();
        assert!(!pos.is_negated() && neg.is_negated());
        assert_eq!(pos.complement(), neg);
        assert_eq!(Sentence::from(neg.clone()), not(px.clone()));
        assert_eq!(neg.to_string(), "¬P(x)");

        assert!(Literal::try_from(&not(not(px.clone()))).is_err());
        assert!(Literal::try_from(&(px.clone() | px)).is_err());
    }

    #[test]
    fn variables() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let lit = Literal::try_from(&predicate(
            "P",
            [Term::fun("f", [&x, &y]), Term::constant("a"), Term::from(&x)],
        ))
        .unwrap();
        let mut vars: Vec<_> = lit.variables_iter().cloned().collect();
        vars.sort();
        assert_eq!(vars, {
            let mut v = vec![x.clone(), x, y];
            v.sort();
            v
        });
    }

    #[test]
    fn unification_checks_polarity() {
        let x = Variable::new("x");
        let l = Literal::try_from(&predicate("P", [&x])).unwrap();
        let r = Literal::try_from(&predicate("P", [Term::constant("a")])).unwrap();
        assert!(l.unify(&r).is_ok());
        assert_eq!(
            l.unify(&r.complement()),
            Err(UnificationFailure::PolarityMismatch)
        );
    }
}
