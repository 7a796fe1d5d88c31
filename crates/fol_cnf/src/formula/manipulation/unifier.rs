use if_chain::if_chain;
use thiserror::Error;

use crate::formula::{
    sentence::{Predicate, Sentence},
    term::{Function, Term},
    variable::Variable,
};

use super::{Substitution, VarSubst};

/// Why two terms (or literals) don't unify
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationFailure {
    #[error("symbols {left} and {right} differ")]
    SymbolClash { left: String, right: String },
    #[error("{symbol} is used with {left} and {right} arguments")]
    ArityMismatch {
        symbol: String,
        left: usize,
        right: usize,
    },
    #[error("{left} and {right} are distinct non-variable terms")]
    Mismatch { left: Term, right: Term },
    #[error("{variable} is already bound to {bound}, it can't be bound to {new}")]
    Conflict {
        variable: Variable,
        bound: Term,
        new: Term,
    },
    #[error("{variable} occurs in {term}")]
    OccursCheck { variable: Variable, term: Term },
    #[error("{0} is not a literal")]
    NotALiteral(String),
    #[error("literals of opposite polarity")]
    PolarityMismatch,
}

fn check_heads(
    left: &impl ToString,
    right: &impl ToString,
    same: bool,
    (larity, rarity): (usize, usize),
) -> Result<(), UnificationFailure> {
    if !same {
        Err(UnificationFailure::SymbolClash {
            left: left.to_string(),
            right: right.to_string(),
        })
    } else if larity != rarity {
        Err(UnificationFailure::ArityMismatch {
            symbol: left.to_string(),
            left: larity,
            right: rarity,
        })
    } else {
        Ok(())
    }
}

impl Function {
    /// Unifies two applications of the same symbol
    ///
    /// Arguments are matched pairwise: equal arguments are skipped, a variable
    /// gets bound to the other side. Two distinct non-variable arguments fail
    /// right away, there is no recursion into nested functions.
    pub fn unify(&self, other: &Function) -> Result<VarSubst, UnificationFailure> {
        check_heads(
            self.symbol(),
            other.symbol(),
            self.symbol() == other.symbol(),
            (self.arity(), other.arity()),
        )?;

        let mut subst = VarSubst::new();
        for (l, r) in self.args().iter().zip(other.args()) {
            let (l, r) = (subst.apply(l), subst.apply(r));
            if l == r {
                continue;
            }
            match (l, r) {
                (Term::Var(v), t) | (t, Term::Var(v)) => subst.bind(v, t)?,
                (left, right) => return Err(UnificationFailure::Mismatch { left, right }),
            }
        }
        Ok(subst)
    }
}

impl Term {
    /// [Function::unify], also accepting a variable on either side
    pub fn unify(&self, other: &Term) -> Result<VarSubst, UnificationFailure> {
        match (self, other) {
            (Term::Fun(l), Term::Fun(r)) => l.unify(r),
            _ if self == other => Ok(VarSubst::new()),
            (Term::Var(v), t) | (t, Term::Var(v)) => {
                VarSubst::try_from_bindings([(v.clone(), t.clone())])
            }
        }
    }
}

impl Predicate {
    /// Unifies two atoms with the same name and arity
    ///
    /// Arguments are rewritten with the bindings found so far, then function
    /// arguments are unified with [Function::unify] and the results merged: a
    /// variable receiving two different bindings is a failure.
    pub fn unify(&self, other: &Predicate) -> Result<VarSubst, UnificationFailure> {
        check_heads(
            &self.name(),
            &other.name(),
            self.name() == other.name(),
            (self.arity(), other.arity()),
        )?;

        let mut subst = VarSubst::new();
        for (l, r) in self.args().iter().zip(other.args()) {
            let (l, r) = (subst.apply(l), subst.apply(r));
            if l == r {
                continue;
            }
            match (l, r) {
                (Term::Fun(fl), Term::Fun(fr)) => subst.merge(&fl.unify(&fr)?)?,
                (Term::Var(v), t) | (t, Term::Var(v)) => subst.bind(v, t)?,
            }
        }
        Ok(subst)
    }
}

impl Sentence {
    /// Unifies two literals: two atoms, or two negated atoms
    pub fn unify(&self, other: &Sentence) -> Result<VarSubst, UnificationFailure> {
        match (self, other) {
            (Sentence::Predicate(l), Sentence::Predicate(r)) => l.unify(r),
            (Sentence::Not(l), Sentence::Not(r)) => l.unify(r),
            _ => {
                if_chain! {
                    if self.is_literal();
                    if other.is_literal();
                    then {
                        Err(UnificationFailure::PolarityMismatch)
                    } else {
                        let culprit = if self.is_literal() { other } else { self };
                        Err(UnificationFailure::NotALiteral(culprit.to_string()))
                    }
                }
            }
        }
    }
}
