use std::{fmt, ops::BitAnd};

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utils::{implvec, ord_util::shortest_first};

use crate::formula::{term::Term, variable::Variable};

use super::UnificationFailure;

/// A mapping from [Variable]s to [Term]s
///
/// Unmapped variables are left untouched.
pub trait Substitution {
    fn get(&self, var: &Variable) -> Option<&Term>;

    /// Every binding of the substitution
    fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)>;

    fn contains(&self, var: &Variable) -> bool {
        self.get(var).is_some()
    }

    /// The image of `var`, `var` itself when it isn't mapped
    fn lookup(&self, var: &Variable) -> Term {
        self.get(var)
            .cloned()
            .unwrap_or_else(|| Term::Var(var.clone()))
    }

    fn apply(&self, term: &Term) -> Term {
        term.substituted(self).0
    }
}

/// Substituting under a quantifier binding one of the keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("can't substitute {variable}: it is bound by a quantifier on the way")]
pub struct CaptureError {
    pub variable: Variable,
}

/// Substitution of a single variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OneVarSubst {
    var: Variable,
    term: Term,
}

impl OneVarSubst {
    pub fn new(var: Variable, term: Term) -> Self {
        Self { var, term }
    }

    pub fn var(&self) -> &Variable {
        &self.var
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl Substitution for OneVarSubst {
    fn get(&self, var: &Variable) -> Option<&Term> {
        (&self.var == var).then_some(&self.term)
    }

    fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        std::iter::once((&self.var, &self.term))
    }
}

impl From<(Variable, Term)> for OneVarSubst {
    fn from((var, term): (Variable, Term)) -> Self {
        Self::new(var, term)
    }
}

/// A finite substitution backed by a hash map
///
/// Bindings added with [VarSubst::bind] keep the substitution idempotent: no
/// key ever occurs in a bound term. [VarSubst::insert] doesn't check anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Variable, Term)>", into = "Vec<(Variable, Term)>")]
pub struct VarSubst {
    subst: HashMap<Variable, Term>,
}

impl VarSubst {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.subst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subst.is_empty()
    }

    /// Plain assignment, returns the previous binding of `var`
    pub fn insert(&mut self, var: Variable, term: Term) -> Option<Term> {
        self.subst.insert(var, term)
    }

    /// Adds `var ↦ term` such that `self` stays an idempotent substitution
    ///
    /// `term` is first rewritten by `self`. Binding a variable to itself is a
    /// no-op, binding an already bound variable to another term is a
    /// [UnificationFailure::Conflict] and binding `x` to a term containing `x`
    /// fails the occurs check.
    pub fn bind(&mut self, var: Variable, term: Term) -> Result<(), UnificationFailure> {
        let term = self.apply(&term);
        if let Some(bound) = self.subst.get(&var) {
            return if bound == &term {
                Ok(())
            } else {
                Err(UnificationFailure::Conflict {
                    variable: var,
                    bound: bound.clone(),
                    new: term,
                })
            };
        }
        if term.as_var() == Some(&var) {
            return Ok(());
        }
        if term.contains_variable(&var) {
            return Err(UnificationFailure::OccursCheck {
                variable: var,
                term,
            });
        }

        let one = OneVarSubst::new(var, term);
        for bound in self.subst.values_mut() {
            let (t, changed) = bound.substituted(&one);
            if changed {
                *bound = t
            }
        }
        let OneVarSubst { var, term } = one;
        self.subst.insert(var, term);
        Ok(())
    }

    /// [bind](VarSubst::bind)s every binding of `other`
    ///
    /// On failure `self` may hold part of `other`.
    pub fn merge<S: Substitution + ?Sized>(&mut self, other: &S) -> Result<(), UnificationFailure> {
        for (var, term) in other.iter() {
            self.bind(var.clone(), term.clone())?
        }
        Ok(())
    }

    /// Merges two substitutions, folding the smaller one into the larger one
    pub fn and(self, other: Self) -> Result<Self, UnificationFailure> {
        let (small, mut big) = shortest_first(self, other, VarSubst::len);
        big.merge(&small)?;
        Ok(big)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.subst.keys()
    }

    pub fn remove(&mut self, var: &Variable) -> Option<Term> {
        self.subst.remove(var)
    }
}

impl Substitution for VarSubst {
    fn get(&self, var: &Variable) -> Option<&Term> {
        self.subst.get(var)
    }

    fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.subst.iter()
    }
}

impl BitAnd for VarSubst {
    type Output = Result<VarSubst, UnificationFailure>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl FromIterator<(Variable, Term)> for VarSubst {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        Self {
            subst: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(Variable, Term); N]> for VarSubst {
    fn from(value: [(Variable, Term); N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<Vec<(Variable, Term)>> for VarSubst {
    fn from(value: Vec<(Variable, Term)>) -> Self {
        value.into_iter().collect()
    }
}

impl From<VarSubst> for Vec<(Variable, Term)> {
    fn from(value: VarSubst) -> Self {
        value.subst.into_iter().sorted().collect()
    }
}

impl From<OneVarSubst> for VarSubst {
    fn from(OneVarSubst { var, term }: OneVarSubst) -> Self {
        [(var, term)].into()
    }
}

impl VarSubst {
    /// Builds a substitution from raw bindings through [VarSubst::bind]
    pub fn try_from_bindings(
        bindings: implvec!((Variable, Term)),
    ) -> Result<Self, UnificationFailure> {
        let mut subst = Self::new();
        for (var, term) in bindings {
            subst.bind(var, term)?
        }
        Ok(subst)
    }
}

impl fmt::Display for VarSubst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self
            .subst
            .iter()
            .sorted()
            .map(|(v, t)| format!("{v} ↦ {t}"))
            .join(", ");
        write!(f, "{{{content}}}")
    }
}
