use std::{fmt, sync::Arc};

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{manipulation::Substitution, symbol::Symbol, variable::Variable};

/// A first-order term
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub enum Term {
    Var(Variable),
    Fun(Function),
}

/// A function symbol applied to its arguments
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct Function {
    symbol: Symbol,
    args: Arc<[Term]>,
}

impl Function {
    pub fn new<T>(symbol: impl Into<Symbol>, args: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Term>,
    {
        Self {
            symbol: symbol.into(),
            args: args.into_iter().map_into().collect(),
        }
    }

    pub fn constant(symbol: impl Into<Symbol>) -> Self {
        Self::new(symbol, std::iter::empty::<Term>())
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn free_variables(&self) -> HashSet<Variable> {
        let mut set = HashSet::new();
        self.collect_free_variables(&mut set);
        set
    }

    pub(crate) fn collect_free_variables(&self, set: &mut HashSet<Variable>) {
        for arg in self.args.iter() {
            arg.collect_free_variables(set)
        }
    }

    /// Replaces every variable bound in `subst`. The boolean tells whether
    /// anything was replaced at all.
    pub fn substituted<S: Substitution + ?Sized>(&self, subst: &S) -> (Self, bool) {
        let mut changed = false;
        let args: Arc<[Term]> = self
            .args
            .iter()
            .map(|arg| {
                let (arg, c) = arg.substituted(subst);
                changed |= c;
                arg
            })
            .collect();
        if changed {
            let symbol = self.symbol.clone();
            (Self { symbol, args }, true)
        } else {
            (self.clone(), false)
        }
    }
}

impl Term {
    pub fn fun<T>(symbol: impl Into<Symbol>, args: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Term>,
    {
        Self::Fun(Function::new(symbol, args))
    }

    pub fn constant(symbol: impl Into<Symbol>) -> Self {
        Self::Fun(Function::constant(symbol))
    }

    pub fn free_variables(&self) -> HashSet<Variable> {
        let mut set = HashSet::new();
        self.collect_free_variables(&mut set);
        set
    }

    pub(crate) fn collect_free_variables(&self, set: &mut HashSet<Variable>) {
        match self {
            Term::Var(v) => {
                set.insert(v.clone());
            }
            Term::Fun(f) => f.collect_free_variables(set),
        }
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Var(v) => v == var,
            Term::Fun(f) => f.args().iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Structural containment, `self` contains itself
    pub fn contains(&self, term: &Term) -> bool {
        self == term
            || match self {
                Term::Var(_) => false,
                Term::Fun(f) => f.args().iter().any(|arg| arg.contains(term)),
            }
    }

    /// See [Function::substituted]
    pub fn substituted<S: Substitution + ?Sized>(&self, subst: &S) -> (Self, bool) {
        match self {
            Term::Var(v) => match subst.get(v) {
                Some(t) => (t.clone(), true),
                None => (self.clone(), false),
            },
            Term::Fun(f) => {
                let (f, changed) = f.substituted(subst);
                (Term::Fun(f), changed)
            }
        }
    }

    /// Number of symbols and variables
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::Fun(f) => 1 + f.args().iter().map(Term::size).sum::<usize>(),
        }
    }

    #[must_use]
    pub fn as_var(&self) -> Option<&Variable> {
        if let Self::Var(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<Variable> for Term {
    fn from(value: Variable) -> Self {
        Term::Var(value)
    }
}

impl From<&Variable> for Term {
    fn from(value: &Variable) -> Self {
        Term::Var(value.clone())
    }
}

impl From<Function> for Term {
    fn from(value: Function) -> Self {
        Term::Fun(value)
    }
}

impl From<&Term> for Term {
    fn from(value: &Term) -> Self {
        value.clone()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.symbol)
        } else {
            write!(f, "{}({})", self.symbol, self.args.iter().join(", "))
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(v) => v.fmt(f),
            Term::Fun(fun) => fun.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{manipulation::OneVarSubst, variable::Variable};

    use super::Term;

    #[test]
    fn free_variables_go_through_functions() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let t = Term::fun("f", [Term::from(&x), Term::fun("g", [&y]), Term::from(&x)]);
        let fv = t.free_variables();
        assert_eq!(fv.len(), 2);
        assert!(fv.contains(&x) && fv.contains(&y));
        assert!(Term::constant("a").free_variables().is_empty());
    }

    #[test]
    fn substituted_reports_changes() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let a = Term::constant("a");
        let t = Term::fun("f", [Term::from(&x), Term::fun("g", [&x])]);
        let subst = OneVarSubst::new(x.clone(), a.clone());

        let (result, changed) = t.substituted(&subst);
        assert!(changed);
        assert_eq!(result, Term::fun("f", [a.clone(), Term::fun("g", [a])]));

        let u = Term::fun("f", [&y]);
        let (same, changed) = u.substituted(&subst);
        assert!(!changed);
        assert_eq!(same, u);
    }

    #[test]
    fn containment() {
        let x = Variable::new("x");
        let gx = Term::fun("g", [&x]);
        let t = Term::fun("f", [gx.clone(), Term::constant("a")]);
        assert!(t.contains(&gx));
        assert!(t.contains(&t));
        assert!(t.contains(&x.clone().into()));
        assert!(!t.contains(&Term::constant("b")));
        assert!(t.contains_variable(&x));
        assert_eq!(t.size(), 4);
    }

    #[test]
    fn display() {
        let x = Variable::new("x");
        let t = Term::fun("f", [Term::from(&x), Term::constant("a")]);
        assert_eq!(t.to_string(), "f(x, a)");
    }
}
