use std::{fmt, sync::Arc};

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::formula::{
    manipulation::Substitution,
    term::{Function, Term},
    variable::Variable,
};

/// An atomic formula `P(t1, ..., tn)`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct Predicate {
    name: Arc<str>,
    args: Arc<[Term]>,
}

impl Predicate {
    pub fn new<T>(name: impl Into<Arc<str>>, args: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Term>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map_into().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn has_free_variable(&self, var: &Variable) -> bool {
        self.args.iter().any(|arg| arg.contains_variable(var))
    }

    /// Whether `term` occurs somewhere in the arguments
    pub fn contains_term(&self, term: &Term) -> bool {
        self.args.iter().any(|arg| arg.contains(term))
    }

    pub fn substitute<S: Substitution + ?Sized>(&self, subst: &S) -> Self {
        let args = self
            .args
            .iter()
            .map(|arg| match arg {
                Term::Var(v) => subst.lookup(v),
                Term::Fun(f) => {
                    let (f, _): (Function, _) = f.substituted(subst);
                    Term::Fun(f)
                }
            })
            .collect();
        Self {
            name: Arc::clone(&self.name),
            args,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.args.iter().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{manipulation::VarSubst, term::Term, variable::Variable};

    use super::Predicate;

    #[test]
    fn substitute_reaches_nested_variables() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let p = Predicate::new("P", [Term::from(&x), Term::fun("f", [&y])]);
        let subst: VarSubst = [
            (x.clone(), Term::constant("a")),
            (y.clone(), Term::constant("b")),
        ]
        .into();
        assert_eq!(
            p.substitute(&subst),
            Predicate::new(
                "P",
                [Term::constant("a"), Term::fun("f", [Term::constant("b")])]
            )
        );
        assert_eq!(p.to_string(), "P(x, f(y))");
        assert!(p.contains_term(&Term::from(&y)));
        assert!(p.has_free_variable(&y));
    }

    #[test]
    fn nullary_display() {
        assert_eq!(Predicate::new::<Term>("Rain", []).to_string(), "Rain");
    }
}
