use std::fmt::Display;

use serde::Serialize;

use crate::formula::{cnf::Clause, manipulation::VarSubst, sentence::Sentence};

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[non_exhaustive]
pub enum Return {
    Cnf { cnf: Sentence, clauses: Vec<Clause> },
    Unifier(VarSubst),
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Return::Cnf { cnf, clauses } => {
                write!(f, "cnf: {cnf}")?;
                clauses
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i + 1, c))
                    .try_for_each(|(i, c)| write!(f, "\n\t- clause {i}: {c}"))
            }
            Return::Unifier(subst) => write!(f, "unifier: {subst}"),
        }
    }
}
