use std::fmt;

use bitflags::bitflags;
use derivative::Derivative;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BaseError, Result},
    formula::{
        sentence::{ors, Sentence},
        variable::Variable,
    },
};

use super::Literal;

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClauseFlags: u8 {
        /// literals are sorted and without duplicates
        const ORDERED = 1 << 0;
    }
}

/// A disjunction of [Literal]s
#[derive(Derivative, Clone, Default, Serialize, Deserialize)]
#[derivative(Debug, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<Literal>,
    #[serde(skip)]
    #[derivative(PartialEq = "ignore", Hash = "ignore", Debug = "ignore")]
    flags: ClauseFlags,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals,
            ..Default::default()
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.flags.contains(ClauseFlags::ORDERED)
    }

    pub fn order(&mut self) {
        if !self.is_ordered() {
            self.literals.sort();
            self.literals.dedup();
            self.flags |= ClauseFlags::ORDERED
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause, i.e. `⊥`
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Contains a literal and its complement
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| l.is_negated() && self.literals.contains(&l.complement()))
    }

    pub fn variables_iter(&self) -> impl Iterator<Item = &Variable> {
        self.literals.iter().flat_map(Literal::variables_iter)
    }

    // clauses rarely have many variables, a linear search is enough
    pub fn variables_unique(&self) -> Vec<Variable> {
        let mut vec = Vec::new();
        for v in self.variables_iter() {
            if !vec.contains(v) {
                vec.push(v.clone())
            }
        }
        vec
    }

    pub fn to_sentence(&self) -> Option<Sentence> {
        let literals = self.literals.iter().map(Literal::to_sentence);
        ors(literals)
            .ok()
            .map(|s| s.cleaned())
    }
}

impl TryFrom<&Sentence> for Clause {
    type Error = BaseError;

    fn try_from(value: &Sentence) -> std::result::Result<Self, Self::Error> {
        let literals = match value {
            Sentence::Or(ops) => ops
                .iter()
                .map(Literal::try_from)
                .collect::<std::result::Result<_, _>>()?,
            _ => vec![Literal::try_from(value)?],
        };
        let mut clause = Clause::new(literals);
        clause.order();
        Ok(clause)
    }
}

/// Splits a sentence in conjunctive normal form into its clauses
pub fn clauses(sentence: &Sentence) -> Result<Vec<Clause>> {
    let clauses = match sentence {
        Sentence::And(ops) => ops
            .iter()
            .map(Clause::try_from)
            .collect::<std::result::Result<_, _>>()?,
        _ => vec![Clause::try_from(sentence)?],
    };
    Ok(clauses)
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            write!(f, "{}", self.literals.iter().join(" ∨ "))
        }
    }
}
