use std::{ops::Deref, sync::Arc};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utils::implvec;

use super::Sentence;

/// Operands of an n-ary connective
///
/// Always sorted, deduplicated and non-empty so that two sets holding the
/// same sentences are equal whatever the order they were given in.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sentence>", into = "Vec<Sentence>")]
pub struct Operands(Arc<[Sentence]>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Default)]
#[error("a connective needs at least one operand")]
pub struct EmptyOperands;

impl Operands {
    pub fn new(operands: implvec!(Sentence)) -> Result<Self, EmptyOperands> {
        let operands = canonical(operands);
        if operands.is_empty() {
            Err(EmptyOperands)
        } else {
            Ok(Self(operands.into()))
        }
    }

    /// Only for iterators known to be non-empty
    pub(crate) fn new_unchecked(operands: implvec!(Sentence)) -> Self {
        let operands = canonical(operands);
        debug_assert!(!operands.is_empty());
        Self(operands.into())
    }

    pub fn pair(a: Sentence, b: Sentence) -> Self {
        Self::new_unchecked([a, b])
    }

    pub fn singleton(a: Sentence) -> Self {
        Self(Arc::new([a]))
    }

    pub fn as_slice(&self) -> &[Sentence] {
        &self.0
    }

    /// The only operand, if there is only one
    pub fn single(&self) -> Option<&Sentence> {
        match self.as_slice() {
            [s] => Some(s),
            _ => None,
        }
    }

    pub fn map(&self, f: impl FnMut(&Sentence) -> Sentence) -> Self {
        Self::new_unchecked(self.iter().map(f))
    }

    pub fn try_map<E>(&self, f: impl FnMut(&Sentence) -> Result<Sentence, E>) -> Result<Self, E> {
        let operands = self.iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Self::new_unchecked(operands))
    }

    /// Splices the operands of the operands `inner` selects
    ///
    /// `inner` is meant to pick nested nodes of the same connective, their
    /// operands are already flat.
    pub fn flattened(&self, inner: impl Fn(&Sentence) -> Option<&Operands>) -> Self {
        if self.iter().all(|s| inner(s).is_none()) {
            return self.clone();
        }
        Self::new_unchecked(
            self.iter()
                .flat_map(|s| match inner(s) {
                    Some(ops) => ops.as_slice(),
                    None => std::slice::from_ref(s),
                })
                .cloned(),
        )
    }

    /// Same operands with `old` swapped for `new`
    pub fn replaced(&self, old: &Sentence, new: Sentence) -> Self {
        Self::new_unchecked(
            self.iter()
                .filter(|s| *s != old)
                .cloned()
                .chain([new]),
        )
    }
}

fn canonical(operands: implvec!(Sentence)) -> Vec<Sentence> {
    operands.into_iter().sorted().dedup().collect()
}

impl Deref for Operands {
    type Target = [Sentence];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Sentence;

    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Sentence>> for Operands {
    type Error = EmptyOperands;

    fn try_from(value: Vec<Sentence>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Operands> for Vec<Sentence> {
    fn from(value: Operands) -> Self {
        value.0.to_vec()
    }
}
