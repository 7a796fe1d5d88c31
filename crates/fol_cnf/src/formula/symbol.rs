use std::{
    fmt,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};

use super::variable::{reserve_id, uvar, ReservedId};

/// Next free skolem id, shared by the whole process
static NEXT_SKOLEM: AtomicU32 = AtomicU32::new(0);

/// The head symbol of a [Function](super::term::Function)
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub enum Symbol {
    /// Symbols coming from the user
    Named(Arc<str>),
    /// Symbols introduced by skolemisation
    Skolem(Skolem),
}

/// A skolem symbol
///
/// It is identified by its `id` which is unique over the process. The prefix
/// is only used when printing.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSkolem", into = "RawSkolem")]
pub struct Skolem {
    id: uvar,
    prefix: Arc<str>,
}

impl Skolem {
    pub fn fresh(prefix: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SKOLEM.fetch_add(1, Ordering::Relaxed),
            prefix: prefix.into(),
        }
    }

    pub fn id(&self) -> uvar {
        self.id
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Symbol {
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self::Named(name.into())
    }

    pub fn fresh_skolem(prefix: impl Into<Arc<str>>) -> Self {
        Self::Skolem(Skolem::fresh(prefix))
    }

    /// Returns `true` if the symbol is [`Skolem`].
    ///
    /// [`Skolem`]: Symbol::Skolem
    #[must_use]
    pub fn is_skolem(&self) -> bool {
        matches!(self, Self::Skolem(..))
    }

    #[must_use]
    pub fn as_skolem(&self) -> Option<&Skolem> {
        if let Self::Skolem(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl fmt::Display for Skolem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Named(name) => name.fmt(f),
            Symbol::Skolem(sk) => sk.fmt(f),
        }
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::named(value)
    }
}

impl From<Arc<str>> for Symbol {
    fn from(value: Arc<str>) -> Self {
        Self::Named(value)
    }
}

impl From<Skolem> for Symbol {
    fn from(value: Skolem) -> Self {
        Self::Skolem(value)
    }
}

#[derive(Serialize, Deserialize)]
struct RawSkolem {
    id: uvar,
    prefix: Arc<str>,
}

impl TryFrom<RawSkolem> for Skolem {
    type Error = ReservedId;

    fn try_from(RawSkolem { id, prefix }: RawSkolem) -> Result<Self, Self::Error> {
        reserve_id(&NEXT_SKOLEM, id)?;
        Ok(Skolem { id, prefix })
    }
}

impl From<Skolem> for RawSkolem {
    fn from(Skolem { id, prefix }: Skolem) -> Self {
        RawSkolem { id, prefix }
    }
}
