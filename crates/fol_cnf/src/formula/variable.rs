use std::{
    fmt,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use derivative::Derivative;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::term::Term;

/// Alias for the identity of variables
#[allow(non_camel_case_types)]
pub type uvar = u32;

/// Next free variable id, shared by the whole process
static NEXT_VARIABLE: AtomicU32 = AtomicU32::new(0);

/// An id that can't be given back, [uvar::MAX] would leave no room for
/// fresh ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the id {0} is reserved")]
pub struct ReservedId(pub uvar);

/// Makes sure the fresh ids drawn from `counter` never reach `id`
pub(crate) fn reserve_id(counter: &AtomicU32, id: uvar) -> Result<(), ReservedId> {
    if id == uvar::MAX {
        return Err(ReservedId(id));
    }
    counter.fetch_max(id + 1, Ordering::Relaxed);
    Ok(())
}

/// A variable
///
/// The name is only there for humans: two [Variable]s are the same only when
/// they come from the same call to [Variable::new] (or are clones of it).
#[derive(Derivative, Clone, Serialize, Deserialize)]
#[derivative(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "RawVariable", into = "RawVariable")]
pub struct Variable {
    id: uvar,
    #[derivative(
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore",
        Hash = "ignore"
    )]
    name: Arc<str>,
}

impl Variable {
    /// A fresh variable, different from every other one
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_VARIABLE.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    /// A fresh variable displayed like `self`
    pub fn renamed(&self) -> Self {
        Self::new(Arc::clone(&self.name))
    }

    /// Rebuild a variable with a known id (e.g., after deserialisation)
    ///
    /// Later calls to [Variable::new] are guaranteed not to reuse `id`.
    pub fn with_id(id: uvar, name: impl Into<Arc<str>>) -> Result<Self, ReservedId> {
        reserve_id(&NEXT_VARIABLE, id)?;
        Ok(Self {
            id,
            name: name.into(),
        })
    }

    pub fn id(&self) -> uvar {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_term(self) -> Term {
        Term::Var(self)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Serialize, Deserialize)]
struct RawVariable {
    id: uvar,
    name: Arc<str>,
}

impl TryFrom<RawVariable> for Variable {
    type Error = ReservedId;

    fn try_from(RawVariable { id, name }: RawVariable) -> Result<Self, Self::Error> {
        Variable::with_id(id, name)
    }
}

impl From<Variable> for RawVariable {
    fn from(Variable { id, name }: Variable) -> Self {
        RawVariable { id, name }
    }
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use super::{uvar, ReservedId, Variable};

    #[test]
    fn identity_not_name() {
        let x1 = Variable::new("x");
        let x2 = Variable::new("x");
        assert_ne!(x1, x2);
        assert_eq!(x1, x1.clone());
        assert_eq!(x1.to_string(), x2.to_string());

        let set: HashSet<_> = [x1.clone(), x2, x1].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn renamed_is_fresh() {
        let x = Variable::new("x");
        let y = x.renamed();
        assert_ne!(x, y);
        assert_eq!(y.name(), "x");
    }

    #[test]
    fn serde_keeps_identity() {
        let x = Variable::new("x");
        let json = serde_json::to_string(&x).unwrap();
        let back: Variable = serde_json::from_str(&json).unwrap();
        assert_eq!(x, back);
        assert_eq!(back.name(), "x");
    }

    #[test]
    fn known_ids_are_never_reused() {
        let far = Variable::new("x").id() + 10_000;
        let big = Variable::with_id(far, "far").unwrap();
        let fresh = Variable::new("fresh");
        assert!(fresh.id() > big.id());
    }

    #[test]
    fn last_id_is_reserved() {
        assert_eq!(
            Variable::with_id(uvar::MAX, "x").unwrap_err(),
            ReservedId(uvar::MAX)
        );
        let json = format!(r#"{{"id":{},"name":"x"}}"#, uvar::MAX);
        assert!(serde_json::from_str::<Variable>(&json).is_err());

        let x = Variable::new("x");
        assert!(Variable::new("y").id() > x.id());
    }
}
