use std::sync::Arc;

use bitflags::bitflags;
use derive_builder::Builder;
use log::trace;

use crate::{
    error::{BaseError, Result},
    formula::sentence::Sentence,
};

pub const DEFAULT_MAX_DEPTH: u32 = 1 << 7;
pub const DEFAULT_MAX_SIZE: usize = 1 << 20;
pub const DEFAULT_SKOLEM_PREFIX: &str = "sk";

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    pub struct Flags: u8 {
        /// reject sentences over `max_depth` or `max_size`
        const CHECK_LIMITS =    1 << 0;
        /// rename binders instead of failing on capture during skolemisation
        const RENAME_BINDERS =  1 << 1;
        /// check the output of every stage of the pipeline
        const VERIFY =          1 << 2;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::CHECK_LIMITS
    }
}

/// Settings of the cnf pipeline
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Environement {
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    max_depth: u32,
    #[builder(default = "DEFAULT_MAX_SIZE")]
    max_size: usize,
    #[builder(setter(into), default = "DEFAULT_SKOLEM_PREFIX.into()")]
    skolem_prefix: Arc<str>,
    #[builder(default)]
    flags: Flags,
}

impl EnvironementBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("`max_depth` must be positive".into());
        }
        if self.max_size == Some(0) {
            return Err("`max_size` must be positive".into());
        }
        if matches!(&self.skolem_prefix, Some(prefix) if prefix.is_empty()) {
            return Err("the skolem prefix can't be empty".into());
        }
        Ok(())
    }
}

impl Default for Environement {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            skolem_prefix: DEFAULT_SKOLEM_PREFIX.into(),
            flags: Default::default(),
        }
    }
}

impl Environement {
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn skolem_prefix(&self) -> &Arc<str> {
        &self.skolem_prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_checking_limits(&self) -> bool {
        self.flags.contains(Flags::CHECK_LIMITS)
    }

    pub fn is_renaming_binders(&self) -> bool {
        self.flags.contains(Flags::RENAME_BINDERS)
    }

    pub fn is_verifying(&self) -> bool {
        self.flags.contains(Flags::VERIFY)
    }

    /// Fails as soon as the walk goes deeper than `max_depth` or sees more
    /// than `max_size` nodes
    pub fn check_limits(&self, sentence: &Sentence) -> Result<()> {
        if !self.is_checking_limits() {
            return Ok(());
        }
        let mut size = 0;
        for (depth, _) in sentence.subformulas_with_depth() {
            size += 1;
            if depth >= self.max_depth {
                return Err(BaseError::TooDeep {
                    depth: depth + 1,
                    limit: self.max_depth,
                }
                .into());
            }
            self.check_size(size)?;
        }
        trace!("within limits: size {size}");
        Ok(())
    }

    pub fn check_size(&self, size: usize) -> Result<()> {
        if self.is_checking_limits() && size > self.max_size {
            Err(BaseError::TooLarge {
                size,
                limit: self.max_size,
            }
            .into())
        } else {
            Ok(())
        }
    }

    /// With [Flags::VERIFY], checks the output of `stage`
    pub fn verify(
        &self,
        sentence: &Sentence,
        check: impl FnOnce(&Sentence) -> bool,
        stage: &'static str,
    ) -> Result<()> {
        if self.is_verifying() && !check(sentence) {
            Err(BaseError::Postcondition {
                stage,
                sentence: sentence.to_string(),
            }
            .into())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::BaseError,
        formula::{
            sentence::{not, predicate, Sentence},
            term::Term,
        },
    };

    use super::{Environement, EnvironementBuilder, Flags, DEFAULT_SKOLEM_PREFIX};

    fn p(name: &str) -> Sentence {
        predicate::<Term>(name, [])
    }

    #[test]
    fn builder_defaults() {
        let env = EnvironementBuilder::default().build().unwrap();
        assert_eq!(env, Environement::default());
        assert_eq!(env.skolem_prefix().as_ref(), DEFAULT_SKOLEM_PREFIX);
        assert!(env.is_checking_limits());
        assert!(!env.is_renaming_binders() && !env.is_verifying());
    }

    #[test]
    fn builder_validation() {
        assert!(EnvironementBuilder::default().max_depth(0).build().is_err());
        assert!(EnvironementBuilder::default().max_size(0).build().is_err());
        assert!(EnvironementBuilder::default()
            .skolem_prefix("")
            .build()
            .is_err());
        let env = EnvironementBuilder::default()
            .skolem_prefix("f")
            .flags(Flags::VERIFY)
            .build()
            .unwrap();
        assert_eq!(env.skolem_prefix().as_ref(), "f");
        assert!(env.is_verifying() && !env.is_checking_limits());
    }

    #[test]
    fn limits() {
        let s = not(not(p("P") & p("Q")));
        // ¬¬(P ∧ Q): 5 nodes, 4 levels
        let env = EnvironementBuilder::default().max_depth(4).build().unwrap();
        assert!(env.check_limits(&s).is_ok());
        let env = EnvironementBuilder::default().max_depth(3).build().unwrap();
        let err = env.check_limits(&s).unwrap_err();
        assert!(matches!(
            err.base(),
            BaseError::TooDeep { depth: 4, limit: 3 }
        ));

        let env = EnvironementBuilder::default().max_size(4).build().unwrap();
        assert!(matches!(
            env.check_limits(&s).unwrap_err().base(),
            BaseError::TooLarge { .. }
        ));
    }

    #[test]
    fn verification() {
        let env = EnvironementBuilder::default()
            .flags(Flags::VERIFY)
            .build()
            .unwrap();
        assert!(env.verify(&p("P"), Sentence::is_cnf, "test").is_ok());
        assert!(env
            .verify(&(p("P") >> p("Q")), Sentence::is_cnf, "test")
            .is_err());
        assert!(Environement::default()
            .verify(&(p("P") >> p("Q")), Sentence::is_cnf, "test")
            .is_ok());
    }
}
