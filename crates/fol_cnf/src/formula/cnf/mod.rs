//! Conversion to conjunctive normal form
//!
//! The pipeline is [simplified](Sentence::simplified) →
//! [negated_inwards](Sentence::negated_inwards) → [Skolemiser] →
//! [cleaned](Sentence::cleaned) → [distributed](Sentence::distributed).
use log::{debug, trace};

use crate::{environement::Environement, error::Result};

use super::sentence::Sentence;

mod clause;
pub use clause::{clauses, Clause, ClauseFlags};

mod literal;
pub use literal::Literal;

mod clean;
mod distribute;
mod negation;
mod simplify;

mod skolem;
pub use skolem::Skolemiser;

impl Sentence {
    /// Conjunctive normal form with the default [Environement]
    pub fn cnf(&self) -> Result<Sentence> {
        self.cnf_with(&Environement::default())
    }

    pub fn cnf_with(&self, env: &Environement) -> Result<Sentence> {
        env.check_limits(self)?;
        trace!("cnf of {self}");

        let simplified = self.simplified();
        env.verify(&simplified, Sentence::is_simplified, "simplification")?;
        // `⇔` unfolds into deeper and larger sentences
        env.check_limits(&simplified)?;
        trace!("simplified: {simplified}");

        let nnf = simplified.negated_inwards(false);
        env.verify(&nnf, Sentence::is_nnf, "negation")?;
        trace!("nnf: {nnf}");

        let skolemised = Skolemiser::new(env).skolemise(&nnf)?;
        env.verify(&skolemised, Sentence::is_quantifier_free, "skolemisation")?;
        trace!("skolemised: {skolemised}");

        let cleaned = skolemised.cleaned();
        trace!("cleaned: {cleaned}");

        let cnf = cleaned.distributed_with(env)?;
        env.verify(&cnf, Sentence::is_cnf, "distribution")?;
        debug!("cnf of size {} (from {})", cnf.size(), self.size());
        Ok(cnf)
    }

    /// [Sentence::cnf_with] split into [Clause]s
    pub fn to_clauses(&self, env: &Environement) -> Result<Vec<Clause>> {
        clauses(&self.cnf_with(env)?)
    }
}
