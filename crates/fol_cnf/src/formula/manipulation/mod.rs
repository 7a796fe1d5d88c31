mod substitution;
pub use substitution::{CaptureError, OneVarSubst, Substitution, VarSubst};

mod unifier;
pub use unifier::UnificationFailure;
