mod iterator;
pub use iterator::Subformulas;

#[macro_use]
mod macros;

mod operands;
pub use operands::{EmptyOperands, Operands};

mod predicate;
pub use predicate::Predicate;

#[allow(clippy::module_inception)]
mod sentence;
pub use sentence::{
    ands, exists, existss, forall, foralls, iff, implies, not, ors, predicate, ASentence, Sentence,
};
