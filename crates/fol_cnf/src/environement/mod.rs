#[allow(clippy::module_inception)]
mod environement;
pub use environement::{
    Environement, EnvironementBuilder, EnvironementBuilderError, Flags, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_SIZE, DEFAULT_SKOLEM_PREFIX,
};
