use crate::{
    environement::EnvironementBuilderError,
    formula::{
        manipulation::{CaptureError, UnificationFailure},
        sentence::EmptyOperands,
    },
};

mod error;
pub use error::Error;

mod inner_error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BaseError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Unification(#[from] UnificationFailure),
    #[error(transparent)]
    EmptyOperands(#[from] EmptyOperands),

    #[error("sentence too deep: {depth} levels, at most {limit} allowed")]
    TooDeep { depth: u32, limit: u32 },
    #[error("sentence too large: {size} nodes, at most {limit} allowed")]
    TooLarge { size: usize, limit: usize },
    #[error("{stage} expects a sentence in {expected}")]
    Precondition {
        stage: &'static str,
        expected: &'static str,
    },
    #[error("{stage} produced an ill-formed sentence: {sentence}")]
    Postcondition {
        stage: &'static str,
        sentence: String,
    },
    #[error("distribution stopped making progress, {remaining} disjunctions over conjunctions left")]
    DistributionStalled { remaining: usize },
    #[error("not in clausal form: {}", .0)]
    NotClausal(String),

    #[error(transparent)]
    Config(#[from] EnvironementBuilderError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("reason: {}", .0)]
    Message(String),
}

impl<'a> From<&'a str> for BaseError {
    fn from(value: &'a str) -> Self {
        Self::Message(value.into())
    }
}

impl From<String> for BaseError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

/// `From<$t> for Error` going through [BaseError]
macro_rules! into_error {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Error {
                fn from(value: $t) -> Self {
                    Error::new(BaseError::from(value))
                }
            }
        )*
    };
}

into_error!(
    CaptureError,
    UnificationFailure,
    EmptyOperands,
    EnvironementBuilderError,
    std::io::Error,
    serde_json::Error,
    &str,
    String,
);
