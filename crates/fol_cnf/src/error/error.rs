use std::{
    backtrace::Backtrace,
    fmt::{self, Display},
};

use super::{inner_error::InnerError, BaseError};

/// The error type of the crate
///
/// A boxed [BaseError] along with a backtrace when `RUST_BACKTRACE` asks for
/// one.
#[derive(Debug)]
pub struct Error(Box<InnerError>);

impl Error {
    pub fn new(error: BaseError) -> Self {
        Self(Box::new(InnerError::new(error)))
    }

    pub fn base(&self) -> &BaseError {
        &self.0.error
    }

    pub fn into_base(self) -> BaseError {
        self.0.error
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.0.backtrace.as_ref()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.error, f)?;
        match &self.0.backtrace {
            Some(bt) => write!(f, "\nbacktrace:\n{}", bt),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0.error)
    }
}

impl From<BaseError> for Error {
    fn from(value: BaseError) -> Self {
        Self::new(value)
    }
}
