use std::backtrace::{Backtrace, BacktraceStatus};

use super::BaseError;

#[derive(Debug)]
pub struct InnerError {
    pub error: BaseError,
    pub backtrace: Option<Backtrace>,
}

impl InnerError {
    pub fn new(error: BaseError) -> Self {
        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace),
            _ => None,
        };
        Self { error, backtrace }
    }
}
