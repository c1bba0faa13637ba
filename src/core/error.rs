//! Error taxonomy shared by the calculation engine and the data adapters

use crate::core::period::PeriodLabel;
use thiserror::Error;

/// Errors raised by the calculation engine for caller mistakes.
///
/// These are never absorbed: a caller passing a period that is not in the
/// series, or a nonsensical rate, must be able to tell that apart from an
/// empty result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("period {0} not found in series")]
    PeriodNotFound(PeriodLabel),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A data source could not produce usable data.
///
/// Adapters return this instead of an empty payload so the caller decides
/// whether to degrade to an empty state.
#[derive(Debug, Clone, Error)]
#[error("{source_name} unavailable: {reason}")]
pub struct DataUnavailable {
    pub source_name: String,
    pub reason: String,
}

impl DataUnavailable {
    pub fn new(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
