//! Index and rate calculation engine plus the abstractions around it

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod period;
pub mod quote;
pub mod series;
pub mod source;
pub mod yields;

// Re-export main types for cleaner imports
pub use aggregate::{InflationSummary, Selector, compounded_change, compounded_change_by};
pub use convert::{Conversion, convert};
pub use error::{DataUnavailable, EngineError};
pub use period::PeriodLabel;
pub use quote::{CurrencyQuote, QuoteBoard, RateQuote, RateSnapshot};
pub use series::{IndexedObservation, IndexedSeries, Observation, RawObservation, normalize};
pub use source::{CurrencySource, InflationSource, RateSource};
pub use yields::project_yield;
