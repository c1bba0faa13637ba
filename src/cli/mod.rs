pub mod convert;
pub mod deposit;
pub mod inflation;
pub mod quotes;
pub mod rates;
pub mod setup;
pub mod ui;
