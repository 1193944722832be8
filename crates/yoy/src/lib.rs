//! `discountlens-yoy`: year-on-year discount aggregation engine.
//!
//! Pure engine crate: receives pre-loaded transactions, returns twelve month
//! rows plus a totals row comparing a baseline year with the current year.
//! No CLI dependencies; file loading is limited to parsing strings the
//! caller has already read.

pub mod bucket;
pub mod change;
pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod model;
pub mod rows;

pub use config::{ColumnMapping, YoyConfig};
pub use engine::{load_transactions, run, InputFormat};
pub use error::YoyError;
pub use model::{Changes, MonthRow, TotalsRow, Transaction, YearMetrics, YoyReport, YoySummary, TOTAL_LABEL};
