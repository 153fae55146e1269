//! Long-to-wide reshapers
//!
//! Each NWIS service has its own reshaper, all built on one pivot:
//!
//! - [`timeseries`] - instantaneous/daily values and groundwater levels,
//!   indexed by (optionally localized) timestamp
//! - [`statistics`] - percentile and mean statistics, indexed by a
//!   synthetic date that depends on the report type
//! - [`records`] - measurements and peaks, indexed by date without a pivot
//! - [`pivot`] / [`naming`] - the shared pivot and column naming

pub mod naming;
pub mod pivot;
pub mod records;
pub mod statistics;
pub mod timeseries;

#[cfg(test)]
mod tests;

pub use naming::{ColumnKey, KeyPart, SeriesKey};
pub use records::index_records;
pub use statistics::{
    MissingData, ResolvedStatOptions, StatOptions, StatReportType, StatYearType,
    reshape_statistics,
};
pub use timeseries::{TimeSeriesOptions, reshape_groundwater_levels, reshape_time_series};
