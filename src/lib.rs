//! NWIS RDB Library
//!
//! A Rust library for turning USGS National Water Information System (NWIS)
//! RDB responses into typed, wide, time-indexed tables.
//!
//! This library provides tools for:
//! - Normalizing tab-delimited RDB text into a typed long table
//! - Pivoting instantaneous and daily values into one column per site and parameter
//! - Reshaping daily, monthly and annual statistics on a synthetic date index
//! - Localizing site-reported timestamps with a fail-open timezone lookup
//! - Retrieving NWIS services concurrently over HTTP
//!
//! ## Example
//!
//! ```rust
//! use nwis_rdb::rdb::parse_rdb;
//! use nwis_rdb::reshape::{TimeSeriesOptions, reshape_time_series};
//!
//! let text = "#\n\
//! agency_cd\tsite_no\tdatetime\ttz_cd\t69928_00060\t69928_00060_cd\n\
//! 5s\t15s\t20d\t6s\t14n\t10s\n\
//! USGS\t01646500\t2023-06-01 00:00\tEDT\t10500\tP\n";
//!
//! let table = parse_rdb(text).unwrap();
//! let wide = reshape_time_series(&table, &TimeSeriesOptions::default()).unwrap();
//! assert_eq!(wide.column_names(), vec!["USGS_01646500_69928_00060"]);
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod models;
pub mod rdb;
pub mod reshape;

// Re-export commonly used types
pub use client::{HttpSource, NwisClient, RdbSource, SiteQuery};
pub use config::NwisConfig;
pub use error::{NwisError, Result};
pub use models::{LongTable, QueryParams, StatDate, Timestamp, WideTable};
pub use rdb::{RdbResponse, parse_rdb, read_rdb};
pub use reshape::{StatOptions, TimeSeriesOptions};
