//! RDB table normalizer
//!
//! Turns the tab-delimited RDB text returned by the NWIS services into a
//! typed [`LongTable`](crate::models::LongTable). The normalizer is a pure
//! transform: bodies are fetched elsewhere and handed over as text.
//!
//! ## Architecture
//!
//! - [`reader`] - Service error detection, comment stripping, header and
//!   row splitting, header-artifact filtering
//! - [`inference`] - Per-column type inference and cell conversion
//! - [`stats`] - Parse statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use nwis_rdb::rdb::parse_rdb;
//!
//! let text = "# comment\nagency_cd\tsite_no\tflow\n5s\t15s\t14n\nUSGS\t01646500\t10.5\n";
//! let table = parse_rdb(text).unwrap();
//! assert_eq!(table.len(), 1);
//! ```

pub mod inference;
pub mod reader;
pub mod stats;

#[cfg(test)]
mod tests;

pub use inference::{infer_column_type, is_identifier_column};
pub use reader::{RdbResponse, parse_rdb, read_rdb};
pub use stats::{ParseResult, ParseStats};
