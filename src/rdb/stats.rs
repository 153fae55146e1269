//! Parsing statistics and result structures for RDB normalization

use crate::models::LongTable;

/// Normalized table with the statistics gathered while reading it
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Typed long-format records
    pub table: LongTable,

    /// Line and row counters
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Response bodies handed to the reader
    pub responses: usize,

    /// Bodies ignored because they did not look like RDB text
    pub responses_skipped: usize,

    /// Comment and blank lines discarded
    pub comment_lines: usize,

    /// Data lines after the header and type-marker rows
    pub data_lines: usize,

    /// Repeated header / type-marker rows removed via `agency_cd`
    pub artifact_rows: usize,

    /// Records in the resulting table
    pub records: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every data line became a record
    pub fn is_lossless(&self) -> bool {
        self.data_lines == self.records + self.artifact_rows
    }
}
