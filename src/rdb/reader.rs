//! Core RDB reader implementation
//!
//! Handles service error detection, comment stripping, header and
//! type-marker handling, row splitting and header-artifact filtering,
//! then hands the raw cells to type inference.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::inference::{convert_cell, infer_column_type};
use super::stats::{ParseResult, ParseStats};
use crate::constants::{
    HEADER_ARTIFACT_PATTERN, RDB_COMMENT_PREFIX, RDB_FIELD_DELIMITER, SERVICE_UNAVAILABLE_MARKER,
    columns,
};
use crate::error::{NwisError, Result};
use crate::models::{Field, LongTable, QueryParams, Schema};

static HEADER_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HEADER_ARTIFACT_PATTERN).expect("header artifact pattern is a valid regex")
});

/// One fetched response body and the parameters that produced it
#[derive(Debug, Clone, Default)]
pub struct RdbResponse {
    pub params: QueryParams,
    pub body: String,
}

impl RdbResponse {
    pub fn new(params: QueryParams, body: impl Into<String>) -> Self {
        Self {
            params,
            body: body.into(),
        }
    }
}

/// Normalize a single RDB body with no request context
pub fn parse_rdb(text: &str) -> Result<LongTable> {
    let response = RdbResponse::new(QueryParams::new(), text);
    read_rdb(std::slice::from_ref(&response)).map(|result| result.table)
}

/// Normalize one or more RDB bodies into a single typed long table.
///
/// Each body is read on its own: its first non-comment line is the header,
/// the second the type marker, everything else is data. Every body that has
/// a header must repeat the first body's column names exactly, otherwise the
/// rows could not be zipped against a single header.
pub fn read_rdb(responses: &[RdbResponse]) -> Result<ParseResult> {
    let mut stats = ParseStats::new();
    stats.responses = responses.len();

    if let Some(failed) = responses
        .iter()
        .find(|r| r.body.contains(SERVICE_UNAVAILABLE_MARKER))
    {
        return Err(NwisError::ServiceUnavailable {
            body: failed.body.clone(),
        });
    }

    let mut header: Option<Vec<String>> = None;
    let mut raw_rows: Vec<Vec<&str>> = Vec::new();
    for (body_num, response) in responses.iter().enumerate() {
        if !response.body.trim_start().starts_with(RDB_COMMENT_PREFIX) {
            warn!(
                "Skipping response that is not RDB text (params: {:?})",
                response.params
            );
            stats.responses_skipped += 1;
            continue;
        }

        let mut lines = data_lines(&response.body, &mut stats).into_iter();
        let Some(header_line) = lines.next() else {
            debug!("Response {} has no header, nothing to read", body_num + 1);
            continue;
        };
        let body_header = split_header(header_line);

        // Type-marker row (e.g. "5s\t15s\t20d"); discarded without validation.
        let _ = lines.next();

        let expected = match &header {
            Some(first) => {
                if *first != body_header {
                    return Err(NwisError::malformed(format!(
                        "response {} has columns [{}], expected [{}]",
                        body_num + 1,
                        body_header.join(", "),
                        first.join(", ")
                    )));
                }
                first.len()
            }
            None => {
                let len = body_header.len();
                header = Some(body_header);
                len
            }
        };

        for line in lines {
            let fields: Vec<&str> = line.split(RDB_FIELD_DELIMITER).collect();
            if fields.len() != expected {
                return Err(NwisError::RaggedRow {
                    line: raw_rows.len() + 1,
                    expected,
                    found: fields.len(),
                });
            }
            raw_rows.push(fields);
        }
    }

    let header =
        header.ok_or_else(|| NwisError::malformed("no header line after removing comments"))?;
    stats.data_lines = raw_rows.len();

    if let Some(agency_idx) = header.iter().position(|h| h == columns::AGENCY) {
        raw_rows.retain(|row| !HEADER_ARTIFACT.is_match(row[agency_idx]));
        stats.artifact_rows = stats.data_lines - raw_rows.len();
        if stats.artifact_rows > 0 {
            debug!("Dropped {} header artifact rows", stats.artifact_rows);
        }
    }

    let schema = Schema::new(
        header
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let dtype = infer_column_type(name, raw_rows.iter().map(|row| row[idx]));
                Field::new(name.clone(), dtype)
            })
            .collect(),
    );

    let rows = raw_rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(schema.fields())
                .map(|(raw, field)| convert_cell(raw, field.dtype))
                .collect()
        })
        .collect();

    let table = LongTable::new(schema, rows);
    stats.records = table.len();

    debug!(
        "Read {} records ({} columns) from {} responses",
        stats.records,
        table.schema().len(),
        stats.responses
    );

    Ok(ParseResult { table, stats })
}

/// Non-comment lines of one body; comment and blank lines are counted
fn data_lines<'a>(body: &'a str, stats: &mut ParseStats) -> Vec<&'a str> {
    let mut kept = Vec::new();
    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(RDB_COMMENT_PREFIX) {
            stats.comment_lines += 1;
        } else {
            kept.push(line);
        }
    }
    kept
}

fn split_header(line: &str) -> Vec<String> {
    line.split(RDB_FIELD_DELIMITER)
        .map(|name| name.trim().to_string())
        .collect()
}
