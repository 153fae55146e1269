//! Column type inference for RDB tables
//!
//! Every column gets exactly one [`ColumnType`]. Identifier columns stay
//! textual so site numbers keep their leading zeros; everything else is
//! integer if every value is integral, float if every value is numeric,
//! and text otherwise.

use crate::constants::{IDENTIFIER_COLUMNS, IDENTIFIER_SUFFIXES, RDB_NA_TOKEN};
use crate::models::{ColumnType, Value};

/// True for key and code columns that must never be converted to numbers
pub fn is_identifier_column(name: &str) -> bool {
    IDENTIFIER_COLUMNS.contains(&name) || IDENTIFIER_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// True for the missing-value token and blank cells
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == RDB_NA_TOKEN
}

/// Infer the type of one column from its raw cells
pub fn infer_column_type<'a>(name: &str, cells: impl IntoIterator<Item = &'a str>) -> ColumnType {
    if is_identifier_column(name) {
        return ColumnType::Text;
    }

    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_float = true;

    for raw in cells.into_iter().filter(|c| !is_missing(c)) {
        seen_any = true;
        let trimmed = raw.trim();

        if all_integer && parse_integer(trimmed).is_none() {
            all_integer = false;
        }
        if parse_float(trimmed).is_none() {
            all_float = false;
            break;
        }
    }

    match (seen_any, all_integer, all_float) {
        (false, _, _) => ColumnType::Text,
        (true, true, _) => ColumnType::Integer,
        (true, false, true) => ColumnType::Float,
        _ => ColumnType::Text,
    }
}

/// Convert a raw cell to a value of the column's type; missing cells become null
pub fn convert_cell(raw: &str, dtype: ColumnType) -> Option<Value> {
    if is_missing(raw) {
        return None;
    }

    let trimmed = raw.trim();
    match dtype {
        ColumnType::Integer => parse_integer(trimmed).map(Value::Integer),
        ColumnType::Float => parse_float(trimmed).map(Value::Float),
        ColumnType::Text => Some(Value::Text(trimmed.to_string())),
    }
}

fn parse_integer(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

// Rust accepts "inf" and "NaN"; RDB numbers always carry a digit.
fn parse_float(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
