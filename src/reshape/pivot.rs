//! Long-to-wide pivot shared by the reshapers.
//!
//! Rows become one output row per distinct index key (outer join: every key
//! seen in any series is kept). Columns become one output column per
//! (series, variable) pair, ordered by series key and then by the variable's
//! position in the long table, so the result does not depend on input order.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use super::naming::{ColumnKey, KeyPart, SeriesKey};
use crate::error::{NwisError, Result};
use crate::models::{IndexLabel, LongTable, WideColumn, WideTable};

/// How column keys are rendered into names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// `agency_site_..._variable`
    SeriesFirst,
    /// `variable_agency_site_...`
    VariableFirst,
}

/// Pivot configuration
#[derive(Debug, Clone, Copy)]
pub struct PivotLayout<'a> {
    /// Long-table columns used as column-level keys
    pub key_parts: &'a [KeyPart],
    /// Columns consumed while building the index, excluded from values
    pub index_columns: &'a [&'a str],
    pub name_style: NameStyle,
}

/// Pivot `table` into a wide table.
///
/// `entries` pairs each long-table row number with its index key; rows not
/// listed are ignored. Two rows with the same index key in the same series
/// cannot share a cell and fail with [`NwisError::DuplicateEntry`].
pub fn pivot<K>(
    table: &LongTable,
    entries: &[(usize, K)],
    index_name: &str,
    layout: &PivotLayout<'_>,
) -> Result<WideTable<K>>
where
    K: Ord + Clone + IndexLabel,
{
    let key_columns: Vec<&str> = layout.key_parts.iter().map(KeyPart::column).collect();
    for column in &key_columns {
        if !table.has_column(column) {
            return Err(NwisError::missing_column(*column));
        }
    }

    // (position in long table, field) of each value column
    let value_fields: Vec<(usize, &crate::models::Field)> = table
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            !key_columns.contains(&f.name.as_str()) && !layout.index_columns.contains(&f.name.as_str())
        })
        .collect();

    let series_of: Vec<(usize, SeriesKey, &K)> = entries
        .iter()
        .map(|(row, key)| (*row, SeriesKey::from_row(table, *row, layout.key_parts), key))
        .collect();

    let index: Vec<K> = entries
        .iter()
        .map(|(_, k)| k.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index_pos: BTreeMap<&K, usize> = index.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let series: Vec<SeriesKey> = series_of
        .iter()
        .map(|(_, s, _)| s.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let series_pos: BTreeMap<&SeriesKey, usize> =
        series.iter().enumerate().map(|(i, s)| (s, i)).collect();

    let mut columns: Vec<WideColumn> = Vec::with_capacity(series.len() * value_fields.len());
    let mut names: HashSet<String> = HashSet::new();
    for series_key in &series {
        for (_, field) in &value_fields {
            let key = ColumnKey::new(series_key.clone(), field.name.clone());
            let name = match layout.name_style {
                NameStyle::SeriesFirst => key.render(),
                NameStyle::VariableFirst => key.render_variable_first(),
            };
            if !names.insert(name.clone()) {
                return Err(NwisError::malformed(format!(
                    "column name '{}' is not unique after pivot",
                    name
                )));
            }
            columns.push(WideColumn {
                name,
                dtype: field.dtype,
                values: vec![None; index.len()],
            });
        }
    }

    let mut filled: HashSet<(usize, usize)> = HashSet::new();
    for (row, series_key, key) in &series_of {
        let s = series_pos[series_key];
        let r = index_pos[key];
        if !filled.insert((s, r)) {
            return Err(NwisError::DuplicateEntry {
                index: key.label().unwrap_or_default(),
                column: ColumnKey::new(series_key.clone(), "").render(),
            });
        }

        let cells = &table.rows()[*row];
        for (v, (field_idx, _)) in value_fields.iter().enumerate() {
            columns[s * value_fields.len() + v].values[r] = cells[*field_idx].clone();
        }
    }

    debug!(
        "Pivoted {} records into {} rows x {} columns ({} series)",
        entries.len(),
        index.len(),
        columns.len(),
        series.len()
    );

    Ok(WideTable::new(index_name, index, columns))
}
