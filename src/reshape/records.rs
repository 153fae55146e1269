//! Record-style tables that are indexed but not pivoted.

use tracing::{debug, warn};

use crate::constants::columns;
use crate::datetime::{localize, parse_datetime};
use crate::error::{NwisError, Result};
use crate::models::{LongTable, Timestamp, WideColumn, WideTable};

/// Index field measurements or annual peaks by their date column.
///
/// Dates are coerced: partial dates resolve to the first of the period and
/// unparseable ones become a null index entry instead of failing. The date
/// column and the `agency_cd`/`site_no` identifiers are dropped; every other
/// column is carried over unchanged and rows keep their input order.
pub fn index_records(
    table: &LongTable,
    date_column: &str,
) -> Result<WideTable<Option<Timestamp>>> {
    if !table.has_column(date_column) {
        return Err(NwisError::missing_column(date_column));
    }

    let mut unparsed = 0usize;
    let index: Vec<Option<Timestamp>> = (0..table.len())
        .map(|row| {
            let parsed = table
                .text(row, date_column)
                .and_then(|raw| parse_datetime(&raw))
                .map(|naive| localize(naive, None));
            if parsed.is_none() {
                unparsed += 1;
            }
            parsed
        })
        .collect();

    if unparsed > 0 {
        warn!(
            "{} of {} records have no usable '{}' and get a null index",
            unparsed,
            table.len(),
            date_column
        );
    }

    let mut kept = table.clone();
    kept.drop_columns(&[date_column, columns::AGENCY, columns::SITE]);

    let wide_columns = kept
        .schema()
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| WideColumn {
            name: field.name.clone(),
            dtype: field.dtype,
            values: kept.rows().iter().map(|row| row[idx].clone()).collect(),
        })
        .collect();

    debug!(
        "Indexed {} records by '{}' ({} columns kept)",
        table.len(),
        date_column,
        kept.schema().len()
    );

    Ok(WideTable::new(columns::INDEX, index, wide_columns))
}
