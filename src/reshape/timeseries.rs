//! Time series reshaping for instantaneous, daily and groundwater values.

use tracing::debug;

use super::naming::KeyPart;
use super::pivot::{NameStyle, PivotLayout, pivot};
use crate::constants::columns;
use crate::datetime::{localize, parse_datetime};
use crate::error::{NwisError, Result};
use crate::models::{LongTable, Timestamp, WideTable};

/// Options for [`reshape_time_series`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSeriesOptions {
    /// Keep the `_cd` quality-code companion columns (off by default)
    pub include_codes: bool,
}

/// Pivot instantaneous or daily values into one row per timestamp.
///
/// Timestamps come from `datetime`, localized with the per-row `tz_cd`
/// when present. Columns are named `agency_site_variable`; columns left
/// entirely null by the pivot are dropped, and quality-code columns too
/// unless `include_codes` is set.
pub fn reshape_time_series(
    table: &LongTable,
    options: &TimeSeriesOptions,
) -> Result<WideTable<Timestamp>> {
    if !table.has_column(columns::DATETIME) {
        return Err(NwisError::missing_column(columns::DATETIME));
    }

    let has_tz = table.has_column(columns::TZ);
    let entries = (0..table.len())
        .map(|row| {
            let naive = required_datetime(table, row, columns::DATETIME, None)?;
            let tz = if has_tz {
                table.text(row, columns::TZ)
            } else {
                None
            };
            Ok((row, localize(naive, tz.as_deref())))
        })
        .collect::<Result<Vec<_>>>()?;

    let key_parts: &[KeyPart] = if table.has_column(columns::AGENCY) {
        &[KeyPart::Agency, KeyPart::Site]
    } else {
        &[KeyPart::Site]
    };

    let layout = PivotLayout {
        key_parts,
        index_columns: &[columns::DATETIME, columns::TZ],
        name_style: NameStyle::SeriesFirst,
    };
    let mut wide = pivot(table, &entries, columns::INDEX, &layout)?;

    let empty = wide.drop_all_null_columns();
    let codes = if options.include_codes {
        0
    } else {
        wide.drop_code_columns()
    };
    debug!(
        "Dropped {} all-null and {} quality-code columns",
        empty, codes
    );

    Ok(wide)
}

/// Pivot groundwater levels into one row per measurement time.
///
/// The timestamp is `lev_dt` plus `lev_tm` (date alone when the time is
/// missing), localized with `lev_tz_cd`. Only the site is a column key and
/// names render variable first, e.g. `lev_va_01646500`.
pub fn reshape_groundwater_levels(table: &LongTable) -> Result<WideTable<Timestamp>> {
    if !table.has_column(columns::LEV_DATE) {
        return Err(NwisError::missing_column(columns::LEV_DATE));
    }

    let entries = (0..table.len())
        .map(|row| {
            let naive = required_datetime(table, row, columns::LEV_DATE, Some(columns::LEV_TIME))?;
            let tz = table.text(row, columns::LEV_TZ);
            Ok((row, localize(naive, tz.as_deref())))
        })
        .collect::<Result<Vec<_>>>()?;

    let layout = PivotLayout {
        key_parts: &[KeyPart::Site],
        index_columns: &[columns::LEV_DATE, columns::LEV_TIME, columns::LEV_TZ],
        name_style: NameStyle::VariableFirst,
    };
    pivot(table, &entries, columns::INDEX, &layout)
}

/// Parse the row's date column, appending the time column when it has a value
fn required_datetime(
    table: &LongTable,
    row: usize,
    date_column: &str,
    time_column: Option<&str>,
) -> Result<chrono::NaiveDateTime> {
    let date = table.text(row, date_column).unwrap_or_default();
    let time = time_column.and_then(|c| table.text(row, c));

    let combined = time
        .as_deref()
        .and_then(|t| parse_datetime(&format!("{} {}", date, t)));

    combined
        .or_else(|| parse_datetime(&date))
        .ok_or_else(|| NwisError::InvalidDateTime {
            column: date_column.to_string(),
            value: date,
        })
}
