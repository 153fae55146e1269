//! Statistics reshaping
//!
//! Statistics tables carry no timestamp. The index is a synthetic date
//! built from `month_nu`, `day_nu` and `year_nu` according to the report
//! type, and columns pivot on agency, site, parameter and time-series id.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::naming::{KeyPart, SeriesKey};
use super::pivot::{NameStyle, PivotLayout, pivot};
use crate::constants::{columns, stat_defaults};
use crate::error::{NwisError, Result};
use crate::models::{LongTable, QueryParams, StatDate, WideTable};

const STAT_KEY_PARTS: &[KeyPart] = &[
    KeyPart::Agency,
    KeyPart::Site,
    KeyPart::Parameter,
    KeyPart::TsId,
];

// =============================================================================
// Report Options
// =============================================================================

/// Granularity of a statistics report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatReportType {
    Daily,
    Monthly,
    Annual,
}

impl StatReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatReportType::Daily => "daily",
            StatReportType::Monthly => "monthly",
            StatReportType::Annual => "annual",
        }
    }
}

impl FromStr for StatReportType {
    type Err = NwisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(StatReportType::Daily),
            "monthly" => Ok(StatReportType::Monthly),
            "annual" => Ok(StatReportType::Annual),
            other => Err(NwisError::invalid_stat(format!(
                "statReportType must be daily, monthly or annual, got '{}'",
                other
            ))),
        }
    }
}

/// Year convention for annual reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatYearType {
    Calendar,
    /// October 1 of the prior year through September 30
    Water,
}

impl StatYearType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatYearType::Calendar => "calendar",
            StatYearType::Water => "water",
        }
    }
}

impl FromStr for StatYearType {
    type Err = NwisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calendar" => Ok(StatYearType::Calendar),
            "water" => Ok(StatYearType::Water),
            other => Err(NwisError::invalid_stat(format!(
                "statYearType must be calendar or water, got '{}'",
                other
            ))),
        }
    }
}

/// Whether the service computes statistics over periods with missing data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingData {
    On,
    Off,
}

impl MissingData {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingData::On => "on",
            MissingData::Off => "off",
        }
    }
}

impl FromStr for MissingData {
    type Err = NwisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(MissingData::On),
            "off" => Ok(MissingData::Off),
            other => Err(NwisError::invalid_stat(format!(
                "missingData must be on or off, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for StatReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied statistics options; `None` means "use the default"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatOptions {
    pub report_type: Option<StatReportType>,
    pub year_type: Option<StatYearType>,
    /// Comma-separated statistic names (`mean`, `p50`, ...) or `all`
    pub stat_type: Option<String>,
    pub missing_data: Option<MissingData>,
}

impl StatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_type(mut self, report_type: StatReportType) -> Self {
        self.report_type = Some(report_type);
        self
    }

    pub fn with_year_type(mut self, year_type: StatYearType) -> Self {
        self.year_type = Some(year_type);
        self
    }

    pub fn with_stat_type(mut self, stat_type: impl Into<String>) -> Self {
        self.stat_type = Some(stat_type.into());
        self
    }

    pub fn with_missing_data(mut self, missing_data: MissingData) -> Self {
        self.missing_data = Some(missing_data);
        self
    }

    /// Validate option combinations and fill in defaults.
    ///
    /// `statYearType` is only accepted for annual reports and `missingData`
    /// is rejected for daily reports.
    pub fn resolve(&self) -> Result<ResolvedStatOptions> {
        let report_type = self.report_type.unwrap_or(StatReportType::Daily);

        if self.year_type.is_some() && report_type != StatReportType::Annual {
            return Err(NwisError::invalid_stat(format!(
                "statYearType is only valid with statReportType=annual, not {}",
                report_type
            )));
        }
        if self.missing_data.is_some() && report_type == StatReportType::Daily {
            return Err(NwisError::invalid_stat(
                "missingData is not valid with statReportType=daily",
            ));
        }

        let stat_type = match self.stat_type.as_deref().map(str::trim) {
            Some("") => return Err(NwisError::invalid_stat("statType must not be empty")),
            Some(s) => s.to_string(),
            None => stat_defaults::STAT_TYPE.to_string(),
        };

        Ok(ResolvedStatOptions {
            report_type,
            year_type: self.year_type.unwrap_or(StatYearType::Calendar),
            stat_type,
            missing_data: self.missing_data.unwrap_or(MissingData::Off),
        })
    }
}

/// Statistics options after validation, every field set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatOptions {
    pub report_type: StatReportType,
    pub year_type: StatYearType,
    pub stat_type: String,
    pub missing_data: MissingData,
}

impl Default for ResolvedStatOptions {
    fn default() -> Self {
        Self {
            report_type: StatReportType::Daily,
            year_type: StatYearType::Calendar,
            stat_type: stat_defaults::STAT_TYPE.to_string(),
            missing_data: MissingData::Off,
        }
    }
}

impl ResolvedStatOptions {
    /// Write the options into request parameters.
    ///
    /// Year type goes out only for annual reports and missing-data handling
    /// only for non-daily ones, matching what the service accepts.
    pub fn apply_to(&self, params: &mut QueryParams) {
        params.insert("statReportType", self.report_type.as_str());
        params.insert("statType", self.stat_type.as_str());
        if self.report_type == StatReportType::Annual {
            params.insert("statYearType", self.year_type.as_str());
        }
        if self.report_type != StatReportType::Daily {
            params.insert("missingData", self.missing_data.as_str());
        }
    }

    /// Synthetic index date for one statistics record
    pub fn synthetic_date(&self, table: &LongTable, row: usize) -> Result<StatDate> {
        match self.report_type {
            StatReportType::Daily => {
                let month = required_number(table, row, columns::MONTH)?;
                let day = required_number(table, row, columns::DAY)?;
                // Feb 29 must be representable, so check against a leap year
                NaiveDate::from_ymd_opt(2000, month as u32, day as u32)
                    .map(|_| StatDate::MonthDay {
                        month: month as u32,
                        day: day as u32,
                    })
                    .ok_or_else(|| invalid_date(columns::DAY, format!("{:02}-{:02}", month, day)))
            }
            StatReportType::Monthly => {
                let year = required_number(table, row, columns::YEAR)?;
                let month = required_number(table, row, columns::MONTH)?;
                NaiveDate::from_ymd_opt(year as i32, month as u32, 1)
                    .map(StatDate::Date)
                    .ok_or_else(|| invalid_date(columns::MONTH, format!("{}-{:02}", year, month)))
            }
            StatReportType::Annual => {
                let year = required_number(table, row, columns::YEAR)?;
                let date = match self.year_type {
                    StatYearType::Calendar => NaiveDate::from_ymd_opt(year as i32, 1, 1),
                    StatYearType::Water => NaiveDate::from_ymd_opt(year as i32 - 1, 10, 1),
                };
                date.map(StatDate::Date)
                    .ok_or_else(|| invalid_date(columns::YEAR, year.to_string()))
            }
        }
    }
}

fn required_number(table: &LongTable, row: usize, column: &str) -> Result<i64> {
    if !table.has_column(column) {
        return Err(NwisError::missing_column(column));
    }
    let value = table.value(row, column);
    value
        .and_then(|v| v.as_i64())
        .filter(|n| *n >= 0)
        .ok_or_else(|| invalid_date(column, value.map(|v| v.to_string()).unwrap_or_default()))
}

fn invalid_date(column: &str, value: String) -> NwisError {
    NwisError::InvalidDateTime {
        column: column.to_string(),
        value,
    }
}

// =============================================================================
// Reshape
// =============================================================================

/// Pivot a statistics table into one row per synthetic date.
///
/// Records are ordered by (agency, site, parameter, ts_id, date) before the
/// pivot and columns are named `agency_site_parameter_tsid_statistic`, so
/// the output does not depend on input row order. All-null columns are kept.
pub fn reshape_statistics(
    table: &LongTable,
    options: &ResolvedStatOptions,
) -> Result<WideTable<StatDate>> {
    let mut entries = (0..table.len())
        .map(|row| {
            let date = options.synthetic_date(table, row)?;
            let series = SeriesKey::from_row(table, row, STAT_KEY_PARTS);
            Ok((series, date, row))
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort();

    let entries: Vec<(usize, StatDate)> = entries
        .into_iter()
        .map(|(_, date, row)| (row, date))
        .collect();

    let layout = PivotLayout {
        key_parts: STAT_KEY_PARTS,
        index_columns: &[columns::MONTH, columns::DAY, columns::YEAR],
        name_style: NameStyle::SeriesFirst,
    };
    let wide = pivot(table, &entries, columns::INDEX, &layout)?;

    debug!(
        "Reshaped {} {} statistics records into {} dates",
        table.len(),
        options.report_type,
        wide.len()
    );
    Ok(wide)
}
