//! Compound column keys for wide tables.
//!
//! A wide column is identified by the series it belongs to (agency, site,
//! parameter, time-series id; whichever the reshaper pivots on) and the
//! long-table variable it came from. Rendering lives here and nowhere else.

use crate::constants::columns;
use crate::models::LongTable;

/// Long-table columns that can act as column-level pivot keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    Agency,
    Site,
    Parameter,
    TsId,
}

impl KeyPart {
    pub fn column(&self) -> &'static str {
        match self {
            KeyPart::Agency => columns::AGENCY,
            KeyPart::Site => columns::SITE,
            KeyPart::Parameter => columns::PARAMETER,
            KeyPart::TsId => columns::TS_ID,
        }
    }
}

/// The series portion of a column key. Field order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub agency: Option<String>,
    pub site: Option<String>,
    pub parameter: Option<String>,
    pub ts_id: Option<String>,
}

impl SeriesKey {
    /// Read the requested key parts from one long-table row; nulls render empty
    pub fn from_row(table: &LongTable, row: usize, parts: &[KeyPart]) -> Self {
        let mut key = SeriesKey::default();
        for part in parts {
            let value = Some(table.text(row, part.column()).unwrap_or_default());
            match part {
                KeyPart::Agency => key.agency = value,
                KeyPart::Site => key.site = value,
                KeyPart::Parameter => key.parameter = value,
                KeyPart::TsId => key.ts_id = value,
            }
        }
        key
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.agency, &self.site, &self.parameter, &self.ts_id]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Full key of one wide column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub series: SeriesKey,
    pub variable: String,
}

impl ColumnKey {
    pub fn new(series: SeriesKey, variable: impl Into<String>) -> Self {
        Self {
            series,
            variable: variable.into(),
        }
    }

    /// `agency_site_parameter_tsid_variable`, skipping parts the series lacks
    pub fn render(&self) -> String {
        join(self.series.parts().chain(std::iter::once(self.variable.as_str())))
    }

    /// `variable_agency_site_...`, used by the groundwater-levels table
    pub fn render_variable_first(&self) -> String {
        join(std::iter::once(self.variable.as_str()).chain(self.series.parts()))
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined = parts.collect::<Vec<_>>().join("_");
    joined.trim().trim_end_matches('_').to_string()
}
