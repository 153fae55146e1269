//! Core data structures for RDB processing.
//!
//! Defines the typed cell and schema types produced by the normalizer,
//! the long-format record table, the timestamp and synthetic date index
//! types, and the wide-format table produced by the reshapers.

use crate::error::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// Cells and Schema
// =============================================================================

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

/// A single non-null cell. Nulls are carried as `Option::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::Float(_) => None,
            Value::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Named, typed column descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub dtype: ColumnType,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Ordered set of fields for a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Ordered query parameters for one NWIS request.
///
/// Unset values are never stored, so the query string only carries what
/// the caller actually asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Set a parameter only when a value is present
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Builder form of [`QueryParams::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Long Table
// =============================================================================

/// Normalized RDB records in long format: one row per observation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    schema: Schema,
    rows: Vec<Vec<Option<Value>>>,
}

impl LongTable {
    /// Create a table; every row must have one cell per schema field
    pub fn new(schema: Schema, rows: Vec<Vec<Option<Value>>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == schema.len()));
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    /// Cell at (row, column name); `None` for nulls and unknown columns
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.schema.index_of(name)?;
        self.rows.get(row)?.get(idx)?.as_ref()
    }

    /// Cell rendered as a string
    pub fn text(&self, row: usize, name: &str) -> Option<String> {
        self.value(row, name).map(Value::to_string)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Value>>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_ref()).collect())
    }

    /// Remove the named columns; unknown names are ignored
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .schema
            .fields()
            .iter()
            .map(|f| !names.contains(&f.name.as_str()))
            .collect();

        let fields = self
            .schema
            .fields
            .drain(..)
            .zip(&keep)
            .filter_map(|(f, k)| k.then_some(f))
            .collect();
        self.schema = Schema::new(fields);

        for row in &mut self.rows {
            let cells = std::mem::take(row);
            *row = cells
                .into_iter()
                .zip(&keep)
                .filter_map(|(c, k)| k.then_some(c))
                .collect();
        }
    }

    /// Convert to a polars DataFrame with one typed series per field
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns = self
            .schema
            .fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                cells_to_column(
                    &field.name,
                    field.dtype,
                    self.rows.iter().map(|r| r[idx].as_ref()),
                )
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

// =============================================================================
// Index Types
// =============================================================================

/// Observation timestamp, either naive or localized from a site abbreviation
#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Localized {
        datetime: DateTime<FixedOffset>,
        zone: &'static str,
    },
}

impl Timestamp {
    /// Wall-clock time as reported by the site
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(dt) => *dt,
            Timestamp::Localized { datetime, .. } => datetime.naive_local(),
        }
    }

    /// IANA zone name, when the timestamp was localized
    pub fn zone(&self) -> Option<&'static str> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Localized { zone, .. } => Some(*zone),
        }
    }

    pub fn is_naive(&self) -> bool {
        matches!(self, Timestamp::Naive(_))
    }

    // Localized values compare by instant only, whatever zone reported them.
    // Naive values sort as if they were UTC.
    fn sort_key(&self) -> (NaiveDateTime, u8) {
        match self {
            Timestamp::Naive(dt) => (*dt, 0),
            Timestamp::Localized { datetime, .. } => (datetime.naive_utc(), 1),
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Timestamp::Localized { datetime, .. } => {
                write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S%:z"))
            }
        }
    }
}

/// Synthetic date index for statistics reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatDate {
    /// Day of year aggregated across years, rendered `MM-DD`
    MonthDay { month: u32, day: u32 },
    /// First day of a month, calendar year or water year
    Date(NaiveDate),
}

impl fmt::Display for StatDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatDate::MonthDay { month, day } => write!(f, "{:02}-{:02}", month, day),
            StatDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Renders an index entry for display and DataFrame conversion
pub trait IndexLabel {
    fn label(&self) -> Option<String>;
}

impl IndexLabel for Timestamp {
    fn label(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IndexLabel for StatDate {
    fn label(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: IndexLabel> IndexLabel for Option<T> {
    fn label(&self) -> Option<String> {
        self.as_ref().and_then(IndexLabel::label)
    }
}

// =============================================================================
// Wide Table
// =============================================================================

/// One output column of a wide table
#[derive(Debug, Clone, PartialEq)]
pub struct WideColumn {
    pub name: String,
    pub dtype: ColumnType,
    pub values: Vec<Option<Value>>,
}

impl WideColumn {
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Wide-format table: one row per index entry, one column per compound key
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable<K> {
    pub index_name: String,
    pub index: Vec<K>,
    pub columns: Vec<WideColumn>,
}

impl<K> WideTable<K> {
    pub fn new(index_name: impl Into<String>, index: Vec<K>, columns: Vec<WideColumn>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == index.len()));
        Self {
            index_name: index_name.into(),
            index,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&WideColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell at (row, column name)
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name)?.values.get(row)?.as_ref()
    }

    /// Drop columns holding no data at all; returns how many were removed
    pub fn drop_all_null_columns(&mut self) -> usize {
        let before = self.columns.len();
        self.columns.retain(|c| !c.is_all_null());
        before - self.columns.len()
    }

    /// Drop quality-code companion columns (suffix `_cd`); returns how many were removed
    pub fn drop_code_columns(&mut self) -> usize {
        let before = self.columns.len();
        self.columns
            .retain(|c| !c.name.ends_with(crate::constants::columns::CODE_SUFFIX));
        before - self.columns.len()
    }
}

impl<K: IndexLabel> WideTable<K> {
    /// Convert to a polars DataFrame; the index becomes a leading text column
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let labels: Vec<Option<String>> = self.index.iter().map(IndexLabel::label).collect();
        let mut columns = vec![Series::new(self.index_name.as_str().into(), labels).into_column()];

        columns.extend(
            self.columns
                .iter()
                .map(|c| cells_to_column(&c.name, c.dtype, c.values.iter().map(Option::as_ref))),
        );

        Ok(DataFrame::new(columns)?)
    }
}

/// Build a typed polars column from a run of cells
fn cells_to_column<'a>(
    name: &str,
    dtype: ColumnType,
    cells: impl Iterator<Item = Option<&'a Value>>,
) -> Column {
    match dtype {
        ColumnType::Integer => {
            let values: Vec<Option<i64>> = cells.map(|c| c.and_then(Value::as_i64)).collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> = cells.map(|c| c.and_then(Value::as_f64)).collect();
            Series::new(name.into(), values).into_column()
        }
        ColumnType::Text => {
            let values: Vec<Option<String>> = cells.map(|c| c.map(Value::to_string)).collect();
            Series::new(name.into(), values).into_column()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_localized_timestamps_order_by_instant() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let cst = FixedOffset::west_opt(6 * 3600).unwrap();

        // 12:00 CST is 13:00 EST
        let a = Timestamp::Localized {
            datetime: est.from_local_datetime(&naive("2023-01-01 12:30")).unwrap(),
            zone: "America/New_York",
        };
        let b = Timestamp::Localized {
            datetime: cst.from_local_datetime(&naive("2023-01-01 12:00")).unwrap(),
            zone: "America/Chicago",
        };

        assert!(a < b);
        assert_eq!(a.to_string(), "2023-01-01 12:30:00-05:00");
        assert_eq!(b.zone(), Some("America/Chicago"));
    }

    #[test]
    fn test_same_instant_in_different_zones_is_equal() {
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let cdt = FixedOffset::west_opt(5 * 3600).unwrap();

        let eastern = Timestamp::Localized {
            datetime: edt.from_local_datetime(&naive("2023-06-01 01:00")).unwrap(),
            zone: "America/New_York",
        };
        let central = Timestamp::Localized {
            datetime: cdt.from_local_datetime(&naive("2023-06-01 00:00")).unwrap(),
            zone: "America/Chicago",
        };

        assert_eq!(eastern, central);
        assert_eq!(eastern.cmp(&central), Ordering::Equal);
        let set: std::collections::HashSet<Timestamp> = [eastern, central].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stat_date_rendering() {
        assert_eq!(StatDate::MonthDay { month: 3, day: 7 }.to_string(), "03-07");
        let date = StatDate::Date(NaiveDate::from_ymd_opt(2019, 10, 1).unwrap());
        assert_eq!(date.to_string(), "2019-10-01");
    }

    #[test]
    fn test_query_params_replace_and_skip_unset() {
        let mut params = QueryParams::new().with("sites", "01646500");
        params.insert("sites", "01646500,01638500");
        params.insert_opt("period", None::<String>);
        params.insert_opt("parameterCd", Some("00060"));

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("sites"), Some("01646500,01638500"));
        assert_eq!(params.get("period"), None);
        assert_eq!(params.remove("parameterCd"), Some("00060".to_string()));
    }

    #[test]
    fn test_long_table_drop_columns() {
        let schema = Schema::new(vec![
            Field::new("a", ColumnType::Integer),
            Field::new("b", ColumnType::Text),
            Field::new("c", ColumnType::Float),
        ]);
        let mut table = LongTable::new(
            schema,
            vec![vec![
                Some(Value::Integer(1)),
                Some(Value::Text("x".to_string())),
                None,
            ]],
        );

        table.drop_columns(&["b", "missing"]);

        assert_eq!(table.column_names(), vec!["a", "c"]);
        assert_eq!(table.value(0, "a"), Some(&Value::Integer(1)));
        assert_eq!(table.value(0, "c"), None);
    }

    #[test]
    fn test_wide_table_to_dataframe() {
        let table = WideTable::new(
            "Datetime",
            vec![StatDate::MonthDay { month: 1, day: 1 }, StatDate::MonthDay { month: 1, day: 2 }],
            vec![WideColumn {
                name: "USGS_01646500_00060".to_string(),
                dtype: ColumnType::Float,
                values: vec![Some(Value::Float(1.5)), None],
            }],
        );

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_column_names()[1].as_str(), "USGS_01646500_00060");
    }
}
