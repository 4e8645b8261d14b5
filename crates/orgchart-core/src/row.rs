//! Raw input rows.
//!
//! A [`RawRow`] is one record of a spreadsheet-like table: an ordered
//! mapping from column name to [`CellValue`]. Rows are produced by
//! whatever collaborator reads the source file and are consumed by the
//! record normalizer, which owns all validation.

use indexmap::IndexMap;
use serde::Deserialize;

/// A single cell of an input row.
///
/// Deserializes untagged, so a JSON row such as
/// `{"Handle": 1001, "Name": "Ada", "ReportsTo": null}` maps each value
/// onto the matching variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// An explicitly empty cell (`null`, NaN in spreadsheet exports).
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Returns the trimmed text content of the cell, or `None` when the
    /// cell carries no value.
    ///
    /// Empty and whitespace-only strings are treated as missing. Integral
    /// numbers are rendered without a fractional part, since spreadsheet
    /// tools commonly store numeric handles as floats.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::row::CellValue;
    /// assert_eq!(CellValue::from("  Ada ").as_text(), Some("Ada".to_string()));
    /// assert_eq!(CellValue::from("   ").as_text(), None);
    /// assert_eq!(CellValue::Number(1001.0).as_text(), Some("1001".to_string()));
    /// assert_eq!(CellValue::Number(2.5).as_text(), Some("2.5".to_string()));
    /// assert_eq!(CellValue::Missing.as_text(), None);
    /// ```
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// Returns `true` if the cell carries no usable value.
    pub fn is_missing(&self) -> bool {
        self.as_text().is_none()
    }
}

/// Largest magnitude at which every integral `f64` is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Some(format!("{}", value as i64))
    } else {
        Some(value.to_string())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// One input row: column name to cell value, in column order.
///
/// A column that is absent from the row reads the same as a
/// [`CellValue::Missing`] cell.
///
/// # Examples
///
/// ```
/// # use orgchart_core::row::RawRow;
/// let row = RawRow::new()
///     .with("Handle", "ada")
///     .with("Name", "Ada Lovelace")
///     .with("ReportsTo", None::<&str>);
///
/// assert_eq!(row.text("Handle"), Some("ada".to_string()));
/// assert_eq!(row.text("ReportsTo"), None);
/// assert!(row.has_column("ReportsTo"));
/// assert!(!row.has_column("Image"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: IndexMap<String, CellValue>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell and returns the row, for building rows inline.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets the cell for `column`, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Returns the raw cell for `column`, if the column is present.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Returns `true` if the row has a cell for `column`, even an empty one.
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Returns the trimmed text of `column`, treating absent and empty cells alike.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(CellValue::as_text)
    }

    /// Returns an iterator over the column names of this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}
