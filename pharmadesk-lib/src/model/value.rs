//! CellValue enum for dynamic cell values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// A dynamic value for a single table cell.
///
/// Rows expose their fields through this enum so the table engine can filter
/// and sort them without knowing the concrete row type. Comparison is
/// type-aware: numeric variants compare numerically across `Int`/`Float`/
/// `Decimal`, dates compare chronologically, strings lexicographically.
///
/// # Example
///
/// ```
/// use pharmadesk_lib::model::CellValue;
///
/// let price = CellValue::from(5i64);
/// let name = CellValue::from("Paracetamol");
/// assert!(CellValue::from(5i64) < CellValue::from(10.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal (prices).
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Calendar date (manufacture/expiry dates).
    Date(NaiveDate),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::String(_) => "string",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Returns the display text for this value.
    ///
    /// This is the string representation the engine matches filters against
    /// and the renderer shows when no custom cell renderer is set. `Null`
    /// renders as the empty string.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::Decimal(d) => d.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
        }
    }

    /// Numeric view of this value, if it has one.
    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(n) => Some(*n),
            CellValue::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Chronological view of this value, if it has one.
    fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc)),
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Rank used to order values of different kinds relative to each other.
    ///
    /// Columns are homogeneous in practice; the rank only matters for mixed
    /// data and keeps the ordering total. `Null` always sorts first.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_) => 2,
            CellValue::Date(_) | CellValue::DateTime(_) => 3,
            CellValue::String(_) => 4,
        }
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.kind_rank(), other.kind_rank()) {
            (a, b) if a != b => a.cmp(&b),
            _ => match (self, other) {
                (CellValue::Null, CellValue::Null) => Ordering::Equal,
                (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
                (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
                _ => {
                    if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                        return a.total_cmp(&b);
                    }
                    if let (Some(a), Some(b)) = (self.as_datetime(), other.as_datetime()) {
                        return a.cmp(&b);
                    }
                    Ordering::Equal
                }
            },
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_variants_compare_across_kinds() {
        assert!(CellValue::Int(5) < CellValue::Float(5.5));
        assert!(CellValue::Decimal(Decimal::new(100, 1)) > CellValue::Int(9));
        assert_eq!(CellValue::Int(7).cmp(&CellValue::Float(7.0)), Ordering::Equal);
    }

    #[test]
    fn dates_compare_chronologically() {
        let early = CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let late = CellValue::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(early < late);
    }

    #[test]
    fn null_sorts_first() {
        assert!(CellValue::Null < CellValue::Int(i64::MIN));
        assert!(CellValue::Null < CellValue::String(String::new()));
    }

    #[test]
    fn null_displays_as_empty() {
        assert_eq!(CellValue::Null.display_text(), "");
        assert_eq!(CellValue::from("Aspirin").display_text(), "Aspirin");
    }
}
