//! Drug entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::TableRow;

/// A drug in the pharmacy inventory.
///
/// # Example
///
/// ```
/// use pharmadesk_lib::model::{Drug, TableRow};
///
/// let drug: Drug = serde_json::from_str(r#"{
///     "id": "AAA111",
///     "name": "Paracetamol",
///     "description": "Pain relief",
///     "price": 5,
///     "quantity": 100,
///     "mfg_date": "2024-01-01",
///     "exp_date": "2026-01-01"
/// }"#).unwrap();
///
/// assert_eq!(drug.id(), "AAA111");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    /// Unique identifier.
    pub id: String,
    /// Drug name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    /// Manufacture date.
    pub mfg_date: NaiveDate,
    /// Expiry date.
    pub exp_date: NaiveDate,
}

impl TableRow for Drug {
    fn id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "price" => self.price.into(),
            "quantity" => self.quantity.into(),
            "mfg_date" => self.mfg_date.into(),
            "exp_date" => self.exp_date.into(),
            _ => CellValue::Null,
        }
    }
}
