//! Order entity

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::CellValue;
use super::TableRow;

/// Fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns the wire/display name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: String,
    /// Customer name.
    pub name: String,
    /// Order description.
    pub description: String,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Ordered quantity.
    pub quantity: u32,
    /// Total price.
    pub price: Decimal,
    /// When the order was placed.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TableRow for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            "status" => self.status.as_str().into(),
            "quantity" => self.quantity.into(),
            "price" => self.price.into(),
            "created_at" => self.created_at.into(),
            _ => CellValue::Null,
        }
    }
}
