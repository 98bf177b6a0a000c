use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Event, TicketType};

pub const PURCHASE_STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub total_amount: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub user_id: i64,
    pub event_id: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub id: i64,
    pub purchase_id: i64,
    pub ticket_type_id: i64,
    pub quantity: u32,
    /// Unit price at purchase time, snapshotted from the cart.
    pub price: Decimal,
    /// Opaque seat selection payload; shape is up to the client and no
    /// invariant ties it to `quantity`.
    pub seat_info: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NewPurchaseItem {
    pub ticket_type_id: i64,
    pub quantity: u32,
    pub price: Decimal,
    pub seat_info: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemWithTicketType {
    #[serde(flatten)]
    pub item: PurchaseItem,
    pub ticket_type: TicketType,
}

/// Purchase joined with its event and line items, the shape the
/// confirmation and "my tickets" pages consume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseWithDetails {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub event: Event,
    pub items: Vec<PurchaseItemWithTicketType>,
}
