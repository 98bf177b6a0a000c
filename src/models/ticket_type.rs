use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced admission category with its own inventory count.
/// Invariant: `available <= quantity` (enforced at creation, and
/// `available` only ever decreases afterwards).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub available: u32,
}

#[derive(Debug, Clone)]
pub struct NewTicketType {
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub available: u32,
}
