use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, TicketType, User};

/// Grid layout for seat-picking venues: `unavailable_seats` holds
/// `[row, col]` pairs that cannot be sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingMap {
    pub rows: u32,
    pub cols: u32,
    pub unavailable_seats: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer_id: i64,
    pub category_id: i64,
    pub is_featured: bool,
    pub is_trending: bool,
    pub has_seating: bool,
    pub seating_map: Option<SeatingMap>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub organizer_id: i64,
    pub category_id: i64,
    pub is_featured: bool,
    pub is_trending: bool,
    pub has_seating: bool,
    pub seating_map: Option<SeatingMap>,
}

/// Event joined with its organizer, category and ticket types, the shape
/// the event-detail page consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithDetails {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: User,
    pub category: Category,
    pub ticket_types: Vec<TicketType>,
}
