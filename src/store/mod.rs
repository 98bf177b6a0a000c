//! Storage seam for the catalog, inventory, identity and purchase tables.
//!
//! Handlers only ever talk to the [`Store`] trait, so the in-memory
//! implementation in [`memory`] can be swapped for a database-backed one
//! without touching handler or purchase-processing logic.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Category, Event, EventWithDetails, NewCategory, NewEvent, NewPurchase, NewPurchaseItem,
    NewTicketType, NewUser, PurchaseWithDetails, TicketType, User,
};

pub mod memory;
pub mod seed;
pub mod table;

pub use memory::MemoryStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Conflict(String),

    #[error("Not enough tickets available for {name}")]
    InsufficientInventory {
        name: String,
        requested: u32,
        available: u32,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter for event listings; both fields combine with AND, absent fields
/// match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

/// The application's storage interface.
///
/// Lookups return `Ok(None)` for unknown ids; mutations fail with
/// [`StoreError`] when a business rule blocks them. `create_purchase` is
/// the purchase processor: it validates the whole cart before mutating
/// anything and commits purchase, line items and inventory decrements as
/// one atomic step.
#[async_trait]
pub trait Store: Send + Sync {
    // Identity
    async fn user(&self, id: i64) -> StoreResult<Option<User>>;
    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    /// Fails with [`StoreError::Conflict`] when the username or email is
    /// already taken (case-insensitive).
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    // Catalog: categories
    async fn categories(&self) -> StoreResult<Vec<Category>>;
    async fn category(&self, id: i64) -> StoreResult<Option<Category>>;
    async fn create_category(&self, category: NewCategory) -> StoreResult<Category>;

    // Catalog: events
    async fn events(&self, filter: EventFilter) -> StoreResult<Vec<Event>>;
    async fn featured_events(&self) -> StoreResult<Vec<Event>>;
    async fn trending_events(&self) -> StoreResult<Vec<Event>>;
    async fn event(&self, id: i64) -> StoreResult<Option<Event>>;
    async fn event_with_details(&self, id: i64) -> StoreResult<Option<EventWithDetails>>;
    async fn events_by_organizer(&self, organizer_id: i64) -> StoreResult<Vec<Event>>;
    async fn create_event(&self, event: NewEvent) -> StoreResult<Event>;

    // Inventory
    async fn ticket_types_by_event(&self, event_id: i64) -> StoreResult<Vec<TicketType>>;
    async fn create_ticket_type(&self, ticket_type: NewTicketType) -> StoreResult<TicketType>;

    // Purchases
    /// Validates every cart line (ticket type exists, belongs to the
    /// purchase's event, has enough stock), then commits the purchase,
    /// its items and the inventory decrements together. A failed
    /// validation leaves the store untouched.
    async fn create_purchase(
        &self,
        purchase: NewPurchase,
        items: Vec<NewPurchaseItem>,
    ) -> StoreResult<PurchaseWithDetails>;
    async fn purchases_by_user(&self, user_id: i64) -> StoreResult<Vec<PurchaseWithDetails>>;
    async fn purchase_with_details(&self, id: i64) -> StoreResult<Option<PurchaseWithDetails>>;
}
