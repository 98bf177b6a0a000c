//! In-memory [`Store`] implementation over id-indexed tables.
//!
//! All tables live behind one `RwLock`: reads share the lock, and the
//! purchase commit runs its validation pre-pass and inventory decrements
//! inside a single write section, so concurrent purchases cannot
//! interleave between the availability check and the decrement.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{
    Category, Event, EventWithDetails, NewCategory, NewEvent, NewPurchase, NewPurchaseItem,
    NewTicketType, NewUser, Purchase, PurchaseItem, PurchaseItemWithTicketType,
    PurchaseWithDetails, TicketType, User, PURCHASE_STATUS_COMPLETED,
};
use crate::store::table::Table;
use crate::store::{EventFilter, Store, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    categories: Table<Category>,
    events: Table<Event>,
    ticket_types: Table<TicketType>,
    purchases: Table<Purchase>,
    purchase_items: Table<PurchaseItem>,
}

impl Tables {
    fn event_with_details(&self, id: i64) -> Option<EventWithDetails> {
        let event = self.events.get(id)?.clone();
        let organizer = self.users.get(event.organizer_id)?.clone();
        let category = self.categories.get(event.category_id)?.clone();
        let ticket_types = self.ticket_types_for(event.id);
        Some(EventWithDetails {
            event,
            organizer,
            category,
            ticket_types,
        })
    }

    fn purchase_with_details(&self, id: i64) -> StoreResult<Option<PurchaseWithDetails>> {
        let Some(purchase) = self.purchases.get(id).cloned() else {
            return Ok(None);
        };
        let Some(event) = self.events.get(purchase.event_id).cloned() else {
            return Ok(None);
        };
        let mut items = Vec::new();
        for item in self
            .purchase_items
            .iter()
            .filter(|item| item.purchase_id == purchase.id)
        {
            let ticket_type = self
                .ticket_types
                .get(item.ticket_type_id)
                .cloned()
                .ok_or(StoreError::NotFound {
                    entity: "Ticket type",
                    id: item.ticket_type_id,
                })?;
            items.push(PurchaseItemWithTicketType {
                item: item.clone(),
                ticket_type,
            });
        }
        Ok(Some(PurchaseWithDetails {
            purchase,
            event,
            items,
        }))
    }

    fn ticket_types_for(&self, event_id: i64) -> Vec<TicketType> {
        self.ticket_types
            .iter()
            .filter(|tt| tt.event_id == event_id)
            .cloned()
            .collect()
    }
}

/// Thread-safe in-memory store backing the whole application.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("store lock poisoned")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.read().users.get(id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let needle = username.to_lowercase();
        Ok(self
            .read()
            .users
            .iter()
            .find(|user| user.username.to_lowercase() == needle)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.write();
        let username = user.username.to_lowercase();
        let email = user.email.to_lowercase();
        if tables
            .users
            .iter()
            .any(|existing| existing.username.to_lowercase() == username)
        {
            return Err(StoreError::Conflict("Username already taken".to_string()));
        }
        if tables
            .users
            .iter()
            .any(|existing| existing.email.to_lowercase() == email)
        {
            return Err(StoreError::Conflict("Email already in use".to_string()));
        }
        Ok(tables.users.insert_with(|id| User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            full_name: user.full_name,
            is_organizer: user.is_organizer,
            avatar_url: user.avatar_url,
            created_at: Utc::now(),
        }))
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read().categories.iter().cloned().collect())
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.read().categories.get(id).cloned())
    }

    async fn create_category(&self, category: NewCategory) -> StoreResult<Category> {
        let mut tables = self.write();
        Ok(tables.categories.insert_with(|id| Category {
            id,
            name: category.name,
            icon: category.icon,
        }))
    }

    async fn events(&self, filter: EventFilter) -> StoreResult<Vec<Event>> {
        let tables = self.read();
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        Ok(tables
            .events
            .iter()
            .filter(|event| {
                filter
                    .category_id
                    .map_or(true, |category_id| event.category_id == category_id)
            })
            .filter(|event| {
                search.as_ref().map_or(true, |needle| {
                    event.title.to_lowercase().contains(needle)
                        || event.description.to_lowercase().contains(needle)
                        || event.location.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect())
    }

    async fn featured_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self
            .read()
            .events
            .iter()
            .filter(|event| event.is_featured)
            .cloned()
            .collect())
    }

    async fn trending_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self
            .read()
            .events
            .iter()
            .filter(|event| event.is_trending)
            .cloned()
            .collect())
    }

    async fn event(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.read().events.get(id).cloned())
    }

    async fn event_with_details(&self, id: i64) -> StoreResult<Option<EventWithDetails>> {
        Ok(self.read().event_with_details(id))
    }

    async fn events_by_organizer(&self, organizer_id: i64) -> StoreResult<Vec<Event>> {
        Ok(self
            .read()
            .events
            .iter()
            .filter(|event| event.organizer_id == organizer_id)
            .cloned()
            .collect())
    }

    async fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        let mut tables = self.write();
        Ok(tables.events.insert_with(|id| Event {
            id,
            title: event.title,
            description: event.description,
            image_url: event.image_url,
            location: event.location,
            start_date: event.start_date,
            end_date: event.end_date,
            organizer_id: event.organizer_id,
            category_id: event.category_id,
            is_featured: event.is_featured,
            is_trending: event.is_trending,
            has_seating: event.has_seating,
            seating_map: event.seating_map,
            created_at: Utc::now(),
        }))
    }

    async fn ticket_types_by_event(&self, event_id: i64) -> StoreResult<Vec<TicketType>> {
        Ok(self.read().ticket_types_for(event_id))
    }

    async fn create_ticket_type(&self, ticket_type: NewTicketType) -> StoreResult<TicketType> {
        let mut tables = self.write();
        Ok(tables.ticket_types.insert_with(|id| TicketType {
            id,
            event_id: ticket_type.event_id,
            name: ticket_type.name,
            description: ticket_type.description,
            price: ticket_type.price,
            quantity: ticket_type.quantity,
            available: ticket_type.available,
        }))
    }

    async fn create_purchase(
        &self,
        purchase: NewPurchase,
        items: Vec<NewPurchaseItem>,
    ) -> StoreResult<PurchaseWithDetails> {
        let mut tables = self.write();

        if tables.events.get(purchase.event_id).is_none() {
            return Err(StoreError::NotFound {
                entity: "Event",
                id: purchase.event_id,
            });
        }

        // Validation pre-pass: nothing is mutated until every line has a
        // resolvable ticket type (belonging to this event) with stock.
        for item in &items {
            let ticket_type = tables
                .ticket_types
                .get(item.ticket_type_id)
                .filter(|tt| tt.event_id == purchase.event_id)
                .ok_or(StoreError::NotFound {
                    entity: "Ticket type",
                    id: item.ticket_type_id,
                })?;
            if item.quantity > ticket_type.available {
                return Err(StoreError::InsufficientInventory {
                    name: ticket_type.name.clone(),
                    requested: item.quantity,
                    available: ticket_type.available,
                });
            }
        }

        let record = tables.purchases.insert_with(|id| Purchase {
            id,
            user_id: purchase.user_id,
            event_id: purchase.event_id,
            total_amount: purchase.total_amount,
            purchase_date: Utc::now(),
            status: PURCHASE_STATUS_COMPLETED.to_string(),
        });

        for item in items {
            let NewPurchaseItem {
                ticket_type_id,
                quantity,
                price,
                seat_info,
            } = item;
            tables.purchase_items.insert_with(|id| PurchaseItem {
                id,
                purchase_id: record.id,
                ticket_type_id,
                quantity,
                price,
                seat_info,
            });
            let ticket_type = tables
                .ticket_types
                .get_mut(ticket_type_id)
                .expect("ticket type verified in pre-pass");
            ticket_type.available = ticket_type.available.saturating_sub(quantity);
        }

        tables
            .purchase_with_details(record.id)?
            .ok_or(StoreError::NotFound {
                entity: "Purchase",
                id: record.id,
            })
    }

    async fn purchases_by_user(&self, user_id: i64) -> StoreResult<Vec<PurchaseWithDetails>> {
        let tables = self.read();
        let ids: Vec<i64> = tables
            .purchases
            .iter()
            .filter(|purchase| purchase.user_id == user_id)
            .map(|purchase| purchase.id)
            .collect();
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(details) = tables.purchase_with_details(id)? {
                out.push(details);
            }
        }
        Ok(out)
    }

    async fn purchase_with_details(&self, id: i64) -> StoreResult<Option<PurchaseWithDetails>> {
        self.read().purchase_with_details(id)
    }
}
