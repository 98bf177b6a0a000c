//! Event catalog browsing plus the organizer surface for creating
//! events and their ticket inventory.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::handlers::{bad_json, bad_path, bad_query};
use crate::models::{NewEvent, NewTicketType, SeatingMap};
use crate::state::AppState;
use crate::store::EventFilter;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub category_id: i64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub has_seating: bool,
    #[serde(default)]
    pub seating_map: Option<SeatingMap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketTypeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    /// Defaults to `quantity` (nothing sold yet) when omitted.
    #[serde(default)]
    pub available: Option<u32>,
}

/// GET /api/events, with optional `categoryId` and `search` filters.
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(bad_query)?;
    let filter = EventFilter {
        category_id: query.category_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    let events = state.store.events(filter).await?;
    Ok(success(events, "Events retrieved").into_response())
}

/// GET /api/events/featured.
pub async fn featured_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.featured_events().await?;
    Ok(success(events, "Featured events retrieved").into_response())
}

/// GET /api/events/trending.
pub async fn trending_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.trending_events().await?;
    Ok(success(events, "Trending events retrieved").into_response())
}

/// GET /api/events/:id, joined with organizer, category and inventory.
pub async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let details = state
        .store
        .event_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    Ok(success(details, "Event retrieved").into_response())
}

/// GET /api/events/organizer/me, the events the signed-in user organizes.
/// Any session may ask; a user with no events gets an empty list.
pub async fn organizer_events(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let events = state.store.events_by_organizer(user.id).await?;
    Ok(success(events, "Organizer events retrieved").into_response())
}

/// POST /api/events. Organizer-only.
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    if !user.is_organizer {
        return Err(AppError::Forbidden(
            "Only organizers can create events".to_string(),
        ));
    }
    let Json(payload) = payload.map_err(bad_json)?;

    if payload.title.trim().is_empty() || payload.location.trim().is_empty() {
        return Err(AppError::ValidationError(
            "title and location are required".to_string(),
        ));
    }
    if payload.end_date < payload.start_date {
        return Err(AppError::ValidationError(
            "endDate must not be before startDate".to_string(),
        ));
    }
    if state.store.category(payload.category_id).await?.is_none() {
        return Err(AppError::ValidationError(
            "categoryId does not reference a known category".to_string(),
        ));
    }

    let event = state
        .store
        .create_event(NewEvent {
            title: payload.title,
            description: payload.description,
            image_url: payload.image_url,
            location: payload.location,
            start_date: payload.start_date,
            end_date: payload.end_date,
            organizer_id: user.id,
            category_id: payload.category_id,
            is_featured: payload.is_featured,
            is_trending: payload.is_trending,
            has_seating: payload.has_seating,
            seating_map: payload.seating_map,
        })
        .await?;
    Ok(created(event, "Event created").into_response())
}

/// GET /api/events/:id/ticket-types. Unknown events simply have no
/// inventory, so the list is empty rather than an error.
pub async fn list_ticket_types(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let ticket_types = state.store.ticket_types_by_event(id).await?;
    Ok(success(ticket_types, "Ticket types retrieved").into_response())
}

/// POST /api/events/:id/ticket-types. Only the event's organizer.
pub async fn create_ticket_type(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateTicketTypeRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let event = state
        .store
        .event(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    if event.organizer_id != user.id {
        return Err(AppError::Forbidden(
            "Only the event organizer can add ticket types".to_string(),
        ));
    }
    let Json(payload) = payload.map_err(bad_json)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::ValidationError("name is required".to_string()));
    }
    if payload.price.is_sign_negative() {
        return Err(AppError::ValidationError(
            "price must not be negative".to_string(),
        ));
    }
    let available = payload.available.unwrap_or(payload.quantity);
    if available > payload.quantity {
        return Err(AppError::ValidationError(
            "available cannot exceed quantity".to_string(),
        ));
    }

    let ticket_type = state
        .store
        .create_ticket_type(NewTicketType {
            event_id: event.id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            quantity: payload.quantity,
            available,
        })
        .await?;
    Ok(created(ticket_type, "Ticket type created").into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::auth::SessionStore;
    use crate::models::{NewCategory, NewUser, User};
    use crate::store::{MemoryStore, Store};

    async fn organizer_state() -> (AppState, User) {
        let store = Arc::new(MemoryStore::new());
        let user = store
            .create_user(NewUser {
                username: "org".to_string(),
                password_hash: "$argon2id$test".to_string(),
                email: "org@example.com".to_string(),
                full_name: "Org Anizer".to_string(),
                is_organizer: true,
                avatar_url: None,
            })
            .await
            .unwrap();
        store
            .create_category(NewCategory {
                name: "Concerts".to_string(),
                icon: "music".to_string(),
            })
            .await
            .unwrap();
        let state = AppState::new(store, Arc::new(SessionStore::new(Duration::hours(1))));
        (state, user)
    }

    fn event_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Open Mic".to_string(),
            description: "Bring a song".to_string(),
            image_url: "https://example.com/mic.jpg".to_string(),
            location: "Basement Bar".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::hours(3),
            category_id: 1,
            is_featured: false,
            is_trending: false,
            has_seating: false,
            seating_map: None,
        }
    }

    #[tokio::test]
    async fn non_organizers_cannot_create_events() {
        let (state, _) = organizer_state().await;
        let attendee = state
            .store
            .create_user(NewUser {
                username: "fan".to_string(),
                password_hash: "$argon2id$test".to_string(),
                email: "fan@example.com".to_string(),
                full_name: "Fan One".to_string(),
                is_organizer: false,
                avatar_url: None,
            })
            .await
            .unwrap();

        let err = create_event(State(state), CurrentUser(attendee), Ok(Json(event_request())))
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::Forbidden(msg) if msg == "Only organizers can create events"));
    }

    #[tokio::test]
    async fn event_dates_must_be_ordered() {
        let (state, organizer) = organizer_state().await;
        let mut request = event_request();
        request.end_date = request.start_date - Duration::hours(1);

        let err = create_event(State(state), CurrentUser(organizer), Ok(Json(request)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn event_category_must_exist() {
        let (state, organizer) = organizer_state().await;
        let mut request = event_request();
        request.category_id = 42;

        let err = create_event(State(state), CurrentUser(organizer), Ok(Json(request)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn ticket_type_availability_is_capped_by_capacity() {
        let (state, organizer) = organizer_state().await;
        create_event(
            State(state.clone()),
            CurrentUser(organizer.clone()),
            Ok(Json(event_request())),
        )
        .await
        .unwrap();

        let err = create_ticket_type(
            State(state.clone()),
            CurrentUser(organizer.clone()),
            Ok(Path(1)),
            Ok(Json(CreateTicketTypeRequest {
                name: "GA".to_string(),
                description: None,
                price: Decimal::from(10),
                quantity: 100,
                available: Some(101),
            })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        // Omitted availability starts at full capacity.
        let response = create_ticket_type(
            State(state.clone()),
            CurrentUser(organizer),
            Ok(Path(1)),
            Ok(Json(CreateTicketTypeRequest {
                name: "GA".to_string(),
                description: None,
                price: Decimal::from(10),
                quantity: 100,
                available: None,
            })),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        let stocked = state.store.ticket_types_by_event(1).await.unwrap();
        assert_eq!(stocked[0].available, 100);
    }

    #[tokio::test]
    async fn only_the_owner_adds_ticket_types() {
        let (state, organizer) = organizer_state().await;
        create_event(
            State(state.clone()),
            CurrentUser(organizer),
            Ok(Json(event_request())),
        )
        .await
        .unwrap();
        let rival = state
            .store
            .create_user(NewUser {
                username: "rival".to_string(),
                password_hash: "$argon2id$test".to_string(),
                email: "rival@example.com".to_string(),
                full_name: "Rival Org".to_string(),
                is_organizer: true,
                avatar_url: None,
            })
            .await
            .unwrap();

        let err = create_ticket_type(
            State(state),
            CurrentUser(rival),
            Ok(Path(1)),
            Ok(Json(CreateTicketTypeRequest {
                name: "GA".to_string(),
                description: None,
                price: Decimal::from(10),
                quantity: 100,
                available: None,
            })),
        )
        .await
        .unwrap_err();
        assert!(
            matches!(&err, AppError::Forbidden(msg) if msg == "Only the event organizer can add ticket types")
        );
    }
}
