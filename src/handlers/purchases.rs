//! Checkout and purchase history for the signed-in user.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::CurrentUser;
use crate::handlers::{bad_json, bad_path};
use crate::models::{NewPurchase, NewPurchaseItem};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemRequest {
    pub ticket_type_id: i64,
    pub quantity: u32,
    pub price: Decimal,
    /// Seat selections from the picker, stored as-is.
    #[serde(default)]
    pub seat_info: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHeaderRequest {
    pub event_id: i64,
    /// Client-declared total, stored as received. Pricing already
    /// happened in the cart.
    pub total_amount: Decimal,
}

/// Checkout body: a purchase header plus the cart lines.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub purchase: PurchaseHeaderRequest,
    pub items: Vec<PurchaseItemRequest>,
}

/// POST /api/purchases. The whole cart commits or none of it does.
pub async fn create_purchase(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(bad_json)?;

    if payload.items.is_empty() {
        return Err(AppError::ValidationError(
            "Cart must contain at least one item".to_string(),
        ));
    }
    if payload.items.iter().any(|item| item.quantity == 0) {
        return Err(AppError::ValidationError(
            "Item quantities must be at least 1".to_string(),
        ));
    }

    let items = payload
        .items
        .into_iter()
        .map(|item| NewPurchaseItem {
            ticket_type_id: item.ticket_type_id,
            quantity: item.quantity,
            price: item.price,
            seat_info: item.seat_info,
        })
        .collect();
    let details = state
        .store
        .create_purchase(
            NewPurchase {
                user_id: user.id,
                event_id: payload.purchase.event_id,
                total_amount: payload.purchase.total_amount,
            },
            items,
        )
        .await?;
    Ok(created(details, "Purchase completed").into_response())
}

/// GET /api/purchases/me.
pub async fn my_purchases(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let purchases = state.store.purchases_by_user(user.id).await?;
    Ok(success(purchases, "Purchases retrieved").into_response())
}

/// GET /api/purchases/:id. Owners only.
pub async fn get_purchase(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let details = state
        .store
        .purchase_with_details(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase not found".to_string()))?;
    if details.purchase.user_id != user.id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }
    Ok(success(details, "Purchase retrieved").into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::auth::SessionStore;
    use crate::models::{NewCategory, NewEvent, NewTicketType, NewUser, User};
    use crate::store::{MemoryStore, Store};

    async fn checkout_state() -> (AppState, User) {
        let store = Arc::new(MemoryStore::new());
        let user = store
            .create_user(NewUser {
                username: "buyer".to_string(),
                password_hash: "$argon2id$test".to_string(),
                email: "buyer@example.com".to_string(),
                full_name: "Buyer One".to_string(),
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
        store
            .create_event(NewEvent {
                title: "Quiet Set".to_string(),
                description: "Acoustic evening".to_string(),
                image_url: "https://example.com/set.jpg".to_string(),
                location: "Attic Room".to_string(),
                start_date: chrono::Utc::now(),
                end_date: chrono::Utc::now(),
                organizer_id: user.id,
                category_id: 1,
                is_featured: false,
                is_trending: false,
                has_seating: false,
                seating_map: None,
            })
            .await
            .unwrap();
        store
            .create_ticket_type(NewTicketType {
                event_id: 1,
                name: "GA".to_string(),
                description: None,
                price: Decimal::from(20),
                quantity: 30,
                available: 30,
            })
            .await
            .unwrap();
        let state = AppState::new(store, Arc::new(SessionStore::new(Duration::hours(1))));
        (state, user)
    }

    #[tokio::test]
    async fn empty_carts_are_rejected_before_touching_the_store() {
        let (state, user) = checkout_state().await;
        let err = create_purchase(
            State(state),
            CurrentUser(user),
            Ok(Json(CreatePurchaseRequest {
                purchase: PurchaseHeaderRequest {
                    event_id: 1,
                    total_amount: Decimal::ZERO,
                },
                items: Vec::new(),
            })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn zero_quantity_lines_are_rejected() {
        let (state, user) = checkout_state().await;
        let err = create_purchase(
            State(state.clone()),
            CurrentUser(user),
            Ok(Json(CreatePurchaseRequest {
                purchase: PurchaseHeaderRequest {
                    event_id: 1,
                    total_amount: Decimal::from(20),
                },
                items: vec![PurchaseItemRequest {
                    ticket_type_id: 1,
                    quantity: 0,
                    price: Decimal::from(20),
                    seat_info: None,
                }],
            })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        // Inventory was never touched.
        let stocked = state.store.ticket_types_by_event(1).await.unwrap();
        assert_eq!(stocked[0].available, 30);
    }

    #[tokio::test]
    async fn users_cannot_read_each_others_purchases() {
        let (state, user) = checkout_state().await;
        create_purchase(
            State(state.clone()),
            CurrentUser(user),
            Ok(Json(CreatePurchaseRequest {
                purchase: PurchaseHeaderRequest {
                    event_id: 1,
                    total_amount: Decimal::from(20),
                },
                items: vec![PurchaseItemRequest {
                    ticket_type_id: 1,
                    quantity: 1,
                    price: Decimal::from(20),
                    seat_info: None,
                }],
            })),
        )
        .await
        .unwrap();
        let snoop = state
            .store
            .create_user(NewUser {
                username: "snoop".to_string(),
                password_hash: "$argon2id$test".to_string(),
                email: "snoop@example.com".to_string(),
                full_name: "Snoop Two".to_string(),
                is_organizer: false,
                avatar_url: None,
            })
            .await
            .unwrap();

        let err = get_purchase(State(state), CurrentUser(snoop), Ok(Path(1)))
            .await
            .unwrap_err();
        assert!(matches!(&err, AppError::Forbidden(msg) if msg == "Access denied"));
    }
}
