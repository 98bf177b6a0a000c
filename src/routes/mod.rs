use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{auth, categories, events, health_check, purchases};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/status", get(auth::status))
        .route("/categories", get(categories::list_categories))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/featured", get(events::featured_events))
        .route("/events/trending", get(events::trending_events))
        .route("/events/organizer/me", get(events::organizer_events))
        .route("/events/:id", get(events::get_event))
        .route(
            "/events/:id/ticket-types",
            get(events::list_ticket_types).post(events::create_ticket_type),
        )
        .route("/purchases", post(purchases::create_purchase))
        .route("/purchases/me", get(purchases::my_purchases))
        .route("/purchases/:id", get(purchases::get_purchase));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}
