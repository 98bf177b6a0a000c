use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use boxoffice::auth::SessionStore;
use boxoffice::config::Config;
use boxoffice::routes::create_routes;
use boxoffice::state::AppState;
use boxoffice::store::{seed::seed_demo_data, MemoryStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let store = Arc::new(MemoryStore::new());
    if config.seed_demo_data {
        seed_demo_data(store.as_ref())
            .await
            .expect("Failed to seed demo data");
        tracing::info!("Demo catalog seeded");
    }

    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    let state = AppState::new(store, sessions);

    let app: Router = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
