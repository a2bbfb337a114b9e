use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gather_server::auth::TokenKeys;
use gather_server::config::Config;
use gather_server::routes::create_routes;
use gather_server::state::AppState;
use gather_server::store::JsonFileStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("configuration error: {message}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let keys = TokenKeys::new(&config.jwt_secret, config.token_ttl);
    let state = AppState::new(store, keys);

    let app = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(data_dir = %config.data_dir.display(), "🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
