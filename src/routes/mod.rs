use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security};
use crate::handlers::{auth, events, health_check, users};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    let user_routes = Router::new().route(
        "/profile",
        get(users::get_profile).put(users::update_profile),
    );

    let event_routes = Router::new()
        .route("/create", post(events::create_event))
        .route("/my-events", get(events::my_events))
        .route("/public", get(events::public_events))
        .route("/register/:event_id", post(events::register_for_event))
        .route("/my-registrations", get(events::my_registrations))
        .route("/registrations/:event_id", get(events::event_registrations))
        .route("/cancel/:registration_id", delete(events::cancel_registration));

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/events", event_routes)
        .layer(middleware::from_fn(security::set_security_headers))
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
