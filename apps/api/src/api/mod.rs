use axum::Router;

pub mod health;
pub mod items;

/// Creates the API routes without the configured prefix.
/// The prefix (e.g. `/api/v1`) is added by the `create_router` helper.
///
/// This function takes a reference to AppState and initializes the item
/// service over whichever storage backend the state carries. Returns a
/// stateless Router (sub-routers have their state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/items", items::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint probes the active
/// storage backend.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
