use axum::Router;
use domain_items::{InMemoryItemRepository, ItemService, PgItemRepository, handlers};

/// Build the items router over the storage backend selected at startup.
///
/// Both repositories satisfy the same contract, so the service and
/// handlers are shared; only the construction differs.
pub fn router(state: &crate::state::AppState) -> Router {
    match &state.db {
        Some(db) => {
            let repository = PgItemRepository::new(db.clone());
            handlers::router(ItemService::new(repository))
        }
        None => handlers::router(ItemService::new(InMemoryItemRepository::new())),
    }
}
