use crate::config::Config;
use sea_orm::DatabaseConnection;

/// Shared application state handed to routers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Present when the durable storage variant is active
    pub db: Option<DatabaseConnection>,
}
