use core_config::{
    AppInfo, FromEnv, app_info,
    auth::AuthConfig,
    server::{ApiConfig, ServerConfig},
};

// Import database config from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    /// Present when `DATABASE_URL` is set; selects the durable storage variant
    pub database: Option<PostgresConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let api = ApiConfig::from_env()?; // Default prefix: /api/v1
        let auth = AuthConfig::from_env()?; // Declared for token issuance, unused by endpoints

        // Optional: without DATABASE_URL the process-local store is used
        let database = match std::env::var("DATABASE_URL") {
            Ok(_) => Some(PostgresConfig::from_env()?),
            Err(_) => None,
        };

        Ok(Self {
            app: app_info!(),
            api,
            auth,
            database,
            server,
            environment,
        })
    }
}
