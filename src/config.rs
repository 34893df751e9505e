use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (e.g., Token Signer, Product Store). It is pulled into the application state via
/// FromRef, embodying the "immutable AppConfig" part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls logging format and secret strictness.
    pub env: Env,
    // Secret key used to sign and validate issued JWTs. Fixed for the process
    // lifetime; rotating it invalidates every outstanding token.
    pub jwt_secret: String,
    // Optional Postgres connection string. When present the product store is
    // backed by the database; when absent an in-memory store is used.
    pub db_url: Option<String>,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, fallback secret) and production-grade behavior (JSON logs,
/// mandatory secret).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: "catalog-local-test-secret".to_string(),
            db_url: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the fail-fast
    /// principle.
    ///
    /// # Panics
    /// Panics if `JWT_SECRET` is missing while running in Production. The process must
    /// never serve production traffic with a guessable signing key.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // JWT Secret Resolution
        // The production secret is mandatory and must be explicitly set.
        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            // In local, we provide a fallback so the service starts without setup.
            _ => env::var("JWT_SECRET").unwrap_or_else(|_| "catalog-local-dev-secret".to_string()),
        };

        // Store Backend Selection
        // DATABASE_URL present selects the Postgres-backed store; otherwise the
        // in-memory store is used. Both live behind the same ProductStore trait.
        let db_url = env::var("DATABASE_URL").ok();

        Self {
            env,
            jwt_secret,
            db_url,
        }
    }
}
