use catalog_api::{
    AppState, SessionService, StaticCredentials, TokenSigner,
    config::{AppConfig, Env},
    create_router,
    credentials::CredentialState,
    store::{MemoryStore, PostgresStore, StoreState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, Store, Session Services, and the
/// HTTP Server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production secrets.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_api=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Store Initialization
    // DATABASE_URL selects the persistent backend; otherwise the catalog lives
    // in process memory. Both sit behind the same ProductStore trait.
    let store: StoreState = match &config.db_url {
        Some(db_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(db_url)
                .await
                .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

            let store = PostgresStore::new(pool);
            // Provision the products table on first run.
            store.ensure_schema().await;

            tracing::info!("Product store backed by Postgres");
            Arc::new(store)
        }
        None => {
            tracing::info!("Product store backed by process memory");
            Arc::new(MemoryStore::new())
        }
    };

    // 5. Auth Component Initialization
    // The signer owns the process-wide secret; the session service wires the
    // in-source credential table to it.
    let signer = TokenSigner::new(config.jwt_secret.clone());
    let verifier = Arc::new(StaticCredentials::default()) as CredentialState;
    let session = SessionService::new(verifier, signer.clone());

    // 6. Unified State Assembly
    // Bundles all initialized dependencies into the shared AppState.
    let app_state = AppState {
        store,
        session,
        signer,
        config,
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind("0.0.0.0:8080").await.unwrap();

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:8080");
    tracing::info!("API Documentation (Swagger UI) available at: http://localhost:8080/swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
