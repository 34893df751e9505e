use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod models;
pub mod session;
pub mod store;
pub mod token;

// Module for routing segregation (session endpoints vs. catalog).
pub mod routes;
use routes::{products, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use credentials::{CredentialState, StaticCredentials};
pub use session::SessionService;
pub use store::{MemoryStore, PostgresStore, StoreState};
pub use token::TokenSigner;

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the application.
/// It aggregates all API paths and data schemas decorated with the
/// `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::logout, handlers::refresh,
        handlers::list_products, handlers::get_product, handlers::create_product,
        handlers::update_product, handlers::delete_product
    ),
    components(
        schemas(
            models::Product, models::ProductDraft, models::LoginRequest,
            models::LoginResponse, models::RefreshResponse, models::MessageResponse,
            models::ErrorBody,
        )
    ),
    modifiers(&BearerTokenAddon),
    tags(
        (name = "catalog-api", description = "Product Catalog API")
    )
)]
struct ApiDoc;

/// BearerTokenAddon
///
/// Registers the `bearer_token` security scheme referenced by the protected
/// paths, so Swagger UI offers the Authorize dialog for pasting a token.
struct BearerTokenAddon;

impl Modify for BearerTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe,
/// and immutable container holding all essential application services and
/// configuration, shared across all incoming requests. The signing secret and
/// the store live here rather than in package-level globals; every handler
/// receives them through explicit state extraction.
#[derive(Clone)]
pub struct AppState {
    /// Resource Store: owns the mutable product collection and its access discipline.
    pub store: StoreState,
    /// Session Issuer: credential checks and token issuance/refresh.
    pub session: SessionService,
    /// Token Codec: decodes bearer tokens for the access guard.
    pub signer: TokenSigner,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers and extractors to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for StoreState {
    fn from_ref(app_state: &AppState) -> StoreState {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for SessionService {
    fn from_ref(app_state: &AppState) -> SessionService {
        app_state.session.clone()
    }
}

impl FromRef<AppState> for TokenSigner {
    fn from_ref(app_state: &AppState) -> TokenSigner {
        app_state.signer.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global
/// middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Session endpoints and health probe.
        .merge(public::public_routes())
        // Catalog endpoints; mutation handlers enforce the admin role themselves.
        .merge(products::product_routes())
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a
                // tracing span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: returns the x-request-id header to
                // the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation. It extracts the
/// `x-request-id` header (if present) and includes it in the structured logging
/// metadata alongside the HTTP method and URI, so every log line for a single
/// request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
