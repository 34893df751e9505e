use crate::{
    AppState,
    auth::{ADMIN_ROLE, AuthUser, bearer_token},
    error::ApiError,
    models::{LoginRequest, LoginResponse, MessageResponse, Product, ProductDraft, RefreshResponse},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
};

// --- Rejection Mapping ---

// Body and path rejections are absorbed into Result extractors and converted
// here, so malformed input still produces the `{"error": ...}` envelope instead
// of axum's plain-text default.

fn bad_body(err: JsonRejection) -> ApiError {
    ApiError::Validation(format!("invalid request body: {}", err.body_text()))
}

fn bad_id(_err: PathRejection) -> ApiError {
    ApiError::Validation("invalid product id".to_string())
}

// --- Auth Handlers ---

/// login
///
/// [Public Route] Verifies the submitted credentials and issues a short-lived
/// bearer token carrying the account's role. Bad credentials are a single 401
/// that does not distinguish unknown user from wrong password.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Malformed body", body = crate::models::ErrorBody),
        (status = 401, description = "Bad credentials", body = crate::models::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;

    let session = state.session.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        token: session.token,
        role: session.role,
    }))
}

/// logout
///
/// [Public Route] Stateless acknowledgment. No server-side invalidation occurs;
/// a previously issued token remains valid until its expiry. Always succeeds.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Acknowledged", body = MessageResponse))
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MessageResponse> {
    // Best-effort identity for the log line only; an absent or invalid token
    // does not change the outcome.
    let subject = bearer_token(&headers)
        .ok()
        .and_then(|token| state.signer.decode(token).ok())
        .map(|claims| claims.sub);

    state.session.logout(subject.as_deref());

    Json(MessageResponse {
        message: "logout successful".to_string(),
    })
}

/// refresh
///
/// [Token-Gated Route] Exchanges a still-valid bearer token for a longer-lived
/// one carrying the same subject and role. A missing, malformed, tampered or
/// expired token is 401; a token presented before its refresh window opens is 400.
#[utoipa::path(
    post,
    path = "/refresh",
    responses(
        (status = 200, description = "Token renewed", body = RefreshResponse),
        (status = 400, description = "Outside refresh window", body = crate::models::ErrorBody),
        (status = 401, description = "Invalid token", body = crate::models::ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    let renewed = state.session.refresh(token)?;

    Ok(Json(RefreshResponse { token: renewed }))
}

// --- Product Handlers ---

/// list_products
///
/// [Public Route] Returns the live collection. An empty catalog serializes as
/// `[]`, never as an absent value.
#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "All products", body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products = state.store.list().await;
    Json(products)
}

/// get_product
///
/// [Public Route] Retrieves a single product by id. A non-integer id is 400,
/// an unknown id is 404.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Found", body = Product),
        (status = 400, description = "Invalid id", body = crate::models::ErrorBody),
        (status = 404, description = "Not found", body = crate::models::ErrorBody)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id.map_err(bad_id)?;

    match state.store.get(id).await {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound("product")),
    }
}

/// create_product
///
/// [Admin Route] Appends a new product. The store assigns the id; any id in the
/// draft is ignored. Requires a valid bearer token with the admin role.
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Created", body = Product),
        (status = 400, description = "Malformed body", body = crate::models::ErrorBody),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorBody),
        (status = 403, description = "Not admin", body = crate::models::ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_product(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    auth.require_role(ADMIN_ROLE)?;

    let Json(draft) = payload.map_err(bad_body)?;
    draft.validate()?;

    let product = state.store.create(draft).await;
    tracing::info!(id = product.id, user = %auth.subject, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// update_product
///
/// [Admin Route] Replaces the name and price of an existing product. The stored
/// id is preserved regardless of what the draft contains.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Updated", body = Product),
        (status = 400, description = "Malformed body or id", body = crate::models::ErrorBody),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorBody),
        (status = 403, description = "Not admin", body = crate::models::ErrorBody),
        (status = 404, description = "Not found", body = crate::models::ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn update_product(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    auth.require_role(ADMIN_ROLE)?;

    let Path(id) = id.map_err(bad_id)?;
    let Json(draft) = payload.map_err(bad_body)?;
    draft.validate()?;

    match state.store.update(id, draft).await {
        Some(product) => {
            tracing::info!(id, user = %auth.subject, "product updated");
            Ok(Json(product))
        }
        None => Err(ApiError::NotFound("product")),
    }
}

/// delete_product
///
/// [Admin Route] Removes a product. The relative order of the remaining entries
/// is preserved, and the removed id is never reassigned.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Invalid id", body = crate::models::ErrorBody),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorBody),
        (status = 403, description = "Not admin", body = crate::models::ErrorBody),
        (status = 404, description = "Not found", body = crate::models::ErrorBody)
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_product(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.require_role(ADMIN_ROLE)?;

    let Path(id) = id.map_err(bad_id)?;

    if state.store.delete(id).await {
        tracing::info!(id, user = %auth.subject, "product deleted");
        Ok(Json(MessageResponse {
            message: "product deleted".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("product"))
    }
}
