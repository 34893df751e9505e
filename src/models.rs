use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::error::ApiError;

// --- Core Application Schemas ---

/// Product
///
/// A catalog entry. The `id` is assigned by the product store on creation and
/// uniquely identifies at most one live product; it is never supplied by the
/// caller and never reused within a process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Product {
    pub id: i64,
    /// Non-empty display name.
    pub name: String,
    /// Non-negative price.
    pub price: f64,
}

/// ProductDraft
///
/// Input payload for creating and updating products. The same shape serves both
/// operations: `update` replaces every field of the stored entry except `id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ProductDraft {
    /// Accepted on the wire for client convenience and ignored: identity is
    /// assigned by the store on create and preserved on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
}

impl ProductDraft {
    /// validate
    ///
    /// Enforces the Product field invariants before the draft reaches the store.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(ApiError::Validation(
                "product price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Auth Payloads ---

/// LoginRequest
///
/// Input payload for POST /login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// LoginResponse
///
/// Output payload for a successful login: the signed bearer token plus the role
/// it carries, so the client can shape its UI without decoding the token.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: String,
}

/// RefreshResponse
///
/// Output payload for a successful token refresh.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RefreshResponse {
    pub token: String,
}

/// MessageResponse
///
/// Generic acknowledgment body used by logout and delete.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

/// ErrorBody
///
/// The stable error envelope. The message content may vary; the status code and
/// the presence of the `error` key are part of the contract tested by clients.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}
