use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

use crate::error::ApiError;
use crate::token::TokenSigner;

/// The only role with mutation rights over the catalog.
pub const ADMIN_ROLE: &str = "admin";

/// bearer_token
///
/// Extracts the bearer credential from the Authorization header. The header must
/// match `Bearer <token>` exactly; a missing header or any other shape is a hard
/// 401, never a best-effort parse.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthenticated("authorization header missing"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated("authorization header malformed"))
}

/// AuthUser
///
/// The resolved identity of an authenticated request: the access guard's output.
/// Handlers take this as an argument to assert that a validated token was
/// presented and to read the caller's identity and role. The attachment is
/// request-scoped and dropped when the request completes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The `sub` claim: the username the session was issued to.
    pub subject: String,
    /// The `role` claim carried by the token, e.g. "admin".
    pub role: String,
}

impl AuthUser {
    /// require_role
    ///
    /// Role enforcement for gated routes, parameterized by the required role
    /// string. Exact string match only: no hierarchy, no multi-role sets. A
    /// mismatch is 403; the caller was authenticated but lacks the capability.
    pub fn require_role(&self, required: &str) -> Result<(), ApiError> {
        if self.role == required {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a function
/// argument in any protected handler. This keeps authentication (extractor)
/// cleanly separated from business logic (the handler).
///
/// The process per request:
/// 1. Dependency Resolution: Accessing the TokenSigner from the application state.
/// 2. Credential Extraction: Strict `Bearer <token>` header parsing.
/// 3. Token Validation: Signature and expiry checks via the codec.
///
/// Rejection: any failure aborts the request with 401 before the handler runs;
/// no partial processing occurs downstream of a failed check.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    // Allows the extractor to pull the codec (and its secret) from the app state.
    TokenSigner: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let signer = TokenSigner::from_ref(state);

        let token = bearer_token(&parts.headers)?;

        // Signature and expiry are verified here; the claims come back only if
        // both hold. Role checks are the route's responsibility.
        let claims = signer.decode(token)?;

        Ok(AuthUser {
            subject: claims.sub,
            role: claims.role,
        })
    }
}
