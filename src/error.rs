use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ErrorBody;
use crate::session::SessionError;
use crate::token::TokenError;

/// ApiError
///
/// The single error type crossing the HTTP boundary. Every failure in the core is
/// converted into one of these variants at the point of detection, and each
/// variant maps to exactly one status code with a stable `{"error": <message>}`
/// body. Clients test against the status code and the presence of the `error` key.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body or path parameter. User-correctable.
    #[error("{0}")]
    Validation(String),
    /// Missing, malformed, invalid, or expired credential.
    #[error("{0}")]
    Unauthenticated(&'static str),
    /// Valid credential, insufficient role.
    #[error("insufficient permissions")]
    Forbidden,
    /// Valid request, no matching entity.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Signing/encoding failure. The detail is logged server-side and never
    /// exposed to the client.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal failure: {detail}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<TokenError> for ApiError {
    /// Codec failures presented by a client are authentication failures; only a
    /// failure to sign on our side is internal.
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed | TokenError::InvalidSignature => {
                ApiError::Unauthenticated("invalid token")
            }
            TokenError::Expired => ApiError::Unauthenticated("token has expired"),
            TokenError::Signing(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::BadCredentials => {
                // One message for unknown user and wrong password alike.
                ApiError::Unauthenticated("invalid username or password")
            }
            SessionError::RefreshTooEarly => {
                ApiError::Validation("token is not yet eligible for refresh".to_string())
            }
            SessionError::Token(e) => e.into(),
        }
    }
}
