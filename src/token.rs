use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

/// Claims
///
/// Represents the payload structure carried inside every issued JSON Web Token (JWT).
/// These claims are signed by the server's secret and validated upon every
/// authenticated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): The username of the session holder.
    pub sub: String,
    /// The role label carried by the session, e.g. "admin". Checked by the
    /// access guard on role-gated routes; the codec itself never inspects it.
    pub role: String,
    /// Issued At (iat): Timestamp when the JWT was issued.
    pub iat: usize,
    /// Expiration Time (exp): Timestamp after which the JWT must not be accepted.
    pub exp: usize,
}

impl Claims {
    /// Seconds of validity left at `now`. Zero once the token has expired.
    pub fn remaining_secs(&self, now: usize) -> usize {
        self.exp.saturating_sub(now)
    }
}

/// Current unix timestamp as used throughout claim construction and validation.
pub fn unix_now() -> usize {
    Utc::now().timestamp() as usize
}

/// TokenError
///
/// The codec's complete failure taxonomy. Callers map these onto HTTP statuses;
/// everything except `Signing` is a client-side 401 condition.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token's structural format is not parseable as a JWT.
    #[error("malformed token")]
    Malformed,
    /// The signature does not verify against the process secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token's expiry timestamp has passed.
    #[error("token has expired")]
    Expired,
    /// Serialization or signing failed while encoding. Server-side condition.
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// TokenSigner
///
/// The token codec. Owns the process-wide signing secret (dependency-injected
/// via AppState rather than read from a global) and converts Claims to and from
/// their compact HS256-signed representation.
///
/// The secret is fixed at construction; there is no rotation path, so restarting
/// with a new secret invalidates every outstanding token at once.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// encode
    ///
    /// Serializes the claims and appends an HS256 signature keyed by the process
    /// secret. Only fails if the signing backend itself fails, which surfaces as
    /// an internal error at the HTTP boundary.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), claims, &key).map_err(TokenError::Signing)
    }

    /// decode
    ///
    /// Parses and verifies a presented token. Fails with `Malformed` if the
    /// structural format is not parseable, `InvalidSignature` if the signature
    /// does not verify, and `Expired` if `now >= exp`. On success the claims are
    /// returned with no further validation; role and identity checks are the
    /// caller's responsibility.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is enforced exactly; the default 60s leeway would accept
        // tokens past their stated lifetime.
        validation.leeway = 0;

        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                ErrorKind::InvalidSignature => Err(TokenError::InvalidSignature),
                // Everything else (bad base64, truncated segments, wrong JSON
                // shape, unexpected algorithm) is a structural failure.
                _ => Err(TokenError::Malformed),
            },
        }
    }
}
