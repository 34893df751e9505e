use crate::credentials::CredentialState;
use crate::token::{Claims, TokenError, TokenSigner, unix_now};

/// Validity of a freshly issued login token, in seconds (5 minutes).
pub const SHORT_TTL_SECS: usize = 5 * 60;
/// Validity granted by a successful refresh, in seconds (1 hour).
pub const LONG_TTL_SECS: usize = 60 * 60;
/// A token becomes refreshable once its remaining validity is at most this
/// window (10 minutes). Short login tokens are therefore always eligible while
/// alive; hour-long refreshed tokens re-enter the window near their expiry.
pub const REFRESH_WINDOW_SECS: usize = 10 * 60;

/// SessionError
///
/// Failure taxonomy for issuing operations. Codec failures pass through so the
/// boundary can distinguish an expired presentation (401) from a premature
/// refresh (400).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Credential check failed. Deliberately does not say which half was wrong.
    #[error("invalid credentials")]
    BadCredentials,
    /// The presented token has too much validity left to be refreshed.
    #[error("token is not yet eligible for refresh")]
    RefreshTooEarly,
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// IssuedSession
///
/// The outcome of a successful login: the encoded token plus the role it
/// carries, echoed in the login response for the client's convenience.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub role: String,
}

/// SessionService
///
/// The session issuer. Builds claims on successful credential checks and turns
/// them into signed tokens via the codec. Holds no per-session state: a token's
/// validity is entirely a function of its embedded claims and signature, so
/// there is nothing server-side to invalidate on logout.
#[derive(Clone)]
pub struct SessionService {
    verifier: CredentialState,
    signer: TokenSigner,
}

impl SessionService {
    pub fn new(verifier: CredentialState, signer: TokenSigner) -> Self {
        Self { verifier, signer }
    }

    /// login
    ///
    /// Verifies the submitted pair and, on success, issues a short-lived token
    /// carrying the identity and its role. `iat` is the moment of issuance and
    /// `exp` is `iat + SHORT_TTL_SECS`, so `exp > iat` holds for every token
    /// this service produces.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, SessionError> {
        let role = self
            .verifier
            .verify(username, password)
            .await
            .ok_or(SessionError::BadCredentials)?;

        let now = unix_now();
        let claims = Claims {
            sub: username.to_string(),
            role: role.clone(),
            iat: now,
            exp: now + SHORT_TTL_SECS,
        };

        let token = self.signer.encode(&claims)?;
        tracing::info!(user = %username, role = %role, "login succeeded");

        Ok(IssuedSession { token, role })
    }

    /// refresh
    ///
    /// Exchanges a still-valid token for a longer-lived one. The presented token
    /// must decode cleanly (expired or tampered tokens fail with the codec's
    /// errors) and must be inside the refresh window. The replacement carries
    /// the same subject and role with `exp = now + LONG_TTL_SECS`; the old
    /// token is not tracked or revoked.
    pub fn refresh(&self, token: &str) -> Result<String, SessionError> {
        let claims = self.signer.decode(token)?;

        let now = unix_now();
        if claims.remaining_secs(now) > REFRESH_WINDOW_SECS {
            return Err(SessionError::RefreshTooEarly);
        }

        let renewed = Claims {
            sub: claims.sub,
            role: claims.role,
            iat: now,
            exp: now + LONG_TTL_SECS,
        };

        let token = self.signer.encode(&renewed)?;
        tracing::info!(user = %renewed.sub, "session refreshed");

        Ok(token)
    }

    /// logout
    ///
    /// Stateless acknowledgment. There is no session table and no revocation
    /// list; the issued token stays usable until its expiry.
    pub fn logout(&self, subject: Option<&str>) {
        match subject {
            Some(sub) => tracing::info!(user = %sub, "logout acknowledged"),
            None => tracing::info!("logout acknowledged for anonymous caller"),
        }
    }
}
