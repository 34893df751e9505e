use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// CredentialVerifier
///
/// Defines the abstract contract for checking a submitted username/password pair
/// against a trusted source. The session issuer depends only on this trait, so the
/// in-source table used here can be swapped for an external identity provider
/// without touching the issuing logic.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the role associated with the identity when the pair is valid,
    /// `None` otherwise. Implementations must not reveal through timing whether
    /// the username exists.
    async fn verify(&self, username: &str, password: &str) -> Option<String>;
}

/// CredentialState
///
/// The concrete type used to share the credential verifier across the application state.
pub type CredentialState = Arc<dyn CredentialVerifier>;

/// Fixed-cost comparison used for every password check.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Compared against when the username is unknown, so both branches of a failed
/// login pay for one comparison.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

struct CredentialEntry {
    password: String,
    role: String,
}

/// StaticCredentials
///
/// In-source credential table. Account management and password hashing are out of
/// scope for this service; the table holds plaintext pairs and the security work
/// goes into not leaking which half of a failed pair was wrong.
pub struct StaticCredentials {
    users: HashMap<String, CredentialEntry>,
}

impl StaticCredentials {
    /// Builds a table from `(username, password, role)` triples.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let users = entries
            .into_iter()
            .map(|(username, password, role)| {
                (
                    username.into(),
                    CredentialEntry {
                        password: password.into(),
                        role: role.into(),
                    },
                )
            })
            .collect();
        Self { users }
    }
}

impl Default for StaticCredentials {
    /// The reference account: `robby` / `secret` with the `admin` role.
    fn default() -> Self {
        Self::new([("robby", "secret", "admin")])
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Option<String> {
        match self.users.get(username) {
            Some(entry) => {
                constant_time_eq(password, &entry.password).then(|| entry.role.clone())
            }
            None => {
                // Unknown user: burn a comparison anyway so the two failure
                // paths cost the same.
                let _ = constant_time_eq(password, DECOY_PASSWORD);
                None
            }
        }
    }
}
