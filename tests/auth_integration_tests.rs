use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use catalog_api::{
    AppState, SessionService, StaticCredentials, TokenSigner,
    auth::{ADMIN_ROLE, AuthUser},
    config::AppConfig,
    credentials::CredentialState,
    error::ApiError,
    store::MemoryStore,
    token::{Claims, unix_now},
};
use std::sync::Arc;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

fn create_app_state() -> AppState {
    let signer = TokenSigner::new(TEST_JWT_SECRET);
    let verifier = Arc::new(StaticCredentials::default()) as CredentialState;

    let mut config = AppConfig::default();
    config.jwt_secret = TEST_JWT_SECRET.to_string();

    AppState {
        store: Arc::new(MemoryStore::new()),
        session: SessionService::new(verifier, signer.clone()),
        signer,
        config,
    }
}

fn create_token(secret: &str, sub: &str, role: &str, exp_offset: i64) -> String {
    let now = unix_now();
    let claims = Claims {
        sub: sub.to_string(),
        role: role.to_string(),
        iat: now.saturating_sub(10),
        exp: (now as i64 + exp_offset) as usize,
    };
    TokenSigner::new(secret).encode(&claims).unwrap()
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn parts_with_authorization(value: &str) -> Parts {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(value).unwrap(),
    );
    parts
}

// --- Tests ---

#[tokio::test]
async fn test_guard_accepts_valid_bearer_token() {
    let state = create_app_state();
    let token = create_token(TEST_JWT_SECRET, "robby", "admin", 3600);

    let mut parts = parts_with_authorization(&format!("Bearer {token}"));
    let auth_user = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect("valid token must authenticate");

    assert_eq!(auth_user.subject, "robby");
    assert_eq!(auth_user.role, "admin");
}

#[tokio::test]
async fn test_guard_rejects_missing_header() {
    let state = create_app_state();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated(_)), "got {err:?}");
}

#[tokio::test]
async fn test_guard_rejects_malformed_header_shapes() {
    let state = create_app_state();
    let token = create_token(TEST_JWT_SECRET, "robby", "admin", 3600);

    // Only the exact `Bearer <token>` shape is accepted.
    let shapes = [
        token.clone(),
        format!("bearer {token}"),
        format!("Basic {token}"),
        "Bearer".to_string(),
    ];
    for value in &shapes {
        let mut parts = parts_with_authorization(value);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::Unauthenticated(_)),
            "header {value:?} got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_guard_rejects_expired_token() {
    let state = create_app_state();
    let token = create_token(TEST_JWT_SECRET, "robby", "admin", -60);

    let mut parts = parts_with_authorization(&format!("Bearer {token}"));
    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated(_)), "got {err:?}");
}

#[tokio::test]
async fn test_guard_rejects_token_signed_with_other_secret() {
    let state = create_app_state();
    let token = create_token("some-other-secret-entirely", "robby", "admin", 3600);

    let mut parts = parts_with_authorization(&format!("Bearer {token}"));
    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated(_)), "got {err:?}");
}

#[tokio::test]
async fn test_require_role_exact_match_only() {
    let admin = AuthUser {
        subject: "robby".to_string(),
        role: "admin".to_string(),
    };
    assert!(admin.require_role(ADMIN_ROLE).is_ok());

    let viewer = AuthUser {
        subject: "sandy".to_string(),
        role: "viewer".to_string(),
    };
    let err = viewer.require_role(ADMIN_ROLE).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden), "got {err:?}");

    // No hierarchy or case folding.
    let shouty = AuthUser {
        subject: "robby".to_string(),
        role: "ADMIN".to_string(),
    };
    assert!(shouty.require_role(ADMIN_ROLE).is_err());
}
