use catalog_api::token::{Claims, TokenError, TokenSigner, unix_now};

// --- Helper Functions ---

const TEST_SECRET: &str = "test-secret-value-1234567890";

fn signer() -> TokenSigner {
    TokenSigner::new(TEST_SECRET)
}

fn claims_expiring_in(offset_secs: i64) -> Claims {
    let now = unix_now();
    Claims {
        sub: "robby".to_string(),
        role: "admin".to_string(),
        iat: now,
        exp: (now as i64 + offset_secs) as usize,
    }
}

/// Corrupts one byte of the signature segment while keeping the token
/// structurally valid base64url. The first character is flipped; unlike the
/// final one it carries no trailing padding bits, so the decoded signature is
/// guaranteed to change.
fn tamper_signature(token: &str) -> String {
    let mut parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3, "expected a three-segment compact JWT");

    let signature = parts[2];
    let first = signature
        .chars()
        .next()
        .expect("signature segment must not be empty");
    let replacement = if first == 'A' { 'B' } else { 'A' };
    let tampered = format!("{}{}", replacement, &signature[1..]);

    parts[2] = &tampered;
    parts.join(".")
}

// --- Tests ---

#[test]
fn test_round_trip_preserves_claims() {
    let signer = signer();
    let claims = claims_expiring_in(3600);

    let token = signer.encode(&claims).expect("encoding must succeed");
    let decoded = signer.decode(&token).expect("decoding must succeed");

    assert_eq!(decoded, claims);
}

#[test]
fn test_expired_token_is_rejected() {
    let signer = signer();
    let mut claims = claims_expiring_in(-30);
    claims.iat = claims.exp.saturating_sub(300);

    let token = signer.encode(&claims).unwrap();
    let err = signer.decode(&token).unwrap_err();

    assert!(matches!(err, TokenError::Expired), "got {err:?}");
}

#[test]
fn test_tampered_signature_is_rejected() {
    let signer = signer();
    let token = signer.encode(&claims_expiring_in(3600)).unwrap();

    let tampered = tamper_signature(&token);
    assert_ne!(tampered, token);

    let err = signer.decode(&tampered).unwrap_err();
    assert!(matches!(err, TokenError::InvalidSignature), "got {err:?}");
}

#[test]
fn test_foreign_secret_is_rejected() {
    let token = signer().encode(&claims_expiring_in(3600)).unwrap();

    let other = TokenSigner::new("a-completely-different-secret");
    let err = other.decode(&token).unwrap_err();

    assert!(matches!(err, TokenError::InvalidSignature), "got {err:?}");
}

#[test]
fn test_structural_garbage_is_malformed() {
    let signer = signer();

    for garbage in ["", "not-a-token", "only.two", "a.b.c.d", "%%%.###.!!!"] {
        let err = signer.decode(garbage).unwrap_err();
        assert!(
            matches!(err, TokenError::Malformed),
            "input {garbage:?} got {err:?}"
        );
    }
}

#[test]
fn test_remaining_secs_saturates_at_zero() {
    let claims = claims_expiring_in(120);
    let now = unix_now();

    assert_eq!(claims.remaining_secs(now), claims.exp - now);
    // A glance past expiry never underflows.
    assert_eq!(claims.remaining_secs(claims.exp + 1), 0);
}
