use catalog_api::credentials::{CredentialVerifier, StaticCredentials};

#[tokio::test]
async fn test_default_table_holds_reference_account() {
    let table = StaticCredentials::default();

    let role = table.verify("robby", "secret").await;
    assert_eq!(role.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_both_fail() {
    let table = StaticCredentials::default();

    assert!(table.verify("robby", "Secret").await.is_none());
    assert!(table.verify("robby", "").await.is_none());
    // Same observable outcome as a wrong password.
    assert!(table.verify("intruder", "secret").await.is_none());
}

#[tokio::test]
async fn test_custom_table_returns_per_user_roles() {
    let table = StaticCredentials::new([
        ("robby", "secret", "admin"),
        ("sandy", "pebbles", "viewer"),
    ]);

    assert_eq!(table.verify("robby", "secret").await.as_deref(), Some("admin"));
    assert_eq!(table.verify("sandy", "pebbles").await.as_deref(), Some("viewer"));
    // Credentials do not cross accounts.
    assert!(table.verify("sandy", "secret").await.is_none());
}
