/// Integration tests for the credential and session subsystem
///
/// These run against a real in-memory SQLite database with the full
/// schema applied, covering:
/// - registration and login flows with their tagged errors
/// - the register -> login round trip
/// - duplicate registration leaving the store untouched
/// - identity resolution being total over every cookie shape

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use stockroom_shared::auth::authenticator::{login, register, AuthError};
use stockroom_shared::auth::identity::{resolve_identity, Identity};
use stockroom_shared::auth::token::{encode_claims, issue_token, Claims};
use stockroom_shared::db::migrations::run_migrations;
use stockroom_shared::models::user::User;

const PEPPER: &str = "test-password-pepper-at-least-32-bytes";
const SIGNING_KEY: &str = "test-signing-key-at-least-32-bytes!!";

async fn test_pool() -> SqlitePool {
    // One connection so the in-memory database is shared across queries
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should connect");

    run_migrations(&pool).await.expect("migrations should apply");
    pool
}

#[tokio::test]
async fn test_register_then_login_returns_same_user() {
    let pool = test_pool().await;

    let registered = register(&pool, PEPPER, "alice@example.com", "pw123", "pw123")
        .await
        .expect("registration should succeed");

    let logged_in = login(&pool, PEPPER, "alice@example.com", "pw123")
        .await
        .expect("login should succeed");

    assert_eq!(registered.id, logged_in.id);
    assert_eq!(logged_in.email, "alice@example.com");
    assert!(logged_in.is_authenticated);
    // The derived flag is never persisted
    assert!(!registered.is_authenticated);
}

#[tokio::test]
async fn test_register_defaults() {
    let pool = test_pool().await;

    let user = register(&pool, PEPPER, "bob@example.com", "pw", "pw")
        .await
        .expect("registration should succeed");

    // A freshly registered user is not active and has never logged in
    assert!(!user.is_active);
    assert!(!user.is_admin);
    assert!(!user.is_superuser);
    assert!(user.last_login.is_none());
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let pool = test_pool().await;

    for email in ["", "alice", "alice@", "@example.com", "alice@example"] {
        let result = register(&pool, PEPPER, email, "pw", "pw").await;
        assert!(
            matches!(result, Err(AuthError::NotAnEmail)),
            "email {:?} should be rejected",
            email
        );
    }

    assert_eq!(User::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let pool = test_pool().await;

    let result = register(&pool, PEPPER, "alice@example.com", "pw123", "pw124").await;
    assert!(matches!(result, Err(AuthError::PasswordsNotSame)));
    assert_eq!(User::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_registration_leaves_store_untouched() {
    let pool = test_pool().await;

    register(&pool, PEPPER, "alice@example.com", "pw123", "pw123")
        .await
        .expect("first registration should succeed");

    let before = User::count(&pool).await.unwrap();

    let result = register(&pool, PEPPER, "alice@example.com", "other", "other").await;
    assert!(matches!(result, Err(AuthError::UserExists)));

    assert_eq!(User::count(&pool).await.unwrap(), before);
}

#[tokio::test]
async fn test_unique_constraint_closes_registration_race() {
    let pool = test_pool().await;

    // Simulate the raced insert: the row appears after the existence
    // check would have passed
    let hash = stockroom_shared::auth::password::hash_password("pw", PEPPER).unwrap();
    User::create(&pool, "raced@example.com", &hash).await.unwrap();

    let result = User::create(&pool, "raced@example.com", &hash).await;
    match result {
        Err(sqlx::Error::Database(db_err)) => assert!(db_err.is_unique_violation()),
        other => panic!("expected unique violation, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_login_wrong_password_is_incorrect_password() {
    let pool = test_pool().await;

    register(&pool, PEPPER, "alice@example.com", "pw123", "pw123")
        .await
        .expect("registration should succeed");

    // Wrong password must never leak as UserNotExists
    let result = login(&pool, PEPPER, "alice@example.com", "wrong").await;
    assert!(matches!(result, Err(AuthError::IncorrectPassword)));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let pool = test_pool().await;

    let result = login(&pool, PEPPER, "nobody@example.com", "pw").await;
    assert!(matches!(result, Err(AuthError::UserNotExists)));
}

#[tokio::test]
async fn test_alice_scenario() {
    let pool = test_pool().await;

    register(&pool, PEPPER, "alice@example.com", "pw123", "pw123")
        .await
        .expect("registration should succeed");

    let dup = register(&pool, PEPPER, "alice@example.com", "pw123", "pw123").await;
    assert!(matches!(dup, Err(AuthError::UserExists)));

    let wrong = login(&pool, PEPPER, "alice@example.com", "wrong").await;
    assert!(matches!(wrong, Err(AuthError::IncorrectPassword)));

    let user = login(&pool, PEPPER, "alice@example.com", "pw123")
        .await
        .expect("login should succeed");
    assert!(user.is_authenticated);
}

#[tokio::test]
async fn test_update_last_login() {
    let pool = test_pool().await;

    let user = register(&pool, PEPPER, "alice@example.com", "pw", "pw")
        .await
        .unwrap();
    assert!(user.last_login.is_none());

    assert!(User::update_last_login(&pool, user.id).await.unwrap());

    let reloaded = User::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.last_login.is_some());
}

#[tokio::test]
async fn test_email_lookup_is_case_sensitive() {
    let pool = test_pool().await;

    register(&pool, PEPPER, "alice@example.com", "pw", "pw")
        .await
        .unwrap();

    let found = User::find_by_email(&pool, "Alice@example.com").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_identity_resolution_is_total() {
    let pool = test_pool().await;

    let user = register(&pool, PEPPER, "alice@example.com", "pw", "pw")
        .await
        .unwrap();

    // Absent cookie
    let identity = resolve_identity(&pool, None, SIGNING_KEY).await;
    assert!(!identity.is_authenticated());
    assert_eq!(identity.email(), "Anonymous");

    // Malformed cookie
    let identity = resolve_identity(&pool, Some("garbage"), SIGNING_KEY).await;
    assert!(!identity.is_authenticated());

    // Expired token
    let expired = encode_claims(
        &Claims::with_expiry("alice@example.com", Utc::now() - Duration::hours(1)),
        SIGNING_KEY,
    )
    .unwrap();
    let identity = resolve_identity(&pool, Some(&expired), SIGNING_KEY).await;
    assert!(!identity.is_authenticated());

    // Valid token, unknown email
    let unknown = issue_token("ghost@example.com", SIGNING_KEY).unwrap();
    let identity = resolve_identity(&pool, Some(&unknown), SIGNING_KEY).await;
    assert!(!identity.is_authenticated());

    // Valid token, known email: fully populated authenticated user
    let valid = issue_token("alice@example.com", SIGNING_KEY).unwrap();
    match resolve_identity(&pool, Some(&valid), SIGNING_KEY).await {
        Identity::Known(resolved) => {
            assert_eq!(resolved.id, user.id);
            assert_eq!(resolved.email, "alice@example.com");
            assert!(resolved.is_authenticated);
        }
        Identity::Anonymous => panic!("valid session should resolve to a known user"),
    }
}

#[tokio::test]
async fn test_identity_rejects_token_signed_with_other_key() {
    let pool = test_pool().await;

    register(&pool, PEPPER, "alice@example.com", "pw", "pw")
        .await
        .unwrap();

    let forged = issue_token("alice@example.com", "some-other-signing-key-entirely!").unwrap();
    let identity = resolve_identity(&pool, Some(&forged), SIGNING_KEY).await;
    assert!(!identity.is_authenticated());
}
