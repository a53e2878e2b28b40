mod common;

use account_service::account::errors::AccountError;
use account_service::account::ports::AccountServicePort;
use auth::TokenError;
use common::command;
use common::test_service;
use common::username;

#[tokio::test]
async fn test_register_then_login_lifecycle() {
    let service = test_service();

    // Register
    let account = service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("Registration failed");
    assert!(account.active);
    assert!(account.last_login_at.is_none());

    // Login with the right password
    let outcome = service
        .login(&username("alice01"), "abcd1234")
        .await
        .expect("Login failed");
    assert!(!outcome.token.is_empty());
    assert!(outcome.account.last_login_at.is_some());

    // Token verifies back to the subject
    let subject = service
        .verify_token(&outcome.token)
        .expect("Token verification failed");
    assert_eq!(subject, "alice01");

    // Login with the wrong password
    let result = service.login(&username("alice01"), "wrong").await;
    assert!(matches!(
        result.unwrap_err(),
        AccountError::InvalidCredentials
    ));
}

#[tokio::test]
async fn test_duplicate_username_sequential() {
    let service = test_service();

    service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("First registration failed");

    let result = service
        .register(command("alice01", "other@x.com", "abcd1234"))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        AccountError::DuplicateUsername(_)
    ));
}

#[tokio::test]
async fn test_duplicate_email_sequential() {
    let service = test_service();

    service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("First registration failed");

    let result = service
        .register(command("bob02", "a@x.com", "abcd1234"))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        AccountError::DuplicateEmail(_)
    ));
}

#[tokio::test]
async fn test_duplicate_username_concurrent() {
    let service = test_service();

    // Both requests can pass the pre-checks; the store-level uniqueness
    // check must still leave exactly one winner.
    let (first, second) = tokio::join!(
        service.register(command("alice01", "a@x.com", "abcd1234")),
        service.register(command("alice01", "b@x.com", "abcd1234")),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = if first.is_err() { first } else { second };
    assert!(matches!(
        failure.unwrap_err(),
        AccountError::DuplicateUsername(_)
    ));
}

#[tokio::test]
async fn test_unknown_username_matches_wrong_password_error() {
    let service = test_service();

    service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("Registration failed");

    let unknown = service.login(&username("nobody99"), "abcd1234").await;
    let mismatch = service.login(&username("alice01"), "wrong").await;

    // Identical error kind: a caller cannot probe which usernames exist
    assert!(matches!(
        unknown.unwrap_err(),
        AccountError::InvalidCredentials
    ));
    assert!(matches!(
        mismatch.unwrap_err(),
        AccountError::InvalidCredentials
    ));
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let service = test_service();

    service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("Registration failed");
    let outcome = service
        .login(&username("alice01"), "abcd1234")
        .await
        .expect("Login failed");

    let signature_start = outcome.token.rfind('.').unwrap() + 1;
    let mut tampered: Vec<char> = outcome.token.chars().collect();
    tampered[signature_start] = if tampered[signature_start] == 'A' {
        'B'
    } else {
        'A'
    };
    let tampered: String = tampered.into_iter().collect();

    assert_eq!(
        service.verify_token(&tampered),
        Err(TokenError::InvalidSignature)
    );
}

#[tokio::test]
async fn test_second_login_preserves_ordering_invariant() {
    let service = test_service();

    service
        .register(command("alice01", "a@x.com", "abcd1234"))
        .await
        .expect("Registration failed");

    let first = service
        .login(&username("alice01"), "abcd1234")
        .await
        .expect("First login failed");
    let second = service
        .login(&username("alice01"), "abcd1234")
        .await
        .expect("Second login failed");

    let first_login_at = first.account.last_login_at.unwrap();
    let second_login_at = second.account.last_login_at.unwrap();
    assert!(second.account.created_at <= second_login_at);
    assert!(first_login_at <= second_login_at);
}
