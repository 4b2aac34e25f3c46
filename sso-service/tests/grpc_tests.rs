mod common;

use common::decode_claims;
use common::TestApp;
use common::APP_ID;
use common::TOKEN_TTL_SECONDS;
use sso_service::proto::IsAdminRequest;
use sso_service::proto::LoginRequest;
use sso_service::proto::RegisterRequest;
use tonic::Code;

fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_request(email: &str, password: &str, app_id: i32) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        app_id,
    }
}

#[tokio::test]
async fn test_register_then_login_issues_scoped_token() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let user_id = client
        .register(register_request("alice@example.com", "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;
    assert!(user_id > 0);

    let token = client
        .login(login_request("alice@example.com", "pass_word!", APP_ID))
        .await
        .expect("Login failed")
        .into_inner()
        .token;

    let claims = decode_claims(&token);
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.app_id, APP_ID);
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    client
        .register(register_request("alice@example.com", "pass_word!"))
        .await
        .expect("Register failed");

    let status = client
        .register(register_request("alice@example.com", "other_pass"))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn test_concurrent_duplicate_registration_single_winner() {
    let app = TestApp::spawn().await;

    let attempts = (0..8).map(|_| {
        let mut client = app.grpc_client.clone();
        async move {
            client
                .register(register_request("race@example.com", "pass_word!"))
                .await
        }
    });
    let results = futures::future::join_all(attempts).await;

    let successes = results.iter().filter(|result| result.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|result| matches!(result, Err(status) if status.code() == Code::AlreadyExists))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("race@example.com")
        .fetch_one(app.storage.pool())
        .await
        .expect("Failed to count users");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    client
        .register(register_request("alice@example.com", "pass_word!"))
        .await
        .expect("Register failed");

    let wrong_password = client
        .login(login_request("alice@example.com", "not_it", APP_ID))
        .await
        .unwrap_err();
    let unknown_email = client
        .login(login_request("nobody@example.com", "pass_word!", APP_ID))
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code(), Code::InvalidArgument);
    assert_eq!(unknown_email.code(), wrong_password.code());
    assert_eq!(unknown_email.message(), wrong_password.message());
}

#[tokio::test]
async fn test_login_unknown_app() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    client
        .register(register_request("alice@example.com", "pass_word!"))
        .await
        .expect("Register failed");

    let status = client
        .login(login_request("alice@example.com", "pass_word!", 999))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid app id");
}

#[tokio::test]
async fn test_login_missing_fields_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let missing_email = client
        .login(login_request("", "pass_word!", APP_ID))
        .await
        .unwrap_err();
    let missing_app = client
        .login(login_request("alice@example.com", "pass_word!", 0))
        .await
        .unwrap_err();

    assert_eq!(missing_email.code(), Code::InvalidArgument);
    assert_eq!(missing_app.code(), Code::InvalidArgument);
    assert!(missing_app.message().contains("app_id"));
}

#[tokio::test]
async fn test_register_invalid_email_rejected() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let status = client
        .register(register_request("not-an-email", "pass_word!"))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_is_admin_reflects_stored_flag() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let user_id = client
        .register(register_request("alice@example.com", "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;

    let before = client
        .is_admin(IsAdminRequest { user_id })
        .await
        .expect("IsAdmin failed")
        .into_inner()
        .is_admin;
    assert!(!before);

    app.promote_to_admin(user_id).await;

    let after = client
        .is_admin(IsAdminRequest { user_id })
        .await
        .expect("IsAdmin failed")
        .into_inner()
        .is_admin;
    assert!(after);
}

#[tokio::test]
async fn test_is_admin_unknown_user() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let status = client
        .is_admin(IsAdminRequest { user_id: 4242 })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_is_admin_missing_user_id() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client.clone();

    let status = client
        .is_admin(IsAdminRequest { user_id: 0 })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}
