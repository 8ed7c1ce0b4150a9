use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use backend::auth::TOKEN_TTL_SECS;
use backend::domain::user::{NewUser, User};
use backend::http::envelope::ApiResponse;
use backend::services::users::{SignInError, UserService, UserServiceError};
use backend::state::builder::build_state;
use backend_test_support::{assert_problem_details, unique_password, unique_user_name};
use serde_json::{json, Value};

use crate::support::auth::{test_codec, test_security};
use crate::support::factory::{create_test_user, fast_user_service};
use crate::support::{create_test_app, test_state_builder};

fn login_request(user_name: &str, password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/base/login")
        .set_json(json!({ "user_name": user_name, "password": password }))
        .to_request()
}

#[actix_web::test]
async fn login_returns_token_for_registered_user() {
    let users = fast_user_service();
    let name = unique_user_name("alice");
    let password = unique_password();
    let user = create_test_user(&users, &name, &password).await;

    let state = test_state_builder().with_users(users).build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, login_request(&name, &password)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ApiResponse<Value> = test::read_body_json(resp).await;
    assert_eq!(body.code, 0);
    assert_eq!(body.msg, "success");

    let token = body.data["token"].as_str().expect("token string");
    let claims = test_codec().decode(token).expect("issued token verifies");
    assert_eq!(claims.user_id(), user.user_id.to_string());
    assert_eq!(claims.user_name(), name);
    assert_eq!(claims.expires_at() - claims.issued_at(), TOKEN_TTL_SECS);
}

#[actix_web::test]
async fn login_accepts_camel_case_user_name() {
    let users = fast_user_service();
    let name = unique_user_name("camel");
    create_test_user(&users, &name, "pw").await;

    let state = test_state_builder().with_users(users).build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/base/login")
        .set_json(json!({ "userName": name, "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unknown_user_and_wrong_password_are_reported_differently() {
    let users = fast_user_service();
    let name = unique_user_name("bob");
    create_test_user(&users, &name, "correct horse").await;

    let state = test_state_builder().with_users(users).build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, login_request("nobody-here", "whatever")).await;
    let not_found = assert_problem_details(
        resp,
        StatusCode::UNAUTHORIZED,
        "USER_NOT_FOUND",
        Some("User does not exist"),
    )
    .await;

    let resp = test::call_service(&app, login_request(&name, "battery staple")).await;
    let mismatch = assert_problem_details(
        resp,
        StatusCode::UNAUTHORIZED,
        "PASSWORD_MISMATCH",
        Some("Incorrect password"),
    )
    .await;

    assert_ne!(not_found.detail, mismatch.detail);
}

#[actix_web::test]
async fn missing_secret_is_token_generation_failure() {
    let users = fast_user_service();
    let name = unique_user_name("nosecret");
    create_test_user(&users, &name, "pw").await;

    // No security config: the codec has no secret.
    let state = build_state().with_users(users).build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, login_request(&name, "pw")).await;
    assert_problem_details(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "TOKEN_GENERATION_FAILED",
        None,
    )
    .await;
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/base/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"user_name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", Some("Invalid JSON")).await;
}

/// User service whose credential check never finishes in time.
struct StalledUsers;

#[async_trait]
impl UserService for StalledUsers {
    async fn create(&self, _new_user: NewUser) -> Result<User, UserServiceError> {
        Err(UserServiceError::Unavailable("stalled".into()))
    }

    async fn sign_in(&self, _user_name: &str, _password: &str) -> Result<User, SignInError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(SignInError::Unavailable("stalled".into()))
    }

    async fn find_by_id(&self, _user_id: i64) -> Result<Option<User>, UserServiceError> {
        Ok(None)
    }

    async fn list(&self, _query: Option<&str>) -> Result<Vec<User>, UserServiceError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _user_id: i64) -> Result<bool, UserServiceError> {
        Ok(false)
    }
}

/// User service that is down.
struct DownUsers;

#[async_trait]
impl UserService for DownUsers {
    async fn create(&self, _new_user: NewUser) -> Result<User, UserServiceError> {
        Err(UserServiceError::Unavailable("connection refused".into()))
    }

    async fn sign_in(&self, _user_name: &str, _password: &str) -> Result<User, SignInError> {
        Err(SignInError::Unavailable("connection refused".into()))
    }

    async fn find_by_id(&self, _user_id: i64) -> Result<Option<User>, UserServiceError> {
        Err(UserServiceError::Unavailable("connection refused".into()))
    }

    async fn list(&self, _query: Option<&str>) -> Result<Vec<User>, UserServiceError> {
        Err(UserServiceError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _user_id: i64) -> Result<bool, UserServiceError> {
        Err(UserServiceError::Unavailable("connection refused".into()))
    }
}

#[actix_web::test]
async fn slow_credential_check_times_out() {
    let state = build_state()
        .with_security(test_security())
        .with_users(Arc::new(StalledUsers))
        .with_login_timeout(Duration::from_millis(50))
        .build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, login_request("alice", "pw")).await;
    assert_problem_details(resp, StatusCode::GATEWAY_TIMEOUT, "LOGIN_TIMEOUT", None).await;
}

#[actix_web::test]
async fn unavailable_user_service_is_surfaced() {
    let state = build_state()
        .with_security(test_security())
        .with_users(Arc::new(DownUsers))
        .build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, login_request("alice", "pw")).await;
    assert_problem_details(
        resp,
        StatusCode::SERVICE_UNAVAILABLE,
        "USER_SERVICE_UNAVAILABLE",
        Some("connection refused"),
    )
    .await;
}
