use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::user::UserProfile;
use backend::http::envelope::ApiResponse;
use backend_test_support::{assert_problem_details, unique_user_name};
use serde_json::json;

use crate::support::{create_test_app, test_state_builder};

#[actix_web::test]
async fn register_returns_public_profile() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;
    let name = unique_user_name("carol");

    let req = test::TestRequest::post()
        .uri("/api/base/register")
        .set_json(json!({
            "userName": name,
            "password": "s3cret",
            "nickName": "Caz",
            "email": "carol@example.com",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let raw = test::read_body(resp).await;
    assert!(
        !String::from_utf8_lossy(&raw).contains("s3cret"),
        "profile must not echo the password"
    );

    let body: ApiResponse<UserProfile> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(body.code, 0);
    assert_eq!(body.data.user_name, name);
    assert_eq!(body.data.nick_name.as_deref(), Some("Caz"));
    assert!(body.data.user_id > 0);
}

#[actix_web::test]
async fn duplicate_user_name_conflicts() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;
    let name = unique_user_name("dup");
    let payload = json!({ "user_name": name, "password": "pw" });

    let first = test::TestRequest::post()
        .uri("/api/base/register")
        .set_json(&payload)
        .to_request();
    assert_eq!(
        test::call_service(&app, first).await.status(),
        StatusCode::OK
    );

    let second = test::TestRequest::post()
        .uri("/api/base/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, second).await;
    assert_problem_details(resp, StatusCode::CONFLICT, "USER_NAME_TAKEN", Some(&name)).await;
}

#[actix_web::test]
async fn blank_user_name_is_a_validation_error() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/base/register")
        .set_json(json!({ "user_name": "   ", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        StatusCode::UNPROCESSABLE_ENTITY,
        "VALIDATION_ERROR",
        Some("user name"),
    )
    .await;
}
