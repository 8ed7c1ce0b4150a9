use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_problem_details;
use serde_json::Value;

use crate::common::assert_trace_id_matches;
use crate::support::{create_test_app, test_state_builder};

#[actix_web::test]
async fn incoming_request_id_becomes_trace_id() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/base/users/info")
        .insert_header(("x-request-id", "client-req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let header_trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-trace-id header");
    assert_eq!(header_trace_id, "client-req-123");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_trace_id_matches(&body, &header_trace_id);
}

#[actix_web::test]
async fn unsafe_request_id_is_replaced() {
    let app = create_test_app(test_state_builder().build())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/base/users")
        .insert_header(("x-request-id", "bad id with spaces"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details(
        resp,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
        None,
    )
    .await;
    assert_ne!(problem.trace_id, "bad id with spaces");
    assert_eq!(problem.type_, "https://zone.local/errors/UNAUTHORIZED_MISSING_BEARER");
    assert_eq!(problem.title, "Unauthorized Missing Bearer");
}
