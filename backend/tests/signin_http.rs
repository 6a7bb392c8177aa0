//! End-to-end sign-in behaviour over the in-memory stores.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use bookshelf::domain::TOKEN_TTL_SECS;
use rstest::rstest;
use serde_json::{Value, json};

use support::{PASSWORD, USER, app, bearer, keys, list_books};

#[rstest]
#[actix_rt::test]
async fn correct_credentials_yield_one_hour_token() {
    let app = app().await;
    let request = actix_test::TestRequest::post()
        .uri("/signin")
        .set_json(json!({ "name": USER, "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));

    let cookie = response
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("token cookie");
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.http_only(), Some(true));

    let claims = keys().verify(cookie.value()).expect("valid token");
    assert_eq!(claims.sub, USER);
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
}

#[rstest]
#[actix_rt::test]
async fn authorization_header_from_sign_in_opens_guarded_routes() {
    let app = app().await;
    let authorization = bearer(&app).await;
    let request = actix_test::TestRequest::post()
        .uri("/create")
        .insert_header((header::AUTHORIZATION, authorization))
        .set_json(json!({ "title": "T", "description": "D", "author": "A", "year": 2024 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert!(response.status().is_success());
    let books = list_books(&app).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books.first().map(|book| &book["title"]), Some(&json!("T")));
}

#[rstest]
#[actix_rt::test]
async fn wrong_password_is_401_without_token() {
    let app = app().await;
    let request = actix_test::TestRequest::post()
        .uri("/signin")
        .set_json(json!({ "name": USER, "password": "incorrect horse" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(response.headers().get(header::AUTHORIZATION).is_none());
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("trace id header")
        .to_owned();
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], trace_id.as_str());
}

#[rstest]
#[actix_rt::test]
async fn malformed_json_is_invalid_request() {
    let app = app().await;
    let request = actix_test::TestRequest::post()
        .uri("/signin")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}
