//! Shared helpers for the HTTP integration tests.
//!
//! Builds the full application (trace middleware and every route) over the
//! in-memory adapters, so no database is needed. Every helper is used by
//! each test binary that includes this module.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use bookshelf::Trace;
use bookshelf::domain::{Authenticator, BookService, TokenKeys, User, hash_password};
use bookshelf::inbound::http::health::HealthState;
use bookshelf::inbound::http::state::{CookiePolicy, HttpState};
use bookshelf::inbound::http as http_adapter;
use bookshelf::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};
use chrono::Utc;
use mockable::DefaultClock;
use serde_json::{Value, json};

pub const SECRET: &[u8] = b"integration-secret-integration-secret";
pub const USER: &str = "subhan";
pub const PASSWORD: &str = "correct horse";

pub fn keys() -> TokenKeys {
    TokenKeys::from_secret(SECRET)
}

/// Initialise the application with one known user and an empty catalogue.
pub async fn app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let hash = hash_password(PASSWORD, 4).await.expect("hash password");
    let now = Utc::now();
    let users = InMemoryUserRepository::with_users([User::new(USER, hash, now, now)]);
    let books = Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new())));
    let sign_in = Authenticator::new(Arc::new(users), keys(), Arc::new(DefaultClock));
    let state = HttpState::new(
        Arc::new(sign_in),
        books.clone(),
        books,
        keys(),
        CookiePolicy { secure: true },
    );

    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(Trace)
            .configure(http_adapter::configure),
    )
    .await
}

/// Sign in as the seeded user and return the `Authorization` header value.
pub async fn bearer(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/signin")
        .set_json(json!({ "name": USER, "password": PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign-in failed");
    response
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .expect("authorization header")
        .to_owned()
}

/// Current catalogue as JSON values.
pub async fn list_books(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Vec<Value> {
    let request = actix_test::TestRequest::get().uri("/books").to_request();
    actix_test::call_and_read_body_json(app, request).await
}
