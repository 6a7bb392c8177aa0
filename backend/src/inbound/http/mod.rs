//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod books;
pub mod error;
pub mod guard;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by every body-accepting route.
///
/// Malformed or mistyped bodies are reported with the standard error
/// envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register the catalogue, sign-in, and probe routes.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(auth::sign_in)
        .service(books::list_books)
        .service(books::get_book)
        .service(books::create_book)
        .service(books::update_book)
        .service(books::delete_book)
        .service(health::ready)
        .service(health::live);
}
