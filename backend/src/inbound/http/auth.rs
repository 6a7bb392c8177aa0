//! Sign-in endpoint.
//!
//! ```text
//! POST /signin {"name":"subhan","password":"hunter2"}
//! ```
//!
//! On success the token is returned twice: as an HttpOnly `token` cookie and
//! in the `Authorization: Bearer` response header.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    CredentialsValidationError, Error, IssuedToken, SignInCredentials, TOKEN_TTL_SECS,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::{CookiePolicy, HttpState};

/// Name of the cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

/// Sign-in request body. Absent fields are reported as validation errors.
#[derive(Deserialize, ToSchema)]
pub struct SignInRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<SignInRequest> for SignInCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

fn token_cookie(token: &IssuedToken, policy: CookiePolicy) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token.as_str().to_owned())
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(TOKEN_TTL_SECS))
        .finish()
}

/// Exchange a name and password for a one-hour bearer token.
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Login success", headers(
            ("Set-Cookie" = String, description = "HttpOnly token cookie"),
            ("Authorization" = String, description = "Bearer token")
        )),
        (status = 400, description = "Missing field or login error", body = Error),
        (status = 401, description = "Unknown user or wrong password", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        SignInCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let issued = state.sign_in.sign_in(&credentials).await?;

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(&issued, state.cookie))
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", issued.as_str())))
        .json(json!({ "message": "login success" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::json_config;
    use crate::inbound::http::test_utils::{TEST_USER, http_state, test_keys};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn post_signin(body: Value) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state().await))
                .app_data(json_config())
                .service(sign_in),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/signin")
            .set_json(&body)
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[rstest]
    #[actix_web::test]
    async fn correct_credentials_set_cookie_and_header() {
        let (name, password) = TEST_USER;
        let response = post_signin(json!({ "name": name, "password": password })).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .response()
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("token cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(TOKEN_TTL_SECS)));
        let token = cookie.value().to_owned();

        let header = response
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .expect("authorization header")
            .to_owned();
        assert_eq!(header, format!("Bearer {token}"));

        let claims = test_keys().verify(&token).expect("token verifies");
        assert_eq!(claims.sub, name);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "login success" }));
    }

    #[rstest]
    #[case(json!({ "name": "subhan", "password": "wrong" }), "invalid password")]
    #[case(json!({ "name": "ghost", "password": "hunter2" }), "user not found")]
    #[case(json!({ "name": "  subhan  ", "password": "hunter2" }), "user not found")]
    #[case(json!({ "name": "   ", "password": "hunter2" }), "user not found")]
    #[actix_web::test]
    async fn rejected_sign_in_sets_no_token(#[case] body: Value, #[case] message: &str) {
        let response = post_signin(body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(response.headers().get(header::AUTHORIZATION).is_none());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], message);
    }

    #[rstest]
    #[case(json!({ "password": "hunter2" }), "name", "empty_name")]
    #[case(json!({ "name": "", "password": "hunter2" }), "name", "empty_name")]
    #[case(json!({ "name": "subhan" }), "password", "empty_password")]
    #[actix_web::test]
    async fn missing_fields_are_invalid_requests(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let response = post_signin(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }
}
