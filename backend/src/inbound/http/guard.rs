//! Bearer-token middleware for mutating routes.
//!
//! ```text
//! Authorization: Bearer <jwt>
//! ```
//!
//! The decision itself lives in [`crate::domain::authorize`]; this module
//! only reads the header, renders refusals, and hands the proven identity to
//! handlers through request extensions.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{Error, GuardError, UserSubject, authorize};
use crate::inbound::http::state::HttpState;

/// Identity attached to requests that passed [`BearerGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserSubject);

impl AuthenticatedUser {
    /// Name carried in the token subject.
    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| GuardError::MissingToken.into()),
        )
    }
}

/// Refuses requests without a valid bearer token.
///
/// Missing tokens yield 403 and tokens that fail verification yield 401.
///
/// # Examples
/// ```
/// use actix_web::{post, HttpResponse};
/// use bookshelf::inbound::http::guard::BearerGuard;
///
/// #[post("/create", wrap = "BearerGuard")]
/// async fn create() -> HttpResponse {
///     HttpResponse::Created().finish()
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerGuard;

impl<S, B> Transform<S, ServiceRequest> for BearerGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`BearerGuard`].
pub struct BearerGuardMiddleware<S> {
    service: Rc<S>,
}

fn check(req: &ServiceRequest) -> Result<UserSubject, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("bearer guard mounted without HTTP state");
        return Err(Error::internal("HTTP state is not configured"));
    };
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    authorize(raw, &state.token_keys).map_err(Error::from)
}

impl<S, B> Service<ServiceRequest> for BearerGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match check(&req) {
                Ok(subject) => {
                    req.extensions_mut().insert(AuthenticatedUser(subject));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.into_response(err.error_response()).map_into_right_body()),
            }
        })
    }
}
