//! Book catalogue endpoints.
//!
//! ```text
//! GET    /books
//! GET    /books/{id}
//! POST   /create            (bearer token)
//! PUT    /books/{id}        (bearer token)
//! DELETE /books/{id}        (bearer token)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Book, BookId, BookPatch, BookValidationError, Error, NewBook};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::{AuthenticatedUser, BearerGuard};
use crate::inbound::http::state::HttpState;

/// Body for `POST /create` and `PUT /books/{id}`.
///
/// Create requires every field; update applies whichever are present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BookRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl TryFrom<BookRequest> for NewBook {
    type Error = BookValidationError;

    fn try_from(value: BookRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.title, value.description, value.author, value.year)
    }
}

impl TryFrom<BookRequest> for BookPatch {
    type Error = BookValidationError;

    fn try_from(value: BookRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.title, value.description, value.author, value.year)
    }
}

/// Success envelope for mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Book,
}

impl BookEnvelope {
    fn success(data: Book) -> Self {
        Self {
            status: "success".to_owned(),
            message: None,
            data,
        }
    }
}

fn map_validation_error(err: BookValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

/// Malformed identifiers cannot name a stored book, so they are not found.
fn parse_id(raw: &str) -> ApiResult<BookId> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "malformed book id");
        Error::not_found("book not found")
    })
}

/// List every book.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books", body = [Book]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security([])
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Book>>> {
    Ok(web::Json(state.books_query.list_all().await?))
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No such book", body = Error)
    ),
    tags = ["books"],
    operation_id = "getBook",
    security([])
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Book>> {
    let id = parse_id(&path)?;
    Ok(web::Json(state.books_query.get_by_id(&id).await?))
}

/// Create a book with a unique title.
#[utoipa::path(
    post,
    path = "/create",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Created", body = BookEnvelope),
        (status = 400, description = "Invalid body or title already used", body = Error),
        (status = 401, description = "Invalid token", body = Error),
        (status = 403, description = "Missing token", body = Error)
    ),
    tags = ["books"],
    operation_id = "createBook",
    security(("bearer" = []))
)]
#[post("/create", wrap = "BearerGuard")]
pub async fn create_book(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<BookRequest>,
) -> ApiResult<HttpResponse> {
    let fields = NewBook::try_from(payload.into_inner()).map_err(map_validation_error)?;
    debug!(user = user.name(), "creating book");
    let book = state.books.create(fields).await?;
    Ok(HttpResponse::Created().json(BookEnvelope::success(book)))
}

/// Overwrite the supplied fields of a book.
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Updated", body = BookEnvelope),
        (status = 400, description = "Invalid body or title already used", body = Error),
        (status = 401, description = "Invalid token", body = Error),
        (status = 403, description = "Missing token", body = Error),
        (status = 404, description = "No such book", body = Error)
    ),
    tags = ["books"],
    operation_id = "updateBook",
    security(("bearer" = []))
)]
#[put("/books/{id}", wrap = "BearerGuard")]
pub async fn update_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BookRequest>,
) -> ApiResult<web::Json<BookEnvelope>> {
    let id = parse_id(&path)?;
    let patch = BookPatch::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let book = state.books.update(&id, patch).await?;
    Ok(web::Json(BookEnvelope::success(book)))
}

/// Remove a book and return what was removed.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Deleted", body = BookEnvelope),
        (status = 401, description = "Invalid token", body = Error),
        (status = 403, description = "Missing token", body = Error),
        (status = 404, description = "No such book", body = Error)
    ),
    tags = ["books"],
    operation_id = "deleteBook",
    security(("bearer" = []))
)]
#[delete("/books/{id}", wrap = "BearerGuard")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookEnvelope>> {
    let id = parse_id(&path)?;
    let book = state.books.delete(&id).await?;
    Ok(web::Json(BookEnvelope {
        message: Some("book deleted successfully".to_owned()),
        ..BookEnvelope::success(book)
    }))
}
