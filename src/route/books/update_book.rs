use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::{ApiError, ErrorVerbosityProvider},
    extractor::{json::ApiJson, path::ApiPath, validated::Validated},
    state::ApiState,
    store::{Book, BookFields},
};

use super::BookPath;

/// Full-replacement payload. An `isbn` in the body is accepted and ignored,
/// the path parameter is authoritative and the key never changes.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookRequest {
    pub isbn: Option<String>,
    #[validate(required(message = "is required"))]
    pub amazon_url: Option<String>,
    #[validate(required(message = "is required"))]
    pub author: Option<String>,
    #[validate(required(message = "is required"))]
    pub language: Option<String>,
    #[validate(required(message = "is required"))]
    pub pages: Option<i32>,
    #[validate(required(message = "is required"))]
    pub publisher: Option<String>,
    #[validate(required(message = "is required"))]
    pub title: Option<String>,
    #[validate(required(message = "is required"))]
    pub year: Option<i32>,
}

impl UpdateBookRequest {
    /// The `required` rules ran before this, every non-key field is `Some`.
    fn into_fields(self) -> BookFields {
        BookFields {
            amazon_url: self.amazon_url.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            pages: self.pages.unwrap_or_default(),
            publisher: self.publisher.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(path): ApiPath<BookPath>,
    Validated(ApiJson(request)): Validated<ApiJson<UpdateBookRequest>>,
) -> Result<UpdateBookResponse, ApiError> {
    let book = state
        .store()
        .update(&path.isbn, request.into_fields())
        .await
        .map_err(|err| super::store_error(state.error_verbosity(), err))?;

    Ok(UpdateBookResponse { book })
}
