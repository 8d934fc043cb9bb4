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
    extractor::{json::ApiJson, validated::Validated},
    state::ApiState,
    store::Book,
};

/// Create payload. Every field is optional at the deserialization layer so
/// that the `required` rules can report all missing fields in one response.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    #[validate(required(message = "is required"))]
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

impl CreateBookRequest {
    /// The `required` rules ran before this, every field is `Some`.
    fn into_book(self) -> Book {
        Book {
            isbn: self.isbn.unwrap_or_default(),
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
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(request)): Validated<ApiJson<CreateBookRequest>>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .store()
        .create(request.into_book())
        .await
        .map_err(|err| super::store_error(state.error_verbosity(), err))?;

    Ok(CreateBookResponse { book })
}
