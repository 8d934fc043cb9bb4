use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{ApiError, ErrorVerbosity, InternalServerError, NotFoundError};
use crate::store::StoreError;

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

/// Path parameters of the single-book endpoints.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct BookPath {
    pub isbn: String,
}

/// Maps store failures onto the API error taxonomy. A missing row is the
/// caller's 404, anything else is a 500.
fn store_error(verbosity: ErrorVerbosity, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => NotFoundError::new(verbosity).into(),
        err => InternalServerError::from_generic_error(verbosity, err).into(),
    }
}
