//! Request extractors with JSON error bodies.
//!
//! The stock axum extractors reject malformed input with plain-text bodies.
//! These wrappers route rejections through [`ApiError`] so clients always
//! receive the `{"message": ...}` shape.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

/// JSON body extractor. Rejections (bad content type, syntax errors, type
/// mismatches) become 422 responses with a `message` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string extractor with the same rejection handling.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// Path parameter extractor. A path segment that does not parse (for example
/// a non-numeric id) is indistinguishable from a missing resource, so it maps
/// to 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);
