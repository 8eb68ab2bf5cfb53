//! Extractors whose rejections are reported as [`FixstatsError`], so a
//! malformed request gets the same JSON error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};
use crate::errors::FixstatsError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(FixstatsError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(FixstatsError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(FixstatsError))]
pub struct ApiPath<T>(pub T);
