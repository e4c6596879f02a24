//! HTTP inbound adapter exposing the page endpoints.

pub mod auth;
pub mod clients;
pub mod error;
pub mod posts;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::{http::header, HttpResponse};

/// Redirect-after-action response used by mutating endpoints.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
