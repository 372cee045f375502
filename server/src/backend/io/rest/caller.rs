//! Caller identity extraction.
//!
//! The authenticating proxy in front of this server verifies the user and
//! forwards the result in two headers. A missing or blank subject means the
//! request is anonymous; services decide whether that is allowed.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};

use crate::backend::domain::Identity;

pub const SUBJECT_HEADER: &str = "x-identity-subject";
pub const NAME_HEADER: &str = "x-identity-name";

/// The verified caller, if any
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<Identity>);

impl CallerIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    fn from_headers(headers: &HeaderMap) -> Self {
        let subject = header_text(headers, SUBJECT_HEADER);
        let name = header_text(headers, NAME_HEADER);

        CallerIdentity(subject.map(|subject| Identity::new(subject, name)))
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CallerIdentity::from_headers(&parts.headers))
    }
}
