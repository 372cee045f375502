use super::errors::{DomainError, DomainResult};

/// A caller verified by the external identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque unique string identifying the user
    pub subject: String,
    /// Display name, when the provider shares one
    pub name: Option<String>,
}

impl Identity {
    pub fn new(subject: impl Into<String>, name: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            name,
        }
    }
}

/// Reject anonymous callers before any read or write happens
pub fn require_identity(identity: Option<&Identity>) -> DomainResult<&Identity> {
    identity.ok_or(DomainError::Unauthorized)
}
