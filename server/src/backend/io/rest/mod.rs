//! # REST API Interface Layer
//!
//! HTTP endpoints for the health journal. This layer handles:
//! - JSON request/response serialization
//! - Extracting the caller identity from proxy headers
//! - Translating domain errors into HTTP status codes
//! - Request logging
//!
//! Handlers contain no business rules; they call one service method each.

pub mod caller;
pub mod error;
pub mod family_apis;
pub mod health_entry_apis;
pub mod insight_apis;
pub mod intake_apis;
pub mod json_body;
pub mod mappers;
pub mod medication_schedule_apis;

pub use caller::CallerIdentity;
pub use json_body::JsonBody;
pub use family_apis::*;
pub use health_entry_apis::*;
pub use insight_apis::*;
pub use intake_apis::*;
pub use medication_schedule_apis::*;
