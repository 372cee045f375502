//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Translates requests into domain calls and domain results into JSON
//! responses. Caller identity arrives in headers set by the trusted
//! authenticating proxy and is handed to the services as-is.

pub mod rest;

pub use rest::*;
