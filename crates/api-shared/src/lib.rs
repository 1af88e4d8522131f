//! # API Shared
//!
//! Shared definitions for ERA APIs.
//!
//! Contains:
//! - Request/response types (`types` module), serialisable and documented for OpenAPI
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
