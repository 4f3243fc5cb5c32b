//! HTTP admin API.
//!
//! Axum-based REST API at `/admin/v1/` with the envelope response format
//! and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
