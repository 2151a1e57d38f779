//! # devmon-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api` for devices and batteries
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and [`DevmonError`](devmon_domain::error::DevmonError)
//!   variants into HTTP responses and status codes
//! - Log every request through `tower-http`'s trace layer
//!
//! ## Dependency rule
//! Depends on `devmon-app` (for port traits and services) and `devmon-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
