//! Webbuilder project API library.
//!
//! Exposes the project request handler, its invocation event types, and the
//! HTTP adapter so the binaries and integration tests share one code path.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod routes;
pub mod state;
pub mod telemetry;
