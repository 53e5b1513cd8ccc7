//! HTTP API
//!
//! JSON endpoints under `/api` exposing the contact service. Handlers run
//! store writes on blocking threads and render every outcome through the
//! envelope in [`response`].

pub mod response;
pub mod routes;
pub mod server;

#[cfg(test)]
mod tests;

pub use response::{ApiError, ApiResponse};
pub use server::{AppState, build_router, serve};
