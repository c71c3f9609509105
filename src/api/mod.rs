//! gdpx API server module
//!
//! HTTP endpoints for listing countries and converting workbooks.
//! Run with `gdpx-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
