//! # forum-api
//!
//! REST API server for the Q&A forum built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server, spawn_background_tasks};
pub use state::AppState;
