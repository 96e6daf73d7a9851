//! HTTP gateway in front of the identity and order services

pub mod clients;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use state::AppState;
