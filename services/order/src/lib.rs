//! Order service: the record store behind the gateway's protected routes

pub mod config;
pub mod models;
pub mod repositories;
pub mod routes;

use std::sync::Arc;

use crate::repositories::OrderStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
}
