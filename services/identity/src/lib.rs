//! Identity service: credential store, token service and the
//! Register/Login/Validate RPC surface

pub mod config;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod validation;

use crate::service::IdentityService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
}
