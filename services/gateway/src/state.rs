//! Gateway application state

use std::sync::Arc;

use crate::clients::{IdentityClient, OrderClient};

/// Shared state handed to every handler and to the auth middleware
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityClient>,
    pub orders: Arc<dyn OrderClient>,
}
