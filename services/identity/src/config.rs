//! Identity service configuration

use anyhow::Result;
use common::database::DatabaseConfig;
use std::net::SocketAddr;

use crate::{jwt::JwtConfig, password::PasswordConfig};

/// Everything the identity process reads at startup
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

impl IdentityConfig {
    /// Create a new IdentityConfig from environment variables
    ///
    /// # Environment Variables
    /// - `IDENTITY_BIND_ADDR`: Listen address (default: 0.0.0.0:50051)
    /// - see [`DatabaseConfig`], [`JwtConfig`] and [`PasswordConfig`]
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("IDENTITY_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:50051".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IDENTITY_BIND_ADDR: {}", e))?;

        Ok(Self {
            bind_addr,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
        })
    }
}
