//! Order service configuration

use anyhow::Result;
use common::database::DatabaseConfig;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
}

impl OrderConfig {
    /// Create a new OrderConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ORDER_BIND_ADDR`: Listen address (default: 0.0.0.0:50052)
    /// - see [`DatabaseConfig`]
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("ORDER_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:50052".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid ORDER_BIND_ADDR: {}", e))?;

        Ok(Self {
            bind_addr,
            database: DatabaseConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_bind_addr_default_and_override() {
        unsafe {
            std::env::remove_var("ORDER_BIND_ADDR");
        }
        assert_eq!(
            OrderConfig::from_env().unwrap().bind_addr.to_string(),
            "0.0.0.0:50052"
        );

        unsafe {
            std::env::set_var("ORDER_BIND_ADDR", "not-an-address");
        }
        assert!(OrderConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("ORDER_BIND_ADDR");
        }
    }
}
