//! Gateway configuration

use anyhow::Result;
use std::{env, net::SocketAddr, time::Duration};

/// Runtime configuration of the gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub identity_url: String,
    pub order_url: String,
    /// Per-call deadline for every upstream request
    pub upstream_timeout: Duration,
}

impl GatewayConfig {
    /// Create a new GatewayConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GATEWAY_BIND_ADDR`: Listen address (default: 0.0.0.0:8080)
    /// - `IDENTITY_SERVICE_URL`: Identity service base URL (default: http://localhost:50051)
    /// - `ORDER_SERVICE_URL`: Order service base URL (default: http://localhost:50052)
    /// - `UPSTREAM_TIMEOUT_SECS`: Upstream call deadline in seconds (default: 5)
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("GATEWAY_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid GATEWAY_BIND_ADDR: {}", e))?;
        let identity_url = env::var("IDENTITY_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:50051".to_string());
        let order_url =
            env::var("ORDER_SERVICE_URL").unwrap_or_else(|_| "http://localhost:50052".to_string());

        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Ok(Self {
            bind_addr,
            identity_url,
            order_url,
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_gateway_config_defaults() {
        unsafe {
            env::remove_var("GATEWAY_BIND_ADDR");
            env::remove_var("IDENTITY_SERVICE_URL");
            env::remove_var("ORDER_SERVICE_URL");
            env::remove_var("UPSTREAM_TIMEOUT_SECS");
        }

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.identity_url, "http://localhost:50051");
        assert_eq!(config.order_url, "http://localhost:50052");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_zero_timeout_falls_back_to_default() {
        unsafe {
            env::set_var("UPSTREAM_TIMEOUT_SECS", "0");
        }

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));

        unsafe {
            env::remove_var("UPSTREAM_TIMEOUT_SECS");
        }
    }
}
