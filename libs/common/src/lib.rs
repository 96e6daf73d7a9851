//! Common library for the storefront services
//!
//! This crate provides shared functionality used across the identity, order
//! and gateway services: database connectivity, error handling, the RPC
//! contract and process plumbing.

pub mod database;
pub mod error;
pub mod rpc;
pub mod shutdown;
pub mod telemetry;
