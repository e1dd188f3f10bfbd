//! stayhub-gateway
//!
//! `reqwest` client for the marketplace REST backend, implementing the
//! gateway traits of stayhub-core.

mod client;
mod error;
mod payload;

pub use client::HttpGateway;
pub use error::GatewayError;
