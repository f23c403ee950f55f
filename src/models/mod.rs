//! Data models for captured HTTP traffic
//!
//! These models are produced by the host proxy and handed to the capture
//! layer once per completed exchange.

pub mod exchange;

pub use exchange::*;
