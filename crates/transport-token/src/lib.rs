//! Transport Token freight engine: quotes, carbon accounting and carrier matching.

pub mod config;
pub mod error;
pub mod freight;
pub mod telemetry;
