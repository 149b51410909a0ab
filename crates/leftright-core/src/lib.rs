// Re-export the wire protocol so callers can reach it via leftright_core::protocol
pub use leftright_protocol as protocol;

pub mod cache;
pub mod clock;
pub mod community;
pub mod config;
pub mod error;
pub mod layouts;
pub mod metrics;
pub mod session;
