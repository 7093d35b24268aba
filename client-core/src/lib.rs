//! client-core: Shared infrastructure for outbound API clients.
pub mod config;
pub mod observability;
