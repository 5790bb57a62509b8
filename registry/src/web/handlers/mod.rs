//! HTTP request handlers for the registry API.
//!
//! This module is organized by domain:
//! - `common` - Envelope type, error mapping and body parsing
//! - `health` - Liveness endpoint
//! - `mail_servers` - Mail server CRUD endpoints

pub mod common;
pub mod health;
pub mod mail_servers;

// Re-export all public handler functions for convenience
pub use health::*;
pub use mail_servers::*;
