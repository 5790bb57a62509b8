//! This module provides reusable test utilities:
//! - In-memory test databases
//! - A router harness driven with `oneshot`
//! - Common request payloads and records

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod test_app;
pub mod test_data;
pub mod test_database;

// Re-export commonly used items
pub use test_app::TestApp;
pub use test_data::*;
pub use test_database::TestDatabase;
