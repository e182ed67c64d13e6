//! Common test utilities and helpers
//!
//! - Remote writer double with scripted failures
//! - Temporary SQLite databases
//! - Queue construction helpers

pub mod remote;
pub mod storage;

pub use remote::*;
pub use storage::*;
