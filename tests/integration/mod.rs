//! Integration tests
//!
//! - `queue_test`: offline queue over real SQLite persistence
//! - `notify_test`: webhook router end to end

pub mod queue_test;
#[cfg(feature = "ssr")]
pub mod notify_test;
