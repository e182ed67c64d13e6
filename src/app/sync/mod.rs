//! # Connectivity
//!
//! Connectivity detection feeding the offline queue. The queue subscribes to
//! the monitor's channel via `OfflineQueue::watch_connectivity`; a transition to
//! `Online` triggers a flush, anything else only updates the indicator.

pub mod network_monitor;

pub use network_monitor::{NetworkMonitor, NetworkStatus};
