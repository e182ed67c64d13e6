//! # Network Monitor
//!
//! Tracks connectivity and publishes transitions on a `watch` channel.
//!
//! A device counts as `Online` only when the link is up *and* the network is
//! actually reachable. Link without reachability (captive portal, dead uplink)
//! is `Limited`, which the offline queue treats as offline.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Shortest period between two reachability checks
pub const MIN_CHECK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Online,
    Limited,
    Offline,
}

impl NetworkStatus {
    /// Combine link state and reachability
    pub fn from_parts(connected: bool, reachable: bool) -> Self {
        match (connected, reachable) {
            (true, true) => NetworkStatus::Online,
            (true, false) => NetworkStatus::Limited,
            (false, _) => NetworkStatus::Offline,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, NetworkStatus::Online)
    }
}

/// Connectivity observer
#[derive(Debug, Clone)]
pub struct NetworkMonitor {
    status: Arc<watch::Sender<NetworkStatus>>,
}

impl NetworkMonitor {
    /// Starts `Offline` until the first report
    pub fn new() -> Self {
        let (status, _) = watch::channel(NetworkStatus::Offline);
        Self {
            status: Arc::new(status),
        }
    }

    pub fn get_status(&self) -> NetworkStatus {
        *self.status.borrow()
    }

    /// Receiver that observes every status transition
    pub fn subscribe(&self) -> watch::Receiver<NetworkStatus> {
        self.status.subscribe()
    }

    /// Report link state and reachability as seen by the platform
    pub fn report(&self, connected: bool, reachable: bool) -> NetworkStatus {
        let status = NetworkStatus::from_parts(connected, reachable);
        self.set_status(status);
        status
    }

    /// Publish a status; subscribers are only woken on change
    pub fn set_status(&self, status: NetworkStatus) {
        let changed = self.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });

        if changed {
            tracing::info!(?status, "Network status changed");
        }
    }

    /// Periodically probe `url` and publish the result
    ///
    /// Any HTTP response counts as reachable. A timeout means the link answered
    /// nothing in time (`Limited`); any other transport error is `Offline`.
    /// A zero period is raised to `MIN_CHECK_INTERVAL`.
    pub fn spawn_probe(&self, url: String, every: Duration, timeout: Duration) -> JoinHandle<()> {
        let monitor = self.clone();
        let every = every.max(MIN_CHECK_INTERVAL);

        tokio::spawn(async move {
            let client = match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => client,
                Err(e) => {
                    tracing::error!("Failed to build connectivity probe client: {}", e);
                    return;
                }
            };

            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let status = match client.head(&url).send().await {
                    Ok(_) => NetworkStatus::Online,
                    Err(e) if e.is_timeout() => NetworkStatus::Limited,
                    Err(e) => {
                        tracing::debug!("Connectivity probe failed: {}", e);
                        NetworkStatus::Offline
                    }
                };
                monitor.set_status(status);
            }
        })
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}
