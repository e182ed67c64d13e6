//! Client-side module
//!
//! Everything that runs inside the companion app process: the offline action
//! queue, its local persistence, and connectivity detection.
//!
//! # Architecture
//!
//! - **`config`** - Client configuration (remote URL, key, queue tuning)
//! - **`offline`** - Offline queue and remote writer
//! - **`local_db`** - Local SQLite storage for the queue
//! - **`sync`** - Network monitor
//!
//! # Module Structure
//!
//! ```text
//! app/
//! ├── mod.rs      - Module exports and documentation
//! ├── config.rs   - Configuration management
//! ├── offline/    - OfflineQueue, RemoteWriter, RestRemote
//! ├── local_db/   - LocalDatabase, ActionStore
//! └── sync/       - NetworkMonitor
//! ```

pub mod config;
pub mod local_db;
pub mod offline;
pub mod sync;

// Re-export commonly used types
pub use config::Config;
pub use local_db::{ActionStore, LocalDatabase, MemoryActionStore};
pub use offline::{OfflineQueue, QueueConfig, RemoteWriter, RestRemote};
pub use sync::{NetworkMonitor, NetworkStatus};
