//! Notification Module
//!
//! Receives database-change webhooks and pushes a notification to the partner
//! of whoever inserted a message or surprise.
//!
//! # Module Structure
//!
//! ```text
//! notify/
//! ├── mod.rs         - Module exports and documentation
//! ├── event.rs       - Webhook payload parsing
//! ├── directory.rs   - Couple and profile lookups
//! ├── push.rs        - Push gateway client
//! ├── dispatcher.rs  - Event to notification pipeline
//! └── handlers.rs    - Axum handlers
//! ```

pub mod directory;
pub mod dispatcher;
pub mod event;
pub mod handlers;
pub mod push;

pub use directory::{Couple, Directory, DirectoryError, InMemoryDirectory, PgDirectory, Profile};
pub use dispatcher::{DispatchOutcome, Dispatcher, PLACEHOLDER_SENDER_NAME};
pub use event::{InsertedRow, Operation, Table, WebhookEvent};
pub use handlers::{handle_notify_webhook, health};
pub use push::{ExpoPushGateway, PushError, PushGateway, DEFAULT_PUSH_GATEWAY_URL, DEFAULT_PUSH_TIMEOUT};
