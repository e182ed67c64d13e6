/**
 * Directory Lookups
 *
 * Read-only access to the two pieces of reference data the dispatcher needs:
 * the couple a row belongs to, and member profiles (display name, push token).
 * The schema itself is owned elsewhere; this module only reads
 * `couples(id, partner_a, partner_b)` and `profiles(id, display_name, push_token)`.
 */

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use uuid::Uuid;

/// Two-person relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Couple {
    pub id: String,
    pub partner_a: String,
    pub partner_b: String,
}

impl Couple {
    /// The member that is not `sender`
    ///
    /// `None` when the sender is not a member, or when both member ids are the
    /// same (not a valid couple).
    pub fn counterpart(&self, sender: &str) -> Option<&str> {
        if self.partner_a == self.partner_b {
            return None;
        }
        if sender == self.partner_a {
            Some(&self.partner_b)
        } else if sender == self.partner_b {
            Some(&self.partner_a)
        } else {
            None
        }
    }
}

/// Member profile fields used for notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub display_name: Option<String>,
    pub push_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory lookup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Reference data lookups
#[async_trait]
pub trait Directory: Send + Sync {
    async fn couple(&self, couple_id: &str) -> Result<Option<Couple>, DirectoryError>;

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError>;
}

/// PostgreSQL-backed directory
#[derive(Debug, Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn couple(&self, couple_id: &str) -> Result<Option<Couple>, DirectoryError> {
        let Some(id) = parse_key(couple_id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r#"
            SELECT id::text AS id, partner_a::text AS partner_a, partner_b::text AS partner_b
            FROM couples
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Couple {
                id: r.try_get("id")?,
                partner_a: r.try_get("partner_a")?,
                partner_b: r.try_get("partner_b")?,
            })),
            None => Ok(None),
        }
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        let Some(id) = parse_key(user_id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r#"
            SELECT display_name, push_token
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Profile {
                display_name: r.try_get("display_name")?,
                push_token: r.try_get("push_token")?,
            })),
            None => Ok(None),
        }
    }
}

/// Primary keys are UUIDs; anything else cannot match a row
fn parse_key(raw: &str) -> Option<Uuid> {
    match Uuid::parse_str(raw.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!(key = %raw, "Lookup key is not a UUID");
            None
        }
    }
}

/// Fixed in-memory directory, counting every lookup
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    couples: HashMap<String, Couple>,
    profiles: HashMap<String, Profile>,
    lookups: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_couple(mut self, id: &str, partner_a: &str, partner_b: &str) -> Self {
        self.couples.insert(
            id.to_string(),
            Couple {
                id: id.to_string(),
                partner_a: partner_a.to_string(),
                partner_b: partner_b.to_string(),
            },
        );
        self
    }

    pub fn with_profile(mut self, user_id: &str, display_name: Option<&str>, push_token: Option<&str>) -> Self {
        self.profiles.insert(
            user_id.to_string(),
            Profile {
                display_name: display_name.map(str::to_string),
                push_token: push_token.map(str::to_string),
            },
        );
        self
    }

    /// Number of lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn couple(&self, couple_id: &str) -> Result<Option<Couple>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.couples.get(couple_id).cloned())
    }

    async fn profile(&self, user_id: &str) -> Result<Option<Profile>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.get(user_id).cloned())
    }
}
