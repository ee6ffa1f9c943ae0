//! Blocklist store contracts.
//!
//! Two independent stores with disjoint namespaces: report identifiers
//! (auto-enforced against message text) and banned persons (severity level,
//! command-managed only). `add`/`remove` report success as a plain boolean
//! rather than an error, so callers never have to unwind across the
//! moderation pipeline; the store's own uniqueness constraint is the
//! authoritative duplicate guard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A banned person: external identifier plus severity level (1 or 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub id: String,
    pub level: i32,
}

/// Report blocklist: bare identifiers, enforced automatically when they
/// appear bracketed in message text.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Every stored identifier. Errors on storage failure; callers degrade
    /// to an empty snapshot rather than aborting the message.
    async fn list_all(&self) -> anyhow::Result<Vec<String>>;

    /// Insert a new identifier. False on duplicate key or I/O failure.
    async fn add(&self, id: &str) -> bool;

    /// Delete by identifier. False when absent or on I/O failure.
    async fn remove(&self, id: &str) -> bool;
}

/// Person blocklist: identifiers with an immutable severity level.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<PersonEntry>>;

    /// Insert a new entry. False on duplicate key or I/O failure; an
    /// existing entry's level is never updated.
    async fn add(&self, id: &str, level: i32) -> bool;

    async fn remove(&self, id: &str) -> bool;
}
