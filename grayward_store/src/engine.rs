//! Durable blocklist persistence over two independent SQLite databases.
//!
//! Each blocklist lives in its own database with its own connection. A
//! database that cannot be reached at startup leaves that side running
//! disconnected: reads error (callers degrade to an empty snapshot) and
//! writes report failure, but the process keeps serving.

use async_trait::async_trait;
use grayward_core::{PersonEntry, PersonStore, ReportStore};
use grayward_entities::{banned_ids, banned_persons};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema, Set};
use tracing::{error, info, warn};

/// Handle on both blocklist databases, shared by the bot and the HTTP API.
pub struct StorageEngine {
    reports: Option<DatabaseConnection>,
    persons: Option<DatabaseConnection>,
}

impl StorageEngine {
    /// Connect to both databases. A connection failure is logged and leaves
    /// that side disconnected; it never fails process startup.
    pub async fn connect(reports_url: &str, persons_url: &str) -> Self {
        let reports = Self::connect_one(reports_url, "Reports").await;
        let persons = Self::connect_one(persons_url, "Persons").await;
        Self { reports, persons }
    }

    async fn connect_one(url: &str, label: &str) -> Option<DatabaseConnection> {
        match Database::connect(url).await {
            Ok(db) => {
                info!("Connected to {label} database");
                Some(db)
            }
            Err(e) => {
                error!("Error connecting to {label} database: {e}");
                None
            }
        }
    }

    /// Create both tables if absent. Runs once at startup; a failure is
    /// logged and leaves that side effectively read-only empty.
    pub async fn init_schema(&self) {
        if let Some(db) = self.reports.as_ref() {
            if let Err(e) = create_table(db, banned_ids::Entity).await {
                error!("Error creating Reports table: {e}");
            }
        }
        if let Some(db) = self.persons.as_ref() {
            if let Err(e) = create_table(db, banned_persons::Entity).await {
                error!("Error creating Persons table: {e}");
            }
        }
    }
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(&stmt).await?;
    Ok(())
}

#[async_trait]
impl ReportStore for StorageEngine {
    async fn list_all(&self) -> anyhow::Result<Vec<String>> {
        let db = self
            .reports
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Reports database unavailable"))?;
        let rows = banned_ids::Entity::find().all(db).await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn add(&self, id: &str) -> bool {
        let Some(db) = self.reports.as_ref() else {
            return false;
        };
        let model = banned_ids::ActiveModel {
            id: Set(id.to_owned()),
        };
        match banned_ids::Entity::insert(model).exec(db).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Error adding banned ID {id}: {e}");
                false
            }
        }
    }

    async fn remove(&self, id: &str) -> bool {
        let Some(db) = self.reports.as_ref() else {
            return false;
        };
        match banned_ids::Entity::delete_by_id(id.to_owned()).exec(db).await {
            Ok(result) => result.rows_affected > 0,
            Err(e) => {
                warn!("Error removing banned ID {id}: {e}");
                false
            }
        }
    }
}

#[async_trait]
impl PersonStore for StorageEngine {
    async fn list_all(&self) -> anyhow::Result<Vec<PersonEntry>> {
        let db = self
            .persons
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Persons database unavailable"))?;
        let rows = banned_persons::Entity::find().all(db).await?;
        Ok(rows
            .into_iter()
            .map(|row| PersonEntry {
                id: row.id,
                level: row.level,
            })
            .collect())
    }

    async fn add(&self, id: &str, level: i32) -> bool {
        let Some(db) = self.persons.as_ref() else {
            return false;
        };
        let model = banned_persons::ActiveModel {
            id: Set(id.to_owned()),
            level: Set(level),
        };
        match banned_persons::Entity::insert(model).exec(db).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Error adding banned person {id}: {e}");
                false
            }
        }
    }

    async fn remove(&self, id: &str) -> bool {
        let Some(db) = self.persons.as_ref() else {
            return false;
        };
        match banned_persons::Entity::delete_by_id(id.to_owned())
            .exec(db)
            .await
        {
            Ok(result) => result.rows_affected > 0,
            Err(e) => {
                warn!("Error removing banned person {id}: {e}");
                false
            }
        }
    }
}
