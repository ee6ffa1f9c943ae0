#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::missing_errors_doc)]

//! Read-only HTTP API over the blocklist stores.
//!
//! No authentication, no pagination, no write endpoints. Storage failures
//! degrade to empty arrays so the API stays up when a database is down.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use grayward_core::{PersonEntry, PersonStore, ReportStore};
use grayward_store::StorageEngine;
use tracing::{info, warn};

const LIVENESS: &str = "The Darkness Awaits...";

/// Build the router over a shared storage engine.
pub fn router(engine: Arc<StorageEngine>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/bannedIDs", get(banned_ids))
        .route("/bannedPersons", get(banned_persons))
        .with_state(engine)
}

/// Bind and serve on the given port until the task is dropped.
pub async fn serve(engine: Arc<StorageEngine>, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("HTTP API listening on port {port}");
    axum::serve(listener, router(engine)).await?;
    Ok(())
}

async fn index() -> &'static str {
    LIVENESS
}

async fn banned_ids(State(engine): State<Arc<StorageEngine>>) -> Json<Vec<String>> {
    let ids = match ReportStore::list_all(engine.as_ref()).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Error loading banned IDs: {e}");
            Vec::new()
        }
    };
    Json(ids)
}

async fn banned_persons(State(engine): State<Arc<StorageEngine>>) -> Json<Vec<PersonEntry>> {
    let persons = match PersonStore::list_all(engine.as_ref()).await {
        Ok(persons) => persons,
        Err(e) => {
            warn!("Error loading banned persons: {e}");
            Vec::new()
        }
    };
    Json(persons)
}
