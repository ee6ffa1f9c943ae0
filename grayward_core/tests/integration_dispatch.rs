//! Integration tests for the command dispatcher.
//!
//! These tests verify that:
//! - Mutations land in the right store and are visible to checks/lists
//! - Duplicate adds and missing removals are rejected without mutation
//! - Validation failures never touch the stores

use std::sync::Mutex;

use async_trait::async_trait;
use grayward_core::{Command, Invocation, PersonEntry, PersonStore, ReportStore, dispatch};

#[derive(Default)]
struct MemReportStore {
    ids: Mutex<Vec<String>>,
}

#[async_trait]
impl ReportStore for MemReportStore {
    async fn list_all(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.ids.lock().unwrap().clone())
    }

    async fn add(&self, id: &str) -> bool {
        let mut ids = self.ids.lock().unwrap();
        if ids.iter().any(|existing| existing == id) {
            return false;
        }
        ids.push(id.to_owned());
        true
    }

    async fn remove(&self, id: &str) -> bool {
        let mut ids = self.ids.lock().unwrap();
        let before = ids.len();
        ids.retain(|existing| existing != id);
        ids.len() != before
    }
}

#[derive(Default)]
struct MemPersonStore {
    entries: Mutex<Vec<PersonEntry>>,
}

#[async_trait]
impl PersonStore for MemPersonStore {
    async fn list_all(&self) -> anyhow::Result<Vec<PersonEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn add(&self, id: &str, level: i32) -> bool {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|entry| entry.id == id) {
            return false;
        }
        entries.push(PersonEntry {
            id: id.to_owned(),
            level,
        });
        true
    }

    async fn remove(&self, id: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }
}

/// A report store whose backing medium is unreachable.
struct BrokenReportStore;

#[async_trait]
impl ReportStore for BrokenReportStore {
    async fn list_all(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("reports database unavailable")
    }

    async fn add(&self, _id: &str) -> bool {
        false
    }

    async fn remove(&self, _id: &str) -> bool {
        false
    }
}

fn invocation(text: &str) -> Invocation {
    Invocation::parse(text).expect("text should parse as a command")
}

async fn run(text: &str, reports: &dyn ReportStore, persons: &dyn PersonStore) -> String {
    let snapshot = reports.list_all().await.unwrap_or_default();
    dispatch(&invocation(text), &snapshot, reports, persons).await
}

#[tokio::test]
async fn ban_report_then_check_reports_banned() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!ban-report 123456", &reports, &persons).await;
    assert!(reply.contains("123456"), "confirmation names the id: {reply}");

    let reply = run("!check-report 123456", &reports, &persons).await;
    assert!(reply.contains("banished"), "id should be banned: {reply}");

    let reply = run("!list-report", &reports, &persons).await;
    assert!(reply.contains("123456"));
}

#[tokio::test]
async fn unban_report_frees_the_id() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();
    assert!(reports.add("777").await);

    let reply = run("!unban-report 777", &reports, &persons).await;
    assert!(reply.contains("777"));

    let reply = run("!check-report 777", &reports, &persons).await;
    assert!(reply.contains("free"), "id should be free again: {reply}");
    assert!(reports.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_ban_report_is_rejected_once_stored() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    run("!ban-report 555", &reports, &persons).await;
    let reply = run("!ban-report 555", &reports, &persons).await;
    assert!(reply.contains("already"), "second add must fail: {reply}");
    assert_eq!(reports.list_all().await.unwrap(), vec!["555"]);
}

#[tokio::test]
async fn non_numeric_report_id_is_rejected_without_mutation() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!ban-report abc123", &reports, &persons).await;
    assert!(reply.contains("Invalid ID"));
    assert!(reports.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn unban_report_of_unknown_id_reports_not_found() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!unban-report 42", &reports, &persons).await;
    assert!(reply.contains("not found"), "unexpected reply: {reply}");
}

#[tokio::test]
async fn ban_defaults_to_level_one() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!ban 42", &reports, &persons).await;
    assert!(reply.contains("level 1"), "unexpected reply: {reply}");
    assert_eq!(
        persons.list_all().await.unwrap(),
        vec![PersonEntry {
            id: "42".to_owned(),
            level: 1
        }]
    );
}

#[tokio::test]
async fn ban_with_out_of_range_level_creates_nothing() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!ban 42 3", &reports, &persons).await;
    assert!(reply.contains("Invalid level"));
    assert!(persons.list_all().await.unwrap().is_empty());

    let reply = run("!ban 42 two", &reports, &persons).await;
    assert!(reply.contains("Invalid level"));
    assert!(persons.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn re_banning_a_person_never_updates_the_level() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    run("!ban 42 2", &reports, &persons).await;
    let reply = run("!ban 42 1", &reports, &persons).await;
    assert!(reply.contains("already"));
    assert_eq!(persons.list_all().await.unwrap()[0].level, 2);
}

#[tokio::test]
async fn check_reports_the_stored_level() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();
    run("!ban 42 2", &reports, &persons).await;

    let reply = run("!check 42", &reports, &persons).await;
    assert!(reply.contains("level 2"), "unexpected reply: {reply}");

    let reply = run("!check 43", &reports, &persons).await;
    assert!(reply.contains("free"));
}

#[tokio::test]
async fn list_formats_person_entries_with_levels() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();
    run("!ban 1 1", &reports, &persons).await;
    run("!ban 2 2", &reports, &persons).await;

    let reply = run("!list", &reports, &persons).await;
    assert!(reply.contains("1 (Level 1)"));
    assert!(reply.contains("2 (Level 2)"));
}

#[tokio::test]
async fn empty_lists_get_a_dedicated_notice() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!list-report", &reports, &persons).await;
    assert!(reply.contains("no cursed IDs"));

    let reply = run("!list", &reports, &persons).await;
    assert!(reply.contains("no banished persons"));
}

#[tokio::test]
async fn check_without_argument_asks_for_an_id() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!check-report", &reports, &persons).await;
    assert!(reply.contains("provide"), "unexpected reply: {reply}");

    let reply = run("!check", &reports, &persons).await;
    assert!(reply.contains("provide"));
}

#[tokio::test]
async fn help_lists_every_command() {
    let reports = MemReportStore::default();
    let persons = MemPersonStore::default();

    let reply = run("!help", &reports, &persons).await;
    for token in [
        "!ban-report",
        "!unban-report",
        "!check-report",
        "!list-report",
        "!ban",
        "!unban",
        "!check",
        "!list",
    ] {
        assert!(reply.contains(token), "help is missing {token}");
    }
    assert_eq!(reply, Command::help_text());
}

#[tokio::test]
async fn unreachable_report_store_degrades_to_empty() {
    let reports = BrokenReportStore;
    let persons = MemPersonStore::default();

    // The caller's snapshot degrades to empty, so checks report free and
    // the eventual add is refused by the store itself.
    let reply = run("!check-report 99", &reports, &persons).await;
    assert!(reply.contains("free"));

    let reply = run("!ban-report 99", &reports, &persons).await;
    assert!(reply.contains("refuse"), "unexpected reply: {reply}");
}
