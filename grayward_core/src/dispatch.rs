//! Command dispatcher: maps a parsed invocation to store mutations or
//! queries and formats the user-facing reply.
//!
//! Authorization is the caller's job (the platform layer knows who is an
//! administrator); everything here assumes the gate has already passed.
//! Validation, duplicate and not-found conditions all come back as reply
//! text, never as errors, so one bad command can never take down the
//! message loop.

use tracing::warn;

use crate::command::{Command, Invocation};
use crate::store::{PersonStore, ReportStore};

const INVALID_ID: &str = "❌ Invalid ID, mortal!";
const PROVIDE_ID: &str = "❌ You must provide a valid ID, mortal!";
const ALREADY_BANNED: &str = "❌ This accursed ID is already banished from our realm!";
const NOT_FOUND: &str = "❌ This accursed ID was not found in the forbidden records!";
const INVALID_LEVEL: &str =
    "❌ Invalid level! Use 1 for a standard ban or 2 for an extended ban.";
const STORE_REFUSED: &str = "❌ The forbidden records refuse the inscription!";

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

fn ban_report_confirmation(id: &str) -> String {
    format!(
        "**🔮 THE DARK RITUAL IS COMPLETE**\n\
         ```diff\n\
         - ID {id} has been sacrificed to The Void\n\
         + Eternal Torment: Activated\n\
         ```\n\
         🩸 *The shadows claim another soul...*"
    )
}

fn unban_report_confirmation(id: &str) -> String {
    format!(
        "**🕳️ THE SEAL IS BROKEN**\n\
         ```diff\n\
         + ID {id} emerges from The Abyss\n\
         - Chains of Damnation: Shattered\n\
         ```\n\
         💀 *A soul escapes... but for how long?*"
    )
}

/// Execute a command against the two blocklists and produce the reply text.
///
/// `report_snapshot` is the report-store read the moderation pipeline has
/// already performed for this message; it doubles as the user-facing
/// duplicate/presence check. The store's uniqueness constraint stays the
/// authoritative guard underneath, so a racing identical command still
/// cannot double-insert.
pub async fn dispatch(
    invocation: &Invocation,
    report_snapshot: &[String],
    reports: &dyn ReportStore,
    persons: &dyn PersonStore,
) -> String {
    let args = &invocation.args;

    match invocation.command {
        Command::BanReport => {
            let Some(id) = args.first().map(|s| s.trim()) else {
                return INVALID_ID.to_owned();
            };
            if !is_numeric_id(id) {
                return INVALID_ID.to_owned();
            }
            if report_snapshot.iter().any(|banned| banned == id) {
                return ALREADY_BANNED.to_owned();
            }
            if reports.add(id).await {
                ban_report_confirmation(id)
            } else {
                STORE_REFUSED.to_owned()
            }
        }
        Command::UnbanReport => {
            let Some(id) = args.first().map(|s| s.trim()) else {
                return PROVIDE_ID.to_owned();
            };
            if id.is_empty() {
                return PROVIDE_ID.to_owned();
            }
            if !report_snapshot.iter().any(|banned| banned == id) {
                return NOT_FOUND.to_owned();
            }
            if reports.remove(id).await {
                unban_report_confirmation(id)
            } else {
                NOT_FOUND.to_owned()
            }
        }
        Command::CheckReport => {
            let Some(id) = args.first().map(|s| s.trim()).filter(|s| !s.is_empty()) else {
                return PROVIDE_ID.to_owned();
            };
            if report_snapshot.iter().any(|banned| banned == id) {
                format!("❌ The ID {id} remains banished from this realm!")
            } else {
                format!("✅ The ID {id} is free... for now.")
            }
        }
        Command::ListReport => {
            if report_snapshot.is_empty() {
                "ℹ️ There are no cursed IDs in our records... yet.".to_owned()
            } else {
                format!("📋 Cursed IDs: {}", report_snapshot.join(", "))
            }
        }
        Command::Ban => {
            let Some(id) = args.first().map(|s| s.trim()) else {
                return INVALID_ID.to_owned();
            };
            if !is_numeric_id(id) {
                return INVALID_ID.to_owned();
            }
            // Level defaults to 1; an unparseable token fails the range check.
            let level = args
                .get(1)
                .map_or(1, |token| token.trim().parse::<i32>().unwrap_or(0));
            if level != 1 && level != 2 {
                return INVALID_LEVEL.to_owned();
            }
            let snapshot = person_snapshot(persons).await;
            if snapshot.iter().any(|person| person.id == id) {
                return ALREADY_BANNED.to_owned();
            }
            if persons.add(id, level).await {
                format!("✅ The ID {id} has been banished with level {level}!")
            } else {
                STORE_REFUSED.to_owned()
            }
        }
        Command::Unban => {
            let Some(id) = args.first().map(|s| s.trim()).filter(|s| !s.is_empty()) else {
                return PROVIDE_ID.to_owned();
            };
            let snapshot = person_snapshot(persons).await;
            if !snapshot.iter().any(|person| person.id == id) {
                return NOT_FOUND.to_owned();
            }
            if persons.remove(id).await {
                format!("✅ The ID {id} has been released from its curse!")
            } else {
                NOT_FOUND.to_owned()
            }
        }
        Command::Check => {
            let Some(id) = args.first().map(|s| s.trim()).filter(|s| !s.is_empty()) else {
                return PROVIDE_ID.to_owned();
            };
            let snapshot = person_snapshot(persons).await;
            snapshot.iter().find(|person| person.id == id).map_or_else(
                || format!("✅ The ID {id} is free... for now."),
                |person| {
                    format!(
                        "❌ The ID {id} remains banished with level {}!",
                        person.level
                    )
                },
            )
        }
        Command::List => {
            let snapshot = person_snapshot(persons).await;
            if snapshot.is_empty() {
                "ℹ️ There are no banished persons in our records... yet.".to_owned()
            } else {
                let listing = snapshot
                    .iter()
                    .map(|person| format!("{} (Level {})", person.id, person.level))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("📋 Banished Persons: {listing}")
            }
        }
        Command::Help => Command::help_text().to_owned(),
    }
}

async fn person_snapshot(persons: &dyn PersonStore) -> Vec<crate::store::PersonEntry> {
    match persons.list_all().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Error loading banned persons: {e}");
            Vec::new()
        }
    }
}
