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
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod command;
pub mod dispatch;
pub mod moderation;
pub mod scanner;
pub mod store;

pub use command::{Command, Invocation};
pub use dispatch::dispatch;
pub use moderation::{blocked_ids, is_soft_trigger};
pub use scanner::extract_bracketed_ids;
pub use store::{PersonEntry, PersonStore, ReportStore};
