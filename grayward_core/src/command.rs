//! Chat command vocabulary and parsing.
//!
//! Every recognized command is a variant of [`Command`]; anything else parses
//! to `None` so ordinary chat traffic falls through silently.

/// The closed set of chat commands, all carrying the `!` prefix in text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    BanReport,
    UnbanReport,
    CheckReport,
    ListReport,
    Ban,
    Unban,
    Check,
    List,
    Help,
}

/// A parsed command invocation: the command plus its whitespace-split
/// argument tokens, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub args: Vec<String>,
}

impl Invocation {
    /// Parse raw message text into a command invocation.
    ///
    /// The text splits on whitespace; the first token, lower-cased, selects
    /// the command. There is no quoting, so arguments cannot contain
    /// whitespace. Returns `None` for empty text and unrecognized commands.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.to_lowercase();

        let command = match head.as_str() {
            "!ban-report" => Command::BanReport,
            "!unban-report" => Command::UnbanReport,
            "!check-report" => Command::CheckReport,
            "!list-report" => Command::ListReport,
            "!ban" => Command::Ban,
            "!unban" => Command::Unban,
            "!check" => Command::Check,
            "!list" => Command::List,
            "!help" => Command::Help,
            _ => return None,
        };

        Some(Self {
            command,
            args: tokens.map(str::to_owned).collect(),
        })
    }
}

impl Command {
    /// Whether this command mutates a blocklist and therefore requires the
    /// invoking user to hold administrator rights in the originating chat.
    #[must_use]
    pub const fn requires_admin(self) -> bool {
        matches!(
            self,
            Self::BanReport | Self::UnbanReport | Self::Ban | Self::Unban
        )
    }

    /// Rejection reply sent when a non-administrator invokes this command.
    #[must_use]
    pub const fn auth_rejection(self) -> &'static str {
        match self {
            Self::BanReport => "❌ You must be an administrator to cast this spell!",
            Self::UnbanReport => "❌ You must be an administrator to reverse the curse!",
            Self::Ban => "❌ You must be an administrator to invoke this ritual!",
            _ => "❌ You must be an administrator to reverse this curse!",
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"🩸 Grayward Commands 🩸

🔮 REPORT SYSTEM
!ban-report <ID> » Admin only
!unban-report <ID> » Admin only
!check-report <ID>
!list-report

💀 PERSON SYSTEM
!ban <ID> [level] » Admin only
!unban <ID> » Admin only
!check <ID>
!list

📌 USAGE EXAMPLES
!ban 123456789 2
!unban-report 987654321"
    }
}
