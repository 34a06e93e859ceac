//! Command definitions
//!
//! The fixed set of slash commands the bot recognizes, and classification
//! of raw message text into commands or free text.

/// A command the user can send
#[derive(Debug, Clone)]
pub struct Command {
    /// Command name without the leading slash
    pub name: &'static str,
    /// Short description shown by /help
    pub description: &'static str,
    pub action: CommandAction,
}

/// Actions that commands can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Start,
    Help,
    Config,
    Log,
    Summary,
    Reset,
    NotifyOn,
    NotifyOff,
    Cancel,
}

/// All available commands, in /help order
pub static COMMANDS: &[Command] = &[
    Command {
        name: "start",
        description: "Show the welcome message",
        action: CommandAction::Start,
    },
    Command {
        name: "help",
        description: "List available commands",
        action: CommandAction::Help,
    },
    Command {
        name: "config",
        description: "Set income & budgets",
        action: CommandAction::Config,
    },
    Command {
        name: "log",
        description: "Log income or expense",
        action: CommandAction::Log,
    },
    Command {
        name: "summary",
        description: "Show budget summary",
        action: CommandAction::Summary,
    },
    Command {
        name: "reset",
        description: "Delete all your data",
        action: CommandAction::Reset,
    },
    Command {
        name: "notifyon",
        description: "Enable reminders",
        action: CommandAction::NotifyOn,
    },
    Command {
        name: "notifyoff",
        description: "Disable reminders",
        action: CommandAction::NotifyOff,
    },
    Command {
        name: "cancel",
        description: "Abandon an unfinished /config",
        action: CommandAction::Cancel,
    },
];

/// Find a command by name (case-insensitive, without the slash)
pub fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// How an inbound message should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// A registered slash command
    Command(CommandAction),
    /// Slash-prefixed text that names no registered command
    UnknownCommand(&'a str),
    /// Anything else
    Text(&'a str),
}

/// Classify a raw message
///
/// Commands may carry a bot mention (`/summary@FinanceBot`) and trailing
/// arguments, both ignored.
pub fn classify(text: &str) -> Input<'_> {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Input::Text(text);
    };

    let word = rest.split_whitespace().next().unwrap_or("");
    let name = word.split('@').next().unwrap_or("");
    match find_command(name) {
        Some(command) => Input::Command(command.action),
        None => Input::UnknownCommand(name),
    }
}
