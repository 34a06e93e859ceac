//! Chat front end
//!
//! Command parsing, the `/config` conversation, per-user session state
//! and the dispatcher tying them to the ledger.

pub mod commands;
pub mod conversation;
pub mod dispatcher;
pub mod messages;
pub mod parse;
pub mod session;
pub mod transport;

pub use commands::{classify, CommandAction, Input, COMMANDS};
pub use conversation::{Conversation, Outcome, Step};
pub use dispatcher::{Bot, Reply};
pub use parse::{EntryKind, LogEntry};
pub use session::{ActiveConversation, SessionStore, UserSession};
pub use transport::{run, ConsoleTransport, Incoming, Transport};
