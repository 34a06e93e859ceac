//! Message dispatcher
//!
//! Routes each inbound message, in order of precedence:
//!
//! 1. an open `/config` conversation (only `/cancel` and `/reset` escape it)
//! 2. a registered slash command
//! 3. a pending reset confirmation
//! 4. the `"<income|expense> <amount> [category]"` shorthand
//!
//! Messages for the same user are handled one at a time.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::audit::AuditLogger;
use crate::config::paths::BotPaths;
use crate::config::settings::Settings;
use crate::display::Markup;
use crate::error::FinbotResult;
use crate::models::UserId;
use crate::services::LedgerService;
use crate::storage::{LedgerStore, UserLocks};

use super::commands::{classify, CommandAction, Input};
use super::conversation::{Conversation, Outcome, Step};
use super::messages;
use super::parse::{is_reset_confirmation, parse_log_entry, EntryKind};
use super::session::{ActiveConversation, SessionStore, UserSession};

/// Text sent back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markup: Markup,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::Markdown,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.markup == Markup::Markdown
    }
}

/// The chat bot: ledger storage plus per-user session state
pub struct Bot {
    store: LedgerStore,
    audit: AuditLogger,
    sessions: SessionStore,
    turns: UserLocks,
    settings: Settings,
}

impl Bot {
    pub fn new(paths: BotPaths, settings: Settings) -> Self {
        let audit = if settings.audit_enabled {
            AuditLogger::new(paths.audit_log())
        } else {
            AuditLogger::disabled()
        };
        Self {
            store: LedgerStore::new(paths),
            audit,
            sessions: SessionStore::new(settings.session_timeout()),
            turns: UserLocks::new(),
            settings,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one message and produce the reply
    ///
    /// Never fails: rejected values get a dedicated reply, storage errors
    /// are logged and answered with a generic failure message.
    pub fn handle(&self, user: UserId, text: &str) -> Reply {
        self.handle_at(user, text, Instant::now())
    }

    /// [`Bot::handle`] with an explicit clock, for session expiry
    pub fn handle_at(&self, user: UserId, text: &str, now: Instant) -> Reply {
        match self.turns.with(user, || self.route(user, text, now)) {
            Ok(reply) => reply,
            Err(e) if e.is_parse() => {
                warn!(user = %user, error = %e, "unparsed input");
                Reply::plain(messages::LOG_USAGE)
            }
            Err(e) if e.is_validation() => {
                warn!(user = %user, error = %e, "value rejected");
                Reply::plain(messages::OUT_OF_RANGE)
            }
            Err(e) => {
                error!(user = %user, error = %e, "failed to handle message");
                Reply::plain(messages::INTERNAL_ERROR)
            }
        }
    }

    /// Drop sessions idle past the configured timeout
    pub fn purge_expired_sessions(&self) -> usize {
        match self.sessions.purge_expired(Instant::now()) {
            Ok(purged) => purged,
            Err(e) => {
                warn!(error = %e, "failed to purge sessions");
                0
            }
        }
    }

    fn service(&self) -> LedgerService<'_> {
        LedgerService::new(&self.store, &self.audit)
    }

    fn route(&self, user: UserId, text: &str, now: Instant) -> FinbotResult<Reply> {
        let mut session = self.sessions.take(user, now)?;
        let reply = self.dispatch(user, text, &mut session);
        self.sessions.put(user, session, now)?;
        reply
    }

    fn dispatch(&self, user: UserId, text: &str, session: &mut UserSession) -> FinbotResult<Reply> {
        let input = classify(text);

        if let Some(active) = session.conversation.take() {
            return match input {
                Input::Command(CommandAction::Cancel) => {
                    info!(user = %user, session = %active.id, "configuration cancelled");
                    Ok(Reply::plain(messages::CONFIG_CANCELLED))
                }
                Input::Command(CommandAction::Reset) => {
                    info!(user = %user, session = %active.id, "configuration abandoned for reset");
                    Ok(self.arm_reset(user, session))
                }
                _ => self.continue_conversation(user, active, text, session),
            };
        }

        match input {
            Input::Command(action) => self.run_command(user, action, session),
            Input::UnknownCommand(name) => {
                debug!(user = %user, command = name, "unknown command");
                Ok(Reply::plain(messages::UNKNOWN_COMMAND))
            }
            Input::Text(text) if session.pending_reset => self.confirm_reset(user, text, session),
            Input::Text(text) => self.log_entry(user, text),
        }
    }

    fn run_command(
        &self,
        user: UserId,
        action: CommandAction,
        session: &mut UserSession,
    ) -> FinbotResult<Reply> {
        debug!(user = %user, command = ?action, "command");
        let reply = match action {
            CommandAction::Start => Reply::plain(messages::WELCOME),
            CommandAction::Help => Reply::plain(messages::help()),
            CommandAction::Config => {
                let active = ActiveConversation::start();
                info!(user = %user, session = %active.id, "configuration started");
                session.pending_reset = false;
                session.conversation = Some(active);
                Reply::plain(messages::ASK_INCOME)
            }
            CommandAction::Log => Reply::plain(messages::LOG_PROMPT),
            CommandAction::Summary => Reply::markdown(self.service().summary(
                user,
                &self.settings.currency_symbol,
                Markup::Markdown,
            )?),
            CommandAction::Reset => self.arm_reset(user, session),
            CommandAction::NotifyOn => Reply::plain(messages::NOTIFY_ON),
            CommandAction::NotifyOff => Reply::plain(messages::NOTIFY_OFF),
            CommandAction::Cancel => Reply::plain(messages::NOTHING_TO_CANCEL),
        };
        Ok(reply)
    }

    fn arm_reset(&self, user: UserId, session: &mut UserSession) -> Reply {
        debug!(user = %user, "reset armed");
        session.pending_reset = true;
        Reply::plain(messages::RESET_PROMPT)
    }

    fn confirm_reset(
        &self,
        user: UserId,
        text: &str,
        session: &mut UserSession,
    ) -> FinbotResult<Reply> {
        session.pending_reset = false;
        if !is_reset_confirmation(text) {
            info!(user = %user, "reset declined");
            return Ok(Reply::plain(messages::RESET_CANCELLED));
        }
        self.service().reset(user)?;
        Ok(Reply::plain(messages::RESET_DONE))
    }

    fn log_entry(&self, user: UserId, text: &str) -> FinbotResult<Reply> {
        let entry = match parse_log_entry(
            text,
            &self.settings.default_category,
            self.settings.allow_negative_amounts,
        ) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(user = %user, error = %e, "shorthand rejected");
                return Ok(Reply::plain(messages::log_rejected(&e)));
            }
        };

        let service = self.service();
        match entry.kind {
            EntryKind::Income => service.record_income(user, entry.amount)?,
            EntryKind::Expense => service.record_expense(user, &entry.category, entry.amount)?,
        };

        let amount = entry.amount.format_with_symbol(&self.settings.currency_symbol);
        Ok(Reply::plain(messages::entry_logged(&entry, &amount)))
    }

    fn continue_conversation(
        &self,
        user: UserId,
        active: ActiveConversation,
        text: &str,
        session: &mut UserSession,
    ) -> FinbotResult<Reply> {
        let ActiveConversation { id, state } = active;
        let from = state.state_name();

        match state.advance(text, self.settings.allow_negative_amounts) {
            Step::Continue(next, outcome) => {
                debug!(
                    user = %user,
                    session = %id,
                    state = next.state_name(),
                    from,
                    "conversation step"
                );
                session.conversation = Some(ActiveConversation { id, state: next });

                let symbol = &self.settings.currency_symbol;
                let reply = match outcome {
                    Outcome::IncomeAccepted(_) => messages::INCOME_SAVED.to_string(),
                    Outcome::IncomeRejected(e) => messages::income_rejected(&e).to_string(),
                    Outcome::BudgetAdded { category, limit } => {
                        messages::budget_added(&category, &limit.format_with_symbol(symbol))
                    }
                    Outcome::BudgetRejected(e) => messages::budget_rejected(&e).to_string(),
                };
                Ok(Reply::plain(reply))
            }
            Step::Complete { income, budgets } => {
                match self
                    .service()
                    .commit_configuration(user, id, income, budgets.clone())
                {
                    Ok(_) => Ok(Reply::plain(messages::CONFIG_SAVED)),
                    Err(e) => {
                        // Keep the collected values so "done" can be retried
                        session.conversation = Some(ActiveConversation {
                            id,
                            state: Conversation::AwaitingBudgets { income, budgets },
                        });
                        Err(e)
                    }
                }
            }
        }
    }
}
