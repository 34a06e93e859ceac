//! Message transport
//!
//! The bot only needs a source of `(user, text)` messages and somewhere
//! to send replies. [`ConsoleTransport`] provides both over line-based
//! streams for local use. A line that is not valid UTF-8 is skipped with a
//! warning instead of ending the session.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::error::FinbotResult;
use crate::models::UserId;

use super::dispatcher::{Bot, Reply};

/// One inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incoming {
    pub user: UserId,
    pub text: String,
}

/// A chat backend
pub trait Transport {
    /// Next message, or `None` when the transport is closed
    fn receive(&mut self) -> FinbotResult<Option<Incoming>>;

    /// Deliver a reply to a user
    fn send(&mut self, user: UserId, reply: &Reply) -> FinbotResult<()>;
}

/// Feed every message from the transport to the bot until it closes
///
/// Returns the number of messages handled.
pub fn run<T: Transport>(bot: &Bot, transport: &mut T) -> FinbotResult<usize> {
    let mut handled = 0;
    while let Some(message) = transport.receive()? {
        debug!(user = %message.user, "message received");
        let reply = bot.handle(message.user, &message.text);
        transport.send(message.user, &reply)?;
        handled += 1;
        bot.purge_expired_sessions();
    }
    info!(handled, "transport closed");
    Ok(handled)
}

/// Reads one message per line for a single user, writes replies back
pub struct ConsoleTransport<R, W> {
    user: UserId,
    input: R,
    output: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> ConsoleTransport<R, W> {
    pub fn new(user: UserId, input: R, output: W) -> Self {
        Self {
            user,
            input,
            output,
            prompt: false,
        }
    }

    /// Print `> ` before reading each line
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Transport for ConsoleTransport<R, W> {
    fn receive(&mut self) -> FinbotResult<Option<Incoming>> {
        loop {
            if self.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            let line = match String::from_utf8(buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(user = %self.user, error = %e, "skipping line that is not valid UTF-8");
                    continue;
                }
            };

            let text = line.trim_end_matches(['\r', '\n']);
            if text.trim().is_empty() {
                continue;
            }
            return Ok(Some(Incoming {
                user: self.user,
                text: text.to_string(),
            }));
        }
    }

    fn send(&mut self, _user: UserId, reply: &Reply) -> FinbotResult<()> {
        writeln!(self.output, "{}", reply.text)?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BotPaths;
    use crate::config::settings::Settings;
    use crate::models::Money;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_console_session() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let bot = Bot::new(paths, Settings::default());

        let input = Cursor::new("/config\n1000\n\nfood 200\ndone\nexpense 20 food\n");
        let mut transport = ConsoleTransport::new(UserId::new(7), input, Vec::new());

        let handled = run(&bot, &mut transport).unwrap();
        assert_eq!(handled, 5);

        let output = String::from_utf8(transport.into_output()).unwrap();
        assert!(output.contains("✅ Budget configuration saved."));
        assert!(output.contains("✅ Expense of $20.00 logged under food."));

        let ledger = bot.store().load(UserId::new(7)).unwrap();
        assert_eq!(ledger.income, Money::from_units(1000));
        assert_eq!(ledger.expenses.len(), 1);
    }

    #[test]
    fn test_receive_strips_line_endings() {
        let mut transport =
            ConsoleTransport::new(UserId::new(1), Cursor::new("income 5\r\n"), Vec::new());
        let message = transport.receive().unwrap().unwrap();
        assert_eq!(message.text, "income 5");
        assert!(transport.receive().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input = Cursor::new(b"\xff\xfe\nincome 5\n".to_vec());
        let mut transport = ConsoleTransport::new(UserId::new(1), input, Vec::new());

        let message = transport.receive().unwrap().unwrap();
        assert_eq!(message.text, "income 5");
        assert!(transport.receive().unwrap().is_none());
    }

    #[test]
    fn test_chat_continues_after_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BotPaths::with_base_dir(temp_dir.path().to_path_buf());
        let bot = Bot::new(paths, Settings::default());

        let input = Cursor::new(b"income 5\n\x80 oops\nincome 7\n".to_vec());
        let mut transport = ConsoleTransport::new(UserId::new(2), input, Vec::new());

        assert_eq!(run(&bot, &mut transport).unwrap(), 2);
        let ledger = bot.store().load(UserId::new(2)).unwrap();
        assert_eq!(ledger.income, Money::from_units(12));
    }

    #[test]
    fn test_prompt_written() {
        let mut transport = ConsoleTransport::new(UserId::new(1), Cursor::new(""), Vec::new())
            .with_prompt(true);
        assert!(transport.receive().unwrap().is_none());
        assert_eq!(transport.into_output(), b"> ".to_vec());
    }
}
