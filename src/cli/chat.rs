//! CLI commands that talk to the bot
//!
//! `chat` runs an interactive console session; `send` delivers a single
//! message. Session state lives in memory, so a `/config` conversation
//! only spans messages within one `chat` run.

use std::io::{self, IsTerminal};

use crate::bot::{run, Bot, ConsoleTransport};
use crate::error::FinbotResult;
use crate::models::UserId;

/// Read messages from stdin until EOF, printing each reply
pub fn handle_chat(bot: &Bot, user: UserId) -> FinbotResult<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("Chatting as user {}. Type /help for commands, Ctrl-D to quit.", user);
    }

    let mut transport =
        ConsoleTransport::new(user, stdin.lock(), io::stdout().lock()).with_prompt(interactive);
    run(bot, &mut transport)?;
    Ok(())
}

/// Handle one message and print the reply
pub fn handle_send(bot: &Bot, user: UserId, words: &[String]) -> FinbotResult<()> {
    let text = words.join(" ");
    let reply = bot.handle(user, &text);
    println!("{}", reply.text);
    Ok(())
}
