//! Line-oriented interactive front end.
//!
//! A plain line generates a prompt for that topic. Lines starting with `/` are
//! commands, standing in for the keyboard shortcuts of a graphical front end.

use crate::error::PromptError;
use crate::models::prompt::PromptId;
use crate::render;
use crate::session::Session;
use anyhow::{Context, Result};
use rand::Rng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use tokio::io::{self, AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub const HELP: &str = "\
Type a topic and press Enter to generate a prompt.
  /r, /regen          generate again for the same topic
  /s, /save           save the current prompt
  /c, /copy           copy the current prompt to the clipboard
  /l, /list           show saved prompts
  /d, /delete <id>    delete a saved prompt
  /categories         show template categories
  /h, /help           show this help
  /q, /quit           leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(String),
    Regenerate,
    Save,
    Copy,
    List,
    Delete(PromptId),
    Categories,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Generate(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name.to_lowercase().as_str() {
            "r" | "regen" | "regenerate" => Command::Regenerate,
            "s" | "save" => Command::Save,
            "c" | "copy" => Command::Copy,
            "l" | "list" => Command::List,
            "d" | "delete" if !arg.is_empty() => match arg.parse() {
                Ok(id) => Command::Delete(id),
                Err(never) => match never {},
            },
            "categories" => Command::Categories,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Reads commands with line editing and history until `/quit`, Ctrl+C or
/// Ctrl+D.
pub async fn run<R: Rng>(session: &mut Session<R>) -> Result<()> {
    let mut out = io::stdout();
    out.write_all(HELP.as_bytes()).await?;
    out.flush().await?;

    let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;
    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Readline error"),
        };
        let command = Command::parse(&line);
        debug!(?command, "Interactive command");
        if command == Command::Empty {
            continue;
        }
        let _ = rl.add_history_entry(line.trim());
        if command == Command::Quit {
            break;
        }
        handle(session, command, &mut out).await?;
        out.flush().await?;
    }
    Ok(())
}

async fn handle<R: Rng, W: AsyncWrite + Unpin>(session: &mut Session<R>, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Generate(topic) => {
            notice(out, "Generating...").await?;
            match session.generate(&topic).await {
                Ok(generation) => {
                    let view = render::generation(generation)?;
                    out.write_all(view.as_bytes()).await?;
                }
                Err(e) => report(out, &e).await?,
            }
        }
        Command::Regenerate => {
            notice(out, "Generating...").await?;
            match session.regenerate().await {
                Ok(generation) => {
                    let view = render::generation(generation)?;
                    out.write_all(view.as_bytes()).await?;
                }
                Err(e) => report(out, &e).await?,
            }
        }
        Command::Save => match session.save_current().await {
            Ok(saved) => notice(out, format!("Prompt saved (id {}).", saved.id)).await?,
            Err(e) => {
                report(out, &e).await?;
                if let Some(unsaved) = e.unsaved_prompt() {
                    notice(out, format!("Prompt {} is kept for this session only.", unsaved.id)).await?;
                }
            }
        },
        Command::Copy => match session.copy_current().await {
            Ok(()) => notice(out, "Prompt copied to clipboard!").await?,
            Err(e) => report(out, &e).await?,
        },
        Command::List => {
            let view = render::saved_list(session.saved())?;
            out.write_all(view.as_bytes()).await?;
        }
        Command::Delete(id) => match session.delete(&id).await {
            Ok(_) => notice(out, format!("Deleted {}.", id)).await?,
            Err(e) => report(out, &e).await?,
        },
        Command::Categories => {
            let view = render::categories(session.generator().catalog())?;
            out.write_all(view.as_bytes()).await?;
        }
        Command::Help => out.write_all(HELP.as_bytes()).await?,
        Command::Unknown(line) => notice(out, format!("Unknown command '{}'. Type /help.", line)).await?,
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}

async fn notice<W: AsyncWrite + Unpin>(out: &mut W, message: impl Display) -> Result<()> {
    out.write_all(format!("{}\n", message).as_bytes()).await?;
    Ok(())
}

async fn report<W: AsyncWrite + Unpin>(out: &mut W, error: &PromptError) -> Result<()> {
    notice(out, format!("Error: {}", error)).await
}
