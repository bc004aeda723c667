//! Interactive directory session. Commands are read line by line and the view
//! is printed after each one, mirroring a page that re-renders on every state
//! change.

use crate::cli::globals::{GlobalArgs, OutputFormat};
use crate::directory::{DirectoryView, UserDirectory};
use anyhow::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "Commands: n (next), p (previous), g <page> (go to page), <id> (select user), \
c (close details), r (reload), d (dismiss errors), h (help), q (quit)";

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// One line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Goto(u32),
    Select(u64),
    Close,
    Reload,
    Dismiss,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parses one input line; blank lines yield `Ok(None)`.
    ///
    /// # Errors
    /// Returns a message describing the unrecognized input.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments: {}", line.trim()));
        }

        let command = match (head.to_lowercase().as_str(), arg) {
            ("n" | "next", None) => Self::Next,
            ("p" | "prev" | "previous", None) => Self::Previous,
            ("g" | "goto", Some(page)) => match page.parse::<u32>() {
                Ok(page) if page > 0 => Self::Goto(page),
                _ => return Err(format!("invalid page: {page}")),
            },
            ("c" | "close", None) => Self::Close,
            ("r" | "reload", None) => Self::Reload,
            ("d" | "dismiss", None) => Self::Dismiss,
            ("h" | "help" | "?", None) => Self::Help,
            ("q" | "quit" | "exit", None) => Self::Quit,
            (id, None) => match id.parse::<u64>() {
                Ok(id) if id > 0 => Self::Select(id),
                _ => return Err(format!("unknown command: {}", line.trim())),
            },
            _ => return Err(format!("unknown command: {}", line.trim())),
        };

        Ok(Some(command))
    }
}

/// Run an interactive session on stdin/stdout.
/// # Errors
/// Returns an error if the client cannot be built or the terminal cannot be written.
pub async fn execute(args: Args) -> Result<()> {
    let view = super::directory_view(&args.globals)?;
    info!(base_url = view.source().base_url(), "starting browse session");

    let reader = BufReader::new(tokio::io::stdin());
    let mut out = io::stdout();
    run_session(&view, reader, &mut out, args.globals.output).await
}

/// Mounts the view, then applies commands from `input` until it ends or `q`.
///
/// # Errors
/// Returns an error if reading input or writing output fails.
pub async fn run_session<D, R, W>(
    view: &DirectoryView<D>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<()>
where
    D: UserDirectory,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let state = view.mount().await;
    super::write_view(out, &state, format)?;
    if format == OutputFormat::Text {
        writeln!(out, "{HELP}")?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        debug!(?command, "browse command");

        let state = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            BrowseCommand::Next => {
                if !view.next_page().await {
                    writeln!(out, "Already on the last page.")?;
                }
                view.snapshot()
            }
            BrowseCommand::Previous => {
                if !view.previous_page().await {
                    writeln!(out, "Already on the first page.")?;
                }
                view.snapshot()
            }
            BrowseCommand::Goto(page) => view.set_page(page).await?,
            BrowseCommand::Select(id) => view.open(id).await,
            BrowseCommand::Close => view.clear(),
            BrowseCommand::Reload => view.reload().await,
            BrowseCommand::Dismiss => view.dismiss_errors(),
        };

        super::write_view(out, &state, format)?;
    }

    Ok(())
}
