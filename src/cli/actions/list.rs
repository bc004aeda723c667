use crate::cli::globals::{GlobalArgs, OutputFormat};
use crate::directory::render;
use anyhow::{Result, anyhow};
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub page: u32,
}

/// Fetch one page and print it.
/// # Errors
/// Returns an error if the page cannot be loaded.
pub async fn execute(args: Args) -> Result<()> {
    let view = super::directory_view(&args.globals)?;
    debug!(page = args.page, base_url = view.source().base_url(), "listing users");

    let state = view.set_page(args.page).await?;

    let mut out = io::stdout().lock();
    match args.globals.output {
        OutputFormat::Text => {
            if state.list_error().is_none() {
                write!(out, "{}", render::render_list(&state))?;
            }
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&render::list_json(&state))?
        )?,
    }
    out.flush()?;

    match state.list_error() {
        Some(err) => Err(anyhow!(err.clone())),
        None => Ok(()),
    }
}
