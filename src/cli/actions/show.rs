use crate::cli::globals::{GlobalArgs, OutputFormat};
use crate::directory::render;
use anyhow::{Result, anyhow};
use std::io::{self, Write};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub id: u64,
}

/// Fetch one user's details and partner message and print them.
/// # Errors
/// Returns an error if the details cannot be loaded.
pub async fn execute(args: Args) -> Result<()> {
    let view = super::directory_view(&args.globals)?;
    debug!(id = args.id, base_url = view.source().base_url(), "showing user");

    let state = view.open(args.id).await;

    let mut out = io::stdout().lock();
    match args.globals.output {
        OutputFormat::Text => {
            if let (None, Some(panel)) = (state.detail_error(), render::render_detail(&state)) {
                write!(out, "{panel}")?;
            }
        }
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&render::detail_json(&state))?
        )?,
    }
    out.flush()?;

    match state.detail_error() {
        Some(err) => Err(anyhow!(err.clone())),
        None => Ok(()),
    }
}
