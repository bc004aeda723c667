pub mod browse;
pub mod list;
pub mod show;

use crate::cli::globals::{GlobalArgs, OutputFormat};
use crate::directory::{DirectoryClient, DirectoryState, DirectoryView, render};
use anyhow::{Context, Result};
use std::io::Write;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

#[derive(Debug)]
pub enum Action {
    List(list::Args),
    Show(show::Args),
    Browse(browse::Args),
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute().await`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Builds a view over the HTTP client using the shared settings.
fn directory_view(globals: &GlobalArgs) -> Result<DirectoryView<DirectoryClient>> {
    let client =
        DirectoryClient::new(&globals.directory).context("Failed to build directory client")?;
    Ok(DirectoryView::new(client, globals.directory.error_policy))
}

/// Writes the full view (banner, list, detail panel) in the requested format.
fn write_view(out: &mut impl Write, state: &DirectoryState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", render::render(state))?,
        OutputFormat::Json => {
            let value = serde_json::json!({
                "list": render::list_json(state),
                "detail": render::detail_json(state),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
