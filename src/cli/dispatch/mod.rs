//! Command-line argument dispatch.
//!
//! This module maps validated CLI matches to the action to run, resolving the
//! shared directory settings once so every action sees the same configuration.

use crate::cli::actions::{Action, browse, list, show};
use crate::cli::commands::{self, CMD_BROWSE, CMD_LIST, CMD_SHOW, api};
use crate::cli::globals::{GlobalArgs, OutputFormat};
use anyhow::{Context, Result, anyhow};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_opts = api::Options::parse(matches)?;

    let mut globals = GlobalArgs::new(api_opts.config);
    globals.set_output(
        matches
            .get_one::<OutputFormat>(commands::ARG_OUTPUT)
            .copied()
            .unwrap_or_default(),
    );

    match matches.subcommand() {
        Some((CMD_LIST, sub_m)) => Ok(Action::List(list::Args {
            globals,
            page: sub_m
                .get_one::<u32>(commands::ARG_PAGE)
                .copied()
                .unwrap_or(1),
        })),
        Some((CMD_SHOW, sub_m)) => Ok(Action::Show(show::Args {
            globals,
            id: sub_m
                .get_one::<u64>(commands::ARG_ID)
                .copied()
                .context("missing required argument: <ID>")?,
        })),
        Some((CMD_BROWSE, _)) => Ok(Action::Browse(browse::Args { globals })),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}
