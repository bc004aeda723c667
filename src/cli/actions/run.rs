use crate::cli::actions::{Action, browse, list, show};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::List(args) => list::execute(args).await,
        Action::Show(args) => show::execute(args).await,
        Action::Browse(args) => browse::execute(args).await,
    }
}
