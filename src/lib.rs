//! # userdir (Paginated User Directory)
//!
//! `userdir` browses a remote user directory exposed as two JSON endpoints:
//!
//! - `GET {base}/users?page={n}` returns one page of user summaries together with
//!   the server-reported page count.
//! - `GET {base}/users/{id}` returns one user's record plus an optional `support`
//!   advisory.
//!
//! ## State Model
//!
//! All view state lives in a single [`directory::DirectoryState`] snapshot. The
//! snapshot only changes through pure transitions, so every step of a browsing
//! session can be replayed and asserted without a terminal or network.
//!
//! - **Generations:** each list or detail request is tagged with a monotonically
//!   increasing generation. A response is applied only if it belongs to the most
//!   recent request of its loader, so a slow page 1 can never overwrite page 2.
//! - **Scoped Errors:** list and detail failures are kept in separate slots, so a
//!   failing detail request never hides a valid page of users.
//! - **Selection:** clearing the selection drops the detail and advisory together
//!   and invalidates any detail request still in flight.
//!
//! ## Binary
//!
//! The `userdir` binary wraps the library with `list`, `show` and an interactive
//! `browse` session. See [`cli`].

pub mod cli;
pub mod directory;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
