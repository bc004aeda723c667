//! Plain-text and JSON rendering of a [`DirectoryState`] for the terminal.

use super::state::DirectoryState;
use serde_json::{Value, json};
use std::fmt::Write;

const LOADING_USERS: &str = "Loading users...";
const LOADING_DETAILS: &str = "Loading details...";
const NO_USERS: &str = "No users found.";
const NO_DETAILS: &str = "User details not available";

/// Error banner, list and (when a user is selected) the detail panel.
#[must_use]
pub fn render(state: &DirectoryState) -> String {
    let mut out = String::new();
    if let Some(banner) = render_banner(state) {
        out.push_str(&banner);
        out.push('\n');
    }
    out.push_str(&render_list(state));
    if let Some(detail) = render_detail(state) {
        out.push('\n');
        out.push_str(&detail);
    }
    out
}

#[must_use]
pub fn render_banner(state: &DirectoryState) -> Option<String> {
    state.banner().map(|error| format!("! {error}"))
}

#[must_use]
pub fn render_list(state: &DirectoryState) -> String {
    if state.is_loading_list() {
        return format!("{LOADING_USERS}\n");
    }

    let mut out = String::new();
    if state.users().is_empty() {
        let _ = writeln!(out, "{NO_USERS}");
    }

    let selected = state.selected_user_id();
    for user in state.users() {
        let marker = if selected == Some(user.id) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} #{:<4} {:<24} <{}>",
            user.id,
            user.full_name(),
            user.email
        );
    }

    let page = state.page();
    let previous = if state.has_previous() { "[Previous] " } else { "" };
    let next = if state.has_next() { " [Next]" } else { "" };
    let _ = writeln!(
        out,
        "{previous}Page {} of {}{next}",
        page.current_page, page.total_pages
    );
    out
}

/// Detail panel; `None` when nothing is selected.
#[must_use]
pub fn render_detail(state: &DirectoryState) -> Option<String> {
    state.selection()?;

    let mut out = String::new();
    if state.is_loading_detail() {
        let _ = writeln!(out, "{LOADING_DETAILS}");
        return Some(out);
    }

    let Some(detail) = state.detail() else {
        let _ = writeln!(out, "{NO_DETAILS}");
        return Some(out);
    };

    let _ = writeln!(out, "{}", detail.full_name());
    let _ = writeln!(out, "  Email:   {}", detail.email);
    let _ = writeln!(out, "  User ID: {}", detail.id);
    if let Some(avatar) = &detail.avatar {
        let _ = writeln!(out, "  Avatar:  {avatar}");
    }

    if let Some(advisory) = state.advisory() {
        let _ = writeln!(out, "\n  Partner Message (Sponsored)");
        let _ = writeln!(out, "  {}", advisory.text);
        let _ = writeln!(out, "  Learn more: {}", advisory.url);
    }

    Some(out)
}

/// Page metadata, users and any list error as JSON.
#[must_use]
pub fn list_json(state: &DirectoryState) -> Value {
    let page = state.page();
    json!({
        "page": page.current_page,
        "total_pages": page.total_pages,
        "has_previous": state.has_previous(),
        "has_next": state.has_next(),
        "data": state.users(),
        "error": state.list_error().map(ToString::to_string),
    })
}

/// Selected user's detail, advisory and any detail error as JSON.
#[must_use]
pub fn detail_json(state: &DirectoryState) -> Value {
    json!({
        "selected": state.selected_user_id(),
        "data": state.detail(),
        "support": state.advisory(),
        "error": state.detail_error().map(ToString::to_string),
    })
}
