pub mod api;
pub mod logging;

use crate::cli::globals::OutputFormat;
use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_OUTPUT: &str = "output";
pub const ARG_PAGE: &str = "page";
pub const ARG_ID: &str = "id";

pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_BROWSE: &str = "browse";

fn list_command() -> Command {
    Command::new(CMD_LIST)
        .about("Print one page of users")
        .arg(
            Arg::new(ARG_PAGE)
                .short('p')
                .long("page")
                .help("Page number to fetch, starting at 1")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

fn show_command() -> Command {
    Command::new(CMD_SHOW)
        .about("Print one user's details and partner message")
        .arg(
            Arg::new(ARG_ID)
                .help("User id")
                .required(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

fn browse_command() -> Command {
    Command::new(CMD_BROWSE)
        .about("Browse the directory interactively")
        .long_about(
            "Browse the directory interactively. Commands are read from stdin, one per line: \
             n (next page), p (previous page), g <page> (go to page), <id> (select user), \
             c (close details), r (reload), d (dismiss errors), h (help), q (quit).",
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("userdir")
        .about("Paginated user directory browser")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(list_command())
        .subcommand(show_command())
        .subcommand(browse_command())
        .arg(
            Arg::new(ARG_OUTPUT)
                .short('o')
                .long("output")
                .help("Output format: text, json")
                .env("USERDIR_OUTPUT")
                .default_value("text")
                .value_parser(clap::value_parser!(OutputFormat))
                .global(true),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
