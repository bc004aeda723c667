use crate::directory::{DirectoryConfig, ErrorPolicy, config};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_API_KEY: &str = "api-key";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_ERROR_POLICY: &str = "error-policy";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BASE_URL)
                .long(ARG_BASE_URL)
                .help("Base URL of the directory API; users are read from <base-url>/users")
                .env("USERDIR_BASE_URL")
                .default_value(config::DEFAULT_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_API_KEY)
                .long(ARG_API_KEY)
                .help("API key sent as the x-api-key header")
                .env("USERDIR_API_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("USERDIR_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_ERROR_POLICY)
                .long(ARG_ERROR_POLICY)
                .help("Whether a successful fetch clears its loader's error: retain, clear-on-success")
                .env("USERDIR_ERROR_POLICY")
                .default_value("retain")
                .value_parser(clap::value_parser!(ErrorPolicy))
                .global(true),
        )
}

/// Directory connection options parsed from the command line.
#[derive(Debug)]
pub struct Options {
    pub config: DirectoryConfig,
}

impl Options {
    /// # Errors
    /// Returns an error if the base URL is missing or not an absolute http(s) URL.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let base_url = matches
            .get_one::<String>(ARG_BASE_URL)
            .cloned()
            .context("missing required argument: --base-url")?;
        validate_base_url(&base_url)?;

        let timeout = matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .unwrap_or(config::DEFAULT_TIMEOUT_SECONDS);
        let policy = matches
            .get_one::<ErrorPolicy>(ARG_ERROR_POLICY)
            .copied()
            .unwrap_or_default();

        let mut config = DirectoryConfig::new(&base_url)
            .with_timeout(Duration::from_secs(timeout))
            .with_error_policy(policy);
        if let Some(key) = matches.get_one::<String>(ARG_API_KEY) {
            config = config.with_api_key(key);
        }

        Ok(Self { config })
    }
}

fn validate_base_url(value: &str) -> Result<()> {
    let url = url::Url::parse(value.trim()).with_context(|| format!("invalid --base-url: {value}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(anyhow::anyhow!(
            "invalid --base-url: unsupported scheme {scheme}"
        )),
    }
}
