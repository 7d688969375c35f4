//! Command line configuration.
//!
//! Builds the `clap` command and turns its matches into a [`Config`].
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

/// Default `NewsAPI` v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Title of the application window.
pub const WINDOW_TITLE: &str = "News Desktop App";

const DEFAULT_COUNTRY: &str = "us";
const DEFAULT_PAGE_SIZE: u8 = 40;
const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Runtime settings for the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config
{
    /// Key sent with every provider request
    pub api_key: String,
    /// Base URL of the provider API, without trailing slash
    pub base_url: String,
    /// Two letter country code for headline queries
    pub country: String,
    /// Number of articles requested per fetch
    pub page_size: u8,
    /// Interval between UI ticks
    pub tick_rate: Duration,
}

impl Config
{
    /// Builds the configuration from parsed arguments.
    ///
    /// # Arguments
    ///
    /// * `matches` - Matches produced by [`command`]
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or blank.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self>
    {
        let api_key = matches
            .get_one::<String>("api-key")
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .context("No API key provided. Pass --api-key or set NEWS_API_KEY")?
            .to_owned();

        let base_url = matches
            .get_one::<String>("base-url")
            .map_or(DEFAULT_BASE_URL, String::as_str)
            .trim_end_matches('/')
            .to_owned();

        let country = matches
            .get_one::<String>("country")
            .map_or(DEFAULT_COUNTRY, String::as_str)
            .to_lowercase();

        let page_size = matches
            .get_one::<u8>("page-size")
            .copied()
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Ok(Self {
            api_key,
            base_url,
            country,
            page_size,
            tick_rate: DEFAULT_TICK_RATE,
        })
    }
}

/// The `clap` command describing the reader's arguments.
#[must_use]
pub fn command() -> Command
{
    Command::new("news_reader")
        .about("A terminal news reader")
        .version(clap::crate_version!())
        .after_help(
            "Articles are provided by NewsAPI (https://newsapi.org). An API key is \
             required.\nLogs are written to the user cache directory.",
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("NewsAPI key")
                .value_name("KEY")
                .env("NEWS_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .short('c')
                .help("Country code for headlines and categories")
                .value_name("CODE")
                .default_value(DEFAULT_COUNTRY),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .help("Articles fetched per request")
                .value_name("N")
                .value_parser(value_parser!(u8).range(1..=100))
                .default_value("40"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Base URL of the news API")
                .value_name("URL")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Remove the log file and exit")
                .action(ArgAction::SetTrue),
        )
}
