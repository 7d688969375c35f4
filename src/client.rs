//! Client module for fetching articles from the news provider.
//!
//! Handles network requests for the news reader application.
use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;
use ureq::Agent;
use ureq::tls::{TlsConfig, TlsProvider};

use crate::article::Article;
use crate::config::Config;
use crate::selection::Selection;

/// Title the provider substitutes for articles that were taken down.
const REMOVED_TITLE: &str = "[Removed]";

/// Source of articles for a navigation selection.
pub trait NewsProvider: Send + Sync
{
    /// Fetches the articles matching `selection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the articles can't be retrieved.
    fn fetch(&self, selection: &Selection) -> Result<Vec<Article>>;
}

/// Endpoint and query parameters for one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest
{
    /// Path below the base URL
    pub endpoint: &'static str,
    /// Query parameters, in order
    pub params: Vec<(&'static str, String)>,
}

impl NewsRequest
{
    /// Maps a selection to the provider call serving it.
    ///
    /// # Arguments
    ///
    /// * `selection` - What the user asked for
    /// * `country` - Country code for headline queries
    /// * `page_size` - Number of articles to request
    #[must_use]
    pub fn for_selection(selection: &Selection, country: &str, page_size: u8) -> Self
    {
        let (endpoint, mut params) = match selection
        {
            Selection::Headlines => (
                "/top-headlines",
                vec![("country", country.to_owned())],
            ),
            Selection::Category(category) => (
                "/top-headlines",
                vec![
                    ("country", country.to_owned()),
                    ("category", category.as_str().to_owned()),
                ],
            ),
            // The provider rejects `sources` mixed with `country`
            Selection::Source(source) => (
                "/top-headlines",
                vec![("sources", source.id().to_owned())],
            ),
            Selection::Search(query) => (
                "/everything",
                vec![
                    ("q", query.clone()),
                    ("sortBy", "publishedAt".to_owned()),
                ],
            ),
        };

        params.push(("pageSize", page_size.to_string()));

        Self { endpoint, params }
    }
}

/// Body of a provider response.
#[derive(Debug, Deserialize)]
struct ApiResponse
{
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

/// Decodes a provider response.
///
/// # Arguments
///
/// * `status` - HTTP status code of the response
/// * `body` - Raw response body
///
/// # Returns
///
/// The usable articles, without taken-down placeholders.
///
/// # Errors
///
/// Returns an error if the status is not a success, the provider reports an
/// error, or the body can't be decoded.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<Article>>
{
    let response: Result<ApiResponse, _> = serde_json::from_str(body);

    match response
    {
        Ok(response) if (200..300).contains(&status) && response.status == "ok" =>
        {
            Ok(response
                .articles
                .into_iter()
                .filter(|article| article.title != REMOVED_TITLE)
                .collect())
        }
        Ok(response) =>
        {
            let code = response
                .code
                .unwrap_or_else(|| format!("HTTP {status}"));
            let message = response
                .message
                .unwrap_or_else(|| "no details given".to_owned());

            Err(anyhow!("News provider error ({code}): {message}"))
        }
        Err(err) if (200..300).contains(&status) =>
        {
            Err(err).context("Failed to decode news provider response")
        }
        Err(_) => Err(anyhow!("News provider returned HTTP {status}")),
    }
}

/// Client for the `NewsAPI` v2 HTTP API.
pub struct NewsClient
{
    client: Agent,
    base_url: String,
    api_key: String,
    country: String,
    page_size: u8,
}

impl NewsClient
{
    /// Create a new news client.
    ///
    /// # Arguments
    ///
    /// * `config` - Provider endpoint, key and query defaults
    #[must_use]
    pub fn new(config: &Config) -> Self
    {
        let client = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .provider(TlsProvider::NativeTls)
                    .build(),
            )
            .build();

        Self {
            client: client.into(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
        }
    }
}

impl NewsProvider for NewsClient
{
    fn fetch(&self, selection: &Selection) -> Result<Vec<Article>>
    {
        let request = NewsRequest::for_selection(selection, &self.country, self.page_size);
        let url = format!("{}{}", self.base_url, request.endpoint);

        debug!("Requesting {url} for {selection}");

        let mut builder = self
            .client
            .get(url.as_str())
            .header("X-Api-Key", self.api_key.as_str());

        for (key, value) in &request.params
        {
            builder = builder.query(*key, value);
        }

        let response = builder
            .call()
            .with_context(|| format!("Failed to fetch {selection}"))?;

        let status = response.status().as_u16();

        let mut response_body = String::new();
        response
            .into_body()
            .into_reader()
            .read_to_string(&mut response_body)
            .with_context(|| format!("Failed to read response for {selection}"))?;

        parse_response(status, &response_body)
    }
}
