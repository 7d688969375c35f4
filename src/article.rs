//! Article model.
//!
//! Data shape of a single news item as delivered by the news provider, plus
//! the few display helpers the cards need.
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Number of characters of the publish timestamp shown on a card.
const DISPLAY_DATE_LEN: usize = 10;

// The provider cuts long content and appends e.g. " [+2345 chars]".
static TRUNCATION_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[\+\d+ chars\]\s*$").expect("Invalid truncation marker regex")
});

/// Publisher of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleSource
{
    /// Provider identifier, absent for sources the provider doesn't index
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the publisher
    #[serde(default)]
    pub name: String,
}

/// A single news item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article
{
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Short summary
    #[serde(default)]
    pub description: Option<String>,
    /// Leading part of the body
    #[serde(default)]
    pub content: Option<String>,
    /// Link to the full story
    #[serde(default)]
    pub url: String,
    /// ISO 8601 publish timestamp
    #[serde(default)]
    pub published_at: String,
    /// Publisher
    #[serde(default)]
    pub source: ArticleSource,
    /// Byline
    #[serde(default)]
    pub author: Option<String>,
}

impl Article
{
    /// Text shown under the title.
    ///
    /// Falls back from content to description to an empty string. Blank
    /// values count as missing.
    #[must_use]
    pub fn snippet(&self) -> String
    {
        let content = self
            .content
            .as_deref()
            .map(|text| TRUNCATION_MARKER_REGEX.replace(text, ""))
            .filter(|text| !text.trim().is_empty());

        if let Some(content) = content
        {
            return content.into_owned();
        }

        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_default()
            .to_owned()
    }

    /// Publish date for display: the first 10 characters of the timestamp.
    #[must_use]
    pub fn display_date(&self) -> &str
    {
        match self
            .published_at
            .char_indices()
            .nth(DISPLAY_DATE_LEN)
        {
            Some((end, _)) => &self.published_at[..end],
            None => &self.published_at,
        }
    }

    /// Whether clicking the card can open anything.
    #[must_use]
    pub fn has_url(&self) -> bool
    {
        !self.url.is_empty()
    }
}
