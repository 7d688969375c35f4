//! Navigation selection.
//!
//! Typed navigation intent emitted by the side panel. Header text shown
//! above the article grid is derived from it.
use std::fmt;

/// Fixed news categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category
{
    /// Every category, in the order the side panel lists them.
    pub const ALL: [Self; 7] = [
        Self::Business,
        Self::Entertainment,
        Self::General,
        Self::Health,
        Self::Science,
        Self::Sports,
        Self::Technology,
    ];

    /// Lowercase name, also the value the provider expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str
    {
        match self
        {
            Self::Business => "business",
            Self::Entertainment => "entertainment",
            Self::General => "general",
            Self::Health => "health",
            Self::Science => "science",
            Self::Sports => "sports",
            Self::Technology => "technology",
        }
    }

    /// Capitalized name for display.
    #[must_use]
    pub fn label(self) -> String
    {
        capitalize(self.as_str())
    }
}

/// Fixed news providers offered in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsSource
{
    BbcNews,
    Cnn,
    TheGuardian,
    Reuters,
    AssociatedPress,
}

impl NewsSource
{
    /// Every source, in the order the side panel lists them.
    pub const ALL: [Self; 5] = [
        Self::BbcNews,
        Self::Cnn,
        Self::TheGuardian,
        Self::Reuters,
        Self::AssociatedPress,
    ];

    /// Literal display name.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self
        {
            Self::BbcNews => "BBC News",
            Self::Cnn => "CNN",
            Self::TheGuardian => "The Guardian",
            Self::Reuters => "Reuters",
            Self::AssociatedPress => "Associated Press",
        }
    }

    /// Identifier used by the provider's `sources` parameter.
    #[must_use]
    pub const fn id(self) -> &'static str
    {
        match self
        {
            Self::BbcNews => "bbc-news",
            Self::Cnn => "cnn",
            Self::TheGuardian => "the-guardian-uk",
            Self::Reuters => "reuters",
            Self::AssociatedPress => "associated-press",
        }
    }
}

/// What the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection
{
    /// Top headlines for the configured country
    #[default]
    Headlines,
    /// Top headlines within a category
    Category(Category),
    /// Top headlines from one publisher
    Source(NewsSource),
    /// Free text search over all articles
    Search(String),
}

impl Selection
{
    /// Title shown above the article grid.
    #[must_use]
    pub fn header(&self) -> String
    {
        match self
        {
            Self::Headlines => "Headlines".to_owned(),
            Self::Category(category) => format!("Category: {}", category.label()),
            Self::Source(source) => format!("Source: {}", source.name()),
            Self::Search(query) => format!("Results for '{query}'"),
        }
    }
}

impl fmt::Display for Selection
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        formatter.write_str(&self.header())
    }
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(text: &str) -> String
{
    let mut chars = text.chars();

    match chars.next()
    {
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn category_headers_are_capitalized()
    {
        let headers: Vec<String> = Category::ALL
            .iter()
            .map(|category| Selection::Category(*category).header())
            .collect();

        assert_eq!(
            headers,
            [
                "Category: Business",
                "Category: Entertainment",
                "Category: General",
                "Category: Health",
                "Category: Science",
                "Category: Sports",
                "Category: Technology",
            ]
        );
    }

    #[test]
    fn source_headers_use_literal_names()
    {
        let headers: Vec<String> = NewsSource::ALL
            .iter()
            .map(|source| Selection::Source(*source).header())
            .collect();

        assert_eq!(
            headers,
            [
                "Source: BBC News",
                "Source: CNN",
                "Source: The Guardian",
                "Source: Reuters",
                "Source: Associated Press",
            ]
        );
    }

    #[test]
    fn search_and_headlines_headers()
    {
        assert_eq!(Selection::Headlines.header(), "Headlines");
        assert_eq!(
            Selection::Search("rust lang".to_owned()).header(),
            "Results for 'rust lang'"
        );
        assert_eq!(Selection::default(), Selection::Headlines);
    }

    #[test]
    fn capitalize_handles_edges()
    {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("science"), "Science");
        assert_eq!(capitalize("Sports"), "Sports");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
