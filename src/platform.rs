//! Host platform helpers.
//!
//! Pointer shape for interactive elements and launching URLs in the user's
//! default browser.
use std::fmt;

use anyhow::{Context, Result, bail};
use crossterm::Command;
use url::Url;

/// Mouse pointer shape requested from the terminal.
///
/// Written as an OSC 22 sequence. Terminals that don't understand it
/// ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerShape
{
    /// Whatever the terminal normally shows
    #[default]
    Default,
    /// Hand pointer used over clickable elements
    Pointer,
}

impl PointerShape
{
    /// Name of the shape in the CSS cursor vocabulary.
    #[must_use]
    pub const fn css_name(self) -> &'static str
    {
        match self
        {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

impl Command for PointerShape
{
    fn write_ansi(&self, out: &mut impl fmt::Write) -> fmt::Result
    {
        write!(out, "\x1b]22;{}\x1b\\", self.css_name())
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()>
    {
        // No console API for pointer shapes.
        Ok(())
    }
}

/// Pointer shape for interactive elements.
#[must_use]
pub const fn hand_cursor() -> PointerShape
{
    PointerShape::Pointer
}

/// Something that can open a URL for the user.
pub trait UrlOpener
{
    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL can't be opened.
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs in the system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser
{
    fn open(&self, url: &str) -> Result<()>
    {
        open_url(url)
    }
}

/// Checks that `url` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns an error if the URL doesn't parse or uses another scheme.
pub fn validate_url(url: &str) -> Result<Url>
{
    let parsed = Url::parse(url).with_context(|| format!("Malformed URL: {url}"))?;

    if !matches!(parsed.scheme(), "http" | "https")
    {
        bail!("Refusing to open {} URL: {url}", parsed.scheme());
    }

    Ok(parsed)
}

/// Opens `url` with the platform's default handler.
///
/// # Arguments
///
/// * `url` - The URL to open, passed to the handler unchanged
///
/// # Errors
///
/// Returns an error if the URL is invalid or no handler could be launched.
pub fn open_url(url: &str) -> Result<()>
{
    validate_url(url)?;

    open::that_detached(url).with_context(|| format!("Failed to launch browser for {url}"))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn hand_cursor_is_pointer()
    {
        assert_eq!(hand_cursor(), PointerShape::Pointer);
        assert_eq!(PointerShape::default(), PointerShape::Default);
    }

    #[test]
    fn pointer_shape_writes_osc_22()
    {
        let mut out = String::new();
        hand_cursor()
            .write_ansi(&mut out)
            .expect("writing to a string");

        assert_eq!(out, "\x1b]22;pointer\x1b\\");
    }

    #[test]
    fn validate_url_accepts_http_and_https()
    {
        assert!(validate_url("https://example.com/news?id=1").is_ok());
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn open_url_rejects_bad_input_without_launching()
    {
        assert!(open_url("").is_err());
        assert!(open_url("not a url").is_err());
        assert!(open_url("file:///etc/passwd").is_err());
        assert!(open_url("javascript:alert(1)").is_err());
    }
}
