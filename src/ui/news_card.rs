//! News card widget.
//!
//! Draws one article inside a bordered box: title, snippet, then the source
//! and publish date on the bottom row.
use anyhow::Result;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use textwrap::wrap;

use crate::article::Article;
use crate::platform::UrlOpener;

/// Rows of a rendered card, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Maximum lines for the title and for the snippet.
const MAX_TEXT_LINES: usize = 2;

const ELLIPSIS: char = '…';

const TITLE_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

const SNIPPET_STYLE: Style = Style::new().fg(Color::Gray);

const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

const BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

const SELECTED_BORDER_STYLE: Style = Style::new().fg(Color::LightYellow);

/// A single article card.
pub struct NewsCard<'a>
{
    article: &'a Article,
    selected: bool,
}

impl<'a> NewsCard<'a>
{
    /// Creates a card for `article`.
    #[must_use]
    pub const fn new(article: &'a Article) -> Self
    {
        Self {
            article,
            selected: false,
        }
    }

    /// Highlights the card as the keyboard selection.
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self
    {
        self.selected = selected;
        self
    }
}

impl Widget for NewsCard<'_>
{
    fn render(self, area: Rect, buf: &mut Buffer)
    {
        let (border_type, border_style) = if self.selected
        {
            (BorderType::Thick, SELECTED_BORDER_STYLE)
        }
        else
        {
            (BorderType::Rounded, BORDER_STYLE)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [title_area, snippet_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        let width = usize::from(inner.width);

        let title: Vec<Line> = clamp_lines(&self.article.title, width, MAX_TEXT_LINES)
            .into_iter()
            .map(|line| Line::styled(line, TITLE_STYLE))
            .collect();
        Paragraph::new(title).render(title_area, buf);

        let snippet: Vec<Line> = clamp_lines(&self.article.snippet(), width, MAX_TEXT_LINES)
            .into_iter()
            .map(|line| Line::styled(line, SNIPPET_STYLE))
            .collect();
        Paragraph::new(snippet).render(snippet_area, buf);

        // Source on the left, date on the right; the date wins when both
        // don't fit.
        let date = self.article.display_date();
        let date_width = u16::try_from(date.chars().count()).unwrap_or(u16::MAX);
        let [source_area, _, date_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(date_width),
        ])
        .areas(footer_area);

        let source = clamp_lines(&self.article.source.name, usize::from(source_area.width), 1);
        Paragraph::new(Line::styled(source.concat(), FOOTER_STYLE)).render(source_area, buf);
        Paragraph::new(Line::styled(date, FOOTER_STYLE))
            .alignment(Alignment::Right)
            .render(date_area, buf);
    }
}

/// Wraps `text` to `width` columns and keeps at most `max_lines` lines.
///
/// When text is cut, the last kept line ends with an ellipsis.
///
/// # Arguments
///
/// * `text` - Text to wrap
/// * `width` - Available columns
/// * `max_lines` - Maximum number of lines to keep
///
/// # Returns
///
/// The lines to display.
#[must_use]
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String>
{
    if width == 0 || max_lines == 0 || text.trim().is_empty()
    {
        return Vec::new();
    }

    let wrapped = wrap(text.trim(), width);
    let truncated = wrapped.len() > max_lines;

    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(max_lines)
        .map(|line| line.into_owned())
        .collect();

    if truncated
    {
        if let Some(last) = lines.last_mut()
        {
            while !last.is_empty() && last.chars().count() >= width
            {
                last.pop();
            }
            let trimmed_len = last.trim_end().len();
            last.truncate(trimmed_len);
            last.push(ELLIPSIS);
        }
    }

    lines
}

/// Opens the article's link.
///
/// # Arguments
///
/// * `article` - The clicked article
/// * `opener` - Where the URL goes
///
/// # Returns
///
/// `true` if the opener was called, `false` if the article has no URL.
///
/// # Errors
///
/// Returns the opener's error.
pub fn open_article(article: &Article, opener: &dyn UrlOpener) -> Result<bool>
{
    if !article.has_url()
    {
        return Ok(false);
    }

    opener.open(&article.url)?;

    Ok(true)
}

#[cfg(test)]
mod tests
{
    use std::cell::RefCell;

    use anyhow::bail;

    use super::*;
    use crate::article::ArticleSource;

    #[derive(Default)]
    struct RecordingOpener
    {
        opened: RefCell<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener
    {
        fn open(&self, url: &str) -> Result<()>
        {
            self.opened.borrow_mut().push(url.to_owned());
            Ok(())
        }
    }

    struct FailingOpener;

    impl UrlOpener for FailingOpener
    {
        fn open(&self, _url: &str) -> Result<()>
        {
            bail!("no desktop integration")
        }
    }

    fn article() -> Article
    {
        Article {
            title: "Parliament passes the budget after a long night of debate".to_owned(),
            description: Some("Lawmakers approved the plan.".to_owned()),
            url: "https://example.com/budget?ref=front".to_owned(),
            published_at: "2025-06-30T23:59:59Z".to_owned(),
            source: ArticleSource {
                id: None,
                name: "Example Post".to_owned(),
            },
            ..Article::default()
        }
    }

    fn rows(buf: &Buffer) -> Vec<String>
    {
        (0..buf.area.height)
            .map(|row| {
                (0..buf.area.width)
                    .map(|column| buf[(column, row)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn click_opens_exact_url_once()
    {
        let opener = RecordingOpener::default();

        let opened = open_article(&article(), &opener).expect("recording opener");

        assert!(opened);
        assert_eq!(
            *opener.opened.borrow(),
            ["https://example.com/budget?ref=front"]
        );
    }

    #[test]
    fn click_without_url_is_inert()
    {
        let opener = RecordingOpener::default();
        let item = Article {
            url: String::new(),
            ..article()
        };

        let opened = open_article(&item, &opener).expect("nothing to fail");

        assert!(!opened);
        assert!(opener.opened.borrow().is_empty());
    }

    #[test]
    fn opener_failure_is_returned()
    {
        assert!(open_article(&article(), &FailingOpener).is_err());
    }

    #[test]
    fn clamp_lines_adds_ellipsis_when_cut()
    {
        let lines = clamp_lines("one two three four five six seven", 9, 2);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with(ELLIPSIS));
        assert!(lines[1].chars().count() <= 9);
    }

    #[test]
    fn clamp_lines_keeps_short_text()
    {
        assert_eq!(clamp_lines("short", 20, 2), ["short"]);
        assert!(clamp_lines("", 20, 2).is_empty());
        assert!(clamp_lines("text", 0, 2).is_empty());
    }

    #[test]
    fn renders_title_snippet_source_and_date()
    {
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);

        NewsCard::new(&article()).render(area, &mut buf);
        let rows = rows(&buf);

        assert!(rows[1].contains("Parliament passes the budget"));
        assert!(rows[3].contains("Lawmakers approved the plan."));
        assert!(rows[5].contains("Example Post"));
        assert!(rows[5].contains("2025-06-30"));
        assert!(!rows[5].contains("23:59"));
    }
}
