//! Main content area.
//!
//! Shows the header for the current navigation and, below it, either the
//! article grid or the loading, empty or failed state.
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::news_card::{CARD_HEIGHT, NewsCard};
use crate::article::Article;

/// Narrowest a grid column may get.
pub const CARD_MIN_WIDTH: u16 = 36;

/// Gap between grid cells, both directions.
pub const CARD_SPACING: u16 = 1;

/// Text under the spinner while a fetch is running.
pub const LOADING_TEXT: &str = "Loading news...";

/// Text shown when a fetch returned nothing.
pub const EMPTY_TEXT: &str = "No articles found";

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);

const MUTED_STYLE: Style = Style::new().fg(Color::Gray);

const ERROR_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Articles for the current navigation, as far as they are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState
{
    /// A fetch is running
    Loading,
    /// The fetch finished, possibly with no articles
    Loaded(Vec<Article>),
    /// The fetch failed with this message
    Failed(String),
}

/// What the content area draws below the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView
{
    Loading,
    Empty,
    Grid,
    Failed,
}

/// Number of grid columns that fit in `width`.
///
/// As many columns as fit at [`CARD_MIN_WIDTH`] with [`CARD_SPACING`]
/// between them, and never fewer than one.
#[must_use]
pub fn grid_columns(width: u16) -> u16
{
    (width.saturating_add(CARD_SPACING) / (CARD_MIN_WIDTH + CARD_SPACING)).max(1)
}

/// Content area state.
pub struct MainContent
{
    /// Current articles or fetch state
    feed: FeedState,
    /// Index of the keyboard-selected card
    selected: usize,
    /// First grid row on screen
    top_row: usize,
    /// Columns in the last rendered grid
    columns: usize,
    /// Rows that fit in the last rendered grid
    visible_rows: usize,
    /// Current spinner frame
    spinner_frame: usize,
    /// Screen area of the last render
    area: Rect,
    /// Screen areas of cards from the last render, with article index
    card_regions: Vec<(Rect, usize)>,
}

impl Default for MainContent
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl MainContent
{
    /// Creates the content area in the loading state.
    #[must_use]
    pub const fn new() -> Self
    {
        Self {
            feed: FeedState::Loading,
            selected: 0,
            top_row: 0,
            columns: 1,
            visible_rows: 1,
            spinner_frame: 0,
            area: Rect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            },
            card_regions: Vec::new(),
        }
    }

    /// Current feed state.
    #[must_use]
    pub const fn feed(&self) -> &FeedState
    {
        &self.feed
    }

    /// Loaded articles, empty unless the feed is loaded.
    #[must_use]
    pub fn articles(&self) -> &[Article]
    {
        match &self.feed
        {
            FeedState::Loaded(articles) => articles,
            FeedState::Loading | FeedState::Failed(_) => &[],
        }
    }

    /// Replaces the feed and resets selection and scrolling.
    pub fn set_feed(&mut self, feed: FeedState)
    {
        self.feed = feed;
        self.selected = 0;
        self.top_row = 0;
        self.card_regions.clear();
    }

    /// Message of a failed fetch.
    #[must_use]
    pub fn failure(&self) -> Option<&str>
    {
        match &self.feed
        {
            FeedState::Failed(message) => Some(message),
            FeedState::Loading | FeedState::Loaded(_) => None,
        }
    }

    /// Which state the area draws.
    #[must_use]
    pub fn view(&self) -> ContentView
    {
        match &self.feed
        {
            FeedState::Loading => ContentView::Loading,
            FeedState::Loaded(articles) if articles.is_empty() => ContentView::Empty,
            FeedState::Loaded(_) => ContentView::Grid,
            FeedState::Failed(_) => ContentView::Failed,
        }
    }

    /// Index of the keyboard-selected card.
    #[must_use]
    pub const fn selected(&self) -> usize
    {
        self.selected
    }

    /// Advances the loading animation by one frame.
    pub fn advance_spinner(&mut self)
    {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    /// Moves the selection one card left.
    pub fn select_left(&mut self)
    {
        self.select(self.selected.saturating_sub(1));
    }

    /// Moves the selection one card right.
    pub fn select_right(&mut self)
    {
        self.select(self.selected.saturating_add(1));
    }

    /// Moves the selection one row up.
    pub fn select_up(&mut self)
    {
        if self.selected >= self.columns
        {
            self.select(self.selected - self.columns);
        }
    }

    /// Moves the selection one row down, stopping at the last card.
    pub fn select_down(&mut self)
    {
        let below = self.selected.saturating_add(self.columns);
        if below < self.articles().len()
        {
            self.select(below);
        }
        else
        {
            self.select(self.articles().len().saturating_sub(1));
        }
    }

    /// Moves the selection one screen down.
    pub fn page_down(&mut self)
    {
        let step = self.columns.saturating_mul(self.visible_rows);
        self.select(self.selected.saturating_add(step));
    }

    /// Moves the selection one screen up.
    pub fn page_up(&mut self)
    {
        let step = self.columns.saturating_mul(self.visible_rows);
        self.select(self.selected.saturating_sub(step));
    }

    /// Scrolls the grid down one row without moving the selection.
    pub fn scroll_down(&mut self)
    {
        self.top_row = self.top_row.saturating_add(1).min(self.max_top_row());
    }

    /// Scrolls the grid up one row without moving the selection.
    pub fn scroll_up(&mut self)
    {
        self.top_row = self.top_row.saturating_sub(1);
    }

    /// Finds the card under a screen position.
    #[must_use]
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize>
    {
        let position = Position::new(column, row);

        self.card_regions
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, index)| *index)
    }

    /// Whether a screen position lies inside the content area.
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool
    {
        self.area.contains(Position::new(column, row))
    }

    /// Selects the card at `index`, clamped to the list.
    pub fn select(&mut self, index: usize)
    {
        let count = self.articles().len();
        if count == 0
        {
            return;
        }

        self.selected = index.min(count - 1);

        // Keep the selected row on screen
        let row = self.selected / self.columns;
        if row < self.top_row
        {
            self.top_row = row;
        }
        else if row >= self.top_row.saturating_add(self.visible_rows)
        {
            self.top_row = row + 1 - self.visible_rows;
        }
    }

    /// Highest first row that still fills the screen.
    fn max_top_row(&self) -> usize
    {
        let rows = self.articles().len().div_ceil(self.columns);
        rows.saturating_sub(self.visible_rows)
    }

    /// Renders the header and the current state.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area for the content
    /// * `header` - Title above the grid
    /// * `focused` - Whether the selected card is highlighted
    pub fn render(&mut self, frame: &mut Frame, area: Rect, header: &str, focused: bool)
    {
        self.card_regions.clear();
        self.area = area;

        let [header_area, _, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let mut header_line = vec![Span::styled(header.to_owned(), HEADER_STYLE)];
        if self.view() == ContentView::Grid
        {
            header_line.push(Span::styled(
                format!("  ({} articles)", self.articles().len()),
                MUTED_STYLE,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(header_line)), header_area);

        match self.view()
        {
            ContentView::Loading =>
            {
                let lines = vec![
                    Line::styled(SPINNER_FRAMES[self.spinner_frame], MUTED_STYLE),
                    Line::raw(""),
                    Line::styled(LOADING_TEXT, MUTED_STYLE),
                ];
                render_centered(frame, body_area, lines);
            }
            ContentView::Empty =>
            {
                render_centered(frame, body_area, vec![Line::styled(EMPTY_TEXT, MUTED_STYLE)]);
            }
            ContentView::Grid => self.render_grid(frame, body_area, focused),
            ContentView::Failed =>
            {
                let lines = vec![
                    Line::styled("Could not load news", ERROR_STYLE),
                    Line::raw(""),
                    Line::styled(self.failure().unwrap_or_default().to_owned(), MUTED_STYLE),
                    Line::raw(""),
                    Line::styled("Press r to retry", MUTED_STYLE),
                ];
                render_centered(frame, body_area, lines);
            }
        }
    }

    /// Lays the cards out in rows of as many columns as fit.
    fn render_grid(&mut self, frame: &mut Frame, area: Rect, focused: bool)
    {
        let columns = grid_columns(area.width);
        let rows = (area.height.saturating_add(CARD_SPACING) / (CARD_HEIGHT + CARD_SPACING)).max(1);
        let gaps = CARD_SPACING.saturating_mul(columns - 1);
        let card_width = area.width.saturating_sub(gaps) / columns;

        self.columns = usize::from(columns);
        self.visible_rows = usize::from(rows);
        self.top_row = self.top_row.min(self.max_top_row());
        self.selected = self
            .selected
            .min(self.articles().len().saturating_sub(1));

        let first = self.top_row.saturating_mul(self.columns);
        let last = first
            .saturating_add(self.columns.saturating_mul(self.visible_rows))
            .min(self.articles().len());

        for index in first..last
        {
            let offset = index - first;
            let (Ok(row), Ok(column)) = (
                u16::try_from(offset / self.columns),
                u16::try_from(offset % self.columns),
            )
            else
            {
                break;
            };

            let cell = Rect::new(
                area.x + column * (card_width + CARD_SPACING),
                area.y + row * (CARD_HEIGHT + CARD_SPACING),
                card_width,
                CARD_HEIGHT,
            )
            .intersection(area);

            if cell.is_empty()
            {
                continue;
            }

            if let Some(article) = self.articles().get(index)
            {
                let card = NewsCard::new(article).selected(focused && index == self.selected);
                frame.render_widget(card, cell);
            }
            self.card_regions.push((cell, index));
        }
    }
}

/// Draws `lines` centered horizontally and vertically in `area`.
fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>)
{
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, middle);
}

#[cfg(test)]
mod tests
{
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn articles(count: usize) -> Vec<Article>
    {
        (0..count)
            .map(|index| Article {
                title: format!("Story number {index}"),
                url: format!("https://example.com/{index}"),
                published_at: "2025-05-05T05:05:05Z".to_owned(),
                ..Article::default()
            })
            .collect()
    }

    fn draw(content: &mut MainContent, width: u16, height: u16) -> String
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal
            .draw(|frame| content.render(frame, frame.area(), "Headlines", true))
            .expect("draw");

        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|row| {
                (0..buf.area.width)
                    .map(|column| buf[(column, row)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn grid_columns_follow_min_width()
    {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(CARD_MIN_WIDTH - 1), 1);
        assert_eq!(grid_columns(CARD_MIN_WIDTH), 1);
        assert_eq!(grid_columns(CARD_MIN_WIDTH * 2 + CARD_SPACING), 2);
        assert_eq!(grid_columns(CARD_MIN_WIDTH * 2), 1);
        assert_eq!(grid_columns(120), 3);
    }

    #[test]
    fn loading_shows_indicator_not_grid()
    {
        let mut content = MainContent::new();
        let screen = draw(&mut content, 80, 30);

        assert_eq!(content.view(), ContentView::Loading);
        assert!(screen.contains(LOADING_TEXT));
        assert!(content.card_at(10, 5).is_none());
    }

    #[test]
    fn single_article_shows_grid_not_indicator()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Loaded(articles(1)));
        let screen = draw(&mut content, 80, 30);

        assert_eq!(content.view(), ContentView::Grid);
        assert!(screen.contains("Story number 0"));
        assert!(!screen.contains(LOADING_TEXT));
    }

    #[test]
    fn many_articles_fill_columns()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Loaded(articles(5)));
        let screen = draw(&mut content, 120, 30);

        assert_eq!(content.view(), ContentView::Grid);
        assert!(screen.contains("Story number 0"));
        assert!(screen.contains("Story number 2"));
        assert!(!screen.contains(LOADING_TEXT));

        // First card sits below the header, third one in the third column
        assert_eq!(content.card_at(1, 3), Some(0));
        assert_eq!(content.card_at(120 - 2, 3), Some(2));
        assert_eq!(content.card_at(1, 3 + CARD_HEIGHT + CARD_SPACING), Some(3));
    }

    #[test]
    fn empty_result_is_not_loading()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Loaded(Vec::new()));
        let screen = draw(&mut content, 80, 20);

        assert_eq!(content.view(), ContentView::Empty);
        assert!(screen.contains(EMPTY_TEXT));
        assert!(!screen.contains(LOADING_TEXT));
    }

    #[test]
    fn failure_shows_message()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Failed("rate limited".to_owned()));
        let screen = draw(&mut content, 80, 20);

        assert_eq!(content.view(), ContentView::Failed);
        assert!(screen.contains("rate limited"));
        assert!(screen.contains("Press r to retry"));
    }

    #[test]
    fn keyboard_selection_scrolls_rows()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Loaded(articles(10)));
        // One column, two rows visible
        draw(&mut content, 40, 2 + CARD_HEIGHT * 2 + CARD_SPACING);

        content.select_down();
        content.select_down();
        assert_eq!(content.selected(), 2);

        let screen = draw(&mut content, 40, 2 + CARD_HEIGHT * 2 + CARD_SPACING);
        assert!(screen.contains("Story number 2"));
        assert!(!screen.contains("Story number 0"));

        content.page_down();
        content.page_down();
        content.page_down();
        content.page_down();
        assert_eq!(content.selected(), 9);

        content.select_right();
        assert_eq!(content.selected(), 9);

        content.page_up();
        assert_eq!(content.selected(), 7);

        content.select_up();
        content.select_left();
        assert_eq!(content.selected(), 5);
    }

    #[test]
    fn new_feed_resets_selection()
    {
        let mut content = MainContent::new();
        content.set_feed(FeedState::Loaded(articles(3)));
        content.select(2);

        content.set_feed(FeedState::Loading);

        assert_eq!(content.selected(), 0);
        assert!(content.articles().is_empty());
    }
}
