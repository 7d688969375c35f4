//! Application module for the news reader.
//!
//! This module provides the main application state and logic. It composes
//! the side panel and the content area, tracks focus and mode, applies fetch
//! results and turns input into [`Action`]s for the event loop.
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::{debug, error, info, warn};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::event::FeedUpdate;
use super::main_content::{ContentView, FeedState, MainContent};
use super::news_card::open_article;
use super::side_panel::{PanelTarget, SidePanel};
use crate::fetch::FetchRequest;
use crate::platform::{PointerShape, UrlOpener, hand_cursor};
use crate::selection::Selection;

/// How long a status message stays on screen.
const STATUS_DURATION: Duration = Duration::from_secs(4);

const STATUS_STYLE: Style = Style::new().fg(Color::Gray);

const STATUS_ERROR_STYLE: Style = Style::new().fg(Color::LightRed);

const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);

const KEY_HINTS: &str = "Tab: switch pane  /: search  Enter: open  r: reload  ?: help  q: quit";

/// Application mode that determines how input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode
{
    /// Navigating panes - default state
    Browse,
    /// Keystrokes edit the search query
    Search,
    /// Help overlay is displayed
    Help,
}

/// Pane receiving keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus
{
    Sidebar,
    Articles,
}

/// Work the event loop has to carry out for the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action
{
    /// Show and fetch a new selection
    Navigate(Selection),
    /// Fetch the current selection again
    Reload,
    /// Open the article at this index in the browser
    OpenArticle(usize),
}

/// Clickable element under the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget
{
    Panel(PanelTarget),
    Card(usize),
}

/// Short-lived message in the status line.
#[derive(Debug, Clone)]
struct StatusMessage
{
    text: String,
    is_error: bool,
    expires_at: Instant,
}

/// Main application state for the news reader.
pub struct App
{
    /// Current application mode
    pub mode: AppMode,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Flag indicating if the application should exit
    pub should_quit: bool,
    /// Navigation panel on the left
    pub side_panel: SidePanel,
    /// Header and article grid on the right
    pub content: MainContent,
    /// What is shown, the source of the header
    selection: Selection,
    /// Id of the latest navigation
    generation: u64,
    /// Message shown instead of the key hints
    status: Option<StatusMessage>,
    /// Pointer shape last requested from the terminal
    pointer: PointerShape,
    /// Whether `pointer` still has to be written out
    pointer_changed: bool,
}

impl App
{
    /// Creates a new App showing Headlines in the loading state.
    ///
    /// No fetch is started; call [`App::select`] for that.
    #[must_use]
    pub fn new(side_panel: SidePanel) -> Self
    {
        Self {
            mode: AppMode::Browse,
            focus: Focus::Sidebar,
            should_quit: false,
            side_panel,
            content: MainContent::new(),
            selection: Selection::Headlines,
            generation: 0,
            status: None,
            pointer: PointerShape::Default,
            pointer_changed: false,
        }
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection
    {
        &self.selection
    }

    /// Title above the article grid.
    #[must_use]
    pub fn header(&self) -> String
    {
        self.selection.header()
    }

    /// Switches to `selection` and puts the content in the loading state.
    ///
    /// # Returns
    ///
    /// The fetch the event loop has to start.
    pub fn select(&mut self, selection: Selection) -> FetchRequest
    {
        self.generation = self.generation.wrapping_add(1);
        self.selection = selection;
        self.content.set_feed(FeedState::Loading);

        if self.mode == AppMode::Search
        {
            self.mode = AppMode::Browse;
        }

        info!("Selected {}", self.selection);

        FetchRequest {
            generation: self.generation,
            selection: self.selection.clone(),
        }
    }

    /// Fetches the current selection again.
    pub fn reload(&mut self) -> FetchRequest
    {
        self.select(self.selection.clone())
    }

    /// Applies a fetch result.
    ///
    /// # Returns
    ///
    /// Whether the result was applied. Results of superseded navigations
    /// are dropped.
    pub fn finish_fetch(&mut self, update: FeedUpdate) -> bool
    {
        if update.generation != self.generation
        {
            debug!(
                "Ignoring stale result for generation {} (current {})",
                update.generation, self.generation
            );
            return false;
        }

        match update.result
        {
            Ok(articles) =>
            {
                info!("Loaded {} articles for {}", articles.len(), self.selection);
                self.content.set_feed(FeedState::Loaded(articles));
            }
            Err(err) =>
            {
                error!("Failed to load {}: {err:#}", self.selection);
                self.content.set_feed(FeedState::Failed(format!("{err:#}")));
            }
        }

        true
    }

    /// Advances animations and expires the status message.
    pub fn on_tick(&mut self, now: Instant)
    {
        if self.content.view() == ContentView::Loading
        {
            self.content.advance_spinner();
        }

        if self
            .status
            .as_ref()
            .is_some_and(|status| now >= status.expires_at)
        {
            self.status = None;
        }
    }

    /// Shows a message in the status line for a few seconds.
    pub fn notify(&mut self, text: impl Into<String>, is_error: bool)
    {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            expires_at: Instant::now() + STATUS_DURATION,
        });
    }

    /// Current status message, if any.
    #[must_use]
    pub fn status_text(&self) -> Option<&str>
    {
        self.status
            .as_ref()
            .map(|status| status.text.as_str())
    }

    /// Opens the article at `index` with `opener`.
    ///
    /// Failures are reported in the status line, never propagated.
    pub fn open_article(&mut self, index: usize, opener: &dyn UrlOpener)
    {
        let Some(article) = self.content.articles().get(index)
        else
        {
            return;
        };

        let result = open_article(article, opener);
        let url = article.url.clone();

        match result
        {
            Ok(true) =>
            {
                info!("Opened {url}");
                self.notify(format!("Opened {url}"), false);
            }
            Ok(false) => debug!("Article {index} has no link"),
            Err(err) =>
            {
                warn!("Could not open {url}: {err:#}");
                self.notify(format!("Could not open link: {err:#}"), true);
            }
        }
    }

    /// Toggles the help overlay.
    pub fn toggle_help(&mut self)
    {
        self.mode = if self.mode == AppMode::Help
        {
            AppMode::Browse
        }
        else
        {
            AppMode::Help
        };
    }

    /// Moves keyboard focus to the search box.
    pub fn enter_search_mode(&mut self)
    {
        self.focus = Focus::Sidebar;
        self.mode = AppMode::Search;
    }

    /// Leaves the search box, keeping its text.
    pub fn exit_search_mode(&mut self)
    {
        self.mode = AppMode::Browse;
    }

    /// Switches keyboard focus between the panes.
    pub fn toggle_focus(&mut self)
    {
        self.focus = match self.focus
        {
            Focus::Sidebar => Focus::Articles,
            Focus::Articles => Focus::Sidebar,
        };
    }

    /// Adds a character to the search query.
    pub fn add_search_char(&mut self, ch: char)
    {
        self.side_panel.insert_char(ch);
    }

    /// Removes the last character of the search query.
    pub fn remove_search_char(&mut self)
    {
        self.side_panel.delete_char();
    }

    /// Submits the search query and leaves search mode.
    ///
    /// An empty query does nothing.
    pub fn submit_search(&mut self) -> Option<Action>
    {
        self.exit_search_mode();

        self.side_panel
            .submit_search()
            .map(Action::Navigate)
    }

    /// Moves the cursor or selection up in the focused pane.
    pub fn move_up(&mut self)
    {
        match self.focus
        {
            Focus::Sidebar => self.side_panel.previous(),
            Focus::Articles => self.content.select_up(),
        }
    }

    /// Moves the cursor or selection down in the focused pane.
    pub fn move_down(&mut self)
    {
        match self.focus
        {
            Focus::Sidebar => self.side_panel.next(),
            Focus::Articles => self.content.select_down(),
        }
    }

    /// Moves the article selection left.
    pub fn move_left(&mut self)
    {
        if self.focus == Focus::Articles
        {
            self.content.select_left();
        }
    }

    /// Moves the article selection right.
    pub fn move_right(&mut self)
    {
        if self.focus == Focus::Articles
        {
            self.content.select_right();
        }
    }

    /// Activates what is under the keyboard cursor in the focused pane.
    pub fn activate(&mut self) -> Option<Action>
    {
        match self.focus
        {
            Focus::Sidebar => self
                .side_panel
                .activate_cursor()
                .map(Action::Navigate),
            Focus::Articles if self.content.view() == ContentView::Grid =>
            {
                Some(Action::OpenArticle(self.content.selected()))
            }
            Focus::Articles => None,
        }
    }

    /// Handles mouse movement, clicks and the wheel.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action>
    {
        let target = self.target_at(mouse.column, mouse.row);

        match mouse.kind
        {
            MouseEventKind::Moved | MouseEventKind::Drag(_) =>
            {
                self.hover(target);
                None
            }
            MouseEventKind::Down(MouseButton::Left) =>
            {
                // Any click dismisses the help overlay
                if self.mode == AppMode::Help
                {
                    self.mode = AppMode::Browse;
                    return None;
                }

                self.hover(target);
                self.click(target?)
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp if self.mode != AppMode::Help =>
            {
                self.scroll(mouse);
                None
            }
            _ => None,
        }
    }

    /// Returns the pointer shape to write out, once per change.
    pub fn take_pointer_change(&mut self) -> Option<PointerShape>
    {
        if !self.pointer_changed
        {
            return None;
        }

        self.pointer_changed = false;
        Some(self.pointer)
    }

    /// Finds the clickable element at a screen position.
    fn target_at(&self, column: u16, row: u16) -> Option<HitTarget>
    {
        self.side_panel
            .target_at(column, row)
            .map(HitTarget::Panel)
            .or_else(|| {
                self.content
                    .card_at(column, row)
                    .map(HitTarget::Card)
            })
    }

    /// Shows the hand pointer over elements a click would act on.
    fn hover(&mut self, target: Option<HitTarget>)
    {
        let shape = match target
        {
            Some(HitTarget::Card(index)) if !self
                .content
                .articles()
                .get(index)
                .is_some_and(|article| article.has_url()) =>
            {
                PointerShape::Default
            }
            Some(_) => hand_cursor(),
            None => PointerShape::Default,
        };

        if shape != self.pointer
        {
            self.pointer = shape;
            self.pointer_changed = true;
        }
    }

    /// Scrolls the pane under the mouse.
    ///
    /// The wheel moves the panel cursor and scrolls the grid rows.
    fn scroll(&mut self, mouse: MouseEvent)
    {
        let down = mouse.kind == MouseEventKind::ScrollDown;

        if self.side_panel.contains(mouse.column, mouse.row)
        {
            if down
            {
                self.side_panel.next();
            }
            else
            {
                self.side_panel.previous();
            }
        }
        else if self.content.contains(mouse.column, mouse.row)
        {
            if down
            {
                self.content.scroll_down();
            }
            else
            {
                self.content.scroll_up();
            }
        }
    }

    /// Acts on a left click.
    fn click(&mut self, target: HitTarget) -> Option<Action>
    {
        match target
        {
            HitTarget::Panel(PanelTarget::SearchBox) =>
            {
                self.enter_search_mode();
                None
            }
            HitTarget::Panel(PanelTarget::SearchButton) => self.submit_search(),
            HitTarget::Panel(PanelTarget::Entry(index)) =>
            {
                self.focus = Focus::Sidebar;
                self.exit_search_mode();
                self.side_panel
                    .activate_index(index)
                    .map(Action::Navigate)
            }
            HitTarget::Card(index) =>
            {
                self.focus = Focus::Articles;
                self.exit_search_mode();
                self.content.select(index);
                Some(Action::OpenArticle(index))
            }
        }
    }

    /// Renders the application UI to the provided frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the UI to
    pub fn render(&mut self, frame: &mut Frame)
    {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(frame.area());

        self.side_panel.render(
            frame,
            chunks[0],
            self.focus == Focus::Sidebar,
            self.mode == AppMode::Search,
        );

        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
                .areas(chunks[1].inner(Margin::new(1, 0)));

        let header = self.header();
        self.content.render(
            frame,
            main_area,
            &header,
            self.focus == Focus::Articles && self.mode == AppMode::Browse,
        );

        self.render_status(frame, status_area);

        if self.mode == AppMode::Help
        {
            Self::render_help(frame);
        }
    }

    /// Renders the status message, or the key hints when there is none.
    fn render_status(&self, frame: &mut Frame, area: Rect)
    {
        let line = match &self.status
        {
            Some(status) if status.is_error => Line::styled(status.text.as_str(), STATUS_ERROR_STYLE),
            Some(status) => Line::styled(status.text.as_str(), STATUS_STYLE),
            None => Line::styled(KEY_HINTS, HINT_STYLE),
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Renders the help overlay with keyboard shortcuts.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the help overlay to
    fn render_help(frame: &mut Frame)
    {
        let area = centered_rect(60, 60, frame.area());

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let text = vec![
            Line::from("News Reader Help:"),
            Line::from(""),
            Line::from("Tab: Switch between panel and articles"),
            Line::from("j/k or ↓/↑: Move down/up"),
            Line::from("h/l or ←/→: Move between article columns"),
            Line::from("PgDn/PgUp: Page through articles"),
            Line::from("Enter: Select entry / open article in browser"),
            Line::from("/: Search, Enter to submit, Esc to cancel"),
            Line::from("r: Reload current view"),
            Line::from("Mouse: Click entries and cards, wheel scrolls"),
            Line::from("q: Quit"),
            Line::from("?: Toggle help"),
        ];

        let help_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help"),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(help_box, area);
    }
}

/// Creates a centered rectangle inside the given area.
///
/// # Arguments
///
/// * `percent_x` - Width of the rectangle as a percentage of the parent area
/// * `percent_y` - Height of the rectangle as a percentage of the parent area
/// * `area` - Parent rectangle
///
/// # Returns
///
/// A new rectangle positioned in the center of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect
{
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests
{
    use std::cell::RefCell;

    use anyhow::{Result, anyhow, bail};
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::article::Article;
    use crate::selection::Category;
    use crate::ui::side_panel::{Logo, PanelEntry, Section};

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
            bail!("no browser")
        }
    }

    fn app() -> App
    {
        App::new(SidePanel::new(Logo::bundled().expect("bundled logo")))
    }

    fn articles(urls: &[&str]) -> Vec<Article>
    {
        urls.iter()
            .enumerate()
            .map(|(index, url)| Article {
                title: format!("Story {index}"),
                url: (*url).to_owned(),
                ..Article::default()
            })
            .collect()
    }

    fn loaded_app(urls: &[&str]) -> App
    {
        let mut app = app();
        let request = app.select(Selection::Headlines);
        app.finish_fetch(FeedUpdate {
            generation: request.generation,
            result: Ok(articles(urls)),
        });
        app
    }

    fn draw(app: &mut App)
    {
        draw_sized(app, 160, 40);
    }

    fn draw_sized(app: &mut App, width: u16, height: u16)
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal
            .draw(|frame| app.render(frame))
            .expect("draw");
    }

    fn card_position(app: &App, index: usize) -> Option<(u16, u16)>
    {
        (0..160)
            .flat_map(|column| (0..40).map(move |row| (column, row)))
            .find(|(column, row)| app.content.card_at(*column, *row) == Some(index))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent
    {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn select_sets_header_and_loading()
    {
        let mut app = app();

        let request = app.select(Selection::Category(Category::Science));

        assert_eq!(request.selection, Selection::Category(Category::Science));
        assert_eq!(app.header(), "Category: Science");
        assert_eq!(app.content.view(), ContentView::Loading);
    }

    #[test]
    fn stale_results_are_dropped()
    {
        let mut app = app();
        let first = app.select(Selection::Headlines);
        let second = app.select(Selection::Search("mars".to_owned()));

        let applied = app.finish_fetch(FeedUpdate {
            generation: first.generation,
            result: Ok(articles(&["https://old.example"])),
        });
        assert!(!applied);
        assert_eq!(app.content.view(), ContentView::Loading);

        let applied = app.finish_fetch(FeedUpdate {
            generation: second.generation,
            result: Ok(articles(&["https://new.example"])),
        });
        assert!(applied);
        assert_eq!(app.content.articles()[0].url, "https://new.example");
    }

    #[test]
    fn failed_fetch_is_distinct_from_empty()
    {
        let mut app = app();
        let request = app.select(Selection::Headlines);

        app.finish_fetch(FeedUpdate {
            generation: request.generation,
            result: Err(anyhow!("rate limited")),
        });

        assert_eq!(app.content.view(), ContentView::Failed);
        assert_eq!(app.content.failure(), Some("rate limited"));

        let retry = app.reload();
        assert_eq!(retry.selection, Selection::Headlines);
        assert!(retry.generation > request.generation);
        assert_eq!(app.content.view(), ContentView::Loading);
    }

    #[test]
    fn search_flow_produces_one_navigation()
    {
        let mut app = app();
        app.enter_search_mode();
        for ch in "eclipse".chars()
        {
            app.add_search_char(ch);
        }

        let action = app.submit_search();

        assert_eq!(
            action,
            Some(Action::Navigate(Selection::Search("eclipse".to_owned())))
        );
        assert_eq!(app.mode, AppMode::Browse);
    }

    #[test]
    fn empty_search_produces_nothing()
    {
        let mut app = app();
        app.enter_search_mode();

        assert_eq!(app.submit_search(), None);
    }

    #[test]
    fn keyboard_activation_in_sidebar()
    {
        let mut app = app();
        app.side_panel.toggle_section(Section::Categories);
        app.move_down();

        assert_eq!(
            app.activate(),
            Some(Action::Navigate(Selection::Category(Category::Business)))
        );
    }

    #[test]
    fn keyboard_activation_in_articles_opens_selected()
    {
        let mut app = loaded_app(&["https://a.example", "https://b.example"]);
        app.toggle_focus();
        draw(&mut app);
        app.move_right();

        assert_eq!(app.activate(), Some(Action::OpenArticle(1)));
    }

    #[test]
    fn open_article_calls_opener_once_with_exact_url()
    {
        let mut app = loaded_app(&["https://a.example/x?y=1", ""]);
        let opener = RecordingOpener::default();

        app.open_article(0, &opener);
        app.open_article(1, &opener);
        app.open_article(7, &opener);

        assert_eq!(*opener.opened.borrow(), ["https://a.example/x?y=1"]);
    }

    #[test]
    fn open_failure_becomes_status_message()
    {
        let mut app = loaded_app(&["https://a.example"]);

        app.open_article(0, &FailingOpener);

        let status = app.status_text().expect("status shown");
        assert!(status.contains("no browser"));

        app.on_tick(Instant::now() + STATUS_DURATION + Duration::from_secs(1));
        assert_eq!(app.status_text(), None);
    }

    #[test]
    fn clicking_a_card_opens_it_and_sets_pointer()
    {
        let mut app = loaded_app(&["https://a.example", ""]);
        draw(&mut app);

        let (column, row) = (0..160)
            .flat_map(|column| (0..40).map(move |row| (column, row)))
            .find(|(column, row)| app.content.card_at(*column, *row) == Some(0))
            .expect("first card rendered");

        let action = app.handle_mouse(mouse(MouseEventKind::Moved, column, row));
        assert_eq!(action, None);
        assert_eq!(app.take_pointer_change(), Some(hand_cursor()));
        assert_eq!(app.take_pointer_change(), None);

        let action = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        assert_eq!(action, Some(Action::OpenArticle(0)));
        assert_eq!(app.focus, Focus::Articles);
    }

    #[test]
    fn inert_card_keeps_default_pointer()
    {
        let mut app = loaded_app(&["", "https://b.example"]);
        draw(&mut app);

        let (column, row) = (0..160)
            .flat_map(|column| (0..40).map(move |row| (column, row)))
            .find(|(column, row)| app.content.card_at(*column, *row) == Some(0))
            .expect("first card rendered");

        app.handle_mouse(mouse(MouseEventKind::Moved, column, row));

        assert_eq!(app.take_pointer_change(), None);
    }

    #[test]
    fn clicking_panel_entries_navigates()
    {
        let mut app = app();
        draw(&mut app);

        let (column, row) = (0..40)
            .flat_map(|column| (0..40).map(move |row| (column, row)))
            .find(|(column, row)| {
                app.side_panel.target_at(*column, *row) == Some(PanelTarget::Entry(0))
            })
            .expect("headlines rendered");

        let action = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));

        assert_eq!(action, Some(Action::Navigate(Selection::Headlines)));
    }

    #[test]
    fn click_closes_help_without_acting()
    {
        let mut app = app();
        draw(&mut app);
        app.toggle_help();

        let (column, row) = (0..40)
            .flat_map(|column| (0..40).map(move |row| (column, row)))
            .find(|(column, row)| {
                app.side_panel.target_at(*column, *row) == Some(PanelTarget::Entry(0))
            })
            .expect("headlines rendered");

        let action = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));

        assert_eq!(action, None);
        assert_eq!(app.mode, AppMode::Browse);
    }

    #[test]
    fn click_on_empty_space_closes_help()
    {
        let mut app = app();
        draw(&mut app);
        app.toggle_help();

        let action = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 100, 20));

        assert_eq!(action, None);
        assert_eq!(app.mode, AppMode::Browse);
    }

    #[test]
    fn wheel_scrolls_only_the_pane_under_it()
    {
        let urls = ["https://a.example"; 20];
        let mut app = loaded_app(&urls);
        draw(&mut app);
        let first = card_position(&app, 0).expect("first card rendered");

        // Over the side panel the grid stays put
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 30));
        draw(&mut app);
        assert_eq!(card_position(&app, 0), Some(first));

        // Help covers the grid
        app.toggle_help();
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, first.0, first.1));
        app.toggle_help();
        draw(&mut app);
        assert_eq!(card_position(&app, 0), Some(first));

        app.handle_mouse(mouse(MouseEventKind::ScrollDown, first.0, first.1));
        draw(&mut app);
        assert_eq!(card_position(&app, 0), None);
    }

    #[test]
    fn wheel_reaches_hidden_panel_rows_on_short_terminal()
    {
        let mut app = app();
        app.side_panel.toggle_section(Section::Categories);
        let sources = app
            .side_panel
            .entries()
            .iter()
            .position(|entry| *entry == PanelEntry::Section(Section::Sources))
            .expect("sources header listed");

        let sources_position = |app: &App| {
            (0..40)
                .flat_map(|column| (0..20).map(move |row| (column, row)))
                .find(|(column, row)| {
                    app.side_panel.target_at(*column, *row) == Some(PanelTarget::Entry(sources))
                })
        };

        draw_sized(&mut app, 160, 20);
        assert_eq!(sources_position(&app), None);

        for _ in 0..sources
        {
            app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 15));
        }
        draw_sized(&mut app, 160, 20);

        let (column, row) = sources_position(&app).expect("sources header scrolled into view");

        let action = app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));

        assert_eq!(action, None);
        assert_eq!(app.side_panel.expanded(), Some(Section::Sources));
    }
}
