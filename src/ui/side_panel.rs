//! Side Panel
//!
//! Navigation rail with the logo, the search box, the Headlines shortcut and
//! the collapsible Categories and Sources sections.
//!
//! Every user action yields at most one [`Selection`].
use anyhow::{Result, bail};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph};

use crate::selection::{Category, NewsSource, Selection};

const LOGO_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

const PANEL_BORDER_STYLE: Style = Style::new().fg(Color::Gray);

const CURSOR_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const SEARCH_ACTIVE_STYLE: Style = Style::new().fg(Color::LightYellow);

const PLACEHOLDER_STYLE: Style = Style::new().fg(Color::DarkGray);

const DIVIDER_STYLE: Style = Style::new().fg(Color::DarkGray);

const SUB_ITEM_STYLE: Style = Style::new().fg(Color::Gray);

const CURSOR_SYMBOL: &str = "> ";

const SEARCH_BUTTON: &str = "[Go]";

const SEARCH_BOX_HEIGHT: u16 = 3;

/// Bundled logo shown at the top of the panel.
const BUNDLED_LOGO: &str = include_str!("../../assets/logo.txt");

/// ASCII logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo
{
    lines: Vec<String>,
}

impl Logo
{
    /// Parses logo text, dropping trailing blank lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the text has no visible characters.
    pub fn parse(text: &str) -> Result<Self>
    {
        if text.trim().is_empty()
        {
            bail!("Logo asset is empty");
        }

        let mut lines: Vec<String> = text
            .lines()
            .map(|line| line.trim_end().to_owned())
            .collect();

        while lines
            .last()
            .is_some_and(String::is_empty)
        {
            lines.pop();
        }

        Ok(Self { lines })
    }

    /// Loads the logo bundled with the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset is blank.
    pub fn bundled() -> Result<Self>
    {
        Self::parse(BUNDLED_LOGO)
    }

    /// Lines of the logo.
    #[must_use]
    pub fn lines(&self) -> &[String]
    {
        &self.lines
    }

    /// Rows needed to draw the logo.
    #[must_use]
    pub fn height(&self) -> u16
    {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

/// A collapsible section of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section
{
    Categories,
    Sources,
}

impl Section
{
    const fn title(self) -> &'static str
    {
        match self
        {
            Self::Categories => "Categories",
            Self::Sources => "Sources",
        }
    }
}

/// A selectable row in the panel's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEntry
{
    Headlines,
    Section(Section),
    Category(Category),
    Source(NewsSource),
}

/// Clickable part of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTarget
{
    /// The query input
    SearchBox,
    /// The button submitting the query
    SearchButton,
    /// Row of the list, by index into [`SidePanel::entries`]
    Entry(usize),
}

/// Navigation panel state.
pub struct SidePanel
{
    /// Logo drawn above the search box
    logo: Logo,
    /// Text typed into the search box
    query: String,
    /// Section currently open, at most one
    expanded: Option<Section>,
    /// Index of the highlighted entry
    cursor: usize,
    /// Scroll position of the entry list
    list_state: ListState,
    /// Screen area of the last render
    area: Rect,
    /// Screen areas of clickable parts from the last render
    regions: Vec<(Rect, PanelTarget)>,
}

impl SidePanel
{
    /// Creates a panel with both sections collapsed and an empty query.
    #[must_use]
    pub fn new(logo: Logo) -> Self
    {
        Self {
            logo,
            query: String::new(),
            expanded: None,
            cursor: 0,
            list_state: ListState::default(),
            area: Rect::default(),
            regions: Vec::new(),
        }
    }

    /// Current search text.
    #[must_use]
    pub fn query(&self) -> &str
    {
        &self.query
    }

    /// The open section, if any.
    #[must_use]
    pub const fn expanded(&self) -> Option<Section>
    {
        self.expanded
    }

    /// Index of the highlighted entry.
    #[must_use]
    pub const fn cursor(&self) -> usize
    {
        self.cursor
    }

    /// Rows currently visible in the list, top to bottom.
    #[must_use]
    pub fn entries(&self) -> Vec<PanelEntry>
    {
        let mut entries = vec![
            PanelEntry::Headlines,
            PanelEntry::Section(Section::Categories),
        ];

        if self.expanded == Some(Section::Categories)
        {
            entries.extend(Category::ALL.map(PanelEntry::Category));
        }

        entries.push(PanelEntry::Section(Section::Sources));

        if self.expanded == Some(Section::Sources)
        {
            entries.extend(NewsSource::ALL.map(PanelEntry::Source));
        }

        entries
    }

    /// Appends a character to the query.
    pub fn insert_char(&mut self, ch: char)
    {
        self.query.push(ch);
    }

    /// Removes the last character of the query.
    pub fn delete_char(&mut self)
    {
        self.query.pop();
    }

    /// Submits the query.
    ///
    /// # Returns
    ///
    /// A search selection, or `None` when the query is empty.
    pub fn submit_search(&mut self) -> Option<Selection>
    {
        if self.query.is_empty()
        {
            return None;
        }

        Some(Selection::Search(self.query.clone()))
    }

    /// Opens `section`, closing the other one, or closes it if it is open.
    pub fn toggle_section(&mut self, section: Section)
    {
        self.expanded = if self.expanded == Some(section)
        {
            None
        }
        else
        {
            Some(section)
        };

        // Keep the cursor on the header that was toggled
        if let Some(index) = self
            .entries()
            .iter()
            .position(|entry| *entry == PanelEntry::Section(section))
        {
            self.cursor = index;
        }
    }

    /// Activates an entry.
    ///
    /// Headlines, categories and sources clear the query and yield a
    /// selection. Section headers only toggle.
    pub fn activate(&mut self, entry: PanelEntry) -> Option<Selection>
    {
        let selection = match entry
        {
            PanelEntry::Section(section) =>
            {
                self.toggle_section(section);
                return None;
            }
            PanelEntry::Headlines => Selection::Headlines,
            PanelEntry::Category(category) => Selection::Category(category),
            PanelEntry::Source(source) => Selection::Source(source),
        };

        self.query.clear();
        Some(selection)
    }

    /// Activates the entry under the cursor.
    pub fn activate_cursor(&mut self) -> Option<Selection>
    {
        let entry = self
            .entries()
            .get(self.cursor)
            .copied()?;

        self.activate(entry)
    }

    /// Activates the entry at `index`, moving the cursor there.
    pub fn activate_index(&mut self, index: usize) -> Option<Selection>
    {
        let entry = self.entries().get(index).copied()?;
        self.cursor = index;

        self.activate(entry)
    }

    /// Moves the cursor to the next entry.
    pub fn next(&mut self)
    {
        let last = self.entries().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add(1).min(last);
    }

    /// Moves the cursor to the previous entry.
    pub fn previous(&mut self)
    {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Finds the clickable part under a screen position.
    #[must_use]
    pub fn target_at(&self, column: u16, row: u16) -> Option<PanelTarget>
    {
        let position = Position::new(column, row);

        // The button sits inside the search box, so it is checked first
        self.regions
            .iter()
            .find(|(area, target)| {
                *target == PanelTarget::SearchButton && area.contains(position)
            })
            .or_else(|| {
                self.regions
                    .iter()
                    .find(|(area, _)| area.contains(position))
            })
            .map(|(_, target)| *target)
    }

    /// Renders the panel to the specified area.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render to
    /// * `area` - The area within the frame to render the panel
    /// * `focused` - Whether keyboard navigation targets the panel
    /// * `searching` - Whether keystrokes go to the search box
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool, searching: bool)
    {
        self.regions.clear();
        self.area = area;

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(PANEL_BORDER_STYLE);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, logo_area, _, search_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.logo.height()),
            Constraint::Length(1),
            Constraint::Length(SEARCH_BOX_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let logo_lines: Vec<Line> = self
            .logo
            .lines()
            .iter()
            .map(|line| Line::styled(line.as_str(), LOGO_STYLE))
            .collect();
        frame.render_widget(
            Paragraph::new(logo_lines).alignment(Alignment::Center),
            logo_area,
        );

        self.render_search(frame, search_area, searching);
        self.render_entries(frame, list_area, focused && !searching);
    }

    /// Renders the search box and its button.
    fn render_search(&mut self, frame: &mut Frame, area: Rect, searching: bool)
    {
        let border_style = if searching
        {
            SEARCH_ACTIVE_STYLE
        }
        else
        {
            PANEL_BORDER_STYLE
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let button_width = u16::try_from(SEARCH_BUTTON.len()).unwrap_or(u16::MAX);
        let [text_area, button_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(button_width),
        ])
        .areas(inner);

        // Show the tail of long queries so the caret stays visible
        let visible_chars = usize::from(text_area.width.saturating_sub(1));
        let skip = self
            .query
            .chars()
            .count()
            .saturating_sub(visible_chars);
        let visible: String = self.query.chars().skip(skip).collect();

        let text = if self.query.is_empty() && !searching
        {
            Line::styled("Search", PLACEHOLDER_STYLE)
        }
        else
        {
            Line::raw(visible.clone())
        };
        frame.render_widget(Paragraph::new(text), text_area);
        frame.render_widget(
            Paragraph::new(Line::styled(SEARCH_BUTTON, CURSOR_STYLE)),
            button_area,
        );

        if searching
        {
            let offset = u16::try_from(visible.chars().count()).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                text_area.x.saturating_add(offset),
                text_area.y,
            ));
        }

        self.regions.push((area, PanelTarget::SearchBox));
        self.regions.push((button_area, PanelTarget::SearchButton));
    }

    /// Renders the Headlines, section and sub-item rows.
    ///
    /// The list scrolls to keep the cursor row on screen.
    fn render_entries(&mut self, frame: &mut Frame, area: Rect, show_cursor: bool)
    {
        let width = usize::from(area.width).saturating_sub(CURSOR_SYMBOL.len());
        let mut items = Vec::new();
        // Entry index of every list row, `None` for dividers
        let mut row_entries = Vec::new();
        let mut cursor_row = 0;

        for (index, entry) in self.entries().into_iter().enumerate()
        {
            if matches!(entry, PanelEntry::Section(_))
            {
                items.push(ListItem::new(Line::styled("─".repeat(width), DIVIDER_STYLE)));
                row_entries.push(None);
            }

            if index == self.cursor
            {
                cursor_row = items.len();
            }

            let (label, style) = match entry
            {
                PanelEntry::Headlines =>
                {
                    ("Headlines".to_owned(), Style::new().add_modifier(Modifier::BOLD))
                }
                PanelEntry::Section(section) =>
                {
                    let arrow = if self.expanded == Some(section) { "▼" } else { "▶" };
                    let title_width = width.saturating_sub(1);
                    (
                        format!("{:<title_width$}{arrow}", section.title()),
                        Style::new().add_modifier(Modifier::BOLD),
                    )
                }
                PanelEntry::Category(category) =>
                {
                    (format!("  {}", category.label()), SUB_ITEM_STYLE)
                }
                PanelEntry::Source(source) => (format!("  {}", source.name()), SUB_ITEM_STYLE),
            };

            items.push(ListItem::new(Line::styled(label, style)));
            row_entries.push(Some(index));
        }

        let (symbol, highlight_style) = if show_cursor
        {
            (CURSOR_SYMBOL, CURSOR_STYLE)
        }
        else
        {
            ("  ", Style::new())
        };

        let list = List::new(items)
            .highlight_symbol(symbol)
            .highlight_style(highlight_style)
            .highlight_spacing(HighlightSpacing::Always);

        self.list_state.select(Some(cursor_row));
        frame.render_stateful_widget(list, area, &mut self.list_state);

        // Rows above the scroll offset are off screen
        let visible_rows = row_entries
            .iter()
            .skip(self.list_state.offset())
            .zip(area.top()..area.bottom());

        for (entry, row) in visible_rows
        {
            if let Some(index) = entry
            {
                self.regions.push((
                    Rect::new(area.x, row, area.width, 1),
                    PanelTarget::Entry(*index),
                ));
            }
        }
    }

    /// Whether a screen position lies inside the panel.
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool
    {
        self.area.contains(Position::new(column, row))
    }
}
