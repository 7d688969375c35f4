use std::io::stdout;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use crossterm::ExecutableCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use news_reader::logging::{clear_log_file, default_log_path, init_logging};
use news_reader::ui::side_panel::{Logo, SidePanel};
use news_reader::{Action, App, AppMode, Config, Event, EventHandler, Fetcher, NewsClient};
use news_reader::{Selection, SystemBrowser, UrlOpener, config};
use news_reader::{TerminalGuard, init_panic_hook, init_tui};
use ratatui::Terminal;
use ratatui::backend::Backend as RatatuiBackend;

fn main() -> Result<()>
{
    init_panic_hook();

    let matches = config::command().get_matches();
    let log_path = default_log_path()?;

    // Clear the log if requested
    if matches.get_flag("clear-log")
    {
        clear_log_file(&log_path)?;
        println!("Removed {}", log_path.display());
        return Ok(());
    }

    init_logging(&log_path)?;

    let config = Config::from_matches(&matches)?;
    let logo = Logo::bundled().context("Failed to load the bundled logo")?;

    info!(
        "Starting with country {} and page size {}",
        config.country, config.page_size
    );

    // Use RAII to ensure terminal cleanup happens
    let _terminal_guard = TerminalGuard::new(config::WINDOW_TITLE)?;
    let mut terminal = init_tui()?;

    let event_handler = EventHandler::new(config.tick_rate);
    let fetcher = Fetcher::new(Arc::new(NewsClient::new(&config)), event_handler.sender());
    let opener = SystemBrowser;

    let mut app = App::new(SidePanel::new(logo));
    dispatch(&mut app, Action::Navigate(Selection::Headlines), &fetcher, &opener);

    // Terminal will be cleaned up automatically when _terminal_guard is dropped
    run_app(&mut terminal, app, &event_handler, &fetcher, &opener)
}

/// Run the main loop
///
/// # Arguments
///
/// * `terminal` - The terminal to draw to
/// * `app` - The app to run
/// * `event_handler` - Source of input and fetch events
/// * `fetcher` - Starts fetches for navigations
/// * `opener` - Opens article links
///
/// # Errors
///
/// Returns an error if drawing fails or the event channel closes.
fn run_app<T: RatatuiBackend>(
    terminal: &mut Terminal<T>,
    mut app: App,
    event_handler: &EventHandler,
    fetcher: &Fetcher,
    opener: &dyn UrlOpener,
) -> Result<()>
{
    loop
    {
        terminal
            .draw(|frame| app.render(frame))
            .map_err(|err| anyhow!("Failed to draw: {err}"))?;

        let action = match event_handler.next()?
        {
            Event::Tick =>
            {
                app.on_tick(Instant::now());
                None
            }
            Event::Key(key) => handle_key(&mut app, key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            // The next draw picks up the new size
            Event::Resize(..) => None,
            Event::Feed(update) =>
            {
                app.finish_fetch(update);
                None
            }
        };

        if let Some(shape) = app.take_pointer_change()
        {
            stdout().execute(shape)?;
        }

        if let Some(action) = action
        {
            dispatch(&mut app, action, fetcher, opener);
        }

        if app.should_quit
        {
            break;
        }
    }

    Ok(())
}

/// Carries out an action the app asked for.
fn dispatch(app: &mut App, action: Action, fetcher: &Fetcher, opener: &dyn UrlOpener)
{
    match action
    {
        Action::Navigate(selection) =>
        {
            fetcher.request(app.select(selection));
        }
        Action::Reload =>
        {
            fetcher.request(app.reload());
        }
        Action::OpenArticle(index) => app.open_article(index, opener),
    }
}

/// Maps a key press to app state changes.
///
/// # Returns
///
/// The action the key triggered, if any.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action>
{
    // Windows reports releases too
    if key.kind != KeyEventKind::Press
    {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return None;
    }

    match (app.mode, key.code)
    {
        // Quit with 'q' while browsing
        (AppMode::Browse, KeyCode::Char('q')) =>
        {
            app.should_quit = true;
        }

        // Help toggle with '?'
        (AppMode::Browse | AppMode::Help, KeyCode::Char('?')) |
        (AppMode::Help, KeyCode::Esc) =>
        {
            app.toggle_help();
        }

        (AppMode::Browse, KeyCode::Tab | KeyCode::BackTab) =>
        {
            app.toggle_focus();
        }

        // Navigation in the focused pane
        (AppMode::Browse, KeyCode::Char('j') | KeyCode::Down) =>
        {
            app.move_down();
        }
        (AppMode::Browse, KeyCode::Char('k') | KeyCode::Up) =>
        {
            app.move_up();
        }
        (AppMode::Browse, KeyCode::Char('h') | KeyCode::Left) =>
        {
            app.move_left();
        }
        (AppMode::Browse, KeyCode::Char('l') | KeyCode::Right) =>
        {
            app.move_right();
        }
        (AppMode::Browse, KeyCode::Char('f') | KeyCode::PageDown) =>
        {
            app.content.page_down();
        }
        (AppMode::Browse, KeyCode::Char('b') | KeyCode::PageUp) =>
        {
            app.content.page_up();
        }
        (AppMode::Browse, KeyCode::Enter) => return app.activate(),
        (AppMode::Browse, KeyCode::Char('r')) => return Some(Action::Reload),

        // Search handling
        (AppMode::Browse, KeyCode::Char('/')) =>
        {
            app.enter_search_mode();
        }
        (AppMode::Search, KeyCode::Enter) => return app.submit_search(),
        (AppMode::Search, KeyCode::Esc) =>
        {
            app.exit_search_mode();
        }
        (AppMode::Search, KeyCode::Backspace) =>
        {
            app.remove_search_char();
        }
        (AppMode::Search, KeyCode::Char(ch)) =>
        {
            app.add_search_char(ch);
        }

        _ =>
        {} // Ignore other key combinations
    }

    None
}
