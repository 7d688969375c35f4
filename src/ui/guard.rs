//! Provides a RAII guard for safe terminal lifecycle management.
//!
//! This module uses the RAII (Resource Acquisition Is Initialization) pattern
//! to manage the terminal state.
//!
//! A guard object is created to initialize the TUI,
//! and its `Drop` implementation automatically restores the terminal when it
//! goes out of scope, either on normal exit or during a panic unwind.
use std::io::{Result as IoResult, stdout};
use std::panic::{set_hook, take_hook};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use log::error;
use ratatui::Terminal;
use ratatui::backend::{Backend as RatatuiBackend, CrosstermBackend};

use crate::platform::PointerShape;

/// RAII wrapper for terminal state.
///
/// Manages the terminal's configuration, ensuring it is always returned
/// to its original state when this struct is dropped.
pub struct TerminalGuard;

impl TerminalGuard
{
    /// Creates a `TerminalGuard` for TUI setup.
    ///
    /// Enters raw mode, switches to the alternate screen buffer, enables
    /// mouse capture and sets the window title.
    ///
    /// # Arguments
    ///
    /// * `title` - Title for the terminal window
    ///
    /// # Errors
    ///
    /// On failure to enter raw mode or switch screens.
    pub fn new(title: &str) -> IoResult<Self>
    {
        enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle(title)
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard
{
    /// Restores the terminal state.
    ///
    /// Automatically called on `TerminalGuard` drop.
    fn drop(&mut self)
    {
        // Terminal will be borked when failure, at least inform the user
        if let Err(err) = restore_terminal()
        {
            error!("Failed to restore terminal: {err}");
        }
    }
}

/// Undoes everything [`TerminalGuard::new`] and the app changed.
fn restore_terminal() -> IoResult<()>
{
    let mut out = stdout();
    out.execute(PointerShape::Default)?;
    out.execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    out.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Initialize the terminal
///
/// # Errors
///
/// Returns an error if the backend can't query the terminal.
pub fn init_tui() -> IoResult<Terminal<impl RatatuiBackend>>
{
    // Terminal setup is handled by TerminalGuard
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Initialize the panic hook to restore the terminal before reporting.
pub fn init_panic_hook()
{
    let original_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        // Restore terminal to normal state without panicking
        let _ = restore_terminal();

        error!("Application panicked: {panic_info}");

        original_hook(panic_info);
    }));
}
