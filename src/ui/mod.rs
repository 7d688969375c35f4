//! User Interface module for the news reader application.
//!
//! Contains components for rendering and managing the terminal UI,
//! including event handling, application state, and UI components.
mod app;
mod event;
mod guard;
pub mod logging;
pub mod main_content;
pub mod news_card;
pub mod side_panel;

pub use app::{Action, App, AppMode, Focus};
pub use event::{Event, EventHandler, FeedUpdate};
pub use guard::{TerminalGuard, init_panic_hook, init_tui};
