//! News Reader Library
//!
//! A library for fetching and browsing news articles in a terminal
//! interface.
//!
//! # Features
//!
//! - Top headlines, fixed categories and sources, and free text search
//! - Articles fetched from `NewsAPI` on background threads
//! - Responsive card grid with keyboard and mouse navigation
//! - Articles open in the default browser
//!
//! # Modules
//!
//! - `article`: Article data model
//! - `selection`: Typed navigation and the fixed category and source lists
//! - `client`: HTTP client for the news provider
//! - `fetch`: Runs provider calls off the UI thread
//! - `config`: Command line configuration
//! - `platform`: Pointer shape and browser launching
//! - `ui`: Terminal user interface components and event handling
pub mod article;
pub mod client;
pub mod config;
pub mod fetch;
pub mod platform;
pub mod selection;
pub mod ui;

pub use article::Article;
pub use client::{NewsClient, NewsProvider};
pub use config::Config;
pub use fetch::{FetchRequest, Fetcher};
pub use platform::{SystemBrowser, UrlOpener};
pub use selection::Selection;
pub use ui::logging;
pub use ui::{Action, App, AppMode, Event, EventHandler, Focus};
pub use ui::{TerminalGuard, init_panic_hook, init_tui};
