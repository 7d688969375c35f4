//! Background fetching.
//!
//! Provider calls block, so each one runs on its own worker thread and
//! reports back through the UI event channel.
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{debug, info};

use crate::client::NewsProvider;
use crate::selection::Selection;
use crate::ui::{Event, FeedUpdate};

/// A navigation waiting for its articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest
{
    /// Generation assigned by the app when the navigation happened
    pub generation: u64,
    /// What to fetch
    pub selection: Selection,
}

/// Runs provider calls off the UI thread.
pub struct Fetcher
{
    provider: Arc<dyn NewsProvider>,
    sender: Sender<Event>,
}

impl Fetcher
{
    /// Creates a fetcher posting results to `sender`.
    #[must_use]
    pub fn new(provider: Arc<dyn NewsProvider>, sender: Sender<Event>) -> Self
    {
        Self { provider, sender }
    }

    /// Starts fetching `request` on a worker thread.
    ///
    /// The result arrives later as [`Event::Feed`]. The handle is only
    /// needed by callers that want to wait for the worker.
    pub fn request(&self, request: FetchRequest) -> JoinHandle<()>
    {
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();

        info!(
            "Fetching {} (generation {})",
            request.selection, request.generation
        );

        thread::spawn(move || {
            let result = provider.fetch(&request.selection);
            let update = FeedUpdate {
                generation: request.generation,
                result,
            };

            if sender.send(Event::Feed(update)).is_err()
            {
                debug!(
                    "Dropping result for generation {}, event loop is gone",
                    request.generation
                );
            }
        })
    }
}
