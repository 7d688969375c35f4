//! Event handling module for the application
//!
//! This module provides a mechanism to handle events
//! from the main application thread. It uses a channel to send and receive
//! events between the main application, a terminal polling thread and the
//! fetch workers.
//!
//! The `EventHandler` struct manages the polling thread and provides
//! a way to receive events through a channel.
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use log::error;

use crate::article::Article;

/// Result of a fetch, tagged with the navigation it answers.
#[derive(Debug)]
pub struct FeedUpdate
{
    /// Generation of the request this result belongs to
    pub generation: u64,
    /// Fetched articles or the failure
    pub result: Result<Vec<Article>>,
}

/// Events that can be processed by the application
#[derive(Debug)]
pub enum Event
{
    /// Regular time tick for updating UI elements
    Tick,
    /// Keyboard input event
    Key(KeyEvent),
    /// Mouse movement, clicks and wheel
    Mouse(MouseEvent),
    /// Terminal resize event with new dimensions
    Resize(u16, u16),
    /// A fetch finished
    Feed(FeedUpdate),
}

/// Handles terminal events
///
/// Manages event polling in a separate thread and provides
/// a way to receive events through a channel.
pub struct EventHandler
{
    /// Sender handed out to fetch workers
    event_sender: mpsc::Sender<Event>,
    /// Receiver side of the event channel
    event_receiver: mpsc::Receiver<Event>,
    /// Sender for shutdown the thread for graceful shutdown
    // The receiver is moved to the thread
    shutdown_sender: mpsc::Sender<()>,
    /// Handle to keep the thread alive
    // Option is used to move the handle in `drop`
    // since we can't move the handle out of the `&mut self`
    // for calling `join` in `drop`
    thread_handle: Option<JoinHandle<()>>,
}

impl EventHandler
{
    /// Creates a new event handler with the specified tick rate
    ///
    /// # Arguments
    ///
    /// * `tick_rate` - The duration between tick events
    ///
    /// # Returns
    ///
    /// A new `EventHandler` instance with a running background thread
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self
    {
        let (event_sender, event_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();
        let poll_sender = event_sender.clone();

        // Spawn a thread that continuously polls for terminal events
        let handle = thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop
            {
                if shutdown_receiver.try_recv().is_ok()
                {
                    break;
                }

                // If more time than tick_rate has passed, don't wait at all
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());

                let polled = match event::poll(timeout)
                {
                    Ok(ready) => ready,
                    Err(err) =>
                    {
                        error!("Error polling events: {err}");
                        break;
                    }
                };

                if polled
                {
                    let forwarded = match event::read()
                    {
                        Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(width, height)) =>
                        {
                            Some(Event::Resize(width, height))
                        }
                        // Ignore other event types
                        Ok(_) => None,
                        Err(err) =>
                        {
                            error!("Error reading event: {err}");
                            break;
                        }
                    };

                    // Break the loop if sending fails (receiver dropped)
                    if forwarded.is_some_and(|forwarded| poll_sender.send(forwarded).is_err())
                    {
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate
                {
                    if poll_sender.send(Event::Tick).is_err()
                    {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            event_sender,
            event_receiver,
            shutdown_sender,
            thread_handle: Some(handle),
        }
    }

    /// Returns a sender that posts into this handler's channel.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<Event>
    {
        self.event_sender.clone()
    }

    /// Gets the next event from the event channel
    ///
    /// This method blocks until an event is available
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is disconnected.
    pub fn next(&self) -> Result<Event>
    {
        self.event_receiver
            .recv()
            .context("Event channel disconnected")
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // Signal shutdown (ignore if already closed)
        let _ = self.shutdown_sender.send(());

        if let Some(handle) = self.thread_handle.take()
        {
            let _ = handle.join();
        }
    }
}
