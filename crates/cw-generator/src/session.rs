//! Event-driven session driver.
//!
//! Owns the [`Controller`] and one event queue. User input and request
//! completions both arrive on that queue, so the controller only ever has one
//! writer. The generation call is the only suspension point; it runs on a
//! spawned task that reports back with [`Event::Resolved`].

use std::sync::Arc;
use std::time::Duration;

use cw_core::{Clock, Controller, Effect, Event, GenerationError, SystemClock};
use log::warn;
use tokio::sync::mpsc;

use crate::clipboard::Clipboard;
use crate::generator::ClueGenerator;

/// A running UI session.
pub struct Session<C: Clock = SystemClock> {
    controller: Controller<C>,
    generator: ClueGenerator,
    clipboard: Arc<dyn Clipboard>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl<C: Clock> Session<C> {
    pub fn new(controller: Controller<C>, generator: ClueGenerator, clipboard: Arc<dyn Clipboard>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            generator,
            clipboard,
            events_tx,
            events_rx,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller<C> {
        &self.controller
    }

    /// Apply an event and carry out the effect it produces.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: Event) {
        if let Some(effect) = self.controller.handle(event) {
            self.run_effect(effect);
        }
    }

    /// Wait for the next queued event (completion or timer).
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Dispatch queued events until no request is loading.
    pub async fn settle(&mut self) {
        while self.controller.state().is_loading() {
            match self.next_event().await {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::StartRequest { request, query } => {
                let generator = self.generator.clone();
                let call = tokio::spawn(async move { generator.generate(&query).await });

                // Every started request must resolve, even if the call task dies.
                let events_tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = match call.await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!("request {} task failed: {}", request, e);
                            Err(GenerationError::Generic(e.to_string()))
                        }
                    };
                    // A closed queue means the session is gone.
                    let _ = events_tx.send(Event::Resolved { request, outcome });
                });
            }
            Effect::CopyToClipboard { text, expires_in_ms } => {
                let clipboard = Arc::clone(&self.clipboard);
                tokio::spawn(async move {
                    if let Err(e) = clipboard.write_text(&text).await {
                        warn!("copy to clipboard failed: {}", e);
                    }
                });

                let events_tx = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(expires_in_ms)).await;
                    let _ = events_tx.send(Event::Tick);
                });
            }
        }
    }
}
