//! Debounced autocomplete with single-flight cancellation.
//!
//! Text-changed events go into an mpsc channel consumed by one debouncer
//! task. Every event restarts the debounce timer; once the timer expires the
//! latest text is looked up through a [`RequestSlot`], which aborts the
//! previous lookup. Text too short to look up skips the timer: the pending
//! lookup and any in-flight one are dropped and the list clears at once.
//! Results come back on an update channel.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use melo_core::Suggestions;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cancel::{Channel, RequestSlot};
use crate::error::ClientError;

/// Queries shorter than this (in characters, after trimming) clear the list
/// instead of hitting the backend.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default quiet period before a lookup is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Anything that can answer an autocomplete query.
pub trait SuggestionSource: Send + Sync + 'static {
    fn suggest(&self, query: &str)
        -> impl Future<Output = Result<Suggestions, ClientError>> + Send;
}

/// What the dropdown should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionUpdate {
    /// Hide and empty the dropdown.
    Cleared,
    Ready(Suggestions),
    /// The lookup failed; the dropdown stays hidden.
    Failed(String),
}

/// Handle to a running debouncer task.
pub struct Autocomplete {
    events: mpsc::UnboundedSender<String>,
    slot: Arc<RequestSlot>,
    task: JoinHandle<()>,
}

impl Autocomplete {
    /// Spawns the debouncer on the current tokio runtime.
    #[must_use]
    pub fn spawn<S: SuggestionSource>(
        source: Arc<S>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SuggestionUpdate>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let slot = Arc::new(RequestSlot::new(Channel::Autocomplete));
        let task = tokio::spawn(run_debouncer(
            source,
            debounce,
            Arc::clone(&slot),
            events_rx,
            updates_tx,
        ));
        (
            Self {
                events: events_tx,
                slot,
                task,
            },
            updates_rx,
        )
    }

    /// Reports the current contents of the search box.
    pub fn text_changed(&self, text: impl Into<String>) {
        if self.events.send(text.into()).is_err() {
            tracing::debug!("autocomplete debouncer already stopped");
        }
    }

    /// Stops the debouncer and aborts any in-flight lookup.
    pub async fn shutdown(self) {
        drop(self.events);
        self.slot.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "autocomplete debouncer task failed");
        }
    }
}

async fn run_debouncer<S: SuggestionSource>(
    source: Arc<S>,
    debounce: Duration,
    slot: Arc<RequestSlot>,
    mut events: mpsc::UnboundedReceiver<String>,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
) {
    let mut pending: Option<String> = None;
    loop {
        let event = if pending.is_some() {
            tokio::select! {
                event = events.recv() => event,
                () = tokio::time::sleep(debounce) => {
                    if let Some(text) = pending.take() {
                        fire(&source, &slot, &updates, &text);
                    }
                    continue;
                }
            }
        } else {
            events.recv().await
        };

        match event {
            Some(text) if is_too_short(&text) => {
                pending = None;
                slot.cancel();
                let _ = updates.send(SuggestionUpdate::Cleared);
            }
            Some(text) => pending = Some(text),
            None => break,
        }
    }
}

fn is_too_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_QUERY_CHARS
}

fn fire<S: SuggestionSource>(
    source: &Arc<S>,
    slot: &Arc<RequestSlot>,
    updates: &mpsc::UnboundedSender<SuggestionUpdate>,
    text: &str,
) {
    let query = text.trim().to_owned();
    tracing::debug!(query = %query, "issuing autocomplete request");
    let source = Arc::clone(source);
    let request = Arc::clone(slot).issue_owned(async move { source.suggest(&query).await });
    let updates = updates.clone();
    tokio::spawn(async move {
        let update = match request.await {
            Ok(suggestions) => SuggestionUpdate::Ready(suggestions),
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                tracing::warn!(error = %e, "autocomplete request failed");
                SuggestionUpdate::Failed(e.to_string())
            }
        };
        let _ = updates.send(update);
    });
}
