//! Single-slot request cancellation per logical channel.
//!
//! Each channel (product listing, autocomplete) owns one [`RequestSlot`].
//! Issuing a request through the slot aborts whatever request was in flight
//! and bumps the slot generation. A request resolves to its own result only
//! if it is still the newest one when it completes; otherwise it resolves to
//! [`ClientError::Cancelled`], so a late response can never overwrite state
//! produced by a later request.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Products,
    Autocomplete,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Products => write!(f, "products"),
            Channel::Autocomplete => write!(f, "autocomplete"),
        }
    }
}

#[derive(Debug)]
pub struct RequestSlot {
    channel: Channel,
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl RequestSlot {
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Aborts the in-flight request, if any, without issuing a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = previous {
            tracing::debug!(channel = %self.channel, "cancelled in-flight request");
            handle.abort();
        }
    }

    /// Registers `request` as the newest request on this channel.
    ///
    /// Registration happens immediately, when `issue` is called, not when the
    /// returned future is first polled: a request issued later always
    /// supersedes one issued earlier, whatever order they are awaited in.
    pub fn issue<'a, T, F>(&'a self, request: F) -> impl Future<Output = Result<T, ClientError>> + 'a
    where
        F: Future<Output = Result<T, ClientError>> + 'a,
        T: 'a,
    {
        let (ticket, registration) = self.register();
        async move {
            let outcome = Abortable::new(request, registration).await;
            self.settle(ticket, outcome)
        }
    }

    /// Owned variant of [`RequestSlot::issue`] for requests handed to
    /// `tokio::spawn`.
    pub fn issue_owned<T, F>(
        self: Arc<Self>,
        request: F,
    ) -> impl Future<Output = Result<T, ClientError>> + Send + 'static
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Send + 'static,
    {
        let (ticket, registration) = self.register();
        async move {
            let outcome = Abortable::new(request, registration).await;
            self.settle(ticket, outcome)
        }
    }

    fn register(&self) -> (u64, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(handle) {
            tracing::debug!(channel = %self.channel, "superseding in-flight request");
            previous.abort();
        }
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (ticket, registration)
    }

    /// Passes the outcome through only if `ticket` is still the newest
    /// request; clears the in-flight handle when it is.
    fn settle<T>(
        &self,
        ticket: u64,
        outcome: Result<Result<T, ClientError>, Aborted>,
    ) -> Result<T, ClientError> {
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self.generation.load(Ordering::SeqCst) == ticket;
        match outcome {
            Ok(result) if current => {
                *slot = None;
                result
            }
            Ok(_) | Err(Aborted) => Err(ClientError::Cancelled {
                channel: self.channel,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    async fn wait_for(rx: oneshot::Receiver<&'static str>) -> Result<&'static str, ClientError> {
        Ok(rx.await.unwrap_or("dropped"))
    }

    #[tokio::test]
    async fn single_request_resolves_normally() {
        let slot = RequestSlot::new(Channel::Products);
        let result = slot.issue(async { Ok::<_, ClientError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn later_request_wins_even_when_earlier_resolves_last() {
        let slot = RequestSlot::new(Channel::Autocomplete);
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_b, rx_b) = oneshot::channel();

        let request_a = slot.issue(wait_for(rx_a));
        let request_b = slot.issue(wait_for(rx_b));

        // B's response arrives first, A's afterwards.
        tx_b.send("B").unwrap();
        let _ = tx_a.send("A");

        let (a, b) = tokio::join!(request_a, request_b);
        assert!(matches!(
            a,
            Err(ClientError::Cancelled {
                channel: Channel::Autocomplete
            })
        ));
        assert_eq!(b.unwrap(), "B");
    }

    #[tokio::test]
    async fn completed_but_superseded_result_is_discarded() {
        let slot = RequestSlot::new(Channel::Products);
        let request_a = slot.issue(async { Ok::<_, ClientError>("A") });
        // A has not been polled yet; issuing B supersedes it.
        let request_b = slot.issue(async { Ok::<_, ClientError>("B") });
        let a = request_a.await;
        let b = request_b.await;
        assert!(a.unwrap_err().is_cancelled());
        assert_eq!(b.unwrap(), "B");
    }

    #[tokio::test]
    async fn explicit_cancel_aborts_in_flight_request() {
        let slot = RequestSlot::new(Channel::Autocomplete);
        let (_tx, rx) = oneshot::channel::<&'static str>();
        let request = slot.issue(wait_for(rx));
        slot.cancel();
        assert!(request.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn errors_from_current_request_pass_through() {
        let slot = RequestSlot::new(Channel::Products);
        let result = slot
            .issue(async {
                Err::<(), ClientError>(ClientError::NotFound {
                    url: "http://x/api/products/".to_string(),
                })
            })
            .await;
        assert!(matches!(result, Err(ClientError::NotFound { .. })));
    }

    #[tokio::test]
    async fn owned_requests_can_be_spawned() {
        let slot = Arc::new(RequestSlot::new(Channel::Autocomplete));
        let (tx_a, rx_a) = oneshot::channel();
        let first = tokio::spawn(Arc::clone(&slot).issue_owned(wait_for(rx_a)));
        let second = tokio::spawn(Arc::clone(&slot).issue_owned(async { Ok("B") }));
        let _ = tx_a.send("A");
        assert!(first.await.unwrap().unwrap_err().is_cancelled());
        assert_eq!(second.await.unwrap().unwrap(), "B");
    }

    #[test]
    fn channel_display() {
        assert_eq!(Channel::Products.to_string(), "products");
        assert_eq!(Channel::Autocomplete.to_string(), "autocomplete");
    }
}
