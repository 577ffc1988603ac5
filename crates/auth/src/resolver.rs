//! Session-scoped identity resolution with stale-answer suppression.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::identity::{Identity, IdentityProvider, IdentityState, resolve_with_timeout};

/// Outcome of one [`IdentityResolver::resolve`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The answer was published as the current identity.
    Current(Option<Identity>),
    /// A newer resolution started while this one was pending; the answer was dropped.
    Superseded,
}

/// Tracks the identity of one client session.
///
/// Each call to [`resolve`](Self::resolve) takes a new generation number and
/// flips the published state to [`IdentityState::Loading`]. When the provider
/// answers, the result is published only if no later call has started since.
/// Subscribers (route guards) re-decide on every change.
pub struct IdentityResolver<P> {
    provider: P,
    timeout: Duration,
    generation: AtomicU64,
    state: watch::Sender<IdentityState>,
}

impl<P: IdentityProvider> IdentityResolver<P> {
    /// Starts out `Loading`: nothing is known until the first resolution settles.
    pub fn new(provider: P, timeout: Duration) -> Self {
        let (state, _) = watch::channel(IdentityState::Loading);
        Self {
            provider,
            timeout,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<IdentityState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> IdentityState {
        self.state.borrow().clone()
    }

    /// Resolve `token` (or sign out with `None`) and publish the answer unless
    /// it has been superseded.
    pub async fn resolve(&self, token: Option<&str>) -> Resolution {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = IdentityState::Loading;
        });

        let identity = match token {
            Some(token) => resolve_with_timeout(&self.provider, token, self.timeout).await,
            None => None,
        };

        // Check and publish under the channel lock so a newer call cannot slip
        // its `Loading` in between.
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = IdentityState::Resolved(identity.clone());
            true
        });

        if published {
            Resolution::Current(identity)
        } else {
            debug!(ticket, "discarding superseded identity resolution");
            Resolution::Superseded
        }
    }
}
