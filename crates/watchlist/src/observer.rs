//! Change notification for the watchlist.
//!
//! Listeners run synchronously, in subscription order, right after a
//! mutation has been applied. No-op operations emit nothing.

use crate::types::{Movie, MovieId};
use std::fmt;

/// What changed in the watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchlistEvent {
    /// A movie was appended
    Added { movie_id: MovieId },
    /// A movie was taken out
    Removed { movie_id: MovieId },
}

impl WatchlistEvent {
    /// The movie the event is about
    pub fn movie_id(&self) -> MovieId {
        match *self {
            WatchlistEvent::Added { movie_id } | WatchlistEvent::Removed { movie_id } => movie_id,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Callback invoked with the event and the contents after the change
pub type Listener = Box<dyn Fn(&WatchlistEvent, &[Movie]) + Send + Sync>;

/// Ordered set of listeners
///
/// Rust concept: `Box<dyn Fn ...>` stores closures of different concrete
/// types in one Vec (trait objects)
#[derive(Default)]
pub(crate) struct Listeners {
    /// Ids are never reused, even after unsubscribe
    next_id: u64,
    /// Kept in subscription order
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&self, event: &WatchlistEvent, contents: &[Movie]) {
        for (_, listener) in &self.entries {
            listener(event, contents);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
