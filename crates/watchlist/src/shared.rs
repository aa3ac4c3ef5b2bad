//! Thread-safe handle around a `Watchlist`.
//!
//! Cloning the handle shares the same underlying list. Listeners run while
//! the write lock is held, so they must not call back into the handle.

use crate::observer::{SubscriptionId, WatchlistEvent};
use crate::store::Watchlist;
use crate::types::{Movie, MovieId};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, thread-safe watchlist handle.
///
/// Rust concepts:
/// - `Arc` gives shared ownership; every clone points at the same list
/// - `RwLock` allows many concurrent readers (`is_in_watchlist`, `snapshot`)
///   but only one writer (`add_movie`, `remove_movie`)
#[derive(Debug, Clone, Default)]
pub struct SharedWatchlist {
    inner: Arc<RwLock<Watchlist>>,
}

impl SharedWatchlist {
    /// Create a handle around a new, empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing watchlist, keeping its contents and listeners
    pub fn from_watchlist(watchlist: Watchlist) -> Self {
        Self {
            inner: Arc::new(RwLock::new(watchlist)),
        }
    }

    // A panic inside a listener happens after the mutation is complete,
    // so the list itself is still consistent and the poison can be ignored.
    fn read(&self) -> RwLockReadGuard<'_, Watchlist> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Watchlist> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Watchlist::add_movie`]
    pub fn add_movie(&self, movie: Movie) {
        self.write().add_movie(movie);
    }

    /// See [`Watchlist::remove_movie`]
    pub fn remove_movie(&self, movie_id: MovieId) {
        self.write().remove_movie(movie_id);
    }

    /// See [`Watchlist::is_in_watchlist`]
    pub fn is_in_watchlist(&self, movie_id: MovieId) -> bool {
        self.read().is_in_watchlist(movie_id)
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Vec<Movie> {
        self.read().movies().to_vec()
    }

    /// Number of movies in the watchlist
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if the watchlist has no movies
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Register a listener; see [`Watchlist::subscribe`]
    ///
    /// The listener runs with the write lock held and must not call back
    /// into this handle.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&WatchlistEvent, &[Movie]) + Send + Sync + 'static,
    {
        self.write().subscribe(listener)
    }

    /// See [`Watchlist::unsubscribe`]
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.write().unsubscribe(id)
    }

    /// Run `f` with shared access to the underlying watchlist
    pub fn with<R>(&self, f: impl FnOnce(&Watchlist) -> R) -> R {
        f(&self.read())
    }
}
