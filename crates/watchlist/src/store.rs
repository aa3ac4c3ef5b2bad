//! The watchlist store.
//!
//! An insertion-ordered list of movies, unique by id. Owned by whatever
//! component composes the application and passed around by reference.

use crate::observer::{Listeners, SubscriptionId, WatchlistEvent};
use crate::types::{Movie, MovieId};
use tracing::{debug, trace};

/// Deduplicated, insertion-ordered collection of movies.
///
/// Mutation requires `&mut self`, so the single-writer contract holds by
/// construction. Use [`crate::SharedWatchlist`] to share across threads.
///
/// Rust concepts:
/// - Fields are private; the only way to change the list is through the
///   methods below, so the unique-id invariant cannot be broken from outside
/// - Getters borrow (`&[Movie]`, `Option<&Movie>`) instead of cloning
#[derive(Debug, Default)]
pub struct Watchlist {
    /// Entries in insertion order, at most one per id
    movies: Vec<Movie>,
    /// Notified after every effective change
    listeners: Listeners,
}

impl Watchlist {
    /// Create an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `movie` unless an entry with the same id is already present.
    ///
    /// A duplicate is silently ignored; the stored record is left as is.
    pub fn add_movie(&mut self, movie: Movie) {
        if self.is_in_watchlist(movie.id) {
            trace!(movie_id = movie.id, "movie already in watchlist");
            return;
        }

        let movie_id = movie.id;
        self.movies.push(movie);
        debug!(movie_id, len = self.movies.len(), "added movie to watchlist");
        self.listeners
            .notify(&WatchlistEvent::Added { movie_id }, &self.movies);
    }

    /// Drop every entry whose id equals `movie_id`, keeping the others in order.
    ///
    /// Removing an absent id leaves the contents unchanged.
    pub fn remove_movie(&mut self, movie_id: MovieId) {
        let before = self.movies.len();
        self.movies.retain(|movie| movie.id != movie_id);

        if self.movies.len() == before {
            trace!(movie_id, "movie not in watchlist");
            return;
        }

        debug!(movie_id, len = self.movies.len(), "removed movie from watchlist");
        self.listeners
            .notify(&WatchlistEvent::Removed { movie_id }, &self.movies);
    }

    /// True iff some entry has this id
    pub fn is_in_watchlist(&self, movie_id: MovieId) -> bool {
        self.movies.iter().any(|movie| movie.id == movie_id)
    }

    /// Current contents in insertion order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Get the stored record for an id
    ///
    /// Returns `None` if the movie is not in the watchlist
    pub fn get(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == movie_id)
    }

    /// Iterate over the ids in insertion order
    ///
    /// Rust concept: `impl Iterator + '_` borrows `self` for as long as the
    /// iterator lives, without allocating a new Vec
    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.iter().map(|movie| movie.id)
    }

    /// Iterate over the movies in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Number of movies in the watchlist
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// True if no movie has been added (or all were removed)
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Register a listener for effective changes.
    ///
    /// The listener receives the event and the contents after the change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&WatchlistEvent, &[Movie]) + Send + Sync + 'static,
    {
        let id = self.listeners.subscribe(Box::new(listener));
        debug!(?id, "watchlist listener subscribed");
        id
    }

    /// Stop notifying a listener
    ///
    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

// Allows `for movie in &watchlist { ... }`
impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ids(watchlist: &Watchlist) -> Vec<MovieId> {
        watchlist.ids().collect()
    }

    #[test]
    fn test_new_watchlist_is_empty() {
        let watchlist = Watchlist::new();
        assert!(watchlist.is_empty());
        assert_eq!(watchlist.len(), 0);
        assert!(!watchlist.is_in_watchlist(1));
    }

    #[test]
    fn test_concrete_scenario() {
        let mut watchlist = Watchlist::new();

        watchlist.add_movie(Movie::new(1));
        watchlist.add_movie(Movie::new(2));
        watchlist.add_movie(Movie::new(1));
        assert_eq!(watchlist.movies(), &[Movie::new(1), Movie::new(2)]);
        assert!(watchlist.is_in_watchlist(1));

        watchlist.remove_movie(2);
        assert_eq!(watchlist.movies(), &[Movie::new(1)]);
        assert!(!watchlist.is_in_watchlist(2));
    }

    #[test]
    fn test_duplicate_add_keeps_original_record() {
        let mut watchlist = Watchlist::new();
        watchlist.add_movie(Movie::new(10).with_title("Original"));
        watchlist.add_movie(Movie::new(10).with_title("Replacement"));

        assert_eq!(watchlist.len(), 1);
        assert_eq!(watchlist.get(10).unwrap().title.as_deref(), Some("Original"));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut watchlist = Watchlist::new();
        for id in [1, 2, 3] {
            watchlist.add_movie(Movie::new(id));
        }

        watchlist.remove_movie(2);
        assert_eq!(ids(&watchlist), vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut watchlist = Watchlist::new();
        watchlist.add_movie(Movie::new(1).with_attribute("poster", "a.jpg"));
        watchlist.add_movie(Movie::new(2));
        let before = watchlist.movies().to_vec();

        watchlist.remove_movie(99);
        assert_eq!(watchlist.movies(), before.as_slice());
    }

    #[test]
    fn test_add_then_remove_then_readd_goes_to_end() {
        let mut watchlist = Watchlist::new();
        for id in [1, 2, 3] {
            watchlist.add_movie(Movie::new(id));
        }
        watchlist.remove_movie(1);
        watchlist.add_movie(Movie::new(1));

        assert_eq!(ids(&watchlist), vec![2, 3, 1]);
    }

    #[test]
    fn test_listeners_see_only_effective_changes() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut watchlist = Watchlist::new();
        {
            let events = events.clone();
            watchlist.subscribe(move |event, contents| {
                events.lock().unwrap().push((*event, contents.len()));
            });
        }

        watchlist.add_movie(Movie::new(1));
        watchlist.add_movie(Movie::new(1));
        watchlist.add_movie(Movie::new(2));
        watchlist.remove_movie(7);
        watchlist.remove_movie(1);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                (WatchlistEvent::Added { movie_id: 1 }, 1),
                (WatchlistEvent::Added { movie_id: 2 }, 2),
                (WatchlistEvent::Removed { movie_id: 1 }, 1),
            ]
        );
    }

    #[test]
    fn test_unsubscribed_listener_is_not_called() {
        let count = Arc::new(Mutex::new(0));
        let mut watchlist = Watchlist::new();
        let id = {
            let count = count.clone();
            watchlist.subscribe(move |_, _| *count.lock().unwrap() += 1)
        };

        watchlist.add_movie(Movie::new(1));
        assert!(watchlist.unsubscribe(id));
        assert_eq!(watchlist.subscriber_count(), 0);
        watchlist.add_movie(Movie::new(2));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_iterates_in_insertion_order() {
        let mut watchlist = Watchlist::new();
        for id in [5, 3, 8] {
            watchlist.add_movie(Movie::new(id));
        }

        let seen: Vec<MovieId> = (&watchlist).into_iter().map(|m| m.id).collect();
        assert_eq!(seen, vec![5, 3, 8]);
    }
}
