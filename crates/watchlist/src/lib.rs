//! # Watchlist Crate
//!
//! An in-memory movie watchlist: insertion-ordered, unique by movie id.
//!
//! ## Main Components
//!
//! - **types**: `Movie` and `MovieId`, plus checked construction from JSON
//! - **store**: the `Watchlist` itself (add, remove, membership)
//! - **observer**: change events and listener subscriptions
//! - **shared**: `SharedWatchlist`, a cloneable thread-safe handle
//! - **error**: error types
//!
//! ## Example Usage
//!
//! ```
//! use watchlist::{Movie, Watchlist};
//!
//! let mut watchlist = Watchlist::new();
//! watchlist.add_movie(Movie::new(1).with_title("Alien"));
//! watchlist.add_movie(Movie::new(2).with_title("Aliens"));
//! watchlist.add_movie(Movie::new(1)); // duplicate, ignored
//!
//! assert_eq!(watchlist.len(), 2);
//! assert!(watchlist.is_in_watchlist(1));
//!
//! watchlist.remove_movie(2);
//! assert!(!watchlist.is_in_watchlist(2));
//! ```

//! ## Learning Goals
//!
//! 1. **Ownership and Borrowing**: `Watchlist` owns its movies, accessors
//!    hand out slices and references
//! 2. **Error Handling**: invalid input is rejected once, at `Movie`
//!    construction, with a thiserror-derived error
//! 3. **Trait Objects**: listeners are boxed closures
//! 4. **Shared State**: `Arc<RwLock<_>>` behind `SharedWatchlist`
//! 5. **Serde**: custom `Serialize` plus `try_from` deserialization keep
//!    JSON output readable back into the same value

// Public modules
pub mod error;
pub mod types;
pub mod observer;
pub mod store;
pub mod shared;

// Re-export commonly used types for convenience
pub use error::{Result, WatchlistError};
pub use observer::{Listener, SubscriptionId, WatchlistEvent};
pub use shared::SharedWatchlist;
pub use store::Watchlist;
pub use types::{Movie, MovieId};
