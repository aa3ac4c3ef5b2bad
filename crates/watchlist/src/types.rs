//! Core domain types for the watchlist.
//!
//! A `Movie` is identified by its `id`; every other field is carried along
//! untouched so UI collaborators get back exactly what they put in.

use crate::error::{Result, WatchlistError};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Unique identifier for a movie
///
/// Same width as MovieLens/TMDB ids; anything larger is rejected on input.
pub type MovieId = u32;

/// A movie record as stored in the watchlist.
///
/// Only `id` takes part in the store's logic. `title` is split out because
/// the CLI displays it; anything else lands in `attributes`.
///
/// JSON goes through the same rules in both directions: deserializing runs
/// [`Movie::from_json`], and serializing never writes `id` or `title` twice,
/// so whatever a `Movie` serializes to reads back as an equal `Movie`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Movie {
    pub id: MovieId,
    pub title: Option<String>,
    /// Pass-through fields (poster, year, overview, ...)
    ///
    /// A non-string `title` lives here too. An `id` key here is never
    /// serialized; the typed `id` always wins.
    pub attributes: Map<String, Value>,
}

impl Movie {
    /// Create a movie with only an id
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            title: None,
            attributes: Map::new(),
        }
    }

    /// Set the title (builder pattern)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.attributes.remove("title");
        self.title = Some(title.into());
        self
    }

    /// Attach a pass-through attribute (builder pattern)
    ///
    /// The reserved keys are redirected rather than stored blindly:
    /// - `"title"` follows the same rules as [`Movie::from_json`] (a string
    ///   sets the title, `null` clears it, anything else is kept verbatim)
    /// - `"id"` is ignored; the id is fixed at construction
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        match key.as_str() {
            "id" => warn!(movie_id = self.id, "ignoring `id` attribute on movie"),
            "title" => self.set_title_value(value.into()),
            _ => {
                self.attributes.insert(key, value.into());
            }
        }
        self
    }

    // A non-string title is not ours to interpret; keep it verbatim.
    fn set_title_value(&mut self, value: Value) {
        match value {
            Value::String(title) => {
                self.attributes.remove("title");
                self.title = Some(title);
            }
            Value::Null => {
                self.attributes.remove("title");
                self.title = None;
            }
            other => {
                self.attributes.insert("title".to_string(), other);
                self.title = None;
            }
        }
    }

    /// Build a movie from an untyped JSON value.
    ///
    /// Fails with `InvalidArgument` when the value is not an object, when
    /// `id` is missing or `null`, or when `id` is not an unsigned 32-bit
    /// integer. Unknown fields are kept as attributes.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(WatchlistError::invalid("movie", "expected a JSON object"));
        };

        let id = match fields.remove("id") {
            None | Some(Value::Null) => {
                return Err(WatchlistError::invalid("id", "movie has no id"));
            }
            Some(raw) => raw
                .as_u64()
                .and_then(|n| MovieId::try_from(n).ok())
                .ok_or_else(|| {
                    WatchlistError::invalid(
                        "id",
                        format!("expected an unsigned 32-bit integer, got {raw}"),
                    )
                })?,
        };

        let title = fields.remove("title");
        let mut movie = Self {
            id,
            title: None,
            attributes: fields,
        };
        if let Some(title) = title {
            movie.set_title_value(title);
        }
        Ok(movie)
    }

    /// Parse a JSON object string into a movie. See [`Movie::from_json`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(value)
    }
}

/// Lets serde deserialize a `Movie` through [`Movie::from_json`]
impl TryFrom<Value> for Movie {
    type Error = WatchlistError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(value)
    }
}

/// Flat object: `id`, then `title` if set, then the pass-through attributes.
impl Serialize for Movie {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra: Vec<(&String, &Value)> = self
            .attributes
            .iter()
            .filter(|(key, _)| {
                key.as_str() != "id" && !(key.as_str() == "title" && self.title.is_some())
            })
            .collect();

        let len = 1 + usize::from(self.title.is_some()) + extra.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("id", &self.id)?;
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "#{} {}", self.id, title),
            None => write!(f, "#{}", self.id),
        }
    }
}
