//! Query string synchronization.
//!
//! The address bar is modelled as a [`QueryAdapter`]: something that can
//! report the current query pairs, overwrite one key in place, and drop the
//! whole query. Every mutation is a history *replace*; adapters never create
//! new history entries.
//!
//! [`MemoryLocation`] is the in-process implementation used by tests and by
//! front ends that keep the location themselves.

use std::fmt;

use tracing::trace;
use url::{Url, form_urlencoded};

use crate::error::Result;

// -----------------------------------------------------------------------------
// QueryState
// -----------------------------------------------------------------------------

/// Ordered key/value pairs of a query string.
///
/// Keys may repeat; lookups return the first occurrence, as
/// `URLSearchParams.get` does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pairs: Vec<(String, String)>,
}

impl QueryState {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// The query pairs of a URL.
    pub fn from_url(url: &Url) -> Self {
        Self {
            pairs: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`.
    ///
    /// The first occurrence keeps its position and takes the new value, any
    /// later occurrences are removed, and an absent key is appended.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            value.clone_into(v);
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true when there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the pairs as `application/x-www-form-urlencoded`, without a
    /// leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Writes these pairs into `url`, dropping the `?` entirely when empty.
    /// Path and fragment are left alone.
    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.to_query_string()));
        }
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// -----------------------------------------------------------------------------
// QueryAdapter
// -----------------------------------------------------------------------------

/// Access to the query string of the page's location.
pub trait QueryAdapter {
    /// Reads the current query pairs.
    fn read(&self) -> QueryState;

    /// Sets `key` to `value` in place, replacing the current history entry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Query`](crate::FormError::Query) if the location
    /// cannot be rewritten.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the whole query string, replacing the current history entry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Query`](crate::FormError::Query) if the location
    /// cannot be rewritten.
    fn clear(&mut self) -> Result<()>;
}

impl<T: QueryAdapter + ?Sized> QueryAdapter for Box<T> {
    fn read(&self) -> QueryState {
        (**self).read()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

// -----------------------------------------------------------------------------
// MemoryLocation
// -----------------------------------------------------------------------------

/// An in-memory page location with a single history entry.
///
/// Mutations through [`QueryAdapter`] rewrite the current entry and bump
/// [`replacements`](Self::replacements); [`history_len`](Self::history_len)
/// only grows through [`navigate`](Self::navigate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    url: Url,
    history_len: usize,
    replacements: usize,
}

impl MemoryLocation {
    /// Creates a location at `href`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidUrl`](crate::FormError::InvalidUrl) if
    /// `href` is not an absolute URL.
    pub fn new(href: &str) -> Result<Self> {
        Ok(Self::from_url(Url::parse(href)?))
    }

    /// Creates a location at an already parsed URL.
    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            history_len: 1,
            replacements: 0,
        }
    }

    /// The full current URL.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// The current URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The raw query string, without the `?`.
    pub fn search(&self) -> Option<&str> {
        self.url.query()
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Number of in-place replacements performed so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Navigates to `href`, pushing a new history entry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidUrl`](crate::FormError::InvalidUrl) if
    /// `href` cannot be resolved against the current URL.
    pub fn navigate(&mut self, href: &str) -> Result<()> {
        self.url = self.url.join(href)?;
        self.history_len += 1;
        Ok(())
    }

    fn replace(&mut self, url: Url) {
        trace!(from = %self.url, to = %url, "location replaced");
        self.url = url;
        self.replacements += 1;
    }
}

impl QueryAdapter for MemoryLocation {
    fn read(&self) -> QueryState {
        QueryState::from_url(&self.url)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let mut query = self.read();
        query.set(key, value);
        let mut next = self.url.clone();
        query.apply_to(&mut next);
        self.replace(next);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut next = self.url.clone();
        next.set_query(None);
        self.replace(next);
        Ok(())
    }
}
