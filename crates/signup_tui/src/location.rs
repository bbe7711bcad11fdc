//! A location that survives restarts.
//!
//! The terminal has no address bar, so [`FileLocation`] keeps the current
//! href in memory and, when given a path, rewrites that file after every
//! change. Starting the program again picks the query string back up, which
//! is what reloading the page does in a browser.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use signup::{FormError, MemoryLocation, QueryAdapter, QueryState};
use tracing::debug;

use crate::config::DEFAULT_URL;
use crate::error::Result;

/// The terminal's stand-in for `window.location`.
#[derive(Debug, Clone)]
pub struct FileLocation {
    inner: MemoryLocation,
    path: Option<PathBuf>,
}

impl FileLocation {
    /// Opens the location.
    ///
    /// The starting href is `url` if given, otherwise the content of the
    /// file at `path` if it exists and is not blank, otherwise
    /// [`DEFAULT_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the href is not an
    /// absolute URL.
    pub fn open(path: Option<&Path>, url: Option<&str>) -> Result<Self> {
        let stored = match (url, path) {
            (None, Some(path)) => read_href(path)?,
            _ => None,
        };
        let href = url.or(stored.as_deref()).unwrap_or(DEFAULT_URL);
        debug!(href, "location opened");
        Ok(Self {
            inner: MemoryLocation::new(href)?,
            path: path.map(Path::to_path_buf),
        })
    }

    /// An in-memory location at `href` that is never persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if `href` is not an absolute URL.
    pub fn ephemeral(href: &str) -> Result<Self> {
        Self::open(None, Some(href))
    }

    /// The current href.
    pub fn href(&self) -> &str {
        self.inner.href()
    }

    /// The file the location is persisted to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> signup::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        fs::write(path, format!("{}\n", self.inner.href()))
            .map_err(|e| FormError::query(format!("{}: {e}", path.display())))
    }
}

fn read_href(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let href = text.trim();
            Ok((!href.is_empty()).then(|| href.to_string()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl QueryAdapter for FileLocation {
    fn read(&self) -> QueryState {
        self.inner.read()
    }

    fn write(&mut self, key: &str, value: &str) -> signup::Result<()> {
        self.inner.write(key, value)?;
        self.persist()
    }

    fn clear(&mut self) -> signup::Result<()> {
        self.inner.clear()?;
        self.persist()
    }
}
