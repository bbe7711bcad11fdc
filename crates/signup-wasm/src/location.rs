//! The page's own address bar as a [`QueryAdapter`].

use signup::{FormError, QueryAdapter, QueryState};
use url::Url;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// `window.location` and `window.history`.
///
/// Every rewrite goes through `history.replaceState`, so typing never adds
/// back-button entries.
#[derive(Debug, Clone)]
pub struct BrowserLocation {
    window: Window,
}

impl BrowserLocation {
    /// The location of the current page.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Query`] outside a browser window, e.g. in a
    /// worker.
    pub fn current() -> signup::Result<Self> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or_else(|| FormError::query("no global window"))
    }

    /// The current URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `location.href` cannot be read or parsed.
    pub fn url(&self) -> signup::Result<Url> {
        let href = self.window.location().href().map_err(js_error)?;
        Ok(Url::parse(&href)?)
    }

    fn replace(&self, url: &Url) -> signup::Result<()> {
        self.window
            .history()
            .map_err(js_error)?
            .replace_state_with_url(&JsValue::NULL, "", Some(url.as_str()))
            .map_err(js_error)
    }
}

pub(crate) fn js_error(value: JsValue) -> FormError {
    FormError::query(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl QueryAdapter for BrowserLocation {
    fn read(&self) -> QueryState {
        match self.url() {
            Ok(url) => QueryState::from_url(&url),
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "signup: cannot read location: {err}"
                )));
                QueryState::new()
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> signup::Result<()> {
        let mut url = self.url()?;
        let mut query = QueryState::from_url(&url);
        query.set(key, value);
        query.apply_to(&mut url);
        self.replace(&url)
    }

    fn clear(&mut self) -> signup::Result<()> {
        let mut url = self.url()?;
        url.set_query(None);
        self.replace(&url)
    }
}
