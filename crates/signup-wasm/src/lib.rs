//! # signup-wasm
//!
//! The signup form in the browser, compiled to WebAssembly.
//!
//! The page renders the markup; this crate owns the state. Every input event
//! is forwarded to a [`SignupController`], which keeps the address bar in
//! sync and answers with what to show.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { SignupController } from 'signup-wasm';
//!
//! await init();
//!
//! const form = new SignupController();
//! form.onSubmit((record) => alert(record));
//!
//! input.addEventListener('focus', () => form.focus('firstName'));
//! input.addEventListener('input', (e) => form.change('firstName', e.target.value));
//! input.addEventListener('blur', () => form.blur('firstName'));
//!
//! const view = JSON.parse(form.view());
//! ```

#![forbid(unsafe_code)]

mod location;

use serde::Serialize;
use signup::{
    FieldName, FieldView, QueryAdapter, SignupForm, SignupValues, Sink, to_json_record,
};
use wasm_bindgen::prelude::*;

pub use location::BrowserLocation;

/// Sets up the panic hook for readable errors in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// =============================================================================
// View model
// =============================================================================

/// Everything the page needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// Fields in display order.
    pub fields: Vec<FieldView>,
    /// Label of the submit button.
    pub submit_label: &'static str,
    /// Number of submission attempts.
    pub submit_count: usize,
    /// Whether the current values pass validation.
    pub valid: bool,
}

impl FormView {
    /// Captures the view of `form`.
    pub fn of<Q: QueryAdapter>(form: &SignupForm<Q>) -> Self {
        Self {
            fields: form.views(),
            submit_label: form.submit_label(),
            submit_count: form.submit_count(),
            valid: form.errors().is_valid(),
        }
    }
}

// =============================================================================
// Submit sink
// =============================================================================

/// Hands the JSON record to a JavaScript callback, or to `window.alert`
/// when none is registered.
struct CallbackSink<'a> {
    callback: Option<&'a js_sys::Function>,
}

impl Sink for CallbackSink<'_> {
    fn accept(&mut self, values: &SignupValues) {
        let record = match to_json_record(values) {
            Ok(record) => record,
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                return;
            }
        };
        let delivered = match self.callback {
            Some(callback) => callback
                .call1(&JsValue::NULL, &JsValue::from_str(&record))
                .map(drop),
            None => web_sys::window()
                .ok_or_else(|| JsValue::from_str("no global window"))
                .and_then(|window| window.alert_with_message(&record)),
        };
        if let Err(err) = delivered {
            web_sys::console::error_2(&JsValue::from_str("signup: submit callback failed"), &err);
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The signup form bound to the page's location.
#[wasm_bindgen]
pub struct SignupController {
    form: SignupForm<BrowserLocation>,
    on_submit: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl SignupController {
    /// Mounts the form, prefilling it from the current query string.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SignupController, JsError> {
        Ok(Self {
            form: SignupForm::mount(BrowserLocation::current()?),
            on_submit: None,
        })
    }

    /// Registers the function receiving the JSON record of each successful
    /// submission. Without one, the record is shown with `alert`.
    #[wasm_bindgen(js_name = "onSubmit")]
    pub fn on_submit(&mut self, callback: js_sys::Function) {
        self.on_submit = Some(callback);
    }

    /// Sets a text or dropdown value.
    pub fn change(&mut self, field: &str, value: &str) -> Result<(), JsError> {
        let field: FieldName = field.parse()?;
        self.form.change_text(field, value)?;
        Ok(())
    }

    /// Sets the checkbox.
    #[wasm_bindgen(js_name = "setChecked")]
    pub fn set_checked(&mut self, field: &str, checked: bool) -> Result<(), JsError> {
        let field: FieldName = field.parse()?;
        self.form.set_checked(field, checked)?;
        Ok(())
    }

    /// Records that a field received focus.
    pub fn focus(&mut self, field: &str) -> Result<(), JsError> {
        self.form.focus(field.parse()?);
        Ok(())
    }

    /// Records that a field lost focus.
    pub fn blur(&mut self, field: &str) -> Result<(), JsError> {
        self.form.blur(field.parse()?);
        Ok(())
    }

    /// Feedback of one field as JSON, e.g.
    /// `{"state":"invalid","message":"Email is required"}`.
    pub fn feedback(&self, field: &str) -> Result<String, JsError> {
        let feedback = self.form.feedback(field.parse()?);
        Ok(serde_json::to_string(&feedback)?)
    }

    /// The whole form as JSON.
    pub fn view(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&FormView::of(&self.form))?)
    }

    /// The current values as JSON.
    pub fn values(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.form.values())?)
    }

    /// Label of the submit button.
    #[wasm_bindgen(js_name = "submitLabel")]
    pub fn submit_label(&self) -> String {
        self.form.submit_label().to_string()
    }

    /// Attempts to submit. Returns whether the values were delivered.
    pub fn submit(&mut self) -> bool {
        let mut sink = CallbackSink {
            callback: self.on_submit.as_ref(),
        };
        self.form.submit(&mut sink).is_submitted()
    }
}
