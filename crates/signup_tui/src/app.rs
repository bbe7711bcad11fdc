//! The signup form as a terminal [`Model`].
//!
//! Focus moves over the five fields and the submit button. Leaving a field
//! marks it touched, exactly like blurring an input in a browser.

use signup::{
    FieldKind, FieldName, JOB_TYPE_OPTIONS, QueryAdapter, SignupForm, Sink, SubmitOutcome,
    to_json_record,
};
use tracing::{debug, warn};

use crate::program::{Cmd, Key, Model, Msg};
use crate::view;

/// The element holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A form field.
    Field(FieldName),
    /// The submit button.
    Submit,
}

impl Focus {
    /// Focus order.
    pub const ORDER: [Self; FieldName::COUNT + 1] = [
        Self::Field(FieldName::FirstName),
        Self::Field(FieldName::LastName),
        Self::Field(FieldName::Email),
        Self::Field(FieldName::JobType),
        Self::Field(FieldName::AcceptedTerms),
        Self::Submit,
    ];

    fn position(self) -> usize {
        match self {
            Self::Field(field) => field.index(),
            Self::Submit => FieldName::COUNT,
        }
    }

    /// The next element, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// The previous element, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The focused field, if a field is focused.
    pub fn field(self) -> Option<FieldName> {
        match self {
            Self::Field(field) => Some(field),
            Self::Submit => None,
        }
    }
}

/// Terminal application state.
pub struct App<Q: QueryAdapter, S: Sink> {
    form: SignupForm<Q>,
    sink: S,
    focus: Focus,
    alert: Option<String>,
    notice: Option<String>,
    width: u16,
}

impl<Q: QueryAdapter, S: Sink> App<Q, S> {
    /// Creates the app with the first field focused.
    pub fn new(form: SignupForm<Q>, sink: S) -> Self {
        let mut app = Self {
            form,
            sink,
            focus: Focus::ORDER[0],
            alert: None,
            notice: None,
            width: 80,
        };
        if let Some(field) = app.focus.field() {
            app.form.focus(field);
        }
        app
    }

    /// The form.
    pub fn form(&self) -> &SignupForm<Q> {
        &self.form
    }

    /// The submit sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The focused element.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The record shown after a successful submission, until dismissed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Status line shown under the form.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Terminal width.
    pub fn width(&self) -> u16 {
        self.width
    }

    fn move_focus(&mut self, to: Focus) {
        if let Some(field) = self.focus.field() {
            self.form.blur(field);
        }
        self.focus = to;
        if let Some(field) = to.field() {
            self.form.focus(field);
        }
    }

    fn edit_text(&mut self, field: FieldName, edit: impl FnOnce(&mut String)) {
        let mut text = self.form.values().text(field).unwrap_or_default().to_string();
        edit(&mut text);
        if let Err(err) = self.form.change_text(field, text) {
            warn!(field = %field, error = %err, "edit rejected");
        }
    }

    fn toggle(&mut self, field: FieldName) {
        let checked = self.form.value(field).as_bool().unwrap_or(false);
        if let Err(err) = self.form.set_checked(field, !checked) {
            warn!(field = %field, error = %err, "toggle rejected");
        }
    }

    fn cycle_option(&mut self, field: FieldName, forward: bool) {
        let current = self.form.values().text(field).unwrap_or_default();
        let len = JOB_TYPE_OPTIONS.len();
        let next = match JOB_TYPE_OPTIONS.iter().position(|o| o.value == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.edit_text(field, |text| *text = JOB_TYPE_OPTIONS[next].value.to_string());
    }

    fn submit(&mut self) {
        match self.form.submit(&mut self.sink) {
            SubmitOutcome::Submitted(values) => {
                self.notice = None;
                self.alert = Some(match to_json_record(&values) {
                    Ok(record) => record,
                    Err(err) => err.to_string(),
                });
                if let Some(field) = self.focus.field() {
                    self.form.focus(field);
                }
            }
            SubmitOutcome::Rejected(errors) => {
                debug!(errors = errors.len(), "submit blocked");
                self.notice = Some(match errors.len() {
                    1 => "1 field needs attention".to_string(),
                    n => format!("{n} fields need attention"),
                });
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<Cmd> {
        if key == Key::CtrlC {
            return Some(Cmd::Quit);
        }
        if self.alert.take().is_some() {
            return None;
        }

        match key {
            Key::Esc | Key::CtrlC => return Some(Cmd::Quit),
            Key::Tab | Key::Down => self.move_focus(self.focus.next()),
            Key::BackTab | Key::Up => self.move_focus(self.focus.prev()),
            Key::Enter => self.submit(),
            Key::Char(c) => match self.focus {
                Focus::Field(field) => match field.kind() {
                    FieldKind::Text => self.edit_text(field, |text| text.push(c)),
                    FieldKind::Checkbox if c == ' ' => self.toggle(field),
                    FieldKind::Select if c == ' ' => self.cycle_option(field, true),
                    FieldKind::Checkbox | FieldKind::Select => {}
                },
                Focus::Submit if c == ' ' => self.submit(),
                Focus::Submit => {}
            },
            Key::Backspace => {
                if let Some(field) = self.focus.field()
                    && field.kind() == FieldKind::Text
                {
                    self.edit_text(field, |text| {
                        text.pop();
                    });
                }
            }
            Key::Left | Key::Right => {
                if let Some(field) = self.focus.field()
                    && field.kind() == FieldKind::Select
                {
                    self.cycle_option(field, key == Key::Right);
                }
            }
        }
        None
    }
}

impl<Q: QueryAdapter, S: Sink> Model for App<Q, S> {
    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Resize { width, .. } => {
                self.width = width;
                None
            }
        }
    }

    fn view(&self) -> String {
        view::render(self)
    }
}
