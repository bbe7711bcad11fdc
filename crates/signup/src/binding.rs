//! Field binding: per-field UI flags and the inline feedback they drive.

use serde::Serialize;

use crate::field::{FieldDescriptor, FieldKind, FieldName};
use crate::validate::text_length;
use crate::values::FieldValue;

/// Trimmed length a focused field must exceed before feedback appears.
pub const FOCUS_FEEDBACK_THRESHOLD: usize = 2;

/// Glyph rendered when a field with visible feedback is valid.
pub const SUCCESS_INDICATOR: &str = "✓";

/// Interaction flags of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUiState {
    /// The field has received focus at least once.
    pub has_focused: bool,
    /// The field has been blurred, or a submission was attempted.
    pub has_been_touched: bool,
}

impl FieldUiState {
    /// Records that the field received focus.
    pub fn focus(&mut self) {
        self.has_focused = true;
    }

    /// Marks the field touched.
    pub fn touch(&mut self) {
        self.has_been_touched = true;
    }

    /// Whether inline feedback is visible for `value`.
    ///
    /// Feedback shows once the field is touched, or early while a focused
    /// field holds more than [`FOCUS_FEEDBACK_THRESHOLD`] non-blank
    /// UTF-16 code units. Trimming only affects this check, never the value.
    pub fn show_feedback(&self, value: &FieldValue) -> bool {
        let long_enough = value
            .as_text()
            .is_some_and(|s| text_length(trim_blank(s)) > FOCUS_FEEDBACK_THRESHOLD);
        (self.has_focused && long_enough) || self.has_been_touched
    }
}

/// Strips leading and trailing whitespace, byte order marks included.
fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Inline feedback of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum Feedback {
    /// Nothing is shown.
    Hidden,
    /// The field is invalid; the message is shown.
    Invalid(String),
    /// The field is valid; the success indicator is shown.
    Valid,
}

impl Feedback {
    /// Computes the feedback of a field.
    ///
    /// Checkboxes only ever show an error, and only once touched.
    pub fn compute(
        kind: FieldKind,
        ui: FieldUiState,
        value: &FieldValue,
        error: Option<&str>,
    ) -> Self {
        match kind {
            FieldKind::Checkbox => match error {
                Some(message) if ui.has_been_touched => Self::Invalid(message.to_string()),
                _ => Self::Hidden,
            },
            FieldKind::Text | FieldKind::Select => {
                if !ui.show_feedback(value) {
                    Self::Hidden
                } else if let Some(message) = error {
                    Self::Invalid(message.to_string())
                } else {
                    Self::Valid
                }
            }
        }
    }

    /// Text to render in the feedback slot.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Hidden => None,
            Self::Invalid(message) => Some(message),
            Self::Valid => Some(SUCCESS_INDICATOR),
        }
    }

    /// Status class of the surrounding control.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Hidden => None,
            Self::Invalid(_) => Some(Status::Invalid),
            Self::Valid => Some(Status::Valid),
        }
    }

    /// Returns true if an error message is visible.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Visual status of a control with visible feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Rendered with the `valid` class.
    Valid,
    /// Rendered with the `invalid` class.
    Invalid,
}

impl Status {
    /// CSS-style class name.
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

/// Everything a front end needs to draw one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Field name.
    pub name: FieldName,
    /// Widget kind.
    pub kind: FieldKind,
    /// Label text.
    pub label: &'static str,
    /// Placeholder text, empty when the widget has none.
    pub placeholder: &'static str,
    /// Current value.
    pub value: FieldValue,
    /// Inline feedback.
    pub feedback: Feedback,
    /// Status class, if feedback is visible.
    pub status: Option<Status>,
    /// Id of the feedback live region.
    pub feedback_id: String,
    /// `aria-describedby` value.
    pub described_by: String,
}

impl FieldView {
    /// Assembles the view of a field.
    pub fn new(descriptor: &FieldDescriptor, value: FieldValue, feedback: Feedback) -> Self {
        Self {
            name: descriptor.name,
            kind: descriptor.kind,
            label: descriptor.label,
            placeholder: descriptor.placeholder,
            status: feedback.status(),
            value,
            feedback,
            feedback_id: descriptor.feedback_id(),
            described_by: descriptor.described_by(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused() -> FieldUiState {
        FieldUiState {
            has_focused: true,
            has_been_touched: false,
        }
    }

    fn touched() -> FieldUiState {
        FieldUiState {
            has_focused: false,
            has_been_touched: true,
        }
    }

    #[test]
    fn untouched_unfocused_hides_feedback() {
        let ui = FieldUiState::default();
        assert!(!ui.show_feedback(&"Johnny".into()));
    }

    #[test]
    fn focused_needs_more_than_two_trimmed_chars() {
        assert!(!focused().show_feedback(&"Al".into()));
        assert!(!focused().show_feedback(&"  Al   ".into()));
        assert!(focused().show_feedback(&"Ale".into()));
    }

    #[test]
    fn focused_threshold_counts_utf16_units() {
        assert!(!focused().show_feedback(&"😀".into()));
        assert!(focused().show_feedback(&"😀😀".into()));
        assert!(focused().show_feedback(&"a😀".into()));
    }

    #[test]
    fn byte_order_marks_are_trimmed() {
        assert!(!focused().show_feedback(&"\u{feff}Al\u{feff}".into()));
        assert!(focused().show_feedback(&"\u{feff}Ale".into()));
    }

    #[test]
    fn touched_always_shows() {
        assert!(touched().show_feedback(&"".into()));
    }

    #[test]
    fn text_feedback() {
        let value = FieldValue::from("not-an-email");
        assert_eq!(
            Feedback::compute(FieldKind::Text, touched(), &value, Some("Invalid email address")),
            Feedback::Invalid("Invalid email address".into())
        );
        assert_eq!(
            Feedback::compute(FieldKind::Text, touched(), &value, None),
            Feedback::Valid
        );
        assert_eq!(
            Feedback::compute(FieldKind::Text, FieldUiState::default(), &value, Some("x")),
            Feedback::Hidden
        );
    }

    #[test]
    fn checkbox_feedback_only_on_touched_error() {
        let value = FieldValue::Checked(false);
        assert_eq!(
            Feedback::compute(FieldKind::Checkbox, focused(), &value, Some("accept")),
            Feedback::Hidden
        );
        assert_eq!(
            Feedback::compute(FieldKind::Checkbox, touched(), &value, Some("accept")),
            Feedback::Invalid("accept".into())
        );
        assert_eq!(
            Feedback::compute(FieldKind::Checkbox, touched(), &FieldValue::Checked(true), None),
            Feedback::Hidden
        );
    }

    #[test]
    fn feedback_text_and_status() {
        assert_eq!(Feedback::Valid.text(), Some(SUCCESS_INDICATOR));
        assert_eq!(Feedback::Valid.status().map(Status::as_class), Some("valid"));
        assert_eq!(Feedback::Hidden.text(), None);
        assert!(Feedback::Invalid("x".into()).is_invalid());
    }

    #[test]
    fn feedback_serializes_tagged() {
        let json = serde_json::to_string(&Feedback::Invalid("Required".into())).unwrap();
        assert_eq!(json, r#"{"state":"invalid","message":"Required"}"#);
        let json = serde_json::to_string(&Feedback::Hidden).unwrap();
        assert_eq!(json, r#"{"state":"hidden"}"#);
    }
}
