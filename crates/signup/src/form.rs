//! The form orchestrator.
//!
//! [`SignupForm`] owns the value set, the per-field UI flags and the latest
//! validation result. It mirrors text edits into its [`QueryAdapter`], gates
//! submission on the validator, and resets itself after a successful submit.
//!
//! ```
//! use signup::{FieldName, MemoryLocation, QueryAdapter, RecordingSink, SignupForm, SubmitOutcome};
//!
//! let location = MemoryLocation::new("http://localhost/?email=al%40example.com").unwrap();
//! let mut form = SignupForm::mount(location);
//! assert_eq!(form.values().email, "al@example.com");
//!
//! form.change_text(FieldName::FirstName, "Al").unwrap();
//! form.change_text(FieldName::LastName, "Smith").unwrap();
//! form.change_text(FieldName::JobType, "designer").unwrap();
//! form.set_checked(FieldName::AcceptedTerms, true).unwrap();
//!
//! let mut sink = RecordingSink::new();
//! assert!(matches!(form.submit(&mut sink), SubmitOutcome::Submitted(_)));
//! assert!(form.query().read().is_empty());
//! ```

use tracing::{debug, info, warn};

use crate::binding::{Feedback, FieldUiState, FieldView};
use crate::error::Result;
use crate::field::FieldName;
use crate::query::QueryAdapter;
use crate::sink::Sink;
use crate::validate::{Schema, ValidationResult, Validator, signup_schema};
use crate::values::{FieldValue, SignupValues};

/// Label of the submit button while idle.
pub const SUBMIT_LABEL: &str = "Submit";

/// Label of the submit button while a submission is being handed off.
pub const SUBMITTING_LABEL: &str = "Processing...";

/// Submission state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    /// Waiting for input.
    #[default]
    Idle,
    /// Handing the values to the sink.
    Submitting,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The values were valid and delivered to the sink.
    Submitted(SignupValues),
    /// Validation failed; the sink was not called.
    Rejected(ValidationResult),
}

impl SubmitOutcome {
    /// Returns true if the sink received the values.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// The signup form.
#[derive(Debug)]
pub struct SignupForm<Q, V = Schema> {
    query: Q,
    validator: V,
    initial: SignupValues,
    values: SignupValues,
    ui: [FieldUiState; FieldName::COUNT],
    errors: ValidationResult,
    state: SubmitState,
    submit_count: usize,
}

impl<Q: QueryAdapter> SignupForm<Q> {
    /// Mounts the form with the stock signup rules.
    ///
    /// Initial text values are read from the adapter's query string.
    pub fn mount(query: Q) -> Self {
        Self::with_validator(query, signup_schema())
    }
}

impl<Q: QueryAdapter, V: Validator> SignupForm<Q, V> {
    /// Mounts the form with a custom validator.
    pub fn with_validator(query: Q, validator: V) -> Self {
        let initial = SignupValues::from_query(&query.read());
        let errors = validator.validate(&initial);
        let prefilled = FieldName::ALL
            .into_iter()
            .filter(|f| initial.text(*f).is_some_and(|s| !s.is_empty()))
            .count();
        debug!(prefilled, "form mounted");
        Self {
            query,
            validator,
            values: initial.clone(),
            initial,
            ui: [FieldUiState::default(); FieldName::COUNT],
            errors,
            state: SubmitState::Idle,
            submit_count: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current values.
    pub fn values(&self) -> &SignupValues {
        &self.values
    }

    /// The values the form was mounted with and resets to.
    pub fn initial_values(&self) -> &SignupValues {
        &self.initial
    }

    /// The current value of a field.
    pub fn value(&self, field: FieldName) -> FieldValue {
        self.values.get(field)
    }

    /// The latest validation result.
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// The current error of a field, whether or not it is visible.
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.error(field)
    }

    /// Interaction flags of a field.
    pub fn ui_state(&self, field: FieldName) -> FieldUiState {
        self.ui[field.index()]
    }

    /// Submission state.
    pub fn submit_state(&self) -> SubmitState {
        self.state
    }

    /// Number of submission attempts, successful or not.
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.state {
            SubmitState::Idle => SUBMIT_LABEL,
            SubmitState::Submitting => SUBMITTING_LABEL,
        }
    }

    /// The query adapter.
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Unmounts the form, returning the query adapter.
    pub fn into_query(self) -> Q {
        self.query
    }

    // -------------------------------------------------------------------------
    // Field events
    // -------------------------------------------------------------------------

    /// Sets the value of a field.
    ///
    /// Validation is recomputed for the whole form. A non-empty text value of
    /// a mirrored field is written to the query string; an empty one leaves
    /// the existing key untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::KindMismatch`](crate::FormError::KindMismatch) if
    /// the value does not fit the field. Query failures are logged, not
    /// returned.
    pub fn change(&mut self, field: FieldName, value: FieldValue) -> Result<()> {
        let mirrored = match &value {
            FieldValue::Text(s) if field.mirrors_query() && !s.is_empty() => Some(s.clone()),
            _ => None,
        };
        self.values.set(field, value)?;
        self.revalidate();
        if let Some(text) = mirrored {
            self.mirror(field, &text);
        }
        Ok(())
    }

    /// Sets the value of a text or dropdown field.
    ///
    /// # Errors
    ///
    /// See [`change`](Self::change).
    pub fn change_text(&mut self, field: FieldName, text: impl Into<String>) -> Result<()> {
        self.change(field, FieldValue::Text(text.into()))
    }

    /// Sets the value of a checkbox.
    ///
    /// # Errors
    ///
    /// See [`change`](Self::change).
    pub fn set_checked(&mut self, field: FieldName, checked: bool) -> Result<()> {
        self.change(field, FieldValue::Checked(checked))
    }

    /// Records that a field received focus.
    pub fn focus(&mut self, field: FieldName) {
        self.ui[field.index()].focus();
    }

    /// Records that a field lost focus, marking it touched.
    pub fn blur(&mut self, field: FieldName) {
        self.ui[field.index()].touch();
        self.revalidate();
    }

    /// Marks every field touched.
    pub fn touch_all(&mut self) {
        for ui in &mut self.ui {
            ui.touch();
        }
    }

    // -------------------------------------------------------------------------
    // Feedback
    // -------------------------------------------------------------------------

    /// The inline feedback of a field.
    pub fn feedback(&self, field: FieldName) -> Feedback {
        Feedback::compute(
            field.kind(),
            self.ui_state(field),
            &self.values.get(field),
            self.errors.error(field),
        )
    }

    /// Everything needed to render a field.
    pub fn field_view(&self, field: FieldName) -> FieldView {
        FieldView::new(field.descriptor(), self.value(field), self.feedback(field))
    }

    /// Views of every field in display order.
    pub fn views(&self) -> Vec<FieldView> {
        FieldName::ALL
            .into_iter()
            .map(|field| self.field_view(field))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Attempts to submit the form.
    ///
    /// Every field is marked touched. With any validation error the attempt
    /// is rejected and the sink is not called. Otherwise the values are
    /// handed to the sink once, the query string is cleared, and the form is
    /// reset to its mount-time values.
    pub fn submit<S: Sink + ?Sized>(&mut self, sink: &mut S) -> SubmitOutcome {
        self.submit_count += 1;
        self.touch_all();
        self.revalidate();

        if !self.errors.is_valid() {
            debug!(errors = self.errors.len(), "submission rejected");
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        self.state = SubmitState::Submitting;
        let submitted = self.values.clone();
        sink.accept(&submitted);
        self.state = SubmitState::Idle;
        info!(submission = self.submit_count, "submission delivered");

        if let Err(err) = self.query.clear() {
            warn!(error = %err, "failed to clear query string");
        }
        self.reset();
        SubmitOutcome::Submitted(submitted)
    }

    /// Restores mount-time values and clears every interaction flag.
    ///
    /// The query string is not touched.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.ui = [FieldUiState::default(); FieldName::COUNT];
        self.state = SubmitState::Idle;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.validator.validate(&self.values);
    }

    fn mirror(&mut self, field: FieldName, value: &str) {
        match self.query.write(field.as_str(), value) {
            Ok(()) => debug!(field = %field, "mirrored to query string"),
            Err(err) => warn!(field = %field, error = %err, "failed to mirror field"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MemoryLocation;
    use crate::sink::RecordingSink;

    fn form_at(href: &str) -> SignupForm<MemoryLocation> {
        SignupForm::mount(MemoryLocation::new(href).unwrap())
    }

    fn fill_valid(form: &mut SignupForm<MemoryLocation>) {
        form.change_text(FieldName::FirstName, "Al").unwrap();
        form.change_text(FieldName::LastName, "Smith").unwrap();
        form.change_text(FieldName::Email, "al@example.com").unwrap();
        form.change_text(FieldName::JobType, "development").unwrap();
        form.set_checked(FieldName::AcceptedTerms, true).unwrap();
    }

    #[test]
    fn mount_reads_initial_values() {
        let form = form_at("http://localhost/?email=a%40b.com");
        assert_eq!(form.values().email, "a@b.com");
        assert_eq!(form.initial_values().email, "a@b.com");
        assert_eq!(form.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn typing_mirrors_without_history_entry() {
        let mut form = form_at("http://localhost/");
        form.change_text(FieldName::FirstName, "John").unwrap();
        assert_eq!(form.query().read().get("firstName"), Some("John"));
        assert_eq!(form.query().history_len(), 1);
    }

    #[test]
    fn empty_value_keeps_stale_key() {
        let mut form = form_at("http://localhost/");
        form.change_text(FieldName::LastName, "Smith").unwrap();
        form.change_text(FieldName::LastName, "").unwrap();
        assert_eq!(form.values().last_name, "");
        assert_eq!(form.query().read().get("lastName"), Some("Smith"));
    }

    #[test]
    fn dropdown_and_checkbox_are_not_mirrored() {
        let mut form = form_at("http://localhost/");
        form.change_text(FieldName::JobType, "designer").unwrap();
        form.set_checked(FieldName::AcceptedTerms, true).unwrap();
        assert!(form.query().read().is_empty());
        assert_eq!(form.query().replacements(), 0);
    }

    #[test]
    fn kind_mismatch_is_rejected_without_side_effects() {
        let mut form = form_at("http://localhost/");
        assert!(form.set_checked(FieldName::Email, true).is_err());
        assert!(form.change_text(FieldName::AcceptedTerms, "yes").is_err());
        assert!(form.query().read().is_empty());
    }

    #[test]
    fn whitespace_is_preserved() {
        let mut form = form_at("http://localhost/");
        form.change_text(FieldName::FirstName, "  Al ").unwrap();
        assert_eq!(form.values().first_name, "  Al ");
        assert_eq!(form.query().read().get("firstName"), Some("  Al "));
    }

    #[test]
    fn blur_touches_and_shows_feedback() {
        let mut form = form_at("http://localhost/");
        form.change_text(FieldName::Email, "not-an-email").unwrap();
        assert_eq!(form.feedback(FieldName::Email), Feedback::Hidden);
        form.blur(FieldName::Email);
        assert_eq!(
            form.feedback(FieldName::Email),
            Feedback::Invalid("Invalid email address".into())
        );
    }

    #[test]
    fn rejected_submit_touches_everything() {
        let mut form = form_at("http://localhost/");
        let mut sink = RecordingSink::new();
        let outcome = form.submit(&mut sink);
        assert!(!outcome.is_submitted());
        assert!(sink.is_empty());
        assert_eq!(form.submit_count(), 1);
        for field in FieldName::ALL {
            assert!(form.ui_state(field).has_been_touched);
            assert!(form.feedback(field).is_invalid(), "{field} should show error");
        }
    }

    #[test]
    fn successful_submit_resets_and_clears_query() {
        let mut form = form_at("http://localhost/");
        fill_valid(&mut form);
        assert!(!form.query().read().is_empty());

        let mut sink = RecordingSink::new();
        let outcome = form.submit(&mut sink);

        assert!(outcome.is_submitted());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.last().map(|v| v.first_name.as_str()), Some("Al"));
        assert_eq!(form.values(), form.initial_values());
        assert!(form.query().read().is_empty());
        assert_eq!(form.query().href(), "http://localhost/");
        assert_eq!(form.query().history_len(), 1);
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
        for field in FieldName::ALL {
            assert_eq!(form.ui_state(field), FieldUiState::default());
        }
    }

    #[test]
    fn sink_sees_submitting_values_once() {
        let mut form = form_at("http://localhost/");
        fill_valid(&mut form);
        let mut calls = 0;
        let outcome = form.submit(&mut |v: &SignupValues| {
            calls += 1;
            assert_eq!(v.email, "al@example.com");
        });
        assert!(outcome.is_submitted());
        assert_eq!(calls, 1);
    }

    #[test]
    fn custom_validator() {
        let lenient = |_: &SignupValues| ValidationResult::new();
        let mut form = SignupForm::with_validator(
            MemoryLocation::new("http://localhost/").unwrap(),
            lenient,
        );
        let mut sink = RecordingSink::new();
        assert!(form.submit(&mut sink).is_submitted());
    }
}
