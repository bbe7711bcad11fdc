#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]

//! Property-based tests for the signup form:
//! feedback visibility, validation rules, query mirroring, submission reset.

use proptest::prelude::*;
use signup::{
    Feedback, FieldName, MemoryLocation, QueryAdapter, RecordingSink, SignupForm, SignupValues,
    SubmitOutcome, Validator, signup_schema,
};

fn blank_form() -> SignupForm<MemoryLocation> {
    SignupForm::mount(MemoryLocation::new("http://localhost/").unwrap())
}

fn text_field() -> impl Strategy<Value = FieldName> {
    prop_oneof![
        Just(FieldName::FirstName),
        Just(FieldName::LastName),
        Just(FieldName::Email),
        Just(FieldName::JobType),
    ]
}

// =============================================================================
// Feedback visibility
// =============================================================================

proptest! {
    #[test]
    fn error_shown_iff_visible_and_invalid(
        field in text_field(),
        value in "[ a-zA-Z0-9@.😀]{0,20}",
        focused in any::<bool>(),
        touched in any::<bool>(),
    ) {
        let mut form = blank_form();
        form.change_text(field, value.clone()).unwrap();
        if focused {
            form.focus(field);
        }
        if touched {
            form.blur(field);
        }

        let visible = (focused && value.trim().encode_utf16().count() > 2) || touched;
        let error = form.error(field).map(str::to_string);
        let expected = match (visible, error) {
            (false, _) => Feedback::Hidden,
            (true, Some(message)) => Feedback::Invalid(message),
            (true, None) => Feedback::Valid,
        };
        prop_assert_eq!(form.feedback(field), expected);
    }

    #[test]
    fn checkbox_error_only_when_touched(focused in any::<bool>(), touched in any::<bool>()) {
        let mut form = blank_form();
        if focused {
            form.focus(FieldName::AcceptedTerms);
        }
        if touched {
            form.blur(FieldName::AcceptedTerms);
        }
        prop_assert_eq!(form.feedback(FieldName::AcceptedTerms).is_invalid(), touched);
    }
}

// =============================================================================
// Validation rules
// =============================================================================

proptest! {
    #[test]
    fn first_name_accepts_alphanumeric_2_to_15(s in "[a-zA-Z0-9]{2,15}") {
        let values = SignupValues { first_name: s, ..SignupValues::default() };
        let errors = signup_schema().validate(&values);
        prop_assert_eq!(errors.error(FieldName::FirstName), None);
    }

    #[test]
    fn first_name_rejects_single_char(s in "[a-zA-Z0-9]") {
        let values = SignupValues { first_name: s, ..SignupValues::default() };
        let errors = signup_schema().validate(&values);
        prop_assert_eq!(
            errors.error(FieldName::FirstName),
            Some("The value is too short")
        );
    }

    #[test]
    fn last_name_rejects_symbols(a in "[a-z]{1,8}", sym in "[ !#%*_-]", b in "[a-z]{1,8}") {
        let values = SignupValues {
            last_name: format!("{a}{sym}{b}"),
            ..SignupValues::default()
        };
        let errors = signup_schema().validate(&values);
        prop_assert_eq!(
            errors.error(FieldName::LastName),
            Some("Cannot contain special characters or spaces")
        );
    }

    #[test]
    fn email_without_at_fails_once_touched(s in "[a-z.-]{1,20}") {
        let mut form = blank_form();
        form.change_text(FieldName::Email, s).unwrap();
        form.blur(FieldName::Email);
        prop_assert_eq!(
            form.feedback(FieldName::Email),
            Feedback::Invalid("Invalid email address".into())
        );
    }

    #[test]
    fn well_formed_email_passes(
        local in "[a-z][a-z0-9]{0,10}",
        domain in "[a-z]{1,10}",
        tld in "[a-z]{2,5}",
    ) {
        let values = SignupValues {
            email: format!("{local}@{domain}.{tld}"),
            ..SignupValues::default()
        };
        let errors = signup_schema().validate(&values);
        prop_assert_eq!(errors.error(FieldName::Email), None);
    }
}

// =============================================================================
// Query mirroring
// =============================================================================

proptest! {
    #[test]
    fn typing_mirrors_in_place(
        field in prop_oneof![Just(FieldName::FirstName), Just(FieldName::LastName), Just(FieldName::Email)],
        edits in proptest::collection::vec("\\PC{1,12}", 1..6),
    ) {
        let mut form = blank_form();
        for edit in &edits {
            form.change_text(field, edit.clone()).unwrap();
        }
        let last = edits.last().unwrap();
        let read = form.query().read();
        prop_assert_eq!(read.get(field.as_str()), Some(last.as_str()));
        prop_assert_eq!(form.query().read().len(), 1);
        prop_assert_eq!(form.query().history_len(), 1);
    }

    #[test]
    fn stored_value_keeps_surrounding_whitespace(core in "[a-z]{1,5}", pad in "[ ]{1,3}") {
        let mut form = blank_form();
        let padded = format!("{pad}{core}{pad}");
        form.change_text(FieldName::FirstName, padded.clone()).unwrap();
        prop_assert_eq!(&form.values().first_name, &padded);
    }
}

// =============================================================================
// Submission
// =============================================================================

proptest! {
    #[test]
    fn successful_submit_restores_defaults_and_clears_query(
        first in "[a-zA-Z0-9]{2,15}",
        last in "[a-zA-Z0-9]{2,20}",
        prefill in proptest::option::of("[a-z]{1,6}@[a-z]{1,6}\\.com"),
    ) {
        let href = match &prefill {
            Some(email) => format!("http://localhost/?email={}", email.replace('@', "%40")),
            None => "http://localhost/".to_string(),
        };
        let mut form = SignupForm::mount(MemoryLocation::new(&href).unwrap());
        form.change_text(FieldName::FirstName, first).unwrap();
        form.change_text(FieldName::LastName, last).unwrap();
        form.change_text(FieldName::Email, "someone@example.com").unwrap();
        form.change_text(FieldName::JobType, "other").unwrap();
        form.set_checked(FieldName::AcceptedTerms, true).unwrap();

        let mut sink = RecordingSink::new();
        let outcome = form.submit(&mut sink);

        prop_assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
        prop_assert_eq!(sink.len(), 1);
        prop_assert_eq!(form.values(), form.initial_values());
        prop_assert_eq!(form.values().email.as_str(), prefill.as_deref().unwrap_or(""));
        prop_assert!(form.query().read().is_empty());
        prop_assert_eq!(form.query().history_len(), 1);
    }

    #[test]
    fn invalid_submit_never_reaches_sink(first in "[a-zA-Z0-9]?") {
        let mut form = blank_form();
        form.change_text(FieldName::FirstName, first).unwrap();
        form.change_text(FieldName::LastName, "Smith").unwrap();
        form.change_text(FieldName::Email, "someone@example.com").unwrap();
        form.change_text(FieldName::JobType, "designer").unwrap();
        form.set_checked(FieldName::AcceptedTerms, true).unwrap();

        let mut sink = RecordingSink::new();
        let outcome = form.submit(&mut sink);
        prop_assert!(!outcome.is_submitted());
        prop_assert!(sink.is_empty());
        prop_assert!(form.feedback(FieldName::FirstName).is_invalid());
    }
}
