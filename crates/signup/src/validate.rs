//! The validation engine.
//!
//! A [`Validator`] turns the full value set into a [`ValidationResult`]. The
//! stock engine is a declarative [`Schema`]: an ordered list of [`Rule`]s per
//! field where the first failing rule supplies the field's message.
//! [`signup_schema`] builds the rules of the signup form.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::field::{FieldName, JobType};
use crate::values::{FieldValue, SignupValues};

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("alphanumeric pattern compiles"));

// Same shape browsers use for `<input type="email">`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

// -----------------------------------------------------------------------------
// ValidationResult
// -----------------------------------------------------------------------------

/// Per-field error messages. Fields without an entry are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<FieldName, String>,
}

impl ValidationResult {
    /// Creates an empty (all valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field, replacing any previous one.
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// The error of a field, if any.
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns true when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates `(field, message)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

// -----------------------------------------------------------------------------
// Validator
// -----------------------------------------------------------------------------

/// Computes validation errors for a value set.
///
/// Implementations must be synchronous and side-effect free; the form calls
/// them after every change.
pub trait Validator {
    /// Validates the full value set.
    fn validate(&self, values: &SignupValues) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&SignupValues) -> ValidationResult,
{
    fn validate(&self, values: &SignupValues) -> ValidationResult {
        self(values)
    }
}

// -----------------------------------------------------------------------------
// Rules
// -----------------------------------------------------------------------------

/// Length of `text` in UTF-16 code units, the unit browsers report.
///
/// Characters outside the Basic Multilingual Plane count twice.
///
/// ```
/// assert_eq!(signup::validate::text_length("ab"), 2);
/// assert_eq!(signup::validate::text_length("😀"), 2);
/// ```
#[must_use]
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// A single declarative constraint.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Text has at least `min` UTF-16 code units.
    MinLength {
        /// Minimum length.
        min: usize,
        /// Message when violated.
        message: String,
    },
    /// Text has at most `max` UTF-16 code units.
    MaxLength {
        /// Maximum length.
        max: usize,
        /// Message when violated.
        message: String,
    },
    /// Text matches a pattern. The empty string must match too.
    Matches {
        /// Pattern the whole text must satisfy.
        pattern: Regex,
        /// Message when violated.
        message: String,
    },
    /// Text is a well-formed email address. Empty text is left to
    /// [`Rule::Required`].
    Email {
        /// Message when violated.
        message: String,
    },
    /// Text is not empty.
    Required {
        /// Message when violated.
        message: String,
    },
    /// Text is one of the allowed values.
    OneOf {
        /// Accepted values.
        allowed: Vec<String>,
        /// Message when violated.
        message: String,
    },
    /// Checkbox is checked.
    MustBeTrue {
        /// Message when violated.
        message: String,
    },
}

impl Rule {
    /// Shorthand for [`Rule::MinLength`].
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::MaxLength`].
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength {
            max,
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::Matches`].
    pub fn matches(pattern: Regex, message: impl Into<String>) -> Self {
        Self::Matches {
            pattern,
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::Email`].
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::Required`].
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::OneOf`].
    pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Shorthand for [`Rule::MustBeTrue`].
    pub fn must_be_true(message: impl Into<String>) -> Self {
        Self::MustBeTrue {
            message: message.into(),
        }
    }

    /// Checks a value, returning the message when the rule is violated.
    ///
    /// Text rules pass for checkbox values and vice versa.
    pub fn check(&self, value: &FieldValue) -> Option<&str> {
        let failed = match (self, value) {
            (Self::MinLength { min, .. }, FieldValue::Text(s)) => text_length(s) < *min,
            (Self::MaxLength { max, .. }, FieldValue::Text(s)) => text_length(s) > *max,
            (Self::Matches { pattern, .. }, FieldValue::Text(s)) => !pattern.is_match(s),
            (Self::Email { .. }, FieldValue::Text(s)) => !s.is_empty() && !EMAIL.is_match(s),
            (Self::Required { .. }, FieldValue::Text(s)) => s.is_empty(),
            (Self::OneOf { allowed, .. }, FieldValue::Text(s)) => !allowed.iter().any(|a| a == s),
            (Self::MustBeTrue { .. }, FieldValue::Checked(b)) => !b,
            _ => false,
        };
        failed.then(|| self.message())
    }

    /// The message reported when the rule is violated.
    pub fn message(&self) -> &str {
        match self {
            Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Matches { message, .. }
            | Self::Email { message }
            | Self::Required { message }
            | Self::OneOf { message, .. }
            | Self::MustBeTrue { message } => message,
        }
    }
}

// -----------------------------------------------------------------------------
// Schema
// -----------------------------------------------------------------------------

/// Ordered rules per field.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(FieldName, Vec<Rule>)>,
}

impl Schema {
    /// Creates a schema without rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rules of a field, replacing earlier ones.
    pub fn field(mut self, name: FieldName, rules: Vec<Rule>) -> Self {
        self.fields.retain(|(n, _)| *n != name);
        self.fields.push((name, rules));
        self
    }

    /// The rules of a field.
    pub fn rules(&self, name: FieldName) -> &[Rule] {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or_default()
    }

    /// Checks a single field value against its rules.
    pub fn check_field(&self, name: FieldName, value: &FieldValue) -> Option<&str> {
        self.rules(name).iter().find_map(|rule| rule.check(value))
    }
}

impl Validator for Schema {
    fn validate(&self, values: &SignupValues) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, _) in &self.fields {
            if let Some(message) = self.check_field(*name, &values.get(*name)) {
                result.insert(*name, message);
            }
        }
        result
    }
}

/// The rules of the signup form.
pub fn signup_schema() -> Schema {
    Schema::new()
        .field(
            FieldName::FirstName,
            vec![
                Rule::min_length(2, "The value is too short"),
                Rule::max_length(15, "Must be 15 characters or less"),
                Rule::matches(
                    ALPHANUMERIC.clone(),
                    "Cannot contain special characters or spaces",
                ),
                Rule::required("First name is required"),
            ],
        )
        .field(
            FieldName::LastName,
            vec![
                Rule::min_length(2, "The value is too short"),
                Rule::max_length(20, "Must be 20 characters or less"),
                Rule::matches(
                    ALPHANUMERIC.clone(),
                    "Cannot contain special characters or spaces",
                ),
                Rule::required("Last name is required"),
            ],
        )
        .field(
            FieldName::Email,
            vec![
                Rule::email("Invalid email address"),
                Rule::required("Email is required"),
            ],
        )
        .field(
            FieldName::AcceptedTerms,
            vec![Rule::must_be_true(
                "You must accept the terms and conditions.",
            )],
        )
        .field(
            FieldName::JobType,
            vec![
                Rule::one_of(JobType::ALL.map(JobType::as_str), "Invalid Job Type"),
                Rule::required("Required"),
            ],
        )
}
