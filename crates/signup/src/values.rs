//! Field values and the full value set of the form.

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::field::FieldName;
use crate::query::QueryState;

/// The value held by a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input or dropdown value.
    Text(String),
    /// Checkbox state.
    Checked(bool),
}

impl FieldValue {
    /// The string value, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Checked(_) => None,
        }
    }

    /// The boolean value, if this is a checkbox value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Checked(b) => Some(*b),
        }
    }

    /// Returns true for an empty string. Checkbox values are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Checked(b)
    }
}

/// The complete value set of the signup form.
///
/// Serializes with the camelCase wire names, which is the record handed to
/// the submit sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupValues {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Whether the terms were accepted.
    pub accepted_terms: bool,
    /// Selected job type value, empty when nothing is selected.
    pub job_type: String,
}

impl SignupValues {
    /// Builds the initial value set from a query string.
    ///
    /// Every mirrored field takes the first value present under its key;
    /// absent keys leave the field empty. The dropdown and checkbox always
    /// start from their defaults.
    pub fn from_query(query: &QueryState) -> Self {
        let pick = |field: FieldName| query.get(field.as_str()).unwrap_or_default().to_string();
        Self {
            first_name: pick(FieldName::FirstName),
            last_name: pick(FieldName::LastName),
            email: pick(FieldName::Email),
            accepted_terms: false,
            job_type: String::new(),
        }
    }

    /// The string value of a text or dropdown field.
    pub fn text(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::FirstName => Some(&self.first_name),
            FieldName::LastName => Some(&self.last_name),
            FieldName::Email => Some(&self.email),
            FieldName::JobType => Some(&self.job_type),
            FieldName::AcceptedTerms => None,
        }
    }

    /// The value of any field.
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::AcceptedTerms => FieldValue::Checked(self.accepted_terms),
            _ => FieldValue::Text(self.text(field).unwrap_or_default().to_string()),
        }
    }

    /// Replaces the value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::KindMismatch`] when the value does not fit the
    /// field's kind.
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<()> {
        let kind = field.kind();
        let (slot, text) = match (field, value) {
            (FieldName::AcceptedTerms, FieldValue::Checked(b)) => {
                self.accepted_terms = b;
                return Ok(());
            }
            (FieldName::FirstName, FieldValue::Text(s)) => (&mut self.first_name, s),
            (FieldName::LastName, FieldValue::Text(s)) => (&mut self.last_name, s),
            (FieldName::Email, FieldValue::Text(s)) => (&mut self.email, s),
            (FieldName::JobType, FieldValue::Text(s)) => (&mut self.job_type, s),
            _ => {
                return Err(FormError::KindMismatch {
                    field: field.as_str(),
                    expected: kind.value_kind(),
                });
            }
        };
        *slot = text;
        Ok(())
    }
}
