//! Typed descriptors for the fields of the signup form.
//!
//! Every field is named by a [`FieldName`] and described by a static
//! [`FieldDescriptor`] carrying its widget kind and rendering props. Front
//! ends iterate [`SIGNUP_FIELDS`] instead of looking fields up by string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

// -----------------------------------------------------------------------------
// Field names
// -----------------------------------------------------------------------------

/// The fields of the signup form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Given name, a text input.
    FirstName,
    /// Family name, a text input.
    LastName,
    /// Email address, a text input.
    Email,
    /// Job type, a dropdown.
    JobType,
    /// Terms acceptance, a checkbox.
    AcceptedTerms,
}

impl FieldName {
    /// Number of fields in the form.
    pub const COUNT: usize = 5;

    /// All fields in display order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::JobType,
        Self::AcceptedTerms,
    ];

    /// The wire name of the field, as used for query keys and records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::JobType => "jobType",
            Self::AcceptedTerms => "acceptedTerms",
        }
    }

    /// Position of the field in [`FieldName::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The static descriptor for this field.
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &SIGNUP_FIELDS[self.index()]
    }

    /// The widget kind of this field.
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::FirstName | Self::LastName | Self::Email => FieldKind::Text,
            Self::JobType => FieldKind::Select,
            Self::AcceptedTerms => FieldKind::Checkbox,
        }
    }

    /// Whether edits of this field are mirrored into the query string.
    ///
    /// Only free-text inputs are mirrored; the dropdown and the checkbox
    /// never appear in the address bar.
    pub const fn mirrors_query(self) -> bool {
        matches!(self.kind(), FieldKind::Text)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Field kinds and descriptors
// -----------------------------------------------------------------------------

/// The kind of widget a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input storing a string.
    Text,
    /// Dropdown storing the selected option value.
    Select,
    /// Checkbox storing a boolean.
    Checkbox,
}

impl FieldKind {
    /// Human name of the value this kind stores, used in error messages.
    pub const fn value_kind(self) -> &'static str {
        match self {
            Self::Text | Self::Select => "string",
            Self::Checkbox => "boolean",
        }
    }
}

/// Static rendering props of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field this descriptor belongs to.
    pub name: FieldName,
    /// Widget kind.
    pub kind: FieldKind,
    /// Label shown next to the widget.
    pub label: &'static str,
    /// Placeholder shown while a text input is empty.
    pub placeholder: &'static str,
}

impl FieldDescriptor {
    /// Id of the live region that announces feedback for this field.
    pub fn feedback_id(&self) -> String {
        format!("{}-feedback", self.name)
    }

    /// Id of the help text attached to this field.
    pub fn help_id(&self) -> String {
        format!("{}-help", self.name)
    }

    /// Value for the widget's `aria-describedby` attribute.
    pub fn described_by(&self) -> String {
        format!("{} {}", self.feedback_id(), self.help_id())
    }
}

/// Descriptors for every field, indexed by [`FieldName::index`].
pub static SIGNUP_FIELDS: [FieldDescriptor; FieldName::COUNT] = [
    FieldDescriptor {
        name: FieldName::FirstName,
        kind: FieldKind::Text,
        label: "First Name",
        placeholder: "Name",
    },
    FieldDescriptor {
        name: FieldName::LastName,
        kind: FieldKind::Text,
        label: "Last Name",
        placeholder: "Surname",
    },
    FieldDescriptor {
        name: FieldName::Email,
        kind: FieldKind::Text,
        label: "Email Address",
        placeholder: "Email",
    },
    FieldDescriptor {
        name: FieldName::JobType,
        kind: FieldKind::Select,
        label: "Job Type",
        placeholder: "",
    },
    FieldDescriptor {
        name: FieldName::AcceptedTerms,
        kind: FieldKind::Checkbox,
        label: "I accept the terms and conditions",
        placeholder: "",
    },
];

// -----------------------------------------------------------------------------
// Job types
// -----------------------------------------------------------------------------

/// The accepted values of the job type dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// Designer.
    Designer,
    /// Developer.
    Development,
    /// Product manager.
    Product,
    /// Anything else.
    Other,
}

impl JobType {
    /// All job types in dropdown order.
    pub const ALL: [Self; 4] = [Self::Designer, Self::Development, Self::Product, Self::Other];

    /// Stored value of the option.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Designer => "designer",
            Self::Development => "development",
            Self::Product => "product",
            Self::Other => "other",
        }
    }

    /// Label shown in the dropdown.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Designer => "Designer",
            Self::Development => "Developer",
            Self::Product => "Product Manager",
            Self::Other => "Other",
        }
    }

    /// Looks up a job type by its stored value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.as_str() == value)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Display label.
    pub label: &'static str,
    /// Stored value; empty for the placeholder entry.
    pub value: &'static str,
}

/// Entries of the job type dropdown, starting with the empty placeholder.
pub const JOB_TYPE_OPTIONS: [SelectOption; 5] = [
    SelectOption {
        label: "Select a job type",
        value: "",
    },
    SelectOption {
        label: JobType::Designer.label(),
        value: JobType::Designer.as_str(),
    },
    SelectOption {
        label: JobType::Development.label(),
        value: JobType::Development.as_str(),
    },
    SelectOption {
        label: JobType::Product.label(),
        value: JobType::Product.as_str(),
    },
    SelectOption {
        label: JobType::Other.label(),
        value: JobType::Other.as_str(),
    },
];

/// Label of the dropdown entry holding `value`, if any.
pub fn job_type_label(value: &str) -> Option<&'static str> {
    JOB_TYPE_OPTIONS
        .iter()
        .find(|opt| opt.value == value)
        .map(|opt| opt.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_are_indexed_by_name() {
        for name in FieldName::ALL {
            assert_eq!(name.descriptor().name, name);
            assert_eq!(name.descriptor().kind, name.kind());
        }
    }

    #[test]
    fn field_name_round_trips_through_str() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>(), Ok(name));
        }
        assert_eq!(
            "age".parse::<FieldName>(),
            Err(FormError::UnknownField("age".into()))
        );
    }

    #[test]
    fn only_text_fields_mirror_query() {
        let mirrored: Vec<_> = FieldName::ALL
            .into_iter()
            .filter(|f| f.mirrors_query())
            .collect();
        assert_eq!(
            mirrored,
            vec![FieldName::FirstName, FieldName::LastName, FieldName::Email]
        );
    }

    #[test]
    fn aria_ids() {
        let email = FieldName::Email.descriptor();
        assert_eq!(email.feedback_id(), "email-feedback");
        assert_eq!(email.described_by(), "email-feedback email-help");
    }

    #[test]
    fn job_type_options() {
        assert_eq!(JOB_TYPE_OPTIONS[0].value, "");
        assert_eq!(job_type_label("development"), Some("Developer"));
        assert_eq!(job_type_label("manager"), None);
        assert_eq!(JobType::from_value("product"), Some(JobType::Product));
        assert_eq!(JobType::from_value("Product"), None);
    }
}
