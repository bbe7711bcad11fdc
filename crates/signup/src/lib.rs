#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Signup
//!
//! State and behaviour of a signup form, independent of how it is drawn.
//!
//! The crate provides:
//! - Typed field descriptors ([`FieldName`], [`SIGNUP_FIELDS`])
//! - Field binding: focus/touch flags and inline feedback ([`FieldUiState`], [`Feedback`])
//! - A swappable validation engine ([`Validator`], [`Schema`], [`signup_schema`])
//! - Query string synchronization through an explicit adapter ([`QueryAdapter`])
//! - The orchestrator tying it together ([`SignupForm`]) and submit sinks ([`Sink`])
//!
//! ## Example
//!
//! ```
//! use signup::{Feedback, FieldName, MemoryLocation, QueryAdapter, SignupForm};
//!
//! let mut form = SignupForm::mount(MemoryLocation::new("http://localhost/").unwrap());
//!
//! form.focus(FieldName::FirstName);
//! form.change_text(FieldName::FirstName, "John").unwrap();
//!
//! // The value is mirrored into the address bar as it is typed.
//! assert_eq!(form.query().read().get("firstName"), Some("John"));
//! assert_eq!(form.feedback(FieldName::FirstName), Feedback::Valid);
//! ```

pub mod binding;
pub mod error;
pub mod field;
pub mod form;
pub mod query;
pub mod sink;
pub mod validate;
pub mod values;

pub use binding::{
    FOCUS_FEEDBACK_THRESHOLD, Feedback, FieldUiState, FieldView, SUCCESS_INDICATOR, Status,
};
pub use error::{FormError, Result};
pub use field::{
    FieldDescriptor, FieldKind, FieldName, JOB_TYPE_OPTIONS, JobType, SIGNUP_FIELDS, SelectOption,
    job_type_label,
};
pub use form::{SUBMIT_LABEL, SUBMITTING_LABEL, SignupForm, SubmitOutcome, SubmitState};
pub use query::{MemoryLocation, QueryAdapter, QueryState};
pub use sink::{JsonSink, RecordingSink, Sink, to_json_record};
pub use validate::{Rule, Schema, ValidationResult, Validator, signup_schema};
pub use values::{FieldValue, SignupValues};
