//! Refapp ATS config fields
//!
//! `refapp-ats-fields` validates the JSON config document an ATS integration
//! serves (`{"config": {"fields": [...]}}`) and maps each field to a
//! toolkit-independent [`ControlDescriptor`] a form renderer can draw.
//!
//! # Architecture
//!
//! - **Validate, then map**: [`validate`] turns untrusted JSON into a
//!   [`ConfigDocument`]; [`describe`] and [`describe_document`] never fail on it
//! - **Null is absent**: every optional attribute treats `null` as missing
//! - **Render over reject**: wrong-subtype values fall back to defaults, while
//!   malformed envelopes and fields reject the whole document
//! - **Explicit form state**: [`FormState`] holds the `id -> value` mapping and
//!   produces the `webhook-data` submission envelope
//! - **Pure**: no I/O; fetching the document belongs to the caller

pub mod control;
pub mod error;
pub mod form;
pub mod samples;
pub mod types;
pub mod validation;

pub use control::{
    alert_severity, describe, describe_document, AlertSeverity, Control, ControlDescriptor,
    DisplayText, TextWeight,
};
pub use error::{FieldsError, FormError, Result, ValidationError, ValidationErrorKind};
pub use form::{FormState, WEBHOOK_DATA_KEY};
pub use samples::SampleConfig;
pub use strum::IntoEnumIterator;
pub use types::{
    CheckboxField, Config, ConfigDocument, ConfigField, ConfigFieldValue, FieldTypeTag, InfoClass,
    LabelField, SelectField, SelectOption, TextField,
};
pub use validation::{duplicate_ids, optional, parse_document, validate};
