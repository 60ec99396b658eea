//! Error types for config validation, sample loading and form state

use thiserror::Error;

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Broad class of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The envelope around the fields is wrong.
    Structural,
    /// A single field entry is malformed.
    FieldShape,
}

/// Reasons a config document is rejected.
///
/// Any of these rejects the whole document. Wrong-subtype values are not
/// represented here: they are dropped during normalization instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Top level is not an object
    #[error("config document must be a JSON object")]
    DocumentNotObject,

    /// `config` absent or null
    #[error("config document is missing `config`")]
    MissingConfig,

    /// `config` is not an object
    #[error("`config` must be an object")]
    ConfigNotObject,

    /// `config.fields` absent or null
    #[error("`config` is missing `fields`")]
    MissingFields,

    /// `config.fields` is not an array
    #[error("`config.fields` must be an array")]
    FieldsNotArray,

    /// A field entry is not an object
    #[error("field {index} must be an object")]
    FieldNotObject { index: usize },

    /// Required `id`, `type` or `label` absent or null
    #[error("field {index} is missing required attribute `{attribute}`")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },

    /// Attribute present with the wrong JSON type
    #[error("field {index} attribute `{attribute}` must be {expected}")]
    InvalidAttribute {
        index: usize,
        attribute: &'static str,
        expected: &'static str,
    },

    /// Field `id` is the empty string
    #[error("field {index} has an empty id")]
    EmptyId { index: usize },

    /// `type` is not a known field type
    #[error("field {index} ('{id}') has unknown type '{type_name}'")]
    UnknownFieldType {
        index: usize,
        id: String,
        type_name: String,
    },

    /// `hidden` was removed from the field union
    #[error("field {index} ('{id}') uses the retired 'hidden' type")]
    LegacyHiddenField { index: usize, id: String },

    /// Malformed entry in a select's `options`
    #[error("field {index} ('{id}') option {option}: {reason}")]
    InvalidOption {
        index: usize,
        id: String,
        option: usize,
        reason: &'static str,
    },

    /// `label-class` is not a known info class
    #[error("field {index} ('{id}') has unknown label-class '{value}'")]
    UnknownInfoClass {
        index: usize,
        id: String,
        value: String,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::DocumentNotObject
            | ValidationError::MissingConfig
            | ValidationError::ConfigNotObject
            | ValidationError::MissingFields
            | ValidationError::FieldsNotArray => ValidationErrorKind::Structural,
            ValidationError::FieldNotObject { .. }
            | ValidationError::MissingAttribute { .. }
            | ValidationError::InvalidAttribute { .. }
            | ValidationError::EmptyId { .. }
            | ValidationError::UnknownFieldType { .. }
            | ValidationError::LegacyHiddenField { .. }
            | ValidationError::InvalidOption { .. }
            | ValidationError::UnknownInfoClass { .. } => ValidationErrorKind::FieldShape,
        }
    }

    /// Position of the offending field, for field-shape errors.
    pub fn field_index(&self) -> Option<usize> {
        match self {
            ValidationError::DocumentNotObject
            | ValidationError::MissingConfig
            | ValidationError::ConfigNotObject
            | ValidationError::MissingFields
            | ValidationError::FieldsNotArray => None,
            ValidationError::FieldNotObject { index }
            | ValidationError::MissingAttribute { index, .. }
            | ValidationError::InvalidAttribute { index, .. }
            | ValidationError::EmptyId { index }
            | ValidationError::UnknownFieldType { index, .. }
            | ValidationError::LegacyHiddenField { index, .. }
            | ValidationError::InvalidOption { index, .. }
            | ValidationError::UnknownInfoClass { index, .. } => Some(*index),
        }
    }
}

/// Errors that can occur loading a config document
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Document failed validation
    #[error("invalid config document: {0}")]
    Validation(#[from] ValidationError),

    /// JSON text could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No sample with this name
    #[error("unknown sample config: {name}")]
    UnknownSample { name: String },
}

/// Errors raised when the form collaborator edits form state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// No input control with this id
    #[error("no form control with id '{id}'")]
    UnknownField { id: String },

    /// Value subtype does not fit the control
    #[error("form control '{id}' expects a {expected} value, got {actual}")]
    WrongValueType {
        id: String,
        expected: &'static str,
        actual: String,
    },

    /// Picker value is not one of the option ids
    #[error("'{value}' is not an option of select '{id}'")]
    UnknownOption { id: String, value: String },

    /// Edit to a disabled control
    #[error("form control '{id}' is disabled")]
    Disabled { id: String },
}
