//! Validation and normalization of untrusted config documents.
//!
//! The input usually comes straight from an HTTP response, so nothing about
//! its shape is assumed. Two rules drive the normalization:
//!
//! - **null is absent**: every optional attribute is read through [`optional`],
//!   so a producer that serializes `"placeholder": null` yields exactly the same
//!   document as one that omits the key.
//! - **render over reject**: an interactive `value` of the wrong subtype is
//!   dropped and the field is kept. Everything else that is malformed rejects
//!   the whole document.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{FieldsError, ValidationError};
use crate::types::{
    CheckboxField, ConfigDocument, ConfigField, ConfigFieldValue, FieldTypeTag, InfoClass,
    LabelField, SelectField, SelectOption, TextField,
};

/// Retired field type, still recognized so it can be refused explicitly.
pub const LEGACY_HIDDEN_TYPE: &str = "hidden";

/// Attributes that only make sense on interactive fields.
const INTERACTIVE_ONLY: [&str; 4] = ["value", "placeholder", "options", "disabled"];

type Validated<T> = std::result::Result<T, ValidationError>;

/// Treat an explicit JSON null exactly like a missing key.
///
/// Every optional attribute in the schema goes through this one function.
pub fn optional(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Validate an untyped JSON value into a [`ConfigDocument`].
pub fn validate(raw: &Value) -> Validated<ConfigDocument> {
    let root = raw.as_object().ok_or(ValidationError::DocumentNotObject)?;
    let config = optional(root.get("config"))
        .ok_or(ValidationError::MissingConfig)?
        .as_object()
        .ok_or(ValidationError::ConfigNotObject)?;
    let entries = optional(config.get("fields"))
        .ok_or(ValidationError::MissingFields)?
        .as_array()
        .ok_or(ValidationError::FieldsNotArray)?;

    let fields = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_field(index, entry))
        .collect::<Validated<Vec<_>>>()?;

    debug!(fields = fields.len(), "config document validated");
    Ok(ConfigDocument::new(fields))
}

/// Parse JSON text and validate it.
pub fn parse_document(json: &str) -> crate::Result<ConfigDocument> {
    let raw: Value = serde_json::from_str(json)?;
    validate(&raw).map_err(FieldsError::from)
}

/// Ids that appear on more than one field, in order of first repetition.
///
/// Consumers key form state and render slots on `id`, but uniqueness is not a
/// validation rule; callers decide what to do with the report.
pub fn duplicate_ids(doc: &ConfigDocument) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for field in doc.fields() {
        let id = field.id();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}

fn validate_field(index: usize, entry: &Value) -> Validated<ConfigField> {
    let object = entry
        .as_object()
        .ok_or(ValidationError::FieldNotObject { index })?;
    let reader = FieldReader { index, object };

    let id = reader.required_str("id")?;
    if id.is_empty() {
        return Err(ValidationError::EmptyId { index });
    }
    let type_name = reader.required_str("type")?;
    if type_name == LEGACY_HIDDEN_TYPE {
        return Err(ValidationError::LegacyHiddenField {
            index,
            id: id.to_string(),
        });
    }
    let tag: FieldTypeTag = type_name
        .parse()
        .map_err(|_| ValidationError::UnknownFieldType {
            index,
            id: id.to_string(),
            type_name: type_name.to_string(),
        })?;
    let label = reader.required_str("label")?.to_string();
    let id = id.to_string();

    let field = match tag {
        FieldTypeTag::Select => ConfigField::Select(SelectField {
            value: reader.value(&id, tag),
            options: reader.options(&id)?,
            disabled: reader.disabled()?,
            id,
            label,
        }),
        FieldTypeTag::Checkbox => ConfigField::Checkbox(CheckboxField {
            value: reader.value(&id, tag),
            disabled: reader.disabled()?,
            id,
            label,
        }),
        FieldTypeTag::Text => ConfigField::Text(TextField {
            value: reader.value(&id, tag),
            placeholder: reader.optional_str("placeholder")?,
            disabled: reader.disabled()?,
            id,
            label,
        }),
        FieldTypeTag::Header => ConfigField::Header(reader.label_field(id, label)?),
        FieldTypeTag::Subheader => ConfigField::Subheader(reader.label_field(id, label)?),
        FieldTypeTag::Paragraph => ConfigField::Paragraph(reader.label_field(id, label)?),
    };

    trace!(index, id = %field.id(), field_type = %tag, "field validated");
    Ok(field)
}

/// Typed access to one field object, carrying its index for error reporting.
struct FieldReader<'a> {
    index: usize,
    object: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    fn optional(&self, key: &str) -> Option<&'a Value> {
        optional(self.object.get(key))
    }

    fn required_str(&self, key: &'static str) -> Validated<&'a str> {
        let value = self
            .optional(key)
            .ok_or(ValidationError::MissingAttribute {
                index: self.index,
                attribute: key,
            })?;
        value.as_str().ok_or(ValidationError::InvalidAttribute {
            index: self.index,
            attribute: key,
            expected: "a string",
        })
    }

    fn optional_str(&self, key: &'static str) -> Validated<Option<String>> {
        self.optional(key)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or(ValidationError::InvalidAttribute {
                        index: self.index,
                        attribute: key,
                        expected: "a string",
                    })
            })
            .transpose()
    }

    fn disabled(&self) -> Validated<bool> {
        self.optional("disabled")
            .map(|value| {
                value.as_bool().ok_or(ValidationError::InvalidAttribute {
                    index: self.index,
                    attribute: "disabled",
                    expected: "a boolean",
                })
            })
            .transpose()
            .map(|disabled| disabled.unwrap_or(false))
    }

    /// Keep `value` only if it can belong to a field of type `tag`.
    ///
    /// Numbers survive for forward-compatibility; the mapper coerces them.
    fn value(&self, id: &str, tag: FieldTypeTag) -> Option<ConfigFieldValue> {
        let raw = self.optional("value")?;
        let Some(value) = ConfigFieldValue::from_json(raw) else {
            debug!(id, field_type = %tag, "dropping non-scalar value");
            return None;
        };
        if tag.accepts(&value) || value.is_number() {
            Some(value)
        } else {
            debug!(
                id,
                field_type = %tag,
                found = value.type_name(),
                "dropping value of the wrong type"
            );
            None
        }
    }

    fn options(&self, id: &str) -> Validated<Vec<SelectOption>> {
        let Some(raw) = self.optional("options") else {
            return Ok(Vec::new());
        };
        let entries = raw.as_array().ok_or(ValidationError::InvalidAttribute {
            index: self.index,
            attribute: "options",
            expected: "an array",
        })?;
        entries
            .iter()
            .enumerate()
            .map(|(option, entry)| self.option(id, option, entry))
            .collect()
    }

    fn option(&self, id: &str, option: usize, entry: &Value) -> Validated<SelectOption> {
        let invalid = |reason| ValidationError::InvalidOption {
            index: self.index,
            id: id.to_string(),
            option,
            reason,
        };
        let object = entry.as_object().ok_or_else(|| invalid("must be an object"))?;
        let text = |key: &str, missing: &'static str, wrong: &'static str| -> Validated<String> {
            match optional(object.get(key)) {
                None => Err(invalid(missing)),
                Some(value) => value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid(wrong)),
            }
        };
        let option_id = text("id", "missing `id`", "`id` must be a string")?;
        let label = text("label", "missing `label`", "`label` must be a string")?;
        Ok(SelectOption::new(option_id, label))
    }

    fn label_field(&self, id: String, label: String) -> Validated<LabelField> {
        for key in INTERACTIVE_ONLY {
            if self.optional(key).is_some() {
                trace!(id = %id, attribute = key, "ignoring interactive attribute on label field");
            }
        }
        let label_class = self
            .optional_str("label-class")?
            .map(|class| {
                class
                    .parse::<InfoClass>()
                    .map_err(|_| ValidationError::UnknownInfoClass {
                        index: self.index,
                        id: id.clone(),
                        value: class.to_string(),
                    })
            })
            .transpose()?;
        Ok(LabelField {
            label_markdown: self.optional_str("label-markdown")?,
            label_html: self.optional_str("label-html")?,
            label_class,
            id,
            label,
        })
    }
}
