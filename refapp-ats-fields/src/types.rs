//! Core config document and field types.
//!
//! These types mirror the wire shape of an ATS config document. Instances are
//! produced by [`crate::validation::validate`], never by a plain derive, so every
//! value here is already normalized: null optionals are `None`, and interactive
//! values that could not belong to their field have been dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// A single option in a select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A scalar value carried by an interactive field or held in form state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConfigFieldValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl ConfigFieldValue {
    /// Convert a JSON value, returning `None` for null, arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Name of the runtime subtype, for log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

impl From<bool> for ConfigFieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ConfigFieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigFieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Severity/styling tag attached to label fields (`label-class`).
///
/// Iteration (`InfoClass::iter()`) and parsing are derived from the variants.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InfoClass {
    Info,
    Warning,
    Error,
    Success,
    Default,
}

impl InfoClass {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for InfoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` discriminant of a config field.
///
/// The wire names, `FieldTypeTag::iter()` and `FromStr` all come from the
/// variant list, so a new variant is parseable as soon as it exists.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FieldTypeTag {
    Select,
    Checkbox,
    Text,
    Header,
    Subheader,
    Paragraph,
}

impl FieldTypeTag {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Interactive fields carry a value and become form keys.
    pub fn is_interactive(self) -> bool {
        match self {
            FieldTypeTag::Select | FieldTypeTag::Checkbox | FieldTypeTag::Text => true,
            FieldTypeTag::Header | FieldTypeTag::Subheader | FieldTypeTag::Paragraph => false,
        }
    }

    /// Whether `value` is the subtype this field type declares.
    pub fn accepts(self, value: &ConfigFieldValue) -> bool {
        match self {
            FieldTypeTag::Checkbox => matches!(value, ConfigFieldValue::Bool(_)),
            FieldTypeTag::Select | FieldTypeTag::Text => {
                matches!(value, ConfigFieldValue::String(_))
            }
            FieldTypeTag::Header | FieldTypeTag::Subheader | FieldTypeTag::Paragraph => false,
        }
    }
}

impl fmt::Display for FieldTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckboxField {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigFieldValue>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextField {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigFieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

/// A single-choice field. Absent and empty `options` both normalize to an empty list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectField {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConfigFieldValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

/// Shared shape of `header`, `subheader` and `paragraph` fields.
///
/// `label-html` is carried for round-tripping only; nothing in this crate renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LabelField {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_class: Option<InfoClass>,
}

/// One entry of `config.fields`, keyed on the wire by `type`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ConfigField {
    Select(SelectField),
    Checkbox(CheckboxField),
    Text(TextField),
    Header(LabelField),
    Subheader(LabelField),
    Paragraph(LabelField),
}

impl ConfigField {
    pub fn tag(&self) -> FieldTypeTag {
        match self {
            ConfigField::Select(_) => FieldTypeTag::Select,
            ConfigField::Checkbox(_) => FieldTypeTag::Checkbox,
            ConfigField::Text(_) => FieldTypeTag::Text,
            ConfigField::Header(_) => FieldTypeTag::Header,
            ConfigField::Subheader(_) => FieldTypeTag::Subheader,
            ConfigField::Paragraph(_) => FieldTypeTag::Paragraph,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ConfigField::Select(f) => &f.id,
            ConfigField::Checkbox(f) => &f.id,
            ConfigField::Text(f) => &f.id,
            ConfigField::Header(f) | ConfigField::Subheader(f) | ConfigField::Paragraph(f) => &f.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ConfigField::Select(f) => &f.label,
            ConfigField::Checkbox(f) => &f.label,
            ConfigField::Text(f) => &f.label,
            ConfigField::Header(f) | ConfigField::Subheader(f) | ConfigField::Paragraph(f) => {
                &f.label
            }
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.tag().is_interactive()
    }
}

/// The `config` object of a document.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Config {
    pub fields: Vec<ConfigField>,
}

/// A validated config document: `{ "config": { "fields": [...] } }`.
///
/// Deserializing goes through [`crate::validation::validate`], so
/// `serde_json::from_str::<ConfigDocument>` applies the same rules as calling
/// the validator directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Value")]
pub struct ConfigDocument {
    pub config: Config,
}

impl ConfigDocument {
    pub fn new(fields: Vec<ConfigField>) -> Self {
        Self {
            config: Config { fields },
        }
    }

    /// Fields in render order.
    pub fn fields(&self) -> &[ConfigField] {
        &self.config.fields
    }

    pub fn len(&self) -> usize {
        self.config.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.fields.is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&ConfigField> {
        self.config.fields.iter().find(|f| f.id() == id)
    }
}

impl TryFrom<Value> for ConfigDocument {
    type Error = crate::error::ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        crate::validation::validate(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    /// Wire names spelled out with no wildcard arm: a new variant must be
    /// added here before the tests compile.
    fn wire_name(tag: FieldTypeTag) -> &'static str {
        match tag {
            FieldTypeTag::Select => "select",
            FieldTypeTag::Checkbox => "checkbox",
            FieldTypeTag::Text => "text",
            FieldTypeTag::Header => "header",
            FieldTypeTag::Subheader => "subheader",
            FieldTypeTag::Paragraph => "paragraph",
        }
    }

    fn class_name(class: InfoClass) -> &'static str {
        match class {
            InfoClass::Info => "info",
            InfoClass::Warning => "warning",
            InfoClass::Error => "error",
            InfoClass::Success => "success",
            InfoClass::Default => "default",
        }
    }

    #[test]
    fn field_type_tag_round_trips_every_variant() {
        let tags: Vec<_> = FieldTypeTag::iter().collect();
        assert_eq!(tags.len(), 6);
        for tag in tags {
            let wire = wire_name(tag);
            assert_eq!(tag.as_str(), wire);
            assert_eq!(wire.parse::<FieldTypeTag>().unwrap(), tag);
            assert_eq!(serde_json::to_value(tag).unwrap(), json!(wire));
            assert_eq!(
                serde_json::from_value::<FieldTypeTag>(json!(wire)).unwrap(),
                tag
            );
        }
        assert!("bogus".parse::<FieldTypeTag>().is_err());
        assert!("hidden".parse::<FieldTypeTag>().is_err());
        assert!("Header".parse::<FieldTypeTag>().is_err());
    }

    #[test]
    fn info_class_round_trips_every_variant() {
        for class in InfoClass::iter() {
            let wire = class_name(class);
            assert_eq!(class.as_str(), wire);
            assert_eq!(wire.parse::<InfoClass>().unwrap(), class);
            assert_eq!(serde_json::to_value(class).unwrap(), json!(wire));
        }
        assert_eq!(InfoClass::iter().count(), 5);
        assert!("danger".parse::<InfoClass>().is_err());
    }

    #[test]
    fn interactive_tags() {
        let interactive: Vec<_> = FieldTypeTag::iter()
            .filter(|t| t.is_interactive())
            .collect();
        assert_eq!(
            interactive,
            vec![
                FieldTypeTag::Select,
                FieldTypeTag::Checkbox,
                FieldTypeTag::Text
            ]
        );
    }

    #[test]
    fn accepts_matches_declared_subtype() {
        let yes = ConfigFieldValue::from(true);
        let name = ConfigFieldValue::from("Ada");
        let number = ConfigFieldValue::Number(7.into());

        assert!(FieldTypeTag::Checkbox.accepts(&yes));
        assert!(!FieldTypeTag::Checkbox.accepts(&name));
        assert!(FieldTypeTag::Text.accepts(&name));
        assert!(FieldTypeTag::Select.accepts(&name));
        assert!(!FieldTypeTag::Text.accepts(&yes));
        assert!(!FieldTypeTag::Text.accepts(&number));
        assert!(!FieldTypeTag::Header.accepts(&name));
    }

    #[test]
    fn config_field_value_from_json_rejects_non_scalars() {
        assert_eq!(
            ConfigFieldValue::from_json(&json!("x")),
            Some(ConfigFieldValue::from("x"))
        );
        assert_eq!(
            ConfigFieldValue::from_json(&json!(false)),
            Some(ConfigFieldValue::Bool(false))
        );
        assert!(ConfigFieldValue::from_json(&json!(1.5)).unwrap().is_number());
        assert_eq!(ConfigFieldValue::from_json(&json!(null)), None);
        assert_eq!(ConfigFieldValue::from_json(&json!([1])), None);
        assert_eq!(ConfigFieldValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn config_field_serializes_with_type_tag_and_kebab_keys() {
        let field = ConfigField::Paragraph(LabelField {
            id: "intro".into(),
            label: "Welcome".into(),
            label_markdown: Some("**Welcome**".into()),
            label_html: None,
            label_class: Some(InfoClass::Warning),
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "paragraph",
                "id": "intro",
                "label": "Welcome",
                "label-markdown": "**Welcome**",
                "label-class": "warning"
            })
        );
    }

    #[test]
    fn interactive_field_omits_defaults_when_serialized() {
        let field = ConfigField::Checkbox(CheckboxField {
            id: "consent".into(),
            label: "I agree".into(),
            value: None,
            disabled: false,
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            json!({"type": "checkbox", "id": "consent", "label": "I agree"})
        );
    }

    #[test]
    fn document_deserialization_runs_validation() {
        let doc: ConfigDocument = serde_json::from_value(json!({
            "config": {"fields": [{"id": "a", "type": "text", "label": "A"}]}
        }))
        .unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.fields()[0].tag(), FieldTypeTag::Text);

        let err = serde_json::from_value::<ConfigDocument>(json!({"config": {}})).unwrap_err();
        assert!(err.to_string().contains("fields"));
    }

    #[test]
    fn document_lookup_by_id() {
        let doc = ConfigDocument::new(vec![ConfigField::Header(LabelField {
            id: "top".into(),
            label: "Top".into(),
            label_markdown: None,
            label_html: None,
            label_class: None,
        })]);
        assert_eq!(doc.field("top").map(|f| f.label()), Some("Top"));
        assert!(doc.field("missing").is_none());
    }
}
