//! Mapping from validated config fields to toolkit-independent control descriptors.
//!
//! [`describe`] is total: every field type has an arm and the matches below
//! carry no wildcard, so a new [`ConfigField`] variant fails to compile until it
//! is mapped here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{
    CheckboxField, ConfigDocument, ConfigField, ConfigFieldValue, InfoClass, LabelField,
    SelectField, SelectOption, TextField,
};

/// Severity of the alert container wrapped around a label field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Success,
}

/// Alert wrapper for a `label-class`. `default` and absent mean plain text.
pub fn alert_severity(class: Option<InfoClass>) -> Option<AlertSeverity> {
    match class? {
        InfoClass::Info => Some(AlertSeverity::Info),
        InfoClass::Warning => Some(AlertSeverity::Warning),
        InfoClass::Error => Some(AlertSeverity::Error),
        InfoClass::Success => Some(AlertSeverity::Success),
        InfoClass::Default => None,
    }
}

/// Visual weight of display text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TextWeight {
    Heading,
    Subheading,
    Body,
}

/// Display text, either rich (markdown) or plain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "format", content = "text", rename_all = "kebab-case")]
pub enum DisplayText {
    Markdown(String),
    Plain(String),
}

impl DisplayText {
    pub fn text(&self) -> &str {
        match self {
            DisplayText::Markdown(text) | DisplayText::Plain(text) => text,
        }
    }
}

/// What to render for one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "control", rename_all = "kebab-case")]
pub enum Control {
    Toggle {
        initial: bool,
    },
    TextInput {
        initial: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Picker {
        options: Vec<SelectOption>,
        initial: String,
    },
    /// A select with nothing to choose from. Rendered as nothing.
    NoRender,
    Text {
        weight: TextWeight,
        content: DisplayText,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alert: Option<AlertSeverity>,
    },
}

/// Renderable description of one config field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlDescriptor {
    pub id: String,
    pub label: String,
    /// False for display text and for disabled inputs. Disabled inputs stay
    /// visible and keep their value.
    pub interactive: bool,
    #[serde(flatten)]
    pub control: Control,
}

impl ControlDescriptor {
    fn input(id: &str, label: &str, disabled: bool, control: Control) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            interactive: !disabled,
            control,
        }
    }

    pub fn is_rendered(&self) -> bool {
        !matches!(self.control, Control::NoRender)
    }

    pub fn is_disabled(&self) -> bool {
        self.is_input() && !self.interactive
    }

    /// Whether this descriptor is a form input, enabled or not.
    pub fn is_input(&self) -> bool {
        match self.control {
            Control::Toggle { .. } | Control::TextInput { .. } | Control::Picker { .. } => true,
            Control::NoRender | Control::Text { .. } => false,
        }
    }

    /// Initial form value, for inputs only.
    pub fn initial_value(&self) -> Option<ConfigFieldValue> {
        match &self.control {
            Control::Toggle { initial } => Some(ConfigFieldValue::Bool(*initial)),
            Control::TextInput { initial, .. } | Control::Picker { initial, .. } => {
                Some(ConfigFieldValue::String(initial.clone()))
            }
            Control::NoRender | Control::Text { .. } => None,
        }
    }
}

/// Describe one field.
pub fn describe(field: &ConfigField) -> ControlDescriptor {
    match field {
        ConfigField::Checkbox(f) => describe_checkbox(f),
        ConfigField::Text(f) => describe_text(f),
        ConfigField::Select(f) => describe_select(f),
        ConfigField::Header(f) => describe_label(f, TextWeight::Heading),
        ConfigField::Subheader(f) => describe_label(f, TextWeight::Subheading),
        ConfigField::Paragraph(f) => describe_label(f, TextWeight::Body),
    }
}

/// Describe every field of a document, in document order.
///
/// No-render selects are included so the output lines up one-to-one with
/// the input; filter on [`ControlDescriptor::is_rendered`] to drop them.
pub fn describe_document(doc: &ConfigDocument) -> Vec<ControlDescriptor> {
    doc.fields().iter().map(describe).collect()
}

fn describe_checkbox(field: &CheckboxField) -> ControlDescriptor {
    let initial = match &field.value {
        Some(ConfigFieldValue::Bool(b)) => *b,
        Some(other) => {
            coercion_notice(&field.id, other);
            false
        }
        None => false,
    };
    ControlDescriptor::input(
        &field.id,
        &field.label,
        field.disabled,
        Control::Toggle { initial },
    )
}

fn describe_text(field: &TextField) -> ControlDescriptor {
    let initial = match &field.value {
        Some(ConfigFieldValue::String(s)) => s.clone(),
        Some(other) => {
            coercion_notice(&field.id, other);
            String::new()
        }
        None => String::new(),
    };
    ControlDescriptor::input(
        &field.id,
        &field.label,
        field.disabled,
        Control::TextInput {
            initial,
            placeholder: field.placeholder.clone(),
        },
    )
}

fn describe_select(field: &SelectField) -> ControlDescriptor {
    if field.options.is_empty() {
        debug!(id = %field.id, "select has no options, not rendering");
        return ControlDescriptor {
            id: field.id.clone(),
            label: field.label.clone(),
            interactive: false,
            control: Control::NoRender,
        };
    }
    let initial = match &field.value {
        Some(ConfigFieldValue::String(s)) if field.options.iter().any(|o| &o.id == s) => {
            s.clone()
        }
        Some(other) => {
            coercion_notice(&field.id, other);
            String::new()
        }
        None => String::new(),
    };
    ControlDescriptor::input(
        &field.id,
        &field.label,
        field.disabled,
        Control::Picker {
            options: field.options.clone(),
            initial,
        },
    )
}

fn describe_label(field: &LabelField, weight: TextWeight) -> ControlDescriptor {
    let content = match field.label_markdown.as_deref() {
        Some(markdown) if !markdown.is_empty() => DisplayText::Markdown(markdown.to_string()),
        _ => DisplayText::Plain(field.label.clone()),
    };
    ControlDescriptor {
        id: field.id.clone(),
        label: field.label.clone(),
        interactive: false,
        control: Control::Text {
            weight,
            content,
            alert: alert_severity(field.label_class),
        },
    }
}

fn coercion_notice(id: &str, value: &ConfigFieldValue) {
    debug!(id, found = ?value, "value does not fit control, using default");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use serde_json::json;

    fn describe_json(field: serde_json::Value) -> ControlDescriptor {
        let doc = validate(&json!({"config": {"fields": [field]}})).unwrap();
        describe(&doc.fields()[0])
    }

    #[test]
    fn checkbox_initial_value() {
        let d = describe_json(json!({"id": "c", "type": "checkbox", "label": "C", "value": true}));
        assert_eq!(d.control, Control::Toggle { initial: true });
        assert!(d.interactive);

        let d = describe_json(json!({"id": "c", "type": "checkbox", "label": "C", "value": "yes"}));
        assert_eq!(d.control, Control::Toggle { initial: false });

        let d = describe_json(json!({"id": "c", "type": "checkbox", "label": "C", "value": 1}));
        assert_eq!(d.control, Control::Toggle { initial: false });
    }

    #[test]
    fn text_initial_value_and_placeholder() {
        let d = describe_json(json!({
            "id": "t", "type": "text", "label": "Name", "value": "Ada", "placeholder": "First name"
        }));
        assert_eq!(
            d.control,
            Control::TextInput {
                initial: "Ada".into(),
                placeholder: Some("First name".into())
            }
        );

        let d = describe_json(json!({"id": "t", "type": "text", "label": "Name", "value": 3.5}));
        assert_eq!(
            d.control,
            Control::TextInput {
                initial: String::new(),
                placeholder: None
            }
        );
    }

    #[test]
    fn select_initial_must_match_an_option() {
        let options = json!([{"id": "ber", "label": "Berlin"}, {"id": "lis", "label": "Lisbon"}]);
        let d = describe_json(json!({
            "id": "o", "type": "select", "label": "Office", "value": "lis", "options": options
        }));
        let Control::Picker { initial, options: choices } = d.control else {
            panic!("expected picker");
        };
        assert_eq!(initial, "lis");
        assert_eq!(choices.len(), 2);

        let d = describe_json(json!({
            "id": "o", "type": "select", "label": "Office", "value": "nyc", "options": options
        }));
        let Control::Picker { initial, .. } = d.control else {
            panic!("expected picker");
        };
        assert_eq!(initial, "");
    }

    #[test]
    fn select_without_options_is_no_render() {
        let d = describe_json(json!({"id": "a", "type": "select", "label": "Pick", "options": []}));
        assert_eq!(d.control, Control::NoRender);
        assert!(!d.is_rendered());
        assert!(!d.is_input());
        assert_eq!(d.initial_value(), None);
    }

    #[test]
    fn disabled_input_keeps_its_value() {
        let d = describe_json(json!({
            "id": "t", "type": "text", "label": "Email", "value": "a@b.c", "disabled": true
        }));
        assert!(!d.interactive);
        assert!(d.is_disabled());
        assert!(d.is_rendered());
        assert_eq!(d.initial_value(), Some(ConfigFieldValue::from("a@b.c")));
    }

    #[test]
    fn label_fields_prefer_markdown() {
        let d = describe_json(json!({
            "id": "h", "type": "header", "label": "Apply", "label-markdown": "# Apply"
        }));
        assert_eq!(
            d.control,
            Control::Text {
                weight: TextWeight::Heading,
                content: DisplayText::Markdown("# Apply".into()),
                alert: None
            }
        );
        assert!(!d.interactive);
        assert!(!d.is_input());

        let d = describe_json(json!({
            "id": "p", "type": "paragraph", "label": "Plain", "label-markdown": ""
        }));
        let Control::Text { content, weight, .. } = d.control else {
            panic!("expected text");
        };
        assert_eq!(weight, TextWeight::Body);
        assert_eq!(content, DisplayText::Plain("Plain".into()));
    }

    #[test]
    fn whitespace_markdown_is_still_markdown() {
        let d = describe_json(json!({
            "id": "p", "type": "paragraph", "label": "Plain", "label-markdown": "   "
        }));
        let Control::Text { content, .. } = d.control else {
            panic!("expected text");
        };
        assert_eq!(content, DisplayText::Markdown("   ".into()));
    }

    #[test]
    fn label_html_is_never_used() {
        let d = describe_json(json!({
            "id": "s", "type": "subheader", "label": "Safe", "label-html": "<script>x</script>"
        }));
        let Control::Text { content, .. } = d.control else {
            panic!("expected text");
        };
        assert_eq!(content.text(), "Safe");
    }

    #[test]
    fn descriptor_serializes_flat() {
        let d = describe_json(json!({"id": "c", "type": "checkbox", "label": "C", "value": true}));
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"id": "c", "label": "C", "interactive": true, "control": "toggle", "initial": true})
        );
    }
}
