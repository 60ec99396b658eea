//! Form state: the explicit `id -> value` mapping behind a rendered form.
//!
//! The mapper only produces initial values. A [`FormState`] is seeded from
//! them and then owned by whoever renders the form; all later edits go through
//! [`FormState::set`], which keeps each value the shape its control expects.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::control::{Control, ControlDescriptor};
use crate::error::FormError;
use crate::types::ConfigFieldValue;

/// Key under which form values are embedded in the partner event payload.
pub const WEBHOOK_DATA_KEY: &str = "webhook-data";

#[derive(Debug, Clone, PartialEq)]
enum Accepts {
    Bool,
    Text,
    OneOf(Vec<String>),
}

impl Accepts {
    fn expected(&self) -> &'static str {
        match self {
            Accepts::Bool => "boolean",
            Accepts::Text | Accepts::OneOf(_) => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: ConfigFieldValue,
    accepts: Accepts,
    disabled: bool,
}

/// Current values of every input control, in render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    slots: IndexMap<String, Slot>,
}

impl FormState {
    /// Seed state from descriptors.
    ///
    /// Every rendered input becomes a key, disabled ones included. Display
    /// text and no-render selects contribute nothing. If an id repeats, the
    /// later control wins and takes the later position.
    pub fn from_descriptors(descriptors: &[ControlDescriptor]) -> Self {
        let mut slots = IndexMap::new();
        for descriptor in descriptors {
            let accepts = match &descriptor.control {
                Control::Toggle { .. } => Accepts::Bool,
                Control::TextInput { .. } => Accepts::Text,
                Control::Picker { options, .. } => {
                    Accepts::OneOf(options.iter().map(|o| o.id.clone()).collect())
                }
                Control::NoRender | Control::Text { .. } => continue,
            };
            let Some(value) = descriptor.initial_value() else {
                continue;
            };
            let slot = Slot {
                value,
                accepts,
                disabled: descriptor.is_disabled(),
            };
            if slots.shift_remove(&descriptor.id).is_some() {
                warn!(id = %descriptor.id, "duplicate form control id, keeping the later one");
            }
            slots.insert(descriptor.id.clone(), slot);
        }
        debug!(controls = slots.len(), "form state seeded");
        Self { slots }
    }

    pub fn get(&self, id: &str) -> Option<&ConfigFieldValue> {
        self.slots.get(id).map(|slot| &slot.value)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.slots.get(id).is_some_and(|slot| slot.disabled)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ids and values in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigFieldValue)> {
        self.slots
            .iter()
            .map(|(id, slot)| (id.as_str(), &slot.value))
    }

    /// Replace the value of one control.
    pub fn set(&mut self, id: &str, value: ConfigFieldValue) -> Result<(), FormError> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| FormError::UnknownField { id: id.to_string() })?;
        if slot.disabled {
            return Err(FormError::Disabled { id: id.to_string() });
        }
        match (&slot.accepts, &value) {
            (Accepts::Bool, ConfigFieldValue::Bool(_))
            | (Accepts::Text, ConfigFieldValue::String(_)) => {}
            (Accepts::OneOf(ids), ConfigFieldValue::String(choice)) => {
                if !choice.is_empty() && !ids.contains(choice) {
                    return Err(FormError::UnknownOption {
                        id: id.to_string(),
                        value: choice.clone(),
                    });
                }
            }
            (accepts, other) => {
                return Err(FormError::WrongValueType {
                    id: id.to_string(),
                    expected: accepts.expected(),
                    actual: other.type_name().to_string(),
                })
            }
        }
        debug!(id, "form value updated");
        slot.value = value;
        Ok(())
    }

    /// Set a value from text, interpreting it by the control's kind.
    ///
    /// Toggles take `true`/`false`; text inputs and pickers take the text as is.
    pub fn set_from_str(&mut self, id: &str, raw: &str) -> Result<(), FormError> {
        let accepts = self
            .slots
            .get(id)
            .map(|slot| slot.accepts.clone())
            .ok_or_else(|| FormError::UnknownField { id: id.to_string() })?;
        let value = match accepts {
            Accepts::Bool => match raw {
                "true" => ConfigFieldValue::Bool(true),
                "false" => ConfigFieldValue::Bool(false),
                _ => {
                    return Err(FormError::WrongValueType {
                        id: id.to_string(),
                        expected: "boolean",
                        actual: format!("'{raw}'"),
                    })
                }
            },
            Accepts::Text | Accepts::OneOf(_) => ConfigFieldValue::from(raw),
        };
        self.set(id, value)
    }

    /// The submitted-form mapping: id to current value.
    pub fn webhook_data(&self) -> Map<String, Value> {
        self.slots
            .iter()
            .map(|(id, slot)| (id.clone(), slot.value.to_json()))
            .collect()
    }

    /// `{"webhook-data": {...}}`, ready to embed in a partner event.
    pub fn envelope(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert(WEBHOOK_DATA_KEY.to_string(), Value::Object(self.webhook_data()));
        Value::Object(envelope)
    }
}
