use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::RecordError;

/// One flat, database-shaped record. Always carries `_id` and `type`,
/// everything else is variant-specific and read through the typed
/// accessors below.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

/// Outcome of looking up an optional field under the patch-if-defined
/// policy: an absent field leaves the constructed default untouched, an
/// explicit JSON `null` clears back to it, a usable value overwrites it.
/// A present value that cannot be converted behaves like an absent one
/// (logged at debug level).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Applies this patch onto a slot whose constructed value is `default`.
    pub fn apply(self, slot: &mut T, default: T) {
        match self {
            Patch::Absent => {}
            Patch::Clear => *slot = default,
            Patch::Set(value) => *slot = value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Clear => Patch::Clear,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    /// `Set` becomes `Some`; both `Absent` and `Clear` collapse to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// A raw foreign-key field: one id or an ordered list of ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceValue {
    One(String),
    Many(Vec<String>),
}

/// One vertex-attribute channel as stored on the wire: a tagged base64
/// blob plus its layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferDescriptor {
    pub array: String,
    #[serde(default = "default_item_size")]
    pub item_size: u32,
    #[serde(default)]
    pub normalized: bool,
}

fn default_item_size() -> u32 {
    1
}

impl RawRecord {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject);
        };
        let record = Self { fields };
        if record
            .fields
            .get("_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .is_none()
        {
            return Err(RecordError::MissingId);
        }
        if record.fields.get("type").and_then(Value::as_str).is_none() {
            return Err(RecordError::MissingType {
                id: record.id().to_string(),
            });
        }
        Ok(record)
    }

    pub fn id(&self) -> &str {
        self.fields.get("_id").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn type_name(&self) -> &str {
        self.fields.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn patch_with<T>(&self, name: &str, read: impl FnOnce(&Value) -> Option<T>) -> Patch<T> {
        match self.fields.get(name) {
            None => Patch::Absent,
            Some(Value::Null) => Patch::Clear,
            Some(value) => match read(value) {
                Some(converted) => Patch::Set(converted),
                None => {
                    debug!("record {}: field {} has an unusable value, treating it as absent", self.id(), name);
                    Patch::Absent
                }
            },
        }
    }

    pub fn patch_f32(&self, name: &str) -> Patch<f32> {
        self.patch_with(name, number)
    }

    pub fn patch_bool(&self, name: &str) -> Patch<bool> {
        self.patch_with(name, Value::as_bool)
    }

    pub fn patch_string(&self, name: &str) -> Patch<String> {
        self.patch_with(name, |value| value.as_str().map(str::to_string))
    }

    /// Accepts `{x, y, z}` objects and 3-element arrays.
    pub fn patch_vec3(&self, name: &str) -> Patch<[f32; 3]> {
        self.patch_with(name, vec3)
    }

    /// Accepts `{x, y}` objects and 2-element arrays.
    pub fn patch_vec2(&self, name: &str) -> Patch<[f32; 2]> {
        self.patch_with(name, vec2)
    }

    /// Accepts `{x, y, z, w}` objects and 4-element arrays.
    pub fn patch_quat(&self, name: &str) -> Patch<[f32; 4]> {
        self.patch_with(name, quat)
    }

    /// Accepts a packed `0xRRGGBB` integer or a 3-element float array,
    /// normalized to `[r, g, b]` in 0..1.
    pub fn patch_color(&self, name: &str) -> Patch<[f32; 3]> {
        self.patch_with(name, color)
    }

    /// A reference field holds one id or a list of ids, never a mix of
    /// anything else.
    pub fn reference(&self, name: &str) -> Option<ReferenceValue> {
        match self.fields.get(name)? {
            Value::String(id) if !id.is_empty() => Some(ReferenceValue::One(id.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
                .map(ReferenceValue::Many),
            _ => None,
        }
    }

    /// Returns the parsed buffer descriptor when the field is present.
    /// `null` counts as not present: there is no meaningful "cleared"
    /// state for a channel that was never decoded.
    pub fn buffer(&self, name: &str) -> Option<Result<BufferDescriptor, RecordError>> {
        let value = self.fields.get(name)?;
        if value.is_null() {
            return None;
        }
        Some(serde_json::from_value(value.clone()).map_err(RecordError::from))
    }
}

fn number(value: &Value) -> Option<f32> {
    value.as_f64().map(|n| n as f32)
}

fn vec2(value: &Value) -> Option<[f32; 2]> {
    match value {
        Value::Object(map) => Some([number(map.get("x")?)?, number(map.get("y")?)?]),
        Value::Array(items) if items.len() == 2 => Some([number(&items[0])?, number(&items[1])?]),
        _ => None,
    }
}

fn vec3(value: &Value) -> Option<[f32; 3]> {
    match value {
        Value::Object(map) => Some([
            number(map.get("x")?)?,
            number(map.get("y")?)?,
            number(map.get("z")?)?,
        ]),
        Value::Array(items) if items.len() == 3 => Some([
            number(&items[0])?,
            number(&items[1])?,
            number(&items[2])?,
        ]),
        _ => None,
    }
}

fn quat(value: &Value) -> Option<[f32; 4]> {
    match value {
        Value::Object(map) => Some([
            number(map.get("x")?)?,
            number(map.get("y")?)?,
            number(map.get("z")?)?,
            number(map.get("w")?)?,
        ]),
        Value::Array(items) if items.len() == 4 => Some([
            number(&items[0])?,
            number(&items[1])?,
            number(&items[2])?,
            number(&items[3])?,
        ]),
        _ => None,
    }
}

fn color(value: &Value) -> Option<[f32; 3]> {
    match value {
        Value::Number(_) => {
            let packed = value.as_u64()? as u32;
            Some([
                ((packed >> 16) & 0xff) as f32 / 255.0,
                ((packed >> 8) & 0xff) as f32 / 255.0,
                (packed & 0xff) as f32 / 255.0,
            ])
        }
        _ => vec3_array(value),
    }
}

fn vec3_array(value: &Value) -> Option<[f32; 3]> {
    match value {
        Value::Array(items) if items.len() == 3 => Some([
            number(&items[0])?,
            number(&items[1])?,
            number(&items[2])?,
        ]),
        _ => None,
    }
}
