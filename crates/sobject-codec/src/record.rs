use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::value::FieldValue;

pub const TYPE_FIELD: &str = "Type";

/// A schema-less business object: field name to value, in insertion order.
///
/// Names assigned through the API get their first character upper-cased
/// (`deepObject` is stored as `DeepObject`). Keys inserted by the decoder are
/// kept verbatim; a later `set` on a name that normalizes to the same form
/// updates that key in place.
///
/// Equality compares fields in order.
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    fields: IndexMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with its `Type` discriminator set.
    pub fn with_type(object_type: impl Into<String>) -> Self {
        let object_type: String = object_type.into();
        let mut record = Self::new();
        record.set(TYPE_FIELD, object_type);
        record
    }

    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::new();
        for (name, value) in fields {
            record.set(name.as_ref(), value);
        }
        record
    }

    /// Set a field, returning the previous value. An existing field keeps
    /// its position.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        let key = self.resolve(name).into_owned();
        self.fields.insert(key, value.into())
    }

    /// Store a nested object under `name` using its own serde field mapping.
    pub fn set_object<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        object: &T,
    ) -> Result<Option<FieldValue>, CodecError> {
        match serde_json::to_value(object)? {
            Value::Object(map) => Ok(self.set(name, map)),
            other => Err(CodecError::Shape(format!(
                "nested object for {name} serialized to {}, expected an object",
                json_type_name(&other)
            ))),
        }
    }

    /// Keep the field but clear its value; it is skipped on output.
    pub fn unset(&mut self, name: &str) -> Option<FieldValue> {
        self.set(name, FieldValue::Null)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let key = self.resolve(name);
        self.fields.shift_remove(&*key)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let key = self.resolve(name);
        self.fields.get(&*key)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_timestamp(&self, name: &str) -> Option<&DateTime<FixedOffset>> {
        self.get(name).and_then(FieldValue::as_timestamp)
    }

    pub fn get_object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.get(name).and_then(FieldValue::as_object)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn record_type(&self) -> Option<&str> {
        self.get_str(TYPE_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Append a decoded key without normalizing it.
    pub(crate) fn insert_raw(&mut self, name: String, value: FieldValue) {
        self.fields.insert(name, value);
    }

    /// The stored key for `name`: the verbatim key if present, then any
    /// existing key with the same normalized form, otherwise the normalized
    /// form itself.
    fn resolve<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.fields.contains_key(name) {
            return Cow::Borrowed(name);
        }
        let normalized = normalize_field_name(name);
        if self.fields.contains_key(&*normalized) {
            return normalized;
        }
        match self
            .fields
            .keys()
            .find(|key| normalize_field_name(key) == normalized)
        {
            Some(existing) => Cow::Owned(existing.clone()),
            None => normalized,
        }
    }
}

impl PartialEq for DynamicRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields.iter().eq(other.fields.iter())
    }
}

impl<'a> IntoIterator for &'a DynamicRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Upper-case the first character of a field name.
pub fn normalize_field_name(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut out = String::with_capacity(name.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(name),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
