use serde_json::Value;
use tracing::trace;

use crate::error::CodecError;
use crate::record::json_type_name;
use crate::timestamp;
use crate::value::{FieldValue, ValueKind};

/// Encode/decode strategy for one kind of field value.
pub trait FieldHandler: Sync {
    /// JSON form of `value`, or `None` when the field must be left out.
    fn encode(&self, field: &str, value: &FieldValue) -> Option<Value>;

    fn decode(&self, field: &str, value: Value) -> Result<FieldValue, CodecError>;
}

// ── Handler table ─────────────────────────────────────────────

// Indexed by `ValueKind` discriminant.
static HANDLERS: [(ValueKind, &dyn FieldHandler); 4] = [
    (ValueKind::Null, &NullHandler),
    (ValueKind::Scalar, &ScalarHandler),
    (ValueKind::Timestamp, &TimestampHandler),
    (ValueKind::Object, &ObjectHandler),
];

/// Look up the handler registered for `kind`.
pub fn handler_for(kind: ValueKind) -> &'static dyn FieldHandler {
    let (registered, handler) = HANDLERS[kind as usize];
    debug_assert_eq!(registered, kind);
    handler
}

// ── Handlers ──────────────────────────────────────────────────

struct NullHandler;

impl FieldHandler for NullHandler {
    fn encode(&self, field: &str, _value: &FieldValue) -> Option<Value> {
        trace!(field, "skipping empty field");
        None
    }

    fn decode(&self, _field: &str, _value: Value) -> Result<FieldValue, CodecError> {
        Ok(FieldValue::Null)
    }
}

/// Strings, numbers, booleans and lists: emitted as-is.
struct ScalarHandler;

impl FieldHandler for ScalarHandler {
    fn encode(&self, _field: &str, value: &FieldValue) -> Option<Value> {
        match value {
            FieldValue::String(s) => Some(Value::String(s.clone())),
            FieldValue::Number(n) => Some(Value::Number(n.clone())),
            FieldValue::Bool(b) => Some(Value::Bool(*b)),
            FieldValue::List(items) => Some(Value::Array(items.clone())),
            _ => None,
        }
    }

    fn decode(&self, _field: &str, value: Value) -> Result<FieldValue, CodecError> {
        Ok(FieldValue::from_json(value))
    }
}

struct TimestampHandler;

impl FieldHandler for TimestampHandler {
    fn encode(&self, field: &str, value: &FieldValue) -> Option<Value> {
        let ts = value.as_timestamp()?;
        let formatted = timestamp::format_utc(ts);
        trace!(field, %ts, utc = %formatted, "normalized timestamp");
        Some(Value::String(formatted))
    }

    fn decode(&self, field: &str, value: Value) -> Result<FieldValue, CodecError> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::String(s) => match timestamp::parse(&s) {
                Ok(ts) => Ok(FieldValue::Timestamp(ts)),
                Err(source) => Err(CodecError::Parse {
                    field: field.to_string(),
                    value: s,
                    source,
                }),
            },
            other => Err(CodecError::Shape(format!(
                "timestamp field {field} holds a {}, expected a string",
                json_type_name(&other)
            ))),
        }
    }
}

/// Nested objects keep their own field mapping in both directions; decoding
/// yields a generic map, never a typed object.
struct ObjectHandler;

impl FieldHandler for ObjectHandler {
    fn encode(&self, _field: &str, value: &FieldValue) -> Option<Value> {
        value.as_object().map(|map| Value::Object(map.clone()))
    }

    fn decode(&self, _field: &str, value: Value) -> Result<FieldValue, CodecError> {
        Ok(FieldValue::from_json(value))
    }
}
