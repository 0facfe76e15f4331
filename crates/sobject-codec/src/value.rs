use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::{Map, Number, Value};

/// A single field value of a [`DynamicRecord`](crate::DynamicRecord).
///
/// `Null` marks a field that is present in the record but carries no value;
/// it is never written to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    String(String),
    Number(Number),
    Bool(bool),
    /// Keeps the caller's offset; rendered in UTC on output.
    Timestamp(DateTime<FixedOffset>),
    /// A nested object, already in its own field mapping.
    Object(Map<String, Value>),
    List(Vec<Value>),
}

/// Declared kind of a value, used to pick a field handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null = 0,
    Scalar = 1,
    Timestamp = 2,
    Object = 3,
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::String(_) | Self::Number(_) | Self::Bool(_) | Self::List(_) => ValueKind::Scalar,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Generic key/value view of a nested object.
    ///
    /// Decoded records never rebuild typed nested objects; callers that need
    /// one go through `serde_json::from_value` themselves.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Wrap a decoded JSON value as-is. Timestamp fields are parsed by
    /// [`crate::timestamp::parse`] instead.
    pub(crate) fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items),
            Value::Object(map) => Self::Object(map),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Self::Null, Self::Number)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(ts: DateTime<Tz>) -> Self {
        Self::Timestamp(ts.fixed_offset())
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn option_none_is_null() {
        let v: FieldValue = Option::<&str>::None.into();
        assert!(v.is_null());
        assert_eq!(v.kind(), ValueKind::Null);
    }

    #[test]
    fn nan_is_null() {
        assert!(FieldValue::from(f64::NAN).is_null());
        assert_eq!(FieldValue::from(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn timestamp_keeps_offset() {
        let ts = Utc.with_ymd_and_hms(2018, 9, 13, 14, 3, 0).unwrap();
        let v = FieldValue::from(ts);
        assert_eq!(v.kind(), ValueKind::Timestamp);
        assert_eq!(v.as_timestamp().unwrap().timestamp(), ts.timestamp());
    }

    #[test]
    fn json_arrays_are_scalars() {
        let v = FieldValue::from_json(serde_json::json!(["a", "b"]));
        assert_eq!(v.kind(), ValueKind::Scalar);
    }
}
