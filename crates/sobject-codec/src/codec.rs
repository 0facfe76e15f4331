use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::handler::handler_for;
use crate::record::{DynamicRecord, json_type_name};
use crate::value::ValueKind;

/// Converts records and record collections to and from JSON.
///
/// Encoding writes fields in insertion order, drops empty fields, renders
/// timestamps in UTC and nested objects with their own field names.
/// Decoding turns the configured timestamp fields back into timestamps and
/// keeps everything else raw; nested objects come back as generic maps.
#[derive(Debug, Clone, Copy)]
pub struct RecordCodec<'a> {
    config: &'a CodecConfig,
}

impl<'a> RecordCodec<'a> {
    pub fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a CodecConfig {
        self.config
    }

    // ── Encoding ────────────────────────────────────────────────

    pub fn encode(&self, record: &DynamicRecord) -> Map<String, Value> {
        let mut out = Map::with_capacity(record.len());
        for (name, value) in record.iter() {
            if let Some(json) = handler_for(value.kind()).encode(name, value) {
                out.insert(name.to_string(), json);
            }
        }
        debug!(fields = record.len(), emitted = out.len(), "encoded record");
        out
    }

    pub fn encode_all<'r, I>(&self, records: I) -> Vec<Value>
    where
        I: IntoIterator<Item = &'r DynamicRecord>,
    {
        records
            .into_iter()
            .map(|record| Value::Object(self.encode(record)))
            .collect()
    }

    pub fn to_json(&self, record: &DynamicRecord) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.encode(record))?)
    }

    pub fn to_json_vec(&self, record: &DynamicRecord) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(&self.encode(record))?)
    }

    pub fn to_json_all(&self, records: &[DynamicRecord]) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.encode_all(records))?)
    }

    // ── Decoding ────────────────────────────────────────────────

    pub fn decode(&self, object: Map<String, Value>) -> Result<DynamicRecord, CodecError> {
        let mut record = DynamicRecord::new();
        for (name, value) in object {
            let kind = self.decode_kind(&name, &value);
            let decoded = handler_for(kind).decode(&name, value)?;
            record.insert_raw(name, decoded);
        }
        debug!(fields = record.len(), "decoded record");
        Ok(record)
    }

    pub fn decode_value(&self, value: Value) -> Result<DynamicRecord, CodecError> {
        match value {
            Value::Object(object) => self.decode(object),
            other => Err(CodecError::Shape(format!(
                "expected a record object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn decode_all(&self, value: Value) -> Result<Vec<DynamicRecord>, CodecError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(CodecError::Shape(format!(
                    "expected an array of records, got {}",
                    json_type_name(&other)
                )));
            }
        };
        debug!(records = items.len(), "decoding record collection");
        items
            .into_iter()
            .map(|item| self.decode_value(item))
            .collect()
    }

    pub fn from_json(&self, json: &str) -> Result<DynamicRecord, CodecError> {
        self.decode_value(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(&self, json: &[u8]) -> Result<DynamicRecord, CodecError> {
        self.decode_value(serde_json::from_slice(json)?)
    }

    pub fn from_json_all(&self, json: &str) -> Result<Vec<DynamicRecord>, CodecError> {
        self.decode_all(serde_json::from_str(json)?)
    }

    fn decode_kind(&self, name: &str, value: &Value) -> ValueKind {
        if self.config.is_timestamp_field(name) {
            return ValueKind::Timestamp;
        }
        match value {
            Value::Null => ValueKind::Null,
            Value::Object(_) => ValueKind::Object,
            _ => ValueKind::Scalar,
        }
    }
}

// ── serde integration ─────────────────────────────────────────
//
// Lets records sit inside caller-defined request/response bodies. Encoding
// needs no config; decoding uses `CodecConfig::default()`.

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.iter() {
            if let Some(json) = handler_for(value.kind()).encode(name, value) {
                map.serialize_entry(name, &json)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DynamicRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        RecordCodec::new(&CodecConfig::default())
            .decode(object)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_value_rejects_non_objects() {
        let config = CodecConfig::default();
        let codec = RecordCodec::new(&config);
        let err = codec.decode_value(json!(["Account"])).unwrap_err();
        assert!(matches!(err, CodecError::Shape(_)), "{err}");
    }

    #[test]
    fn decode_all_rejects_non_arrays() {
        let config = CodecConfig::default();
        let codec = RecordCodec::new(&config);
        let err = codec.decode_all(json!({"Type": "Account"})).unwrap_err();
        assert!(matches!(err, CodecError::Shape(_)), "{err}");
    }

    #[test]
    fn malformed_text_is_a_json_error() {
        let config = CodecConfig::default();
        let codec = RecordCodec::new(&config);
        let err = codec.from_json(r#"{"Type":"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)), "{err}");
    }

    #[test]
    fn serde_impl_matches_codec() {
        let mut record = DynamicRecord::with_type("Account");
        record.set("Name", "Acme");
        record.set("Phone", Option::<&str>::None);

        let config = CodecConfig::default();
        let codec = RecordCodec::new(&config);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            codec.to_json(&record).unwrap()
        );
    }
}
