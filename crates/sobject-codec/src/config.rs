use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMESTAMP_FIELD: &str = "CreatedAt";

/// Codec settings, built once and shared by reference.
///
/// Deserializable so callers can embed it in their own config files:
///
/// ```json
/// { "timestamp_fields": ["CreatedDate", "LastModifiedDate"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Fields whose JSON strings decode into timestamps.
    pub timestamp_fields: Vec<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            timestamp_fields: vec![DEFAULT_TIMESTAMP_FIELD.to_string()],
        }
    }
}

impl CodecConfig {
    /// A config with no timestamp fields at all.
    pub fn empty() -> Self {
        Self {
            timestamp_fields: Vec::new(),
        }
    }

    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.is_timestamp_field(&field) {
            self.timestamp_fields.push(field);
        }
        self
    }

    pub fn is_timestamp_field(&self, field: &str) -> bool {
        self.timestamp_fields.iter().any(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_designates_created_at() {
        let config = CodecConfig::default();
        assert!(config.is_timestamp_field("CreatedAt"));
        assert!(!config.is_timestamp_field("createdAt"));
    }

    #[test]
    fn builder_skips_duplicates() {
        let config = CodecConfig::default()
            .with_timestamp_field("CreatedAt")
            .with_timestamp_field("LastModifiedDate");
        assert_eq!(config.timestamp_fields, vec!["CreatedAt", "LastModifiedDate"]);
    }

    #[test]
    fn loads_from_json() {
        let config: CodecConfig =
            serde_json::from_str(r#"{"timestamp_fields":["SystemModstamp"]}"#).unwrap();
        assert!(config.is_timestamp_field("SystemModstamp"));
        assert!(!config.is_timestamp_field("CreatedAt"));

        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }
}
