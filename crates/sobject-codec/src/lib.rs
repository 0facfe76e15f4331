//! JSON codec for dynamic Salesforce-style records.
//!
//! A [`DynamicRecord`] is an ordered bag of named fields. [`RecordCodec`]
//! turns it into a JSON object (and back) following a few fixed rules:
//!
//! - fields are written in insertion order, empty fields are left out;
//! - timestamps are written in UTC as `YYYY-MM-DDTHH:MM:SS+00:00`;
//! - nested objects keep their own field names;
//! - on decode, the fields named in [`CodecConfig`] become timestamps and
//!   nested objects come back as generic maps.

mod codec;
mod config;
mod error;
mod handler;
mod record;
pub mod timestamp;
mod value;

pub use codec::RecordCodec;
pub use config::{CodecConfig, DEFAULT_TIMESTAMP_FIELD};
pub use error::CodecError;
pub use handler::{FieldHandler, handler_for};
pub use record::{DynamicRecord, TYPE_FIELD, normalize_field_name};
pub use value::{FieldValue, ValueKind};
