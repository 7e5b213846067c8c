pub mod draft;
pub mod platform;
pub mod post;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::store::{record_id, Fields, StoreError};

/// Typed view over a stored record. Fails if the record on disk lacks required fields.
pub fn decode<T: DeserializeOwned>(record: Fields) -> Result<T, StoreError> {
    let target = format!("record '{}'", record_id(&record).unwrap_or("<no id>"));
    serde_json::from_value(Value::Object(record))
        .map_err(|source| StoreError::Corrupt { target, source })
}

/// Object literal → record fields. Non-objects yield no fields.
pub fn to_fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}
