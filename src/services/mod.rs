pub mod company_service;
pub mod error;
pub mod job_service;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::Row;

pub use company_service::CompanyService;
pub use error::ServiceError;
pub use job_service::JobService;

fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, ServiceError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(ServiceError::from))
        .collect()
}

fn decode_first<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Option<T>, ServiceError> {
    match rows.into_iter().next() {
        Some(row) => Ok(Some(serde_json::from_value(Value::Object(row))?)),
        None => Ok(None),
    }
}

/// Rejects an empty object before any storage call is made
fn require_fields(payload: &Value) -> Result<(), ServiceError> {
    match payload {
        Value::Object(map) if map.is_empty() => Err(ServiceError::EmptyUpdate),
        _ => Ok(()),
    }
}

/// Request bodies that fail to decode are the caller's fault, unlike stored rows
fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T, ServiceError> {
    serde_json::from_value(payload).map_err(|e| ServiceError::InvalidPayload(vec![e.to_string()]))
}

fn check_schema(payload: &Value, schema: &Value) -> Result<(), ServiceError> {
    crate::validation::validate(payload, schema)
        .into_result()
        .map_err(ServiceError::InvalidPayload)
}
