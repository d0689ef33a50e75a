pub mod schemas;

use serde_json::Value;

/// Outcome of checking a payload against a JSON Schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl SchemaValidation {
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validate `payload` against `schema`, collecting every error message.
pub fn validate(payload: &Value, schema: &Value) -> SchemaValidation {
    let validator = match jsonschema::draft202012::new(schema) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Invalid payload schema: {}", e);
            return SchemaValidation {
                valid: false,
                errors: vec![format!("Invalid schema: {}", e)],
            };
        }
    };

    let errors: Vec<String> = validator.iter_errors(payload).map(|e| e.to_string()).collect();
    SchemaValidation { valid: errors.is_empty(), errors }
}
