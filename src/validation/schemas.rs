use serde_json::{json, Value};

pub fn company_new() -> Value {
    json!({
        "type": "object",
        "properties": {
            "handle": { "type": "string", "minLength": 1, "maxLength": 25, "pattern": "^[a-z0-9_-]+$" },
            "name": { "type": "string", "minLength": 1 },
            "description": { "type": "string" },
            "numEmployees": { "type": "integer", "minimum": 0, "maximum": i32::MAX },
            "logoUrl": { "type": ["string", "null"] }
        },
        "required": ["handle", "name", "description"],
        "additionalProperties": false
    })
}

pub fn company_update() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "description": { "type": "string" },
            "numEmployees": { "type": "integer", "minimum": 0, "maximum": i32::MAX },
            "logoUrl": { "type": ["string", "null"] }
        },
        "additionalProperties": false
    })
}

pub fn job_new() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "minLength": 1 },
            "salary": { "type": "integer", "minimum": 0, "maximum": i32::MAX },
            "equity": { "type": "number", "minimum": 0, "maximum": 1 },
            "company_handle": { "type": "string", "minLength": 1, "maxLength": 25 }
        },
        "required": ["title", "company_handle"],
        "additionalProperties": false
    })
}

pub fn job_update() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "minLength": 1 },
            "salary": { "type": "integer", "minimum": 0, "maximum": i32::MAX },
            "equity": { "type": "number", "minimum": 0, "maximum": 1 }
        },
        "additionalProperties": false
    })
}
