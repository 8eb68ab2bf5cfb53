use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "cors_origins": { "type": "array", "items": { "type": "string" } }
                }
            },
            "database": {
                "type": "object",
                "properties": {
                    "path": { "type": "string" }
                }
            },
            "stability": {
                "type": "object",
                "properties": {
                    "signal": { "type": "string", "enum": ["false_positives", "detected_errors"] },
                    "single_run_policy": { "type": "string", "enum": ["zero", "omit"] }
                }
            }
        }
    })
});
