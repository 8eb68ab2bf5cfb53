use serde_json::{json, Value};
use std::sync::LazyLock;

pub static REPORT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["project_name", "project_github_url", "number_of_fixes", "total_time_spent_minutes"],
        "properties": {
            "project_name": { "type": "string", "minLength": 1 },
            "project_github_url": { "type": "string", "minLength": 1 },
            "task_prompt_timestamp": { "type": ["string", "null"] },
            "number_of_fixes": { "type": "integer", "minimum": 0 },
            "total_time_spent_minutes": { "type": "number", "minimum": 0 },
            "number_of_errors_from_raygun": { "type": ["integer", "null"], "minimum": 0 },
            "run_time": { "type": ["number", "null"], "minimum": 0 },
            "detected_errors": { "type": ["integer", "null"], "minimum": 0 },
            "high_quality_errors": { "type": ["integer", "null"], "minimum": 0 },
            "false_positives": { "type": ["integer", "null"], "minimum": 0 },
            "model": { "type": ["string", "null"] },
            "errors": { "type": "array", "items": { "$ref": "#/$defs/error" } },
            "summary": {
                "type": ["object", "null"],
                "properties": {
                    "total_errors_identified": { "type": ["integer", "null"] },
                    "errors_fixed": { "type": ["integer", "null"] },
                    "errors_not_fixed": { "type": ["integer", "null"] },
                    "deployment_correlation": { "type": ["string", "null"] },
                    "recommendations": { "type": "array", "items": { "type": "string" } }
                }
            }
        },
        "$defs": {
            "error": {
                "type": "object",
                "required": ["error_id", "error_type", "was_fixed"],
                "properties": {
                    "error_id": { "type": "string", "minLength": 1 },
                    "error_type": { "type": "string" },
                    "was_fixed": { "type": "boolean" }
                }
            }
        }
    })
});
