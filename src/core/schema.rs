//! Output-shape contract sent as Gemini's `responseSchema`.
//!
//! The same value drives the local required-field check of the strict
//! decode policy.

use serde_json::{json, Value};

pub const CURRICULUM_REQUIRED: [&str; 5] = [
    "title",
    "description",
    "learningOutcomes",
    "modules",
    "assessmentStrategy",
];

pub fn curriculum_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "level": { "type": "STRING" },
            "totalDuration": { "type": "STRING" },
            "learningOutcomes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "text": { "type": "STRING" },
                        "mappedModules": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["id", "text", "mappedModules"]
                }
            },
            "modules": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "duration": { "type": "STRING" },
                        "topics": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["id", "title", "description", "duration", "topics"]
                }
            },
            "assessmentStrategy": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": CURRICULUM_REQUIRED
    })
}

/// 依 schema 的 `required` 清單遞迴檢查，回傳缺少欄位的路徑
/// (例如 `modules[1].topics`)。型別檢查交給 serde
pub fn missing_required(schema: &Value, value: &Value) -> Vec<String> {
    let mut missing = Vec::new();
    collect_missing(schema, value, "", &mut missing);
    missing
}

fn collect_missing(schema: &Value, value: &Value, path: &str, missing: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for field in required.iter().filter_map(Value::as_str) {
                    if matches!(obj.get(field), None | Some(Value::Null)) {
                        missing.push(join_path(path, field));
                    }
                }
            }

            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, sub_schema) in properties {
                    if let Some(sub_value) = obj.get(name) {
                        collect_missing(sub_schema, sub_value, &join_path(path, name), missing);
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    collect_missing(item_schema, item, &format!("{path}[{i}]"), missing);
                }
            }
        }
        _ => {}
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}
