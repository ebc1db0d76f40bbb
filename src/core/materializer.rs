use crate::core::schema::{curriculum_schema, missing_required};
use crate::domain::model::Curriculum;
use crate::utils::error::GenerationError;
use serde_json::Value;

/// 模型回傳內容缺欄位時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// 依 schema 的 required 清單檢查，缺欄位即失敗
    #[default]
    Strict,
    /// 缺少或為 null 的欄位一律用預設值 (空字串、空陣列、None)
    Lenient,
}

/// 空白或缺少的回傳內容視為 `{}`
pub fn normalize_payload(text: Option<&str>) -> &str {
    match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => "{}",
    }
}

pub fn materialize(
    text: Option<&str>,
    policy: DecodePolicy,
) -> std::result::Result<Curriculum, GenerationError> {
    let payload = normalize_payload(text);

    let mut value: Value = serde_json::from_str(payload).map_err(|e| {
        tracing::error!("Failed to parse AI response: {}", e);
        GenerationError::InvalidResponse {
            detail: format!("malformed JSON: {e}"),
        }
    })?;

    if !value.is_object() {
        tracing::error!(
            "Failed to parse AI response: top-level value is {}",
            json_kind(&value)
        );
        return Err(GenerationError::InvalidResponse {
            detail: format!("expected a JSON object, got {}", json_kind(&value)),
        });
    }

    if policy == DecodePolicy::Strict {
        let missing = missing_required(&curriculum_schema(), &value);
        if !missing.is_empty() {
            tracing::error!("AI response is missing required fields: {}", missing.join(", "));
            return Err(GenerationError::InvalidResponse {
                detail: format!("missing required fields: {}", missing.join(", ")),
            });
        }
    }
    // required 欄位的 null 已在 Strict 檢查中擋下，剩下的 null 只會是選填欄位
    strip_nulls(&mut value);

    serde_json::from_value(value).map_err(|e| {
        tracing::error!("AI response does not match the curriculum shape: {}", e);
        GenerationError::InvalidResponse {
            detail: format!("shape mismatch: {e}"),
        }
    })
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            obj.retain(|_, v| !v.is_null());
            obj.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::INVALID_CURRICULUM_MESSAGE;

    const SCENARIO_A: &str = r#"{"title":"Quantum Computing 101","description":"...","learningOutcomes":[{"id":"lo1","text":"...","mappedModules":["m1"]}],"modules":[{"id":"m1","title":"Intro","description":"...","duration":"2 weeks","topics":["qubits"]}],"assessmentStrategy":"exam"}"#;

    fn assert_invalid(result: std::result::Result<Curriculum, GenerationError>) {
        match result {
            Err(e @ GenerationError::InvalidResponse { .. }) => {
                assert_eq!(e.user_message(), INVALID_CURRICULUM_MESSAGE)
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_materialize_well_formed_response() {
        for policy in [DecodePolicy::Strict, DecodePolicy::Lenient] {
            let curriculum = materialize(Some(SCENARIO_A), policy).unwrap();
            assert_eq!(curriculum.title, "Quantum Computing 101");
            assert_eq!(curriculum.modules.len(), 1);
            assert_eq!(curriculum.learning_outcomes.len(), 1);
            assert_eq!(curriculum.learning_outcomes[0].mapped_modules, vec!["m1"]);
            // 選填欄位缺少時給預設值
            assert_eq!(curriculum.level, None);
            assert_eq!(curriculum.total_duration, None);
            assert!(curriculum.recommendations.is_empty());
        }
    }

    #[test]
    fn test_non_json_is_rejected() {
        for text in ["not json", "{\"title\": \"trunc", "<html>502</html>"] {
            assert_invalid(materialize(Some(text), DecodePolicy::Strict));
            assert_invalid(materialize(Some(text), DecodePolicy::Lenient));
        }
    }

    #[test]
    fn test_non_object_top_level_is_rejected() {
        for text in ["[]", "42", "\"a string\"", "null", "true"] {
            assert_invalid(materialize(Some(text), DecodePolicy::Lenient));
        }
    }

    #[test]
    fn test_empty_payload_becomes_empty_object() {
        assert_eq!(normalize_payload(None), "{}");
        assert_eq!(normalize_payload(Some("")), "{}");
        assert_eq!(normalize_payload(Some("  \n")), "{}");
        assert_eq!(normalize_payload(Some("{\"a\":1}")), "{\"a\":1}");
    }

    #[test]
    fn test_empty_payload_strict_fails() {
        assert_invalid(materialize(Some(""), DecodePolicy::Strict));
        assert_invalid(materialize(None, DecodePolicy::Strict));
    }

    #[test]
    fn test_empty_payload_lenient_yields_empty_curriculum() {
        let curriculum = materialize(Some(""), DecodePolicy::Lenient).unwrap();
        assert_eq!(curriculum, Curriculum::default());
        assert!(curriculum.modules.is_empty());
        assert!(curriculum.learning_outcomes.is_empty());
    }

    #[test]
    fn test_lenient_tolerates_nulls_and_partial_modules() {
        let text = r#"{"title":"T","modules":[{"id":"m1","topics":null}],"level":null}"#;
        let curriculum = materialize(Some(text), DecodePolicy::Lenient).unwrap();
        assert_eq!(curriculum.title, "T");
        assert_eq!(curriculum.modules[0].id, "m1");
        assert!(curriculum.modules[0].topics.is_empty());
        assert_eq!(curriculum.level, None);

        assert_invalid(materialize(Some(text), DecodePolicy::Strict));
    }

    #[test]
    fn test_strict_defaults_null_optional_fields() {
        let text = r#"{"title":"T","description":"D","learningOutcomes":[],"modules":[],"assessmentStrategy":"exam","recommendations":null,"level":null,"totalDuration":null}"#;
        let curriculum = materialize(Some(text), DecodePolicy::Strict).unwrap();
        assert!(curriculum.recommendations.is_empty());
        assert_eq!(curriculum.level, None);
        assert_eq!(curriculum.total_duration, None);
    }

    #[test]
    fn test_strict_rejects_null_required_field() {
        let text = r#"{"title":"T","description":"D","learningOutcomes":[],"modules":null,"assessmentStrategy":"exam"}"#;
        assert_invalid(materialize(Some(text), DecodePolicy::Strict));
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let text = r#"{"title":"T","description":"D","learningOutcomes":[],"modules":"m1","assessmentStrategy":"exam"}"#;
        assert_invalid(materialize(Some(text), DecodePolicy::Strict));
        assert_invalid(materialize(Some(text), DecodePolicy::Lenient));
    }
}
