//! 翻译接口响应解析
//!
//! 成功响应是嵌套数组：`data[0]` 为若干行，每行第一个元素是译文片段，
//! 按顺序拼接得到完整译文。能解析为 JSON 但结构不符时属于软失败，
//! 不是 JSON 则属于硬失败。

use serde_json::Value;

use crate::translation::error::{TranslationError, TranslationResult};

/// 单个翻译单元的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// 翻译成功
    Translated(String),
    /// 响应结构不符，保留原文
    Unavailable(String),
}

impl UnitOutcome {
    /// 用于输出的文本：译文或原文
    pub fn text(&self) -> &str {
        match self {
            UnitOutcome::Translated(text) | UnitOutcome::Unavailable(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            UnitOutcome::Translated(text) | UnitOutcome::Unavailable(text) => text,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, UnitOutcome::Translated(_))
    }
}

/// 从 JSON 值中提取拼接后的译文，结构不符时返回 `None`
pub fn extract_translation(payload: &Value) -> Option<String> {
    let rows = payload.as_array()?.first()?.as_array()?;

    let mut found = false;
    let mut translated = String::new();
    for row in rows {
        if let Some(fragment) = row.as_array().and_then(|r| r.first()).and_then(Value::as_str) {
            translated.push_str(fragment);
            found = true;
        }
    }

    found.then_some(translated)
}

/// 解析响应体
///
/// `original` 为本次请求的原文，软失败时原样带回。
pub fn parse_translation_payload(body: &str, original: &str) -> TranslationResult<UnitOutcome> {
    let payload: Value = serde_json::from_str(body).map_err(|e| {
        TranslationError::ParseError(format!("翻译接口返回的不是JSON: {}", e))
    })?;

    if let Some(translated) = extract_translation(&payload) {
        return Ok(UnitOutcome::Translated(translated));
    }

    match payload.get("error") {
        Some(error) => {
            let details = payload.get("details").map(Value::to_string).unwrap_or_default();
            tracing::warn!("翻译代理返回错误: {} {}", error, details);
        }
        None => tracing::warn!("翻译响应结构不符，保留原文"),
    }

    Ok(UnitOutcome::Unavailable(original.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_fragments() {
        let body = r#"[[["Hello ","Hola ",null,null,10],["world","mundo",null,null,10]],null,"es"]"#;
        let outcome = parse_translation_payload(body, "Hola mundo").unwrap();
        assert_eq!(outcome, UnitOutcome::Translated("Hello world".to_string()));
    }

    #[test]
    fn skips_rows_without_text() {
        let body = r#"[[["a"],[null,"x"],["b"],[]]]"#;
        let outcome = parse_translation_payload(body, "orig").unwrap();
        assert_eq!(outcome, UnitOutcome::Translated("ab".to_string()));
    }

    #[test]
    fn malformed_shapes_are_soft_failures() {
        for body in [
            "null",
            "{}",
            "[]",
            "[null]",
            "[\"text\"]",
            "[[]]",
            "[[[1,2]]]",
            r#"{"error":"Translation proxy connection error","details":"refused"}"#,
        ] {
            let outcome = parse_translation_payload(body, "orig").unwrap();
            assert_eq!(
                outcome,
                UnitOutcome::Unavailable("orig".to_string()),
                "body {}",
                body
            );
        }
    }

    #[test]
    fn non_json_is_a_hard_failure() {
        let result = parse_translation_payload("<html>502 Bad Gateway</html>", "orig");
        assert!(matches!(result, Err(TranslationError::ParseError(_))));
    }

    #[test]
    fn outcome_text() {
        assert_eq!(UnitOutcome::Translated("t".into()).text(), "t");
        assert_eq!(UnitOutcome::Unavailable("o".into()).into_text(), "o");
        assert!(!UnitOutcome::Unavailable("o".into()).is_translated());
    }
}
