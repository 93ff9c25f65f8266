//! Turning raw classifier text into a validated [`EmotionAnalysis`].
//!
//! The model is asked for a bare JSON object but in practice answers with
//! prose around it, a fenced code block, or nothing useful at all. Parsing is
//! two steps: locate a JSON value, then coerce it field by field into the
//! closed emotion set.

use log::debug;
use serde_json::{Map, Value};

use crate::error::ClassificationError;
use crate::models::{Emotion, EmotionAnalysis, TimelineEntry};

const DEFAULT_CONFIDENCE: f64 = 0.5;
const DEFAULT_TIMELINE_TIME: &str = "00:00";

/// Locate and parse the JSON object in a model response.
pub fn extract_json(response: &str) -> Result<Value, ClassificationError> {
    let trimmed = response.trim();

    // Whole response is JSON
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    // Fenced code block
    if let Some(block) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(block) {
            debug!("extracted classifier JSON from fenced block");
            return Ok(value);
        }
    }

    // Outermost braces
    let start = trimmed.find('{').ok_or(ClassificationError::NoJson)?;
    let end = trimmed.rfind('}').ok_or(ClassificationError::NoJson)?;
    if end <= start {
        return Err(ClassificationError::NoJson);
    }
    Ok(serde_json::from_str::<Value>(&trimmed[start..=end])?)
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    // Skip a language tag such as `json`
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Validate a classifier response. `primary` is the only required field.
pub fn parse_classification(response: &str) -> Result<EmotionAnalysis, ClassificationError> {
    let value = extract_json(response)?;
    let object = value.as_object().ok_or(ClassificationError::NotAnObject)?;

    let primary = object
        .get("primary")
        .and_then(Value::as_str)
        .map(Emotion::coerce)
        .ok_or(ClassificationError::MissingField("primary"))?;

    let secondary = object
        .get("secondary")
        .and_then(Value::as_str)
        .filter(|label| !label.trim().is_empty())
        .map(Emotion::coerce);

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    Ok(EmotionAnalysis {
        primary,
        secondary,
        confidence,
        timeline: parse_timeline(object),
    })
}

fn parse_timeline(object: &Map<String, Value>) -> Vec<TimelineEntry> {
    let Some(items) = object.get("timeline").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let time = item
                .get("time")
                .and_then(Value::as_str)
                .filter(|time| !time.is_empty())
                .unwrap_or(DEFAULT_TIMELINE_TIME);
            let emotion = item
                .get("emotion")
                .and_then(Value::as_str)
                .map(Emotion::coerce)
                .unwrap_or(Emotion::Learning);
            TimelineEntry::new(time, emotion)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_object() {
        let analysis = parse_classification(
            r#"{"primary":"happy","secondary":"grateful","confidence":0.9,
                "timeline":[{"time":"09:00","emotion":"happy"},{"time":"18:00","emotion":"joy"}]}"#,
        )
        .unwrap();
        assert_eq!(analysis.primary, Emotion::Happy);
        assert_eq!(analysis.secondary, Some(Emotion::Grateful));
        assert_eq!(analysis.confidence, 0.9);
        assert_eq!(
            analysis.timeline,
            vec![
                TimelineEntry::new("09:00", Emotion::Happy),
                TimelineEntry::new("18:00", Emotion::Happy),
            ]
        );
    }

    #[test]
    fn finds_json_inside_a_fenced_block() {
        let text = "分析結果です。\n```json\n{\"primary\": \"calm\", \"confidence\": 0.4}\n```\n以上";
        let analysis = parse_classification(text).unwrap();
        assert_eq!(analysis.primary, Emotion::Relieved);
        assert!(analysis.timeline.is_empty());
    }

    #[test]
    fn finds_json_surrounded_by_prose() {
        let text = "Sure! {\"primary\": \"sad\", \"confidence\": 0.7} Hope that helps.";
        assert_eq!(parse_classification(text).unwrap().primary, Emotion::Sad);
    }

    #[test]
    fn coerces_unknown_labels_and_clamps_confidence() {
        let analysis =
            parse_classification(r#"{"primary":"neutral","secondary":"ennui","confidence":3.5}"#).unwrap();
        assert_eq!(analysis.primary, Emotion::Learning);
        assert_eq!(analysis.secondary, Some(Emotion::Learning));
        assert_eq!(analysis.confidence, 1.0);

        let negative = parse_classification(r#"{"primary":"fear","confidence":-1}"#).unwrap();
        assert_eq!(negative.primary, Emotion::Anxious);
        assert_eq!(negative.confidence, 0.0);
    }

    #[test]
    fn missing_confidence_defaults_to_half() {
        let analysis = parse_classification(r#"{"primary":"angry"}"#).unwrap();
        assert_eq!(analysis.confidence, 0.5);
        assert_eq!(analysis.secondary, None);
    }

    #[test]
    fn malformed_timeline_becomes_empty_and_bad_items_are_defaulted() {
        let analysis = parse_classification(r#"{"primary":"happy","timeline":"morning"}"#).unwrap();
        assert!(analysis.timeline.is_empty());

        let analysis =
            parse_classification(r#"{"primary":"happy","timeline":[{"emotion":"fun"}, 42, {"time":"10:00"}]}"#)
                .unwrap();
        assert_eq!(
            analysis.timeline,
            vec![
                TimelineEntry::new("00:00", Emotion::Happy),
                TimelineEntry::new("10:00", Emotion::Learning),
            ]
        );
    }

    #[test]
    fn rejects_unusable_payloads() {
        assert!(matches!(parse_classification("no idea"), Err(ClassificationError::NoJson)));
        assert!(matches!(parse_classification("{ primary: happy }"), Err(ClassificationError::Json(_))));
        assert!(matches!(parse_classification("[1, 2]"), Err(ClassificationError::NotAnObject)));
        assert!(matches!(
            parse_classification(r#"{"confidence": 0.9}"#),
            Err(ClassificationError::MissingField("primary"))
        ));
        assert!(matches!(
            parse_classification(r#"{"primary": 7}"#),
            Err(ClassificationError::MissingField("primary"))
        ));
    }
}
