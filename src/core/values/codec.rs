use super::semantic_type::SemanticType;
use super::tag_value::TagValue;
use crate::core::errors::ConversionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Convert a definition literal into a typed value of the declared type.
///
/// String and unsupported built-in types keep the literal unchanged. Every
/// other type parses the literal in its canonical textual form; a parse
/// failure is returned to the caller, which decides whether to continue with
/// a null value.
pub fn convert(literal: &str, data_type: &SemanticType) -> Result<TagValue, ConversionError> {
    let invalid = |reason: String| ConversionError::InvalidLiteral {
        literal: literal.to_string(),
        data_type: data_type.clone(),
        reason,
    };
    let trimmed = literal.trim();

    match data_type {
        SemanticType::Boolean => parse_bool(trimmed)
            .map(TagValue::Boolean)
            .ok_or_else(|| invalid("expected 'true' or 'false'".to_string())),
        SemanticType::Integer => trimmed
            .parse::<i64>()
            .map(TagValue::Integer)
            .map_err(|e| invalid(e.to_string())),
        SemanticType::Int32 => trimmed
            .parse::<i32>()
            .map(TagValue::Int32)
            .map_err(|e| invalid(e.to_string())),
        SemanticType::Double => trimmed
            .parse::<f64>()
            .map(TagValue::Double)
            .map_err(|e| invalid(e.to_string())),
        SemanticType::Float => trimmed
            .parse::<f32>()
            .map(TagValue::Float)
            .map_err(|e| invalid(e.to_string())),
        SemanticType::DateTime => parse_datetime(trimmed)
            .map(TagValue::DateTime)
            .ok_or_else(|| invalid("unrecognized date-time format".to_string())),
        SemanticType::String | SemanticType::Unsupported(_) => {
            Ok(TagValue::String(literal.to_string()))
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// RFC 3339 first, then naive forms interpreted as UTC
fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
