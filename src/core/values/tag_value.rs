use super::semantic_type::SemanticType;
use chrono::{DateTime, SecondsFormat, Utc};

/// Typed value held by a variable
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Boolean(bool),
    Integer(i64),
    Int32(i32),
    Double(f64),
    Float(f32),
    DateTime(DateTime<Utc>),
    String(String),
}

impl TagValue {
    /// Semantic type this value naturally belongs to
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            TagValue::Boolean(_) => SemanticType::Boolean,
            TagValue::Integer(_) => SemanticType::Integer,
            TagValue::Int32(_) => SemanticType::Int32,
            TagValue::Double(_) => SemanticType::Double,
            TagValue::Float(_) => SemanticType::Float,
            TagValue::DateTime(_) => SemanticType::DateTime,
            TagValue::String(_) => SemanticType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TagValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of `Integer` and `Int32` values
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Integer(v) => Some(*v),
            TagValue::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Floating-point view of `Double` and `Float` values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Double(v) => Some(*v),
            TagValue::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            TagValue::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValue::Boolean(v) => write!(f, "{}", v),
            TagValue::Integer(v) => write!(f, "{}", v),
            TagValue::Int32(v) => write!(f, "{}", v),
            TagValue::Double(v) => write!(f, "{}", v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::DateTime(v) => write!(f, "{}", v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            TagValue::String(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(TagValue::Int32(7).as_i64(), Some(7));
        assert_eq!(TagValue::Integer(7).as_i64(), Some(7));
        assert_eq!(TagValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(TagValue::String("x".into()).as_f64(), None);
        assert_eq!(TagValue::Boolean(true).as_bool(), Some(true));
    }

    #[test]
    fn test_display_datetime_is_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2025, 2, 19, 8, 30, 0).unwrap();
        assert_eq!(TagValue::DateTime(ts).to_string(), "2025-02-19T08:30:00.000Z");
    }

    #[test]
    fn test_semantic_type_of_value() {
        assert_eq!(TagValue::Double(0.5).semantic_type(), SemanticType::Double);
        assert_eq!(TagValue::String(String::new()).semantic_type(), SemanticType::String);
    }
}
