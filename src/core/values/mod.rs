pub mod codec;
pub mod semantic_type;
pub mod tag_value;

// Re-export all public types
pub use codec::convert;
pub use semantic_type::SemanticType;
pub use tag_value::TagValue;
