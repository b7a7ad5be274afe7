use super::types::{FolderHandle, VariableKey};
use super::values::SemanticType;
use thiserror::Error;

/// Failure to load a hierarchy definition document
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("malformed hierarchy definition: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("cannot read hierarchy definition '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A literal that does not parse as its declared type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("failed to convert '{literal}' to {data_type}: {reason}")]
    InvalidLiteral {
        literal: String,
        data_type: SemanticType,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("variable key {0} is already indexed")]
    DuplicateKey(VariableKey),
    #[error("folder handle {} does not belong to this tree", .0.index())]
    UnknownFolder(FolderHandle),
}

/// Errors raised while generating values during a tick
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("max value {max_value} is not a valid upper bound for {data_type}")]
    InvalidBound {
        data_type: SemanticType,
        max_value: i32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulator settings: {0}")]
    Json(#[from] serde_json::Error),
}
