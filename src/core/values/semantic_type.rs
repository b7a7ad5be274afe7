/// Built-in type names that are valid in a definition but have no codec or
/// generation rule. Their literals pass through as strings and the engine
/// produces no value for them.
const UNSUPPORTED_BUILTINS: &[&str] = &[
    "SByte",
    "Byte",
    "Int16",
    "UInt16",
    "UInt32",
    "Int64",
    "UInt64",
    "Guid",
    "ByteString",
    "XmlElement",
    "NodeId",
    "ExpandedNodeId",
    "StatusCode",
    "QualifiedName",
    "LocalizedText",
    "ExtensionObject",
    "DataValue",
    "Variant",
    "DiagnosticInfo",
    "Number",
    "UInteger",
    "Enumeration",
];

/// Declared semantic type of a variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Boolean,
    /// Driven by the process-wide counter
    Integer,
    /// Bounded random 32-bit integer
    Int32,
    Double,
    Float,
    DateTime,
    String,
    /// Known built-in name without a codec or generation rule
    Unsupported(String),
}

impl SemanticType {
    /// Match a declared type name, ignoring case.
    /// Returns `None` for names that are not built-in types at all.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let supported = [
            ("Boolean", SemanticType::Boolean),
            ("Integer", SemanticType::Integer),
            ("Int32", SemanticType::Int32),
            ("Double", SemanticType::Double),
            ("Float", SemanticType::Float),
            ("DateTime", SemanticType::DateTime),
            ("String", SemanticType::String),
        ];

        if let Some((_, ty)) = supported
            .into_iter()
            .find(|(canonical, _)| canonical.eq_ignore_ascii_case(name))
        {
            return Some(ty);
        }

        UNSUPPORTED_BUILTINS
            .iter()
            .find(|canonical| canonical.eq_ignore_ascii_case(name))
            .map(|canonical| SemanticType::Unsupported(canonical.to_string()))
    }

    /// Canonical type name
    pub fn name(&self) -> &str {
        match self {
            SemanticType::Boolean => "Boolean",
            SemanticType::Integer => "Integer",
            SemanticType::Int32 => "Int32",
            SemanticType::Double => "Double",
            SemanticType::Float => "Float",
            SemanticType::DateTime => "DateTime",
            SemanticType::String => "String",
            SemanticType::Unsupported(name) => name,
        }
    }
}

impl Default for SemanticType {
    fn default() -> Self {
        SemanticType::String
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
