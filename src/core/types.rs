use uuid::Uuid;

/// Identifier part of a node id: either a structural name or a GUID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    String(String),
    Guid(Uuid),
}

/// Address-space node identity (namespace index + identifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) namespace_index: u16,
    pub(crate) identifier: Identifier,
}

impl NodeId {
    /// Create a name-based node id
    pub fn string(name: impl Into<String>, namespace_index: u16) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(name.into()),
        }
    }

    /// Create a GUID-based node id
    pub fn guid(guid: Uuid, namespace_index: u16) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Guid(guid),
        }
    }

    /// Resolve the identity of a variable from its declared name.
    /// GUID takes precedence whenever the name parses as one.
    pub fn resolve(name: &str, namespace_index: u16) -> Self {
        match Uuid::parse_str(name.trim()) {
            Ok(guid) => Self::guid(guid, namespace_index),
            Err(_) => Self::string(name, namespace_index),
        }
    }

    pub fn namespace_index(&self) -> u16 {
        self.namespace_index
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn is_guid(&self) -> bool {
        matches!(self.identifier, Identifier::Guid(_))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.identifier {
            Identifier::String(name) => write!(f, "ns={};s={}", self.namespace_index, name),
            Identifier::Guid(guid) => write!(f, "ns={};g={}", self.namespace_index, guid),
        }
    }
}

/// Lookup key of the variable index: (name, is_static, max_value)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableKey {
    pub name: String,
    pub is_static: bool,
    pub max_value: i32,
}

impl VariableKey {
    pub fn new(name: impl Into<String>, is_static: bool, max_value: i32) -> Self {
        Self {
            name: name.into(),
            is_static,
            max_value,
        }
    }
}

impl std::fmt::Display for VariableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, static={}, max={})", self.name, self.is_static, self.max_value)
    }
}

/// Index of a folder inside the node tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderHandle(pub(crate) usize);

/// Index of a variable inside the node tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableHandle(pub(crate) usize);

impl FolderHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl VariableHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A child slot of a folder, kept in definition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Folder(FolderHandle),
    Variable(VariableHandle),
}

/// Quality of a variable's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Good,
    Bad,
}

impl StatusCode {
    pub fn is_good(&self) -> bool {
        matches!(self, StatusCode::Good)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Good => write!(f, "Good"),
            StatusCode::Bad => write!(f, "Bad"),
        }
    }
}

/// Access policy exposed to protocol clients. Every variable is read/write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    CurrentReadOrWrite,
}
