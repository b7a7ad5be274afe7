use crate::core::types::{AccessLevel, FolderHandle, NodeId, StatusCode, VariableKey};
use crate::core::values::{SemanticType, TagValue};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// The mutable part of a variable, always read and written as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSnapshot {
    pub value: Option<TagValue>,
    pub status: StatusCode,
    pub timestamp: DateTime<Utc>,
}

/// Typed leaf node of the address space
#[derive(Debug)]
pub struct Variable {
    node_id: NodeId,
    key: VariableKey,
    display_name: String,
    data_type: SemanticType,
    parent: FolderHandle,
    state: Mutex<VariableSnapshot>,
}

impl Variable {
    pub(crate) fn new(
        node_id: NodeId,
        key: VariableKey,
        display_name: String,
        data_type: SemanticType,
        parent: FolderHandle,
        initial: VariableSnapshot,
    ) -> Self {
        Self {
            node_id,
            key,
            display_name,
            data_type,
            parent,
            state: Mutex::new(initial),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Identity key used by the variable index
    pub fn key(&self) -> &VariableKey {
        &self.key
    }

    /// Declared (browse) name
    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn data_type(&self) -> &SemanticType {
        &self.data_type
    }

    pub fn is_static(&self) -> bool {
        self.key.is_static
    }

    pub fn max_value(&self) -> i32 {
        self.key.max_value
    }

    pub fn parent(&self) -> FolderHandle {
        self.parent
    }

    pub fn access_level(&self) -> AccessLevel {
        AccessLevel::CurrentReadOrWrite
    }

    /// Consistent copy of value, status and timestamp
    pub fn snapshot(&self) -> VariableSnapshot {
        self.state.lock().clone()
    }

    pub fn value(&self) -> Option<TagValue> {
        self.state.lock().value.clone()
    }

    pub fn status(&self) -> StatusCode {
        self.state.lock().status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.state.lock().timestamp
    }

    /// Replace the value and timestamp together, leaving status unchanged
    pub(crate) fn update(&self, value: Option<TagValue>, timestamp: DateTime<Utc>) {
        let mut state = self.state.lock();
        state.value = value;
        state.timestamp = timestamp;
    }

    /// Mark the variable Bad with a null value
    pub(crate) fn degrade(&self, timestamp: DateTime<Utc>) {
        *self.state.lock() = VariableSnapshot {
            value: None,
            status: StatusCode::Bad,
            timestamp,
        };
    }
}
