use super::nodes::{Folder, Variable};
use super::types::{NodeId, StatusCode};
use super::values::TagValue;
use log::{debug, trace};
use parking_lot::Mutex;

/// Collaborator that exposes built nodes to protocol clients.
///
/// Registration happens once while the tree is built; change notifications
/// arrive from the simulation engine on every update.
pub trait AddressSpaceSink: Send + Sync {
    /// Called for every folder, parents before children. `parent` is `None`
    /// for the root.
    fn register_folder(&self, folder: &Folder, parent: Option<&Folder>);

    fn register_variable(&self, variable: &Variable, parent: &Folder);

    /// The variable's value, status or timestamp changed
    fn notify_changed(&self, variable: &Variable);
}

/// Sink that only writes registrations and changes to the log
#[derive(Debug, Default)]
pub struct LoggingSink;

impl AddressSpaceSink for LoggingSink {
    fn register_folder(&self, folder: &Folder, parent: Option<&Folder>) {
        match parent {
            Some(parent) => debug!("Registered folder {} under {}", folder.node_id(), parent.node_id()),
            None => debug!("Registered root folder {}", folder.node_id()),
        }
    }

    fn register_variable(&self, variable: &Variable, parent: &Folder) {
        debug!(
            "Registered variable {} ({}) under {}",
            variable.node_id(),
            variable.data_type(),
            parent.node_id()
        );
    }

    fn notify_changed(&self, variable: &Variable) {
        let snapshot = variable.snapshot();
        trace!(
            "{} = {} [{}] @ {}",
            variable.display_name(),
            snapshot
                .value
                .as_ref()
                .map(TagValue::to_string)
                .unwrap_or_else(|| "null".to_string()),
            snapshot.status,
            snapshot.timestamp
        );
    }
}

/// One call received by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    FolderRegistered {
        node_id: NodeId,
        parent: Option<NodeId>,
    },
    VariableRegistered {
        node_id: NodeId,
        parent: NodeId,
    },
    Changed {
        node_id: NodeId,
        value: Option<TagValue>,
        status: StatusCode,
    },
}

/// Sink that keeps a journal of every call in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the journal so far
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    /// Change notifications received for one node
    pub fn changes_for(&self, node_id: &NodeId) -> Vec<SinkEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, SinkEvent::Changed { node_id: id, .. } if id == node_id))
            .cloned()
            .collect()
    }

    pub fn change_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, SinkEvent::Changed { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl AddressSpaceSink for RecordingSink {
    fn register_folder(&self, folder: &Folder, parent: Option<&Folder>) {
        self.events.lock().push(SinkEvent::FolderRegistered {
            node_id: folder.node_id().clone(),
            parent: parent.map(|p| p.node_id().clone()),
        });
    }

    fn register_variable(&self, variable: &Variable, parent: &Folder) {
        self.events.lock().push(SinkEvent::VariableRegistered {
            node_id: variable.node_id().clone(),
            parent: parent.node_id().clone(),
        });
    }

    fn notify_changed(&self, variable: &Variable) {
        let snapshot = variable.snapshot();
        self.events.lock().push(SinkEvent::Changed {
            node_id: variable.node_id().clone(),
            value: snapshot.value,
            status: snapshot.status,
        });
    }
}
