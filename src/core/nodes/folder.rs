use crate::core::types::{FolderHandle, NodeId, NodeRef};

/// Named grouping node. Children are kept in definition order.
#[derive(Debug, Clone)]
pub struct Folder {
    node_id: NodeId,
    display_name: String,
    parent: Option<FolderHandle>,
    children: Vec<NodeRef>,
}

impl Folder {
    pub(crate) fn new(node_id: NodeId, display_name: String, parent: Option<FolderHandle>) -> Self {
        Self {
            node_id,
            display_name,
            parent,
            children: Vec::new(),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// `None` only for the root folder
    pub fn parent(&self) -> Option<FolderHandle> {
        self.parent
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }
}
