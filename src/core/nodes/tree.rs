use super::folder::Folder;
use super::variable::Variable;
use crate::core::errors::TreeError;
use crate::core::types::{FolderHandle, NodeId, NodeRef, VariableHandle, VariableKey};
use std::collections::HashMap;

/// Arena-owned address-space model.
///
/// Folders and variables live in vectors owned by the tree; parents refer to
/// children by handle. Variables are indexed by their identity key and
/// iterated in insertion order.
#[derive(Debug)]
pub struct NodeTree {
    folders: Vec<Folder>,
    variables: Vec<Variable>,
    /// Variable index keyed by identity key
    index: HashMap<VariableKey, VariableHandle>,
}

impl NodeTree {
    /// Create a tree holding only the root folder
    pub fn new(root_id: NodeId, root_display_name: impl Into<String>) -> Self {
        Self {
            folders: vec![Folder::new(root_id, root_display_name.into(), None)],
            variables: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn root(&self) -> FolderHandle {
        FolderHandle(0)
    }

    /// Create a folder and attach it to `parent`
    pub fn add_folder(
        &mut self,
        parent: FolderHandle,
        node_id: NodeId,
        display_name: impl Into<String>,
    ) -> Result<FolderHandle, TreeError> {
        let handle = FolderHandle(self.folders.len());
        self.folders
            .get_mut(parent.0)
            .ok_or(TreeError::UnknownFolder(parent))?
            .push_child(NodeRef::Folder(handle));
        self.folders
            .push(Folder::new(node_id, display_name.into(), Some(parent)));
        Ok(handle)
    }

    /// Attach a variable to its parent folder and index it by key.
    ///
    /// A key that is already indexed is rejected; the first definition wins
    /// and the tree is left unchanged.
    pub fn insert_variable(&mut self, variable: Variable) -> Result<VariableHandle, TreeError> {
        let parent = variable.parent();
        if parent.0 >= self.folders.len() {
            return Err(TreeError::UnknownFolder(parent));
        }
        if self.index.contains_key(variable.key()) {
            return Err(TreeError::DuplicateKey(variable.key().clone()));
        }

        let handle = VariableHandle(self.variables.len());
        self.index.insert(variable.key().clone(), handle);
        self.variables.push(variable);
        if let Some(folder) = self.folders.get_mut(parent.0) {
            folder.push_child(NodeRef::Variable(handle));
        }
        Ok(handle)
    }

    pub fn folder(&self, handle: FolderHandle) -> Option<&Folder> {
        self.folders.get(handle.0)
    }

    pub fn variable(&self, handle: VariableHandle) -> Option<&Variable> {
        self.variables.get(handle.0)
    }

    /// Look up a variable by identity key
    pub fn find(&self, key: &VariableKey) -> Option<&Variable> {
        self.index
            .get(key)
            .and_then(|handle| self.variables.get(handle.0))
    }

    /// Look up a variable by its address-space id
    pub fn find_by_node_id(&self, node_id: &NodeId) -> Option<&Variable> {
        self.variables.iter().find(|v| v.node_id() == node_id)
    }

    /// First variable with the given declared name, regardless of flag or bound
    pub fn find_by_name(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn contains_key(&self, key: &VariableKey) -> bool {
        self.index.contains_key(key)
    }

    /// Variables in insertion order
    pub fn variables(&self) -> impl Iterator<Item = (VariableHandle, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, variable)| (VariableHandle(i), variable))
    }

    pub fn folders(&self) -> impl Iterator<Item = (FolderHandle, &Folder)> {
        self.folders
            .iter()
            .enumerate()
            .map(|(i, folder)| (FolderHandle(i), folder))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Folder count including the root
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Slash-separated display path from the root down to `node`, or `None`
    /// when the handle does not belong to this tree
    pub fn path_of(&self, node: NodeRef) -> Option<String> {
        let (mut segments, mut parent) = match node {
            NodeRef::Folder(handle) => {
                let folder = self.folder(handle)?;
                (vec![folder.display_name().to_string()], folder.parent())
            }
            NodeRef::Variable(handle) => {
                let variable = self.variable(handle)?;
                (vec![variable.display_name().to_string()], Some(variable.parent()))
            }
        };

        while let Some(handle) = parent {
            let folder = self.folder(handle)?;
            segments.push(folder.display_name().to_string());
            parent = folder.parent();
        }

        segments.reverse();
        Some(segments.join("/"))
    }
}
