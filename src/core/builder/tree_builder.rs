use crate::core::address_space::AddressSpaceSink;
use crate::core::definition::{FolderDef, HierarchyDef, NodeDef, VariableDef};
use crate::core::errors::TreeError;
use crate::core::nodes::{NodeTree, Variable, VariableSnapshot};
use crate::core::types::{FolderHandle, NodeId, StatusCode, VariableHandle, VariableKey};
use crate::core::values::convert;
use chrono::Utc;
use log::{debug, info, warn};

pub const ROOT_FOLDER_NAME: &str = "Simulation";
pub const DEFAULT_NAMESPACE_INDEX: u16 = 2;

/// Counters collected while building a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Folders created, including the root
    pub folders: usize,
    pub variables: usize,
    /// Variables whose initial literal did not convert (value left null)
    pub conversion_failures: usize,
    /// Variables dropped because their identity key was already indexed
    pub rejected_duplicates: usize,
}

/// Walks a parsed hierarchy, creates the node tree and registers every node
/// with the address-space collaborator.
pub struct TreeBuilder<'a> {
    sink: &'a dyn AddressSpaceSink,
    namespace_index: u16,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(sink: &'a dyn AddressSpaceSink) -> Self {
        Self {
            sink,
            namespace_index: DEFAULT_NAMESPACE_INDEX,
        }
    }

    /// Namespace index used for every node id created by this builder
    pub fn with_namespace_index(mut self, namespace_index: u16) -> Self {
        self.namespace_index = namespace_index;
        self
    }

    /// Build the tree. Malformed nodes degrade (null value, default
    /// attributes, or skipped duplicate) instead of aborting the build.
    pub fn build(&self, definition: &HierarchyDef) -> (NodeTree, BuildReport) {
        let mut tree = NodeTree::new(
            NodeId::string(ROOT_FOLDER_NAME, self.namespace_index),
            ROOT_FOLDER_NAME,
        );
        let mut report = BuildReport {
            folders: 1,
            ..BuildReport::default()
        };

        if let Some(root) = tree.folder(tree.root()) {
            self.sink.register_folder(root, None);
        }

        if definition.is_empty() {
            warn!("No folders found in hierarchy definition; tree holds only the root");
        }

        let root = tree.root();
        for folder in &definition.folders {
            self.add_folder(&mut tree, &mut report, folder, root);
        }

        info!(
            "Node creation completed: {} folders, {} variables ({} conversion failures, {} duplicates rejected)",
            report.folders, report.variables, report.conversion_failures, report.rejected_duplicates
        );

        (tree, report)
    }

    fn add_folder(
        &self,
        tree: &mut NodeTree,
        report: &mut BuildReport,
        definition: &FolderDef,
        parent: FolderHandle,
    ) {
        let handle = match tree.add_folder(
            parent,
            NodeId::string(definition.name.as_str(), self.namespace_index),
            definition.name.as_str(),
        ) {
            Ok(handle) => handle,
            Err(err) => {
                warn!("Skipping folder '{}': {}", definition.name, err);
                return;
            }
        };
        report.folders += 1;

        if let (Some(folder), Some(parent_folder)) = (tree.folder(handle), tree.folder(parent)) {
            self.sink.register_folder(folder, Some(parent_folder));
        }

        for child in &definition.children {
            match child {
                NodeDef::Folder(sub) => self.add_folder(tree, report, sub, handle),
                NodeDef::Variable(variable) => {
                    self.add_variable(tree, report, variable, handle);
                }
            }
        }
    }

    fn add_variable(
        &self,
        tree: &mut NodeTree,
        report: &mut BuildReport,
        definition: &VariableDef,
        parent: FolderHandle,
    ) -> Option<VariableHandle> {
        let value = match convert(&definition.initial_value, &definition.data_type) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{}. Defaulting to null.", err);
                report.conversion_failures += 1;
                None
            }
        };

        let node_id = NodeId::resolve(&definition.name, self.namespace_index);
        let key = VariableKey::new(
            definition.name.as_str(),
            definition.is_static,
            definition.max_value,
        );
        let variable = Variable::new(
            node_id,
            key,
            definition.display_name.clone(),
            definition.data_type.clone(),
            parent,
            VariableSnapshot {
                value,
                status: StatusCode::Good,
                timestamp: Utc::now(),
            },
        );

        let handle = match tree.insert_variable(variable) {
            Ok(handle) => handle,
            Err(err @ TreeError::DuplicateKey(_)) => {
                warn!("Skipping variable '{}': {}", definition.name, err);
                report.rejected_duplicates += 1;
                return None;
            }
            Err(err) => {
                warn!("Skipping variable '{}': {}", definition.name, err);
                return None;
            }
        };
        report.variables += 1;

        if let (Some(variable), Some(folder)) = (tree.variable(handle), tree.folder(parent)) {
            debug!("Created variable {} ({})", variable.node_id(), variable.data_type());
            self.sink.register_variable(variable, folder);
        }

        Some(handle)
    }
}

/// Build a tree with the default namespace index
pub fn build(definition: &HierarchyDef, sink: &dyn AddressSpaceSink) -> (NodeTree, BuildReport) {
    TreeBuilder::new(sink).build(definition)
}
