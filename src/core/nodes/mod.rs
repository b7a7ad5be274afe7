pub mod folder;
pub mod tree;
pub mod variable;

pub use folder::Folder;
pub use tree::NodeTree;
pub use variable::{Variable, VariableSnapshot};
