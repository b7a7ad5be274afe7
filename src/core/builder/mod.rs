pub mod tree_builder;

pub use tree_builder::{build, BuildReport, TreeBuilder, DEFAULT_NAMESPACE_INDEX, ROOT_FOLDER_NAME};
