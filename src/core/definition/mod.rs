pub mod parser;

pub use parser::{parse_file, parse_str, FolderDef, HierarchyDef, NodeDef, VariableDef};
