use crate::core::errors::DefinitionError;
use crate::core::values::SemanticType;
use log::{debug, warn};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;

pub const UNNAMED_FOLDER: &str = "UnnamedFolder";
pub const UNNAMED_VARIABLE: &str = "UnnamedVariable";
pub const DEFAULT_MAX_VALUE: i32 = 100;

const FOLDER_ELEMENT: &str = "Folder";
const VARIABLE_ELEMENT: &str = "Variable";

/// Parsed hierarchy: the top-level folders below the root element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyDef {
    pub folders: Vec<FolderDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FolderDef {
    pub name: String,
    pub children: Vec<NodeDef>,
}

/// Child of a folder, in document order
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDef {
    Folder(FolderDef),
    Variable(VariableDef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub data_type: SemanticType,
    pub initial_value: String,
    pub display_name: String,
    pub is_static: bool,
    pub max_value: i32,
}

impl HierarchyDef {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Total number of variable definitions in the hierarchy
    pub fn variable_count(&self) -> usize {
        self.folders.iter().map(FolderDef::variable_count).sum()
    }
}

impl FolderDef {
    pub fn variable_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                NodeDef::Folder(folder) => folder.variable_count(),
                NodeDef::Variable(_) => 1,
            })
            .sum()
    }
}

/// Parse a hierarchy definition document.
///
/// Only a malformed document fails; missing or bad attributes on a single
/// node fall back to defaults and are logged. A `<!DOCTYPE>` declaration is
/// accepted.
pub fn parse_str(source: &str) -> Result<HierarchyDef, DefinitionError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(source, options)?;
    let root = document.root_element();
    let mut hierarchy = HierarchyDef::default();

    for child in root.children().filter(Node::is_element) {
        if child.tag_name().name() == FOLDER_ELEMENT {
            hierarchy.folders.push(parse_folder(child));
        } else {
            warn!(
                "Ignoring <{}> directly under <{}>; only folders are allowed at the top level",
                child.tag_name().name(),
                root.tag_name().name()
            );
        }
    }

    if hierarchy.is_empty() {
        warn!("No folders found under <{}>", root.tag_name().name());
    }

    Ok(hierarchy)
}

/// Read and parse a hierarchy definition file
pub fn parse_file(path: impl AsRef<Path>) -> Result<HierarchyDef, DefinitionError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&source)
}

fn parse_folder(node: Node<'_, '_>) -> FolderDef {
    let name = node.attribute("Name").unwrap_or(UNNAMED_FOLDER).to_string();
    let mut children = Vec::new();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            FOLDER_ELEMENT => children.push(NodeDef::Folder(parse_folder(child))),
            VARIABLE_ELEMENT => children.push(NodeDef::Variable(parse_variable(child))),
            other => debug!("Ignoring unknown element <{}> in folder '{}'", other, name),
        }
    }

    FolderDef { name, children }
}

fn parse_variable(node: Node<'_, '_>) -> VariableDef {
    let name = node.attribute("Name").unwrap_or(UNNAMED_VARIABLE).to_string();
    let type_name = node.attribute("DataType").unwrap_or("String");
    let initial_value = node.attribute("InitialValue").unwrap_or("").to_string();
    let display_name = node
        .attribute("DisplayName")
        .map(str::to_string)
        .unwrap_or_else(|| name.clone());
    let is_static = node
        .attribute("IsStatic")
        .map(|flag| flag.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let data_type = SemanticType::parse(type_name).unwrap_or_else(|| {
        warn!(
            "Unsupported data type: {} on variable '{}'. Defaulting to String.",
            type_name, name
        );
        SemanticType::String
    });

    let max_value = match node.attribute("MaxValue") {
        None => DEFAULT_MAX_VALUE,
        Some(literal) => literal.trim().parse::<i32>().unwrap_or_else(|_| {
            warn!(
                "Invalid MaxValue '{}' on variable '{}'. Defaulting to {}.",
                literal, name, DEFAULT_MAX_VALUE
            );
            DEFAULT_MAX_VALUE
        }),
    };

    VariableDef {
        name,
        data_type,
        initial_value,
        display_name,
        is_static,
        max_value,
    }
}
