mod simulation_engine_tests;

use crate::core::address_space::RecordingSink;
use crate::core::builder::{BuildReport, TreeBuilder};
use crate::core::definition::parse_str;
use crate::core::nodes::NodeTree;
use std::sync::Arc;

/// Parse `xml` and build a tree against a fresh recording sink
pub(crate) fn build_from_xml(xml: &str) -> (Arc<NodeTree>, Arc<RecordingSink>, BuildReport) {
    let definition = parse_str(xml).expect("definition parses");
    let sink = Arc::new(RecordingSink::new());
    let (tree, report) = TreeBuilder::new(sink.as_ref()).build(&definition);
    (Arc::new(tree), sink, report)
}
