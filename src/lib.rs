pub mod core;

// Re-export commonly used types
pub use crate::core::address_space::{AddressSpaceSink, LoggingSink, RecordingSink};
pub use crate::core::builder::{BuildReport, TreeBuilder};
pub use crate::core::definition::HierarchyDef;
pub use crate::core::execution::{SimulationEngine, SimulatorConfig, ValueGenerator};
pub use crate::core::nodes::{NodeTree, Variable};
pub use crate::core::types::{NodeId, StatusCode, VariableKey};
pub use crate::core::values::{SemanticType, TagValue};
