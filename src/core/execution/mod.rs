pub mod config;
pub mod generator;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::SimulatorConfig;
pub use generator::ValueGenerator;
pub use simulation_engine::{SimulationEngine, TickFailure, TickReport};
