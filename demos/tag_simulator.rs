use std::sync::Arc;
use tagsim::core::{
    address_space::LoggingSink,
    builder::TreeBuilder,
    definition::parse_file,
    execution::{SimulationEngine, SimulatorConfig},
};

const DEFAULT_DEFINITION_PATH: &str = "demos/data/opcnodes.xml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Usage: tag_simulator [definition.xml] [appsettings.json]
    let mut args = std::env::args().skip(1);
    let definition_path = args.next().unwrap_or_else(|| DEFAULT_DEFINITION_PATH.to_string());
    let config = match args.next() {
        Some(settings_path) => SimulatorConfig::from_json_str(&std::fs::read_to_string(settings_path)?)?,
        None => SimulatorConfig::default(),
    };

    let definition = parse_file(&definition_path)?;
    let sink = Arc::new(LoggingSink);
    let (tree, report) = TreeBuilder::new(sink.as_ref())
        .with_namespace_index(config.namespace_index)
        .build(&definition);

    println!("Configuration:");
    println!("  Definition: {}", definition_path);
    println!("  Tick interval: {:?}", config.tick_interval());
    println!(
        "  Nodes: {} folders, {} variables",
        report.folders, report.variables
    );

    let engine = SimulationEngine::new(Arc::new(tree), sink, &config);
    let handle = engine.spawn(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", err);
        }
    });

    println!("Simulator is running... Press Ctrl+C to stop.");
    let ticks = handle.await?;
    println!("Stopped after {} ticks", ticks);
    Ok(())
}
