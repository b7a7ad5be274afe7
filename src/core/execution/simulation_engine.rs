use super::config::SimulatorConfig;
use super::generator::ValueGenerator;
use crate::core::address_space::AddressSpaceSink;
use crate::core::errors::SimulationError;
use crate::core::nodes::NodeTree;
use crate::core::types::VariableHandle;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Dynamic variables that received a new value this tick
    pub updated: usize,
    pub skipped_static: usize,
    pub failure: Option<TickFailure>,
}

/// The variable that was degraded after a failed tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFailure {
    pub variable: VariableHandle,
    pub error: SimulationError,
}

/// Periodically regenerates every dynamic variable of a node tree.
///
/// The engine is the only writer of variable state once the tree is built.
pub struct SimulationEngine {
    tree: Arc<NodeTree>,
    sink: Arc<dyn AddressSpaceSink>,
    generator: ValueGenerator,
    tick_interval: Duration,
    current_tick: u64,
}

impl SimulationEngine {
    pub fn new(tree: Arc<NodeTree>, sink: Arc<dyn AddressSpaceSink>, config: &SimulatorConfig) -> Self {
        Self::with_generator(tree, sink, ValueGenerator::new(config.seed), config.tick_interval())
    }

    /// Create an engine around existing generation state
    pub fn with_generator(
        tree: Arc<NodeTree>,
        sink: Arc<dyn AddressSpaceSink>,
        generator: ValueGenerator,
        tick_interval: Duration,
    ) -> Self {
        Self {
            tree,
            sink,
            generator,
            tick_interval,
            current_tick: 0,
        }
    }

    pub fn tree(&self) -> &Arc<NodeTree> {
        &self.tree
    }

    pub fn generator(&self) -> &ValueGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut ValueGenerator {
        &mut self.generator
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Number of ticks executed so far
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Run one tick over all variables in index order.
    ///
    /// On a generation error the variable in flight is marked Bad with a null
    /// value, the error is logged and the rest of the tick is abandoned.
    pub fn tick(&mut self) -> TickReport {
        self.current_tick += 1;
        let now = Utc::now();
        let mut report = TickReport {
            tick: self.current_tick,
            updated: 0,
            skipped_static: 0,
            failure: None,
        };
        let mut in_flight = None;

        if let Err(err) = self.advance_all(now, &mut in_flight, &mut report) {
            report.failure = self.degrade(in_flight, err);
        }

        debug!(
            "=== Tick {} === updated {}, static {}",
            report.tick, report.updated, report.skipped_static
        );
        report
    }

    fn advance_all(
        &mut self,
        now: DateTime<Utc>,
        in_flight: &mut Option<VariableHandle>,
        report: &mut TickReport,
    ) -> Result<(), SimulationError> {
        for (handle, variable) in self.tree.variables() {
            if variable.is_static() {
                report.skipped_static += 1;
                continue;
            }

            *in_flight = Some(handle);
            let value = self
                .generator
                .generate(variable.data_type(), variable.max_value())?;
            variable.update(value, now);
            self.sink.notify_changed(variable);
            report.updated += 1;
        }
        Ok(())
    }

    fn degrade(&self, in_flight: Option<VariableHandle>, err: SimulationError) -> Option<TickFailure> {
        let Some(handle) = in_flight else {
            error!("Tick {} failed before any variable was touched: {}", self.current_tick, err);
            return None;
        };

        if let Some(variable) = self.tree.variable(handle) {
            variable.degrade(Utc::now());
            self.sink.notify_changed(variable);
            error!(
                "Tick {} failed on {}: {}. Marked Bad.",
                self.current_tick,
                variable.node_id(),
                err
            );
        }

        Some(TickFailure {
            variable: handle,
            error: err,
        })
    }

    /// Tick until `shutdown` resolves, sleeping the tick interval between
    /// ticks. A tick in progress always completes. Returns the tick count.
    pub async fn run<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            "Starting dynamic updates of {} variables every {:?}",
            self.tree.variable_count(),
            self.tick_interval
        );

        loop {
            self.tick();

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.tick_interval) => {}
            }
        }

        info!("Simulation stopped after {} ticks", self.current_tick);
        self.current_tick
    }

    /// Tick until the process exits
    pub async fn run_forever(&mut self) {
        self.run(std::future::pending::<()>()).await;
    }

    /// Move the engine onto a background task
    pub fn spawn<F>(mut self, shutdown: F) -> JoinHandle<u64>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
