use crate::core::errors::SimulationError;
use crate::core::values::{SemanticType, TagValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const STRING_TAG_PREFIX: &str = "Invalid_";

/// Simulation state shared by every variable: the process-wide integer
/// counter and the random source.
pub struct ValueGenerator {
    counter: i64,
    rng: StdRng,
}

impl ValueGenerator {
    /// Seeded generator, or entropy-seeded when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { counter: 0, rng }
    }

    /// Current value of the shared integer counter
    pub fn counter(&self) -> i64 {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    /// Produce the next value for a variable of `data_type` bounded by
    /// `max_value`. Types without a generation rule yield `Ok(None)`.
    pub fn generate(
        &mut self,
        data_type: &SemanticType,
        max_value: i32,
    ) -> Result<Option<TagValue>, SimulationError> {
        let value = match data_type {
            SemanticType::Integer => TagValue::Integer(self.next_count(max_value)),
            SemanticType::Double => TagValue::Double(self.next_double(data_type, max_value)?),
            SemanticType::Boolean => TagValue::Boolean(self.rng.gen_bool(0.5)),
            SemanticType::Int32 => TagValue::Int32(self.below(data_type, max_value)?),
            SemanticType::String => TagValue::String(format!(
                "{}{}",
                STRING_TAG_PREFIX,
                self.below(data_type, max_value)?
            )),
            SemanticType::Float | SemanticType::DateTime | SemanticType::Unsupported(_) => {
                return Ok(None)
            }
        };
        Ok(Some(value))
    }

    /// Advance the shared counter; past the bound it restarts at 1
    fn next_count(&mut self, max_value: i32) -> i64 {
        self.counter += 1;
        if self.counter > i64::from(max_value) {
            self.counter = 1;
        }
        self.counter
    }

    /// Uniform draw in [0, 100) at two decimals, clamped down to the bound
    fn next_double(&mut self, data_type: &SemanticType, max_value: i32) -> Result<f64, SimulationError> {
        if max_value < 0 {
            return Err(SimulationError::InvalidBound {
                data_type: data_type.clone(),
                max_value,
            });
        }
        let raw = self.rng.gen::<f64>() * 100.0;
        let rounded = (raw * 100.0).round() / 100.0;
        Ok(rounded.min(f64::from(max_value)))
    }

    /// Uniform integer in [0, max_value); an empty range yields 0
    fn below(&mut self, data_type: &SemanticType, max_value: i32) -> Result<i32, SimulationError> {
        match max_value {
            m if m < 0 => Err(SimulationError::InvalidBound {
                data_type: data_type.clone(),
                max_value,
            }),
            0 => Ok(0),
            m => Ok(self.rng.gen_range(0..m)),
        }
    }
}

impl std::fmt::Debug for ValueGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueGenerator")
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}
