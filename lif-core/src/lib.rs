//! lif-core: single fixed-point leaky integrate-and-fire neuron (bit-exact)
//!
//! The membrane potential lives in an N-bit unsigned register with F
//! fractional bits. Each tick leaks it by a factor in [0, 1), adds 1.0 when the
//! input bit is set, and fires + loads the reset value once the threshold is met.

pub mod config;
pub mod error;
pub mod fixed;
pub mod neuron;
pub mod step;

// Re-exports
pub use config::NeuronConfig;
pub use error::{ConfigError, Result};
pub use fixed::{FixedFormat, MAX_POTENTIAL_WIDTH};
pub use neuron::{LifNeuron, Phase, TickOutput};
pub use step::{step, step_with, StepOutput};
