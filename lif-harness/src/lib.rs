//! lif-harness: scenario-driven verification for lif-core
//!
//! Drives one neuron through a sequence of configurations and input patterns,
//! records `(tick, timestamp, reset, input, potential, spike)` every clock
//! edge, and checks the recorded trajectory against expectations.
//!
//! The optional "embedded" feature adds a fixed-capacity `heapless` trace sink.

pub mod error;
pub mod input;
pub mod record;
pub mod reference;
pub mod scenario;
pub mod trajectory;

// Re-exports
pub use error::{HarnessError, HarnessResult};
pub use input::InputPattern;
pub use record::{SinkFull, TickRecord, TraceSink};
pub use reference::{reference_suite, run_reference_suite, ReferenceCase, REFERENCE_TICKS};
pub use scenario::{run_scenario, Harness, Scenario, ScenarioRun};
pub use trajectory::{Expectation, Trajectory};
