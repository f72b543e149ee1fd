//! The per-tick transition: leak -> accumulate -> threshold/reset.

use crate::config::NeuronConfig;
use crate::fixed::FixedFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutput {
    /// Leaked-and-integrated value before the threshold test.
    pub candidate: u64,
    pub next_potential: u64,
    pub spike: bool,
}

/// One evaluation of the update rule.
///
/// 1. `potential * leak_factor` at full width
/// 2. shift right by F, truncating
/// 3. add 1.0 (`2^F`) if `input`
/// 4. wrap to N bits; this is the candidate
/// 5. `candidate >= threshold` spikes and loads `reset_value`
/// 6. otherwise the candidate becomes the next potential
///
/// Inputs are expected to fit their declared widths; [`NeuronConfig`] is the
/// place that enforces it.
#[inline]
pub fn step(
    format: FixedFormat,
    potential: u64,
    leak_factor: u64,
    threshold: u64,
    reset_value: u64,
    input: bool,
) -> StepOutput {
    let leaked = format.leak(potential, leak_factor);
    let candidate = format.integrate(leaked, input);
    if candidate >= threshold {
        StepOutput {
            candidate,
            next_potential: reset_value,
            spike: true,
        }
    } else {
        StepOutput {
            candidate,
            next_potential: candidate,
            spike: false,
        }
    }
}

#[inline]
pub fn step_with(config: &NeuronConfig, potential: u64, input: bool) -> StepOutput {
    step(
        config.format(),
        potential,
        config.leak_factor(),
        config.threshold(),
        config.reset_value(),
        input,
    )
}
