//! Leaky integrate-and-fire neuron with an N-bit fixed-point membrane register

use log::{debug, trace};

use crate::config::NeuronConfig;
use crate::error::{ConfigError, Result};
use crate::fixed::FixedFormat;
use crate::step::{step_with, StepOutput};

/// Control state. `Held` right after a reset, `Running` once a step has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Held,
    Running,
}

/// What the caller observes after one clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutput {
    pub reset: bool,
    pub potential: u64,
    pub spike: bool,
}

pub struct LifNeuron {
    config: NeuronConfig,
    potential: u64,
    spiked: bool,
    phase: Phase,
}

impl LifNeuron {
    pub fn new(config: NeuronConfig) -> Self {
        Self {
            config,
            potential: 0,
            spiked: false,
            phase: Phase::Held,
        }
    }

    /// Clear the register and spike flag. Idempotent.
    pub fn reset(&mut self) {
        self.potential = 0;
        self.spiked = false;
        self.phase = Phase::Held;
    }

    /// Swap in new parameters. The register is left as is; callers reset
    /// between scenarios. The format is fixed for the lifetime of the neuron.
    pub fn configure(&mut self, config: NeuronConfig) -> Result<()> {
        let expected = self.format();
        if config.format() != expected {
            return Err(ConfigError::FormatMismatch {
                expected,
                found: config.format(),
            });
        }
        debug!(
            "configure: leak={} threshold={} reset_value={}",
            config.leak_factor(),
            config.threshold(),
            config.reset_value()
        );
        self.config = config;
        Ok(())
    }

    /// Apply one transition and commit it.
    pub fn step(&mut self, input: bool) -> StepOutput {
        let out = step_with(&self.config, self.potential, input);
        if out.spike {
            trace!("spike: candidate={} -> {}", out.candidate, out.next_potential);
        }
        self.potential = out.next_potential;
        self.spiked = out.spike;
        self.phase = Phase::Running;
        out
    }

    /// One clock edge. A set `reset` flag wins over the step and the input is
    /// ignored for that tick.
    pub fn tick(&mut self, input: bool, reset: bool) -> TickOutput {
        if reset {
            self.reset();
        } else {
            self.step(input);
        }
        TickOutput {
            reset,
            potential: self.potential,
            spike: self.spiked,
        }
    }

    #[inline]
    pub fn potential(&self) -> u64 {
        self.potential
    }

    #[inline]
    pub fn spiked(&self) -> bool {
        self.spiked
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &NeuronConfig {
        &self.config
    }

    pub fn format(&self) -> FixedFormat {
        self.config.format()
    }
}
