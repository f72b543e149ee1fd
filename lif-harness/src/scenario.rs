//! Scenario driver: reset, then one step per tick, recording every edge.
//!
//! Semantics:
//! - tick 0 of every scenario is the reset edge (potential 0, no spike)
//! - ticks 1..=duration apply `step` with input bits 0..duration of the pattern
//! - the harness clock keeps counting across scenarios; it only feeds
//!   `TickRecord::timestamp`

use log::debug;

use lif_core::{FixedFormat, LifNeuron, NeuronConfig};

use crate::error::{HarnessError, HarnessResult};
use crate::input::InputPattern;
use crate::record::{TickRecord, TraceSink};
use crate::trajectory::Trajectory;

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub config: NeuronConfig,
    pub input: InputPattern,
    /// Step ticks after the reset tick.
    pub duration: u64,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        config: NeuronConfig,
        input: InputPattern,
        duration: u64,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            input,
            duration,
        }
    }

    /// Fails on a malformed pattern, or if a finite input runs out before
    /// `duration`.
    pub fn check_input(&self) -> HarnessResult<()> {
        self.input.validate().map_err(|err| match err {
            HarnessError::InvalidInput { reason } => HarnessError::InvalidInput {
                reason: format!("scenario `{}`: {reason}", self.name),
            },
            other => other,
        })?;
        match self.input.available_ticks() {
            Some(available) if available < self.duration => Err(HarnessError::InputTooShort {
                scenario: self.name.clone(),
                available,
                duration: self.duration,
            }),
            Some(available) if available > self.duration => {
                debug!(
                    "scenario `{}`: ignoring {} trailing input bits",
                    self.name,
                    available - self.duration
                );
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Records reserved up front by `Harness::run`; longer runs grow as they go.
const PREALLOC_LIMIT: usize = 4096;

/// Owns the one neuron all scenarios run on, plus the reporting clock.
pub struct Harness {
    neuron: LifNeuron,
    clock: u64,
}

impl Harness {
    pub fn new(format: FixedFormat) -> Self {
        Self {
            neuron: LifNeuron::new(NeuronConfig::idle(format)),
            clock: 0,
        }
    }

    pub fn format(&self) -> FixedFormat {
        self.neuron.format()
    }

    pub fn neuron(&self) -> &LifNeuron {
        &self.neuron
    }

    /// Ticks elapsed across every scenario run so far.
    pub fn now(&self) -> u64 {
        self.clock
    }

    fn observe(&mut self, tick: u64, input: bool, reset: bool) -> TickRecord {
        let out = self.neuron.tick(input, reset);
        let record = TickRecord::observe(self.format(), tick, self.clock, input, out);
        self.clock = self.clock.saturating_add(1);
        record
    }

    /// Validate and load `scenario`, then apply the reset edge (tick 0).
    pub fn begin(&mut self, scenario: &Scenario) -> HarnessResult<TickRecord> {
        scenario.check_input()?;
        self.neuron.configure(scenario.config)?;
        debug!(
            "scenario `{}`: {} ticks from t={}",
            scenario.name, scenario.duration, self.clock
        );
        Ok(self.observe(0, false, true))
    }

    /// Apply step tick `tick` (1-based). `None` once the scenario is over.
    pub fn advance(&mut self, scenario: &Scenario, tick: u64) -> Option<TickRecord> {
        if tick == 0 || tick > scenario.duration {
            return None;
        }
        let input = scenario.input.bit(tick - 1)?;
        Some(self.observe(tick, input, false))
    }

    /// Lazy run; the reset edge has already been applied when this returns.
    pub fn start<'a>(&'a mut self, scenario: &'a Scenario) -> HarnessResult<ScenarioRun<'a>> {
        let first = self.begin(scenario)?;
        Ok(ScenarioRun {
            harness: self,
            scenario,
            pending: Some(first),
            next_tick: 1,
        })
    }

    /// Run to completion into `sink`; returns the number of records written.
    pub fn run_into<S: TraceSink>(
        &mut self,
        scenario: &Scenario,
        sink: &mut S,
    ) -> HarnessResult<usize> {
        let mut written = 0;
        for record in self.start(scenario)? {
            sink.record(record).map_err(|full| HarnessError::SinkFull {
                scenario: scenario.name.clone(),
                capacity: full.capacity,
            })?;
            written += 1;
        }
        Ok(written)
    }

    pub fn run(&mut self, scenario: &Scenario) -> HarnessResult<Trajectory> {
        let capacity = usize::try_from(scenario.duration)
            .map_or(PREALLOC_LIMIT, |d| d.saturating_add(1).min(PREALLOC_LIMIT));
        let mut records = Vec::with_capacity(capacity);
        self.run_into(scenario, &mut records)?;
        let trajectory = Trajectory::new(scenario.name.clone(), self.format(), records);
        debug!(
            "scenario `{}` done: {} spikes, t={}",
            scenario.name,
            trajectory.spike_count(),
            self.clock
        );
        Ok(trajectory)
    }

    /// Run scenarios back to back. Each starts from its own reset, so only the
    /// timestamps depend on order.
    pub fn run_suite(&mut self, scenarios: &[Scenario]) -> HarnessResult<Vec<Trajectory>> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }
}

/// Iterator over the records of one scenario.
pub struct ScenarioRun<'a> {
    harness: &'a mut Harness,
    scenario: &'a Scenario,
    pending: Option<TickRecord>,
    next_tick: u64,
}

impl ScenarioRun<'_> {
    /// Neuron state as of the last yielded record.
    pub fn neuron(&self) -> &LifNeuron {
        &self.harness.neuron
    }

    /// `None` when the count does not fit in a `u64`.
    fn remaining_exact(&self) -> Option<u64> {
        let pending = u64::from(self.pending.is_some());
        // next_tick starts at 1 and never wraps
        let steps = self.scenario.duration.saturating_sub(self.next_tick - 1);
        pending.checked_add(steps)
    }

    /// Records still to come, saturating at `u64::MAX`.
    pub fn remaining(&self) -> u64 {
        self.remaining_exact().unwrap_or(u64::MAX)
    }
}

impl Iterator for ScenarioRun<'_> {
    type Item = TickRecord;

    fn next(&mut self) -> Option<TickRecord> {
        if let Some(first) = self.pending.take() {
            return Some(first);
        }
        let record = self.harness.advance(self.scenario, self.next_tick)?;
        self.next_tick = self.next_tick.saturating_add(1);
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining_exact().map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

/// Run one scenario on a fresh harness (timestamps start at 0).
pub fn run_scenario(scenario: &Scenario) -> HarnessResult<Trajectory> {
    Harness::new(scenario.config.format()).run(scenario)
}
