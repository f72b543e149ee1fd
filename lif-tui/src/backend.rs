// Backend abstraction for the TUI so the viewer does not care where records come from.

use anyhow::{anyhow, Result};
use lif_core::FixedFormat;
use lif_harness::{reference_suite, Harness, ReferenceCase, TickRecord, Trajectory};

/// Anything that can produce one neuron's records tick by tick.
pub trait NeuronBackend {
    /// Advance one tick; `None` once the current scenario has run its course.
    fn step(&mut self) -> Option<TickRecord>;
    /// Reset and start the current scenario again; returns the reset record.
    fn restart(&mut self) -> Result<TickRecord>;
    /// Move on to the next scenario (wrapping); returns its reset record.
    fn next_scenario(&mut self) -> Result<TickRecord>;

    fn label(&self) -> &str;
    fn format(&self) -> FixedFormat;
    fn threshold(&self) -> u64;
    fn duration(&self) -> u64;

    /// Most recent record of the current scenario, if any tick has run.
    fn latest(&self) -> Option<TickRecord> {
        None
    }

    /// Outcome of the scenario's checks once it has finished. Default: no checks.
    fn verdict(&self) -> Option<String> {
        None
    }
}

/// Walks the reference suite on a single harness.
pub struct ScenarioBackend {
    harness: Harness,
    cases: Vec<ReferenceCase>,
    current: usize,
    next_tick: u64,
    records: Vec<TickRecord>,
}

impl ScenarioBackend {
    pub fn new() -> Result<Self> {
        let cases = reference_suite()?;
        let format = cases
            .first()
            .map(|c| c.scenario.config.format())
            .ok_or_else(|| anyhow!("reference suite is empty"))?;
        let mut backend = Self {
            harness: Harness::new(format),
            cases,
            current: 0,
            next_tick: 1,
            records: Vec::new(),
        };
        backend.restart()?;
        Ok(backend)
    }

    fn case(&self) -> &ReferenceCase {
        &self.cases[self.current]
    }

    fn keep(&mut self, record: TickRecord) -> TickRecord {
        self.records.push(record);
        record
    }
}

impl NeuronBackend for ScenarioBackend {
    fn step(&mut self) -> Option<TickRecord> {
        let record = self
            .harness
            .advance(&self.cases[self.current].scenario, self.next_tick)?;
        self.next_tick += 1;
        Some(self.keep(record))
    }

    fn restart(&mut self) -> Result<TickRecord> {
        self.records.clear();
        self.next_tick = 1;
        let record = self.harness.begin(&self.cases[self.current].scenario)?;
        log::info!("scenario `{}` started at t={}", self.label(), record.timestamp);
        Ok(self.keep(record))
    }

    fn next_scenario(&mut self) -> Result<TickRecord> {
        self.current = (self.current + 1) % self.cases.len();
        self.restart()
    }

    fn label(&self) -> &str {
        &self.case().scenario.name
    }

    fn format(&self) -> FixedFormat {
        self.harness.format()
    }

    fn threshold(&self) -> u64 {
        self.case().scenario.config.threshold()
    }

    fn duration(&self) -> u64 {
        self.case().scenario.duration
    }

    fn latest(&self) -> Option<TickRecord> {
        self.records.last().copied()
    }

    fn verdict(&self) -> Option<String> {
        if self.next_tick <= self.duration() {
            return None;
        }
        let trajectory = Trajectory::new(self.label(), self.format(), self.records.clone());
        let verdict = match self.case().verify(&trajectory) {
            Ok(()) => format!("PASS ({} spikes)", trajectory.spike_count()),
            Err(err) => format!("FAIL: {err}"),
        };
        log::info!("scenario `{}`: {}", self.label(), verdict);
        Some(verdict)
    }
}
