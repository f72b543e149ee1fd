// Application state for the TUI: rolling potential history plus spike/reset raster.

use std::collections::VecDeque;

use anyhow::Result;
use lif_harness::TickRecord;

use crate::backend::NeuronBackend;

pub struct App<B: NeuronBackend> {
    pub backend: B,
    pub width: usize,               // number of columns (time window)
    pub potentials: VecDeque<u64>,  // newest last
    pub spikes: VecDeque<char>,
    pub resets: VecDeque<char>,
    pub last: Option<TickRecord>,
    pub verdict: Option<String>,
    pub running: bool,
}

impl<B: NeuronBackend> App<B> {
    pub fn new(backend: B, width: usize) -> Self {
        let initial = backend.latest();
        let mut app = Self {
            backend,
            width,
            potentials: VecDeque::with_capacity(width),
            spikes: VecDeque::with_capacity(width),
            resets: VecDeque::with_capacity(width),
            last: None,
            verdict: None,
            running: false,
        };
        // the backend may already have applied its reset edge
        if let Some(record) = initial {
            app.push(record);
        }
        app
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    fn push(&mut self, record: TickRecord) {
        if self.potentials.len() == self.width {
            self.potentials.pop_front();
            self.spikes.pop_front();
            self.resets.pop_front();
        }
        self.potentials.push_back(record.potential);
        self.spikes.push_back(if record.spike { '|' } else { ' ' });
        self.resets.push_back(if record.reset { 'R' } else { ' ' });
        self.last = Some(record);
    }

    /// Advance one tick. Pauses once the scenario is exhausted.
    pub fn step(&mut self) {
        match self.backend.step() {
            Some(record) => self.push(record),
            None => {
                self.running = false;
                if self.verdict.is_none() {
                    self.verdict = self.backend.verdict();
                }
            }
        }
    }

    /// Assert reset and start the current scenario over.
    pub fn restart(&mut self) -> Result<()> {
        let record = self.backend.restart()?;
        self.verdict = None;
        self.push(record);
        Ok(())
    }

    pub fn next_scenario(&mut self) -> Result<()> {
        let record = self.backend.next_scenario()?;
        self.verdict = None;
        self.potentials.clear();
        self.spikes.clear();
        self.resets.clear();
        self.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScenarioBackend;

    #[test]
    fn startup_shows_initial_reset() {
        let app = App::new(ScenarioBackend::new().unwrap(), 80);
        assert_eq!(app.resets.iter().collect::<String>(), "R");
        assert_eq!(app.potentials.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(app.last.is_some_and(|r| r.reset && r.tick == 0));
    }

    #[test]
    fn history_is_bounded_by_width() {
        let mut app = App::new(ScenarioBackend::new().unwrap(), 4);
        for _ in 0..10 {
            app.step();
        }
        assert_eq!(app.potentials.len(), 4);
        assert_eq!(app.potentials.back(), Some(&511));
        assert!(app.verdict.is_none());
    }

    #[test]
    fn exhausting_a_scenario_pauses_with_a_verdict() {
        let mut app = App::new(ScenarioBackend::new().unwrap(), 80);
        app.toggle_running();
        for _ in 0..30 {
            app.step();
        }
        assert!(!app.running);
        assert_eq!(app.verdict.as_deref(), Some("PASS (0 spikes)"));

        app.next_scenario().unwrap();
        assert!(app.verdict.is_none());
        assert_eq!(app.resets.iter().collect::<String>(), "R");
        for _ in 0..4 {
            app.step();
        }
        assert_eq!(app.spikes.iter().collect::<String>(), "  | |");
    }
}
