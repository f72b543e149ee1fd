//! Recorded scenario output and the checks run against it.

use lif_core::FixedFormat;

use crate::error::{HarnessError, HarnessResult};
use crate::record::TickRecord;

/// Assertions on a trajectory. Tick indices are scenario-local (0 = reset tick).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    /// Leading potentials, starting at the reset tick.
    Potentials(Vec<u64>),
    NoSpikes,
    /// Exact set of spiking ticks.
    SpikesAt(Vec<u64>),
    /// At least one spike no later than this tick.
    FirstSpikeBy(u64),
    /// Potential never increases from this tick on.
    NonIncreasingFrom(u64),
    /// No spikes from this tick on.
    SilentFrom(u64),
    /// Final two ticks both hold this potential.
    SettlesTo(u64),
    /// Spikes repeat with this period from the first spike through the end.
    SpikeEvery(u64),
}

#[derive(Clone, Debug)]
pub struct Trajectory {
    scenario: String,
    format: FixedFormat,
    records: Vec<TickRecord>,
}

impl Trajectory {
    pub fn new(scenario: impl Into<String>, format: FixedFormat, records: Vec<TickRecord>) -> Self {
        Self {
            scenario: scenario.into(),
            format,
            records,
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn format(&self) -> FixedFormat {
        self.format
    }

    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn potentials(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.potential).collect()
    }

    pub fn spikes(&self) -> Vec<bool> {
        self.records.iter().map(|r| r.spike).collect()
    }

    pub fn spike_ticks(&self) -> Vec<u64> {
        self.records.iter().filter(|r| r.spike).map(|r| r.tick).collect()
    }

    pub fn spike_count(&self) -> usize {
        self.records.iter().filter(|r| r.spike).count()
    }

    pub fn first_spike(&self) -> Option<u64> {
        self.records.iter().find(|r| r.spike).map(|r| r.tick)
    }

    fn first_increase(&self, from: u64) -> Option<&TickRecord> {
        self.records
            .windows(2)
            .filter(|w| w[0].tick >= from)
            .find(|w| w[1].potential > w[0].potential)
            .map(|w| &w[1])
    }

    /// First tick at or after `from` where the potential rose, if any.
    pub fn first_increase_from(&self, from: u64) -> Option<u64> {
        self.first_increase(from).map(|r| r.tick)
    }

    pub fn non_increasing_from(&self, from: u64) -> bool {
        self.first_increase_from(from).is_none()
    }

    /// Potential held over the last two ticks.
    pub fn settled_value(&self) -> Option<u64> {
        match self.records.as_slice() {
            [.., a, b] if a.potential == b.potential => Some(b.potential),
            _ => None,
        }
    }

    /// Common gap between consecutive spikes, if there are at least two and
    /// every gap agrees.
    pub fn spike_period(&self) -> Option<u64> {
        let ticks = self.spike_ticks();
        let mut gaps = ticks.windows(2).map(|w| w[1] - w[0]);
        let first = gaps.next()?;
        gaps.all(|g| g == first).then_some(first)
    }

    fn last_tick(&self) -> u64 {
        self.records.last().map_or(0, |r| r.tick)
    }

    /// Check every expectation, failing on the first mismatch.
    pub fn verify(&self, expectations: &[Expectation]) -> HarnessResult<()> {
        for expectation in expectations {
            self.check(expectation)?;
        }
        Ok(())
    }

    fn check(&self, expectation: &Expectation) -> HarnessResult<()> {
        let name = self.scenario.as_str();
        match expectation {
            Expectation::Potentials(expected) => {
                for (i, want) in expected.iter().enumerate() {
                    match self.records.get(i) {
                        Some(rec) if rec.potential == *want => {}
                        Some(rec) => {
                            return Err(HarnessError::mismatch(
                                name,
                                rec.tick,
                                format!("potential {want}"),
                                format!("potential {}", rec.potential),
                            ))
                        }
                        None => {
                            return Err(HarnessError::mismatch(
                                name,
                                i as u64,
                                format!("potential {want}"),
                                "end of trajectory",
                            ))
                        }
                    }
                }
            }
            Expectation::NoSpikes => {
                if let Some(tick) = self.first_spike() {
                    return Err(HarnessError::mismatch(name, tick, "no spike", "spike"));
                }
            }
            Expectation::SpikesAt(expected) => {
                let observed = self.spike_ticks();
                if &observed != expected {
                    let tick = match observed.iter().zip(expected).find(|(o, e)| o != e) {
                        Some((o, e)) => (*o).min(*e),
                        None if observed.len() > expected.len() => observed[expected.len()],
                        None => expected[observed.len()],
                    };
                    return Err(HarnessError::mismatch(
                        name,
                        tick,
                        format!("spikes at {expected:?}"),
                        format!("spikes at {observed:?}"),
                    ));
                }
            }
            Expectation::FirstSpikeBy(limit) => match self.first_spike() {
                Some(tick) if tick <= *limit => {}
                Some(tick) => {
                    return Err(HarnessError::mismatch(
                        name,
                        tick,
                        format!("first spike by tick {limit}"),
                        format!("first spike at tick {tick}"),
                    ))
                }
                None => {
                    return Err(HarnessError::mismatch(
                        name,
                        *limit,
                        format!("first spike by tick {limit}"),
                        "no spike",
                    ))
                }
            },
            Expectation::NonIncreasingFrom(from) => {
                if let Some(rec) = self.first_increase(*from) {
                    return Err(HarnessError::mismatch(
                        name,
                        rec.tick,
                        format!("non-increasing potential from tick {from}"),
                        format!("potential rose to {}", rec.potential),
                    ));
                }
            }
            Expectation::SilentFrom(from) => {
                if let Some(rec) = self.records.iter().find(|r| r.tick >= *from && r.spike) {
                    return Err(HarnessError::mismatch(
                        name,
                        rec.tick,
                        format!("silence from tick {from}"),
                        "spike",
                    ));
                }
            }
            Expectation::SettlesTo(value) => {
                if self.settled_value() != Some(*value) {
                    let observed = match self.settled_value() {
                        Some(v) => format!("settled at {v}"),
                        None => "still moving".to_string(),
                    };
                    return Err(HarnessError::mismatch(
                        name,
                        self.last_tick(),
                        format!("settled at {value}"),
                        observed,
                    ));
                }
            }
            Expectation::SpikeEvery(period) => {
                let observed = self.spike_period();
                let last_spike = self.spike_ticks().last().copied();
                let tail_ok = last_spike.map_or(false, |t| self.last_tick() - t < *period);
                if observed != Some(*period) || !tail_ok {
                    let observed = match (observed, last_spike) {
                        (Some(p), Some(t)) if !tail_ok => {
                            format!("period {p}, but last spike at tick {t}")
                        }
                        (Some(p), _) => format!("period {p}"),
                        (None, _) => format!("irregular spikes at {:?}", self.spike_ticks()),
                    };
                    return Err(HarnessError::mismatch(
                        name,
                        self.first_spike().unwrap_or(0),
                        format!("spike every {period} ticks"),
                        observed,
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory(points: &[(u64, bool)]) -> Trajectory {
        let format = FixedFormat::DEFAULT;
        let records = points
            .iter()
            .enumerate()
            .map(|(i, &(potential, spike))| TickRecord {
                tick: i as u64,
                timestamp: i as u64,
                reset: i == 0,
                input: i != 0,
                potential,
                potential_real: format.to_real(potential),
                spike,
            })
            .collect();
        Trajectory::new("t", format, records)
    }

    #[test]
    fn queries() {
        let t = trajectory(&[(0, false), (256, false), (26, true), (279, false), (26, true)]);
        assert_eq!(t.len(), 5);
        assert_eq!(t.potentials(), vec![0, 256, 26, 279, 26]);
        assert_eq!(t.spike_ticks(), vec![2, 4]);
        assert_eq!(t.spike_count(), 2);
        assert_eq!(t.first_spike(), Some(2));
        assert_eq!(t.spike_period(), Some(2));
        assert_eq!(t.first_increase_from(0), Some(1));
        assert_eq!(t.settled_value(), None);
    }

    #[test]
    fn verify_passes_matching_expectations() {
        let t = trajectory(&[(0, false), (256, false), (26, true), (279, false), (26, true)]);
        t.verify(&[
            Expectation::Potentials(vec![0, 256, 26]),
            Expectation::SpikesAt(vec![2, 4]),
            Expectation::FirstSpikeBy(2),
            Expectation::SpikeEvery(2),
        ])
        .unwrap();
    }

    #[test]
    fn verify_reports_first_divergent_tick() {
        let t = trajectory(&[(0, false), (256, false), (384, false)]);
        let err = t.verify(&[Expectation::Potentials(vec![0, 256, 385])]).unwrap_err();
        assert_eq!(
            err,
            HarnessError::Mismatch {
                scenario: "t".into(),
                tick: 2,
                expected: "potential 385".into(),
                observed: "potential 384".into(),
            }
        );

        let err = t.verify(&[Expectation::Potentials(vec![0, 256, 384, 448])]).unwrap_err();
        assert!(matches!(err, HarnessError::Mismatch { tick: 3, .. }));
    }

    #[test]
    fn monotonic_and_silence_checks() {
        let t = trajectory(&[(0, false), (256, true), (200, false), (160, false), (160, false)]);
        t.verify(&[
            Expectation::NonIncreasingFrom(1),
            Expectation::SilentFrom(2),
            Expectation::SettlesTo(160),
        ])
        .unwrap();
        assert!(t.verify(&[Expectation::NonIncreasingFrom(0)]).is_err());
        assert!(t.verify(&[Expectation::NoSpikes]).is_err());
        assert!(t.verify(&[Expectation::SettlesTo(0)]).is_err());
    }

    #[test]
    fn spike_every_requires_spiking_to_continue() {
        let t = trajectory(&[(0, false), (0, true), (0, true), (0, false), (0, false)]);
        assert_eq!(t.spike_period(), Some(1));
        assert!(t.verify(&[Expectation::SpikeEvery(1)]).is_err());
        assert!(t.verify(&[Expectation::FirstSpikeBy(0)]).is_err());
    }
}
