//! Regression scenarios at the default 16-bit / 8-fraction-bit format.

use lif_core::{FixedFormat, NeuronConfig};

use crate::error::HarnessResult;
use crate::input::InputPattern;
use crate::scenario::{Harness, Scenario};
use crate::trajectory::{Expectation, Trajectory};

/// Step ticks per reference scenario.
pub const REFERENCE_TICKS: u64 = 20;

#[derive(Clone, Debug)]
pub struct ReferenceCase {
    pub scenario: Scenario,
    pub expectations: Vec<Expectation>,
}

impl ReferenceCase {
    pub fn verify(&self, trajectory: &Trajectory) -> HarnessResult<()> {
        trajectory.verify(&self.expectations)
    }
}

fn case(
    name: &str,
    (leak, threshold, reset_value): (u64, u64, u64),
    input: InputPattern,
    duration: u64,
    expectations: Vec<Expectation>,
) -> HarnessResult<ReferenceCase> {
    let config = NeuronConfig::new(FixedFormat::DEFAULT, leak, threshold, reset_value)?;
    Ok(ReferenceCase {
        scenario: Scenario::new(name, config, input, duration),
        expectations,
    })
}

pub fn reference_suite() -> HarnessResult<Vec<ReferenceCase>> {
    Ok(vec![
        // 0.5 leak, 2.0 threshold: the floor in the leak shift pins it at 511
        case(
            "converge-below-threshold",
            (128, 512, 0),
            InputPattern::Constant(true),
            REFERENCE_TICKS,
            vec![
                Expectation::Potentials(vec![0, 256, 384, 448, 480, 496, 504, 508, 510, 511, 511]),
                Expectation::NoSpikes,
                Expectation::SettlesTo(511),
            ],
        )?,
        // ~0.9 leak, 1.5 threshold, ~0.1 reset: period-2 firing
        case(
            "period-two-spiking",
            (230, 384, 26),
            InputPattern::Constant(true),
            REFERENCE_TICKS,
            vec![
                Expectation::Potentials(vec![0, 256, 26, 279, 26, 279, 26]),
                Expectation::FirstSpikeBy(2),
                Expectation::SpikeEvery(2),
            ],
        )?,
        // ~0.8 leak, 1.0 threshold: 5 ticks of input, then nothing
        case(
            "leak-to-exhaustion",
            (204, 256, 0),
            InputPattern::Pulse { high_ticks: 5 },
            25,
            vec![
                Expectation::NonIncreasingFrom(5),
                Expectation::SilentFrom(6),
                Expectation::SettlesTo(0),
            ],
        )?,
        // 0.5 threshold: a single input tick is enough to fire
        case(
            "fire-every-tick",
            (204, 128, 0),
            InputPattern::Constant(true),
            REFERENCE_TICKS,
            vec![
                Expectation::FirstSpikeBy(2),
                Expectation::SpikeEvery(1),
            ],
        )?,
    ])
}

/// Run the whole suite on one harness and check every case.
pub fn run_reference_suite() -> HarnessResult<Vec<Trajectory>> {
    let cases = reference_suite()?;
    let mut harness = Harness::new(FixedFormat::DEFAULT);
    cases
        .iter()
        .map(|case| {
            let trajectory = harness.run(&case.scenario)?;
            case.verify(&trajectory)?;
            Ok(trajectory)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_passes() {
        let trajectories = run_reference_suite().unwrap();
        assert_eq!(trajectories.len(), 4);
        assert_eq!(trajectories[0].len(), REFERENCE_TICKS as usize + 1);
    }

    #[test]
    fn suite_names_are_unique() {
        let cases = reference_suite().unwrap();
        let mut names: Vec<_> = cases.iter().map(|c| c.scenario.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), cases.len());
    }
}
