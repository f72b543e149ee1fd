use lif_core::{FixedFormat, NeuronConfig};
use lif_harness::{
    reference_suite, run_scenario, Expectation, Harness, HarnessError, InputPattern, Scenario,
    REFERENCE_TICKS,
};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config(leak: u64, threshold: u64, reset_value: u64) -> NeuronConfig {
    NeuronConfig::new(FixedFormat::DEFAULT, leak, threshold, reset_value).unwrap()
}

#[test]
fn every_reference_case_holds() {
    init_logging();
    let mut harness = Harness::new(FixedFormat::DEFAULT);
    for case in reference_suite().unwrap() {
        let trajectory = harness.run(&case.scenario).unwrap();
        if let Err(err) = case.verify(&trajectory) {
            panic!("{err}\npotentials: {:?}", trajectory.potentials());
        }
    }
}

#[test]
fn converges_to_511_without_firing() {
    init_logging();
    let s = Scenario::new("s1", config(128, 512, 0), InputPattern::Constant(true), REFERENCE_TICKS);
    let t = run_scenario(&s).unwrap();
    let potentials = t.potentials();
    assert_eq!(
        &potentials[..12],
        &[0, 256, 384, 448, 480, 496, 504, 508, 510, 511, 511, 511]
    );
    assert!(potentials[9..].iter().all(|&p| p == 511));
    assert_eq!(t.spike_count(), 0);
    assert_eq!(t.records()[9].potential_real, 511.0 / 256.0);
}

#[test]
fn period_two_cycle() {
    init_logging();
    let s = Scenario::new("s2", config(230, 384, 26), InputPattern::Constant(true), REFERENCE_TICKS);
    let t = run_scenario(&s).unwrap();
    let expected_spikes: Vec<u64> = (2..=REFERENCE_TICKS).step_by(2).collect();
    assert_eq!(t.spike_ticks(), expected_spikes);
    for r in &t.records()[1..] {
        let expected = if r.spike { 26 } else if r.tick == 1 { 256 } else { 279 };
        assert_eq!(r.potential, expected, "tick {}", r.tick);
    }
}

#[test]
fn sub_threshold_decay_after_input_stops() {
    init_logging();
    let s = Scenario::new("decay", config(204, 1024, 0), InputPattern::Pulse { high_ticks: 5 }, 25);
    let t = run_scenario(&s).unwrap();
    assert_eq!(&t.potentials()[..7], &[0, 256, 460, 622, 751, 854, 680]);
    t.verify(&[Expectation::NoSpikes, Expectation::NonIncreasingFrom(5)])
        .unwrap();
    let tail = &t.potentials()[5..];
    assert!(tail.windows(2).all(|w| w[1] < w[0] || w[1] == 0));
}

#[test]
fn immediate_spiking_at_low_threshold() {
    init_logging();
    for reset_value in [0, 26] {
        let s = Scenario::new(
            "s4",
            config(230, 128, reset_value),
            InputPattern::Constant(true),
            REFERENCE_TICKS,
        );
        let t = run_scenario(&s).unwrap();
        t.verify(&[Expectation::FirstSpikeBy(2), Expectation::SpikeEvery(1)])
            .unwrap();
        assert!(t.records()[1..].iter().all(|r| r.potential == reset_value));
    }
}

#[test]
fn broken_expectation_names_the_tick() {
    let s = Scenario::new("s1", config(128, 512, 0), InputPattern::Constant(true), 5);
    let t = run_scenario(&s).unwrap();
    match t.verify(&[Expectation::Potentials(vec![0, 256, 384, 448, 481])]) {
        Err(HarnessError::Mismatch { tick, observed, .. }) => {
            assert_eq!(tick, 4);
            assert_eq!(observed, "potential 480");
        }
        other => panic!("unexpected {other:?}"),
    }
}

proptest! {
    #[test]
    fn scenario_order_only_moves_timestamps(
        leak in 0u64..256,
        threshold in 1u64..=0x2000,
        reset_value in 0u64..=0x200,
        bits in proptest::collection::vec(any::<bool>(), 1..40),
    ) {
        let duration = bits.len() as u64;
        let a = Scenario::new("a", config(leak, threshold, reset_value), InputPattern::Sequence(bits), duration);
        let b = Scenario::new("b", config(230, 384, 26), InputPattern::Constant(true), 7);

        let alone = run_scenario(&a).unwrap();
        let mut h = Harness::new(FixedFormat::DEFAULT);
        let after = h.run_suite(&[b, a]).unwrap();

        prop_assert_eq!(alone.potentials(), after[1].potentials());
        prop_assert_eq!(alone.spikes(), after[1].spikes());
        prop_assert_eq!(after[1].records()[0].timestamp, 8);
    }

    #[test]
    fn input_free_trajectory_never_rises(
        leak in 0u64..256,
        start_ticks in 0u64..10,
    ) {
        // Threshold above anything reachable so no reset value interferes.
        let s = Scenario::new(
            "free",
            config(leak, 0xFFFF, 0),
            InputPattern::Pulse { high_ticks: start_ticks },
            start_ticks + 30,
        );
        let t = run_scenario(&s).unwrap();
        prop_assert!(t.non_increasing_from(start_ticks));
        prop_assert_eq!(t.spike_count(), 0);
    }
}
