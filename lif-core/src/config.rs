//! Per-scenario neuron parameters, all as scaled integers.

use crate::error::{ConfigError, Result};
use crate::fixed::FixedFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeuronConfig {
    format: FixedFormat,
    leak_factor: u64,
    threshold: u64,
    reset_value: u64,
}

impl NeuronConfig {
    /// `leak_factor` must fit in F bits (a value in [0, 1)); `threshold` and
    /// `reset_value` must fit in the N-bit register.
    pub fn new(
        format: FixedFormat,
        leak_factor: u64,
        threshold: u64,
        reset_value: u64,
    ) -> Result<Self> {
        if !format.fits_fraction(leak_factor) {
            return Err(ConfigError::out_of_range(
                "leak_factor",
                leak_factor,
                format.fraction_bits(),
            ));
        }
        if !format.fits_potential(threshold) {
            return Err(ConfigError::out_of_range(
                "threshold",
                threshold,
                format.potential_width(),
            ));
        }
        if !format.fits_potential(reset_value) {
            return Err(ConfigError::out_of_range(
                "reset_value",
                reset_value,
                format.potential_width(),
            ));
        }
        Ok(Self {
            format,
            leak_factor,
            threshold,
            reset_value,
        })
    }

    /// Parameters that can never fire: full leak, threshold above any
    /// reachable candidate.
    pub fn idle(format: FixedFormat) -> Self {
        Self {
            format,
            leak_factor: 0,
            threshold: format.potential_mask(),
            reset_value: 0,
        }
    }

    pub fn format(&self) -> FixedFormat {
        self.format
    }

    pub fn leak_factor(&self) -> u64 {
        self.leak_factor
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn reset_value(&self) -> u64 {
        self.reset_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_parameters() {
        let cfg = NeuronConfig::new(FixedFormat::DEFAULT, 230, 384, 26).unwrap();
        assert_eq!(cfg.leak_factor(), 230);
        assert_eq!(cfg.threshold(), 384);
        assert_eq!(cfg.reset_value(), 26);
        assert_eq!(cfg.format(), FixedFormat::DEFAULT);

        // boundaries are inclusive
        assert!(NeuronConfig::new(FixedFormat::DEFAULT, 255, 0xFFFF, 0xFFFF).is_ok());
    }

    #[test]
    fn idle_never_fires() {
        let fmt = FixedFormat::new(2, 1).unwrap();
        let cfg = NeuronConfig::idle(fmt);
        assert_eq!(cfg.threshold(), 3);
        assert!(fmt.integrate(fmt.leak(3, cfg.leak_factor()), true) < cfg.threshold());
    }

    #[test]
    fn rejects_leak_of_one_or_more() {
        let err = NeuronConfig::new(FixedFormat::DEFAULT, 256, 384, 0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ParameterOutOfRange {
                parameter: "leak_factor",
                value: 256,
                bits: 8
            }
        );
    }

    #[test]
    fn rejects_oversized_potentials() {
        let fmt = FixedFormat::DEFAULT;
        assert!(matches!(
            NeuronConfig::new(fmt, 128, 0x1_0000, 0),
            Err(ConfigError::ParameterOutOfRange { parameter: "threshold", bits: 16, .. })
        ));
        assert!(matches!(
            NeuronConfig::new(fmt, 128, 512, 0x1_0000),
            Err(ConfigError::ParameterOutOfRange { parameter: "reset_value", .. })
        ));
    }
}
