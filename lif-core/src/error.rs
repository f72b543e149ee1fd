//! Configuration errors. The transition function itself is total; everything
//! that can go wrong is caught when a format or configuration is built.

use thiserror::Error;

use crate::fixed::FixedFormat;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fraction bits must be positive")]
    ZeroFractionBits,

    #[error("fraction bits ({fraction_bits}) must be below the potential width ({potential_width})")]
    FractionNotBelowWidth {
        fraction_bits: u32,
        potential_width: u32,
    },

    #[error("potential width {width} exceeds the supported maximum of {max} bits")]
    WidthTooLarge { width: u32, max: u32 },

    #[error("{parameter} = {value} does not fit in {bits} bits")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: u64,
        bits: u32,
    },

    #[error("configuration format {found} does not match neuron format {expected}")]
    FormatMismatch {
        expected: FixedFormat,
        found: FixedFormat,
    },
}

impl ConfigError {
    pub(crate) fn out_of_range(parameter: &'static str, value: u64, bits: u32) -> Self {
        Self::ParameterOutOfRange {
            parameter,
            value,
            bits,
        }
    }
}

pub type Result<T, E = ConfigError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::ZeroFractionBits.to_string(),
            "fraction bits must be positive"
        );
        assert_eq!(
            ConfigError::out_of_range("leak_factor", 256, 8).to_string(),
            "leak_factor = 256 does not fit in 8 bits"
        );
        let err = ConfigError::FormatMismatch {
            expected: FixedFormat::DEFAULT,
            found: FixedFormat::new(12, 4).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "configuration format u12/4 (scale 16) does not match neuron format u16/8 (scale 256)"
        );
    }
}
