//! Unsigned fixed-point register format (N-bit potential, F fractional bits)
//!
//! The potential register behaves like an N-bit unsigned hardware register:
//! products are formed at full width, narrowed with a truncating shift, and
//! additions wrap modulo 2^N. Wraparound is intended behaviour, not an error.

use core::fmt;

use crate::error::{ConfigError, Result};

/// Widest register a `u64` potential can hold.
pub const MAX_POTENTIAL_WIDTH: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedFormat {
    potential_width: u32,
    fraction_bits: u32,
}

impl FixedFormat {
    /// 16-bit register with 8 fractional bits (scale 256).
    pub const DEFAULT: FixedFormat = FixedFormat {
        potential_width: 16,
        fraction_bits: 8,
    };

    /// Validates `0 < fraction_bits < potential_width <= 64`.
    pub fn new(potential_width: u32, fraction_bits: u32) -> Result<Self> {
        if fraction_bits == 0 {
            return Err(ConfigError::ZeroFractionBits);
        }
        if potential_width > MAX_POTENTIAL_WIDTH {
            return Err(ConfigError::WidthTooLarge {
                width: potential_width,
                max: MAX_POTENTIAL_WIDTH,
            });
        }
        if fraction_bits >= potential_width {
            return Err(ConfigError::FractionNotBelowWidth {
                fraction_bits,
                potential_width,
            });
        }
        Ok(Self {
            potential_width,
            fraction_bits,
        })
    }

    #[inline]
    pub const fn potential_width(&self) -> u32 {
        self.potential_width
    }

    #[inline]
    pub const fn fraction_bits(&self) -> u32 {
        self.fraction_bits
    }

    /// 2^F, the multiplier between a real value and its encoding.
    #[inline]
    pub const fn scale(&self) -> u64 {
        1u64 << self.fraction_bits
    }

    /// Encoding of real 1.0; what one input spike adds.
    #[inline]
    pub const fn one(&self) -> u64 {
        self.scale()
    }

    /// 2^N - 1
    #[inline]
    pub const fn potential_mask(&self) -> u64 {
        if self.potential_width == 64 {
            u64::MAX
        } else {
            (1u64 << self.potential_width) - 1
        }
    }

    /// Largest leak factor (just under 1.0).
    #[inline]
    pub const fn max_leak_factor(&self) -> u64 {
        self.scale() - 1
    }

    #[inline]
    pub const fn fits_potential(&self, value: u64) -> bool {
        value <= self.potential_mask()
    }

    #[inline]
    pub const fn fits_fraction(&self, value: u64) -> bool {
        value <= self.max_leak_factor()
    }

    /// Narrow a wide intermediate to the register width (mod 2^N).
    #[inline]
    pub const fn wrap(&self, wide: u128) -> u64 {
        (wide & self.potential_mask() as u128) as u64
    }

    /// Steps 1-2 of the update: full-width `potential * leak_factor`, then a
    /// truncating shift right by F. The discarded remainder is never rounded.
    #[inline]
    pub fn leak(&self, potential: u64, leak_factor: u64) -> u64 {
        debug_assert!(self.fits_potential(potential));
        debug_assert!(self.fits_fraction(leak_factor));
        let product = potential as u128 * leak_factor as u128;
        self.wrap(product >> self.fraction_bits)
    }

    /// Steps 3-4 of the update: add 1.0 when the input bit is set, wrapping
    /// past the register width.
    #[inline]
    pub fn integrate(&self, leaked: u64, input: bool) -> u64 {
        let addend = if input { self.one() } else { 0 };
        self.wrap(leaked as u128 + addend as u128)
    }

    /// Real-valued view of a raw register value. Reporting only.
    #[inline]
    pub fn to_real(&self, raw: u64) -> f64 {
        raw as f64 / self.scale() as f64
    }
}

impl Default for FixedFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "u{}/{} (scale {})",
            self.potential_width,
            self.fraction_bits,
            self.scale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_constants() {
        let fmt = FixedFormat::default();
        assert_eq!(fmt.scale(), 256);
        assert_eq!(fmt.potential_mask(), 0xFFFF);
        assert_eq!(fmt.max_leak_factor(), 255);
        assert_eq!(FixedFormat::new(16, 8).unwrap(), fmt);
    }

    #[test]
    fn rejects_invalid_widths() {
        assert_eq!(FixedFormat::new(16, 0), Err(ConfigError::ZeroFractionBits));
        assert!(matches!(
            FixedFormat::new(8, 8),
            Err(ConfigError::FractionNotBelowWidth { .. })
        ));
        assert!(matches!(
            FixedFormat::new(65, 8),
            Err(ConfigError::WidthTooLarge { width: 65, .. })
        ));
        assert!(FixedFormat::new(64, 63).is_ok());
    }

    #[test]
    fn leak_truncates_remainder() {
        let fmt = FixedFormat::DEFAULT;
        // 510 * 0.5 = 255.0, 511 * 0.5 = 255.5 -> 255
        assert_eq!(fmt.leak(510, 128), 255);
        assert_eq!(fmt.leak(511, 128), 255);
        // 279 * 230 = 64170, /256 = 250.66 -> 250
        assert_eq!(fmt.leak(279, 230), 250);
    }

    #[test]
    fn integrate_wraps_modulo_width() {
        let fmt = FixedFormat::new(9, 8).unwrap();
        assert_eq!(fmt.integrate(509, true), 253);
        assert_eq!(fmt.integrate(509, false), 509);
    }

    #[test]
    fn full_width_register() {
        let fmt = FixedFormat::new(64, 8).unwrap();
        assert_eq!(fmt.potential_mask(), u64::MAX);
        assert_eq!(fmt.leak(u64::MAX, 255), u64::MAX - (u64::MAX >> 8) - 1);
        assert_eq!(fmt.integrate(u64::MAX, true), 255);
    }

    #[test]
    fn real_view() {
        let fmt = FixedFormat::DEFAULT;
        assert_eq!(fmt.to_real(384), 1.5);
        assert_eq!(fmt.to_real(0), 0.0);
    }
}
