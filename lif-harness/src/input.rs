//! Per-tick input bit generators

use crate::error::{HarnessError, HarnessResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPattern {
    /// Same bit every tick.
    Constant(bool),
    /// `1` for the first `high_ticks` ticks, `0` afterwards.
    Pulse { high_ticks: u64 },
    /// `1` for the first `high_ticks` of every `period` ticks.
    Periodic { period: u64, high_ticks: u64 },
    /// Explicit finite sequence.
    Sequence(Vec<bool>),
}

impl InputPattern {
    /// Bit for the zero-based step index, `None` past the end of a sequence.
    pub fn bit(&self, tick: u64) -> Option<bool> {
        match self {
            InputPattern::Constant(bit) => Some(*bit),
            InputPattern::Pulse { high_ticks } => Some(tick < *high_ticks),
            InputPattern::Periodic { period, high_ticks } => {
                if *period == 0 {
                    None
                } else {
                    Some(tick % period < *high_ticks)
                }
            }
            InputPattern::Sequence(bits) => usize::try_from(tick)
                .ok()
                .and_then(|i| bits.get(i).copied()),
        }
    }

    /// `None` for generators that never run out.
    pub fn available_ticks(&self) -> Option<u64> {
        match self {
            InputPattern::Sequence(bits) => Some(bits.len() as u64),
            _ => None,
        }
    }

    /// Parse a `"1100..."` string. `_` and whitespace may separate digits;
    /// anything else is rejected.
    pub fn from_bits(bits: &str) -> HarnessResult<Self> {
        let mut parsed = Vec::with_capacity(bits.len());
        for (pos, c) in bits.char_indices() {
            match c {
                '0' => parsed.push(false),
                '1' => parsed.push(true),
                '_' => {}
                c if c.is_whitespace() => {}
                c => {
                    return Err(HarnessError::InvalidInput {
                        reason: format!("unexpected {c:?} at byte {pos} of bit string"),
                    })
                }
            }
        }
        Ok(InputPattern::Sequence(parsed))
    }

    /// Reject generators whose shape makes no sense.
    pub fn validate(&self) -> HarnessResult<()> {
        match self {
            InputPattern::Periodic { period: 0, .. } => Err(HarnessError::InvalidInput {
                reason: "periodic input needs a period of at least 1 tick".to_string(),
            }),
            InputPattern::Periodic { period, high_ticks } if high_ticks > period => {
                Err(HarnessError::InvalidInput {
                    reason: format!("periodic input is high for {high_ticks} of {period} ticks"),
                })
            }
            _ => Ok(()),
        }
    }
}
