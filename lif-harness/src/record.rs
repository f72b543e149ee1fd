//! Per-tick observation records and the sinks that collect them.

use lif_core::{FixedFormat, TickOutput};

/// One observed clock edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickRecord {
    /// Index within the scenario; 0 is the reset tick.
    pub tick: u64,
    /// Harness clock, shared across sequential scenarios.
    pub timestamp: u64,
    pub reset: bool,
    pub input: bool,
    pub potential: u64,
    /// `potential / 2^F`, for reporting only.
    pub potential_real: f64,
    pub spike: bool,
}

impl TickRecord {
    pub(crate) fn observe(
        format: FixedFormat,
        tick: u64,
        timestamp: u64,
        input: bool,
        out: TickOutput,
    ) -> Self {
        Self {
            tick,
            timestamp,
            reset: out.reset,
            input,
            potential: out.potential,
            potential_real: format.to_real(out.potential),
            spike: out.spike,
        }
    }
}

/// Returned by a sink that cannot take another record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkFull {
    pub capacity: usize,
}

pub trait TraceSink {
    fn record(&mut self, record: TickRecord) -> Result<(), SinkFull>;
}

impl TraceSink for Vec<TickRecord> {
    fn record(&mut self, record: TickRecord) -> Result<(), SinkFull> {
        self.push(record);
        Ok(())
    }
}

/// Fixed-capacity recording for targets without an allocator.
#[cfg(feature = "embedded")]
impl<const N: usize> TraceSink for heapless::Vec<TickRecord, N> {
    fn record(&mut self, record: TickRecord) -> Result<(), SinkFull> {
        self.push(record).map_err(|_| SinkFull { capacity: N })
    }
}
