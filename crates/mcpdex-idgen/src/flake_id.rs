use mcpdex_core::ServerId;
use modular_bitfield::prelude::*;
use std::fmt;

/// Raw 64-bit record id.
///
/// Fields are packed from the least significant bit, so `millis` occupies
/// the high bits and ids issued later compare greater as integers.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlakeId {
    /// 16 bits of random entropy, distinguishing ids issued by separate processes.
    pub entropy: B16,
    /// 7 bits for sequence number (resets every millisecond).
    pub sequence: B7,
    /// 41 bits for milliseconds since a custom epoch.
    pub millis: B41,
}

impl FlakeId {
    pub fn as_u64(&self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("millis", &self.millis())
            .field("sequence", &self.sequence())
            .field("entropy", &self.entropy())
            .finish()
    }
}

impl From<FlakeId> for ServerId {
    fn from(val: FlakeId) -> Self {
        ServerId::generated(val.as_u64().to_be_bytes())
    }
}
