use serde::{Deserialize, Serialize};

/// Single flattened signal observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSample {
    pub tow: u32,
    pub wnc: u16,
    pub svid: u16,
    pub signal_type: u8,
    pub cn0: u16,
    pub lock_time: u32,
}
