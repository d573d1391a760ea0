use crate::records::sample::SignalSample;
use serde::{Deserialize, Serialize};

/// Decoded block as handed over by the frame decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum BlockRecord {
    Measurement(MeasurementRecord),
    Event(EventRecord),
    Gain(GainRecord),
}

/// One measurement epoch: every tracked satellite/signal at `tow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub tow: u32,
    pub wnc: u16,
    #[serde(default)]
    pub entries: Vec<MeasurementEntry>,
}

/// Primary measurement of one satellite within an epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub svid: u16,
    pub signal_type: u8,
    pub cn0: u16,
    #[serde(default)]
    pub lock_time: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<NestedEntry>,
}

/// Secondary signal of the same satellite, tracked at the same epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedEntry {
    pub signal_type: u8,
    pub cn0: u16,
    #[serde(default)]
    pub lock_time: u32,
}

/// Externally triggered marker time-tagged by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub tow: u32,
    pub wnc: u16,
}

/// Receiver status block carrying the AGC gain of each frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainRecord {
    pub tow: u32,
    pub wnc: u16,
    #[serde(default)]
    pub frontends: Vec<FrontendGain>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendGain {
    pub frontend: u8,
    pub gain: i16,
}

impl MeasurementRecord {
    pub fn new(tow: u32, wnc: u16, entries: Vec<MeasurementEntry>) -> Self {
        Self { tow, wnc, entries }
    }

    /// Flattens the epoch into signal samples: each entry first, then its
    /// nested entries, in emission order.
    pub fn samples(&self) -> impl Iterator<Item = SignalSample> + '_ {
        self.entries.iter().flat_map(move |entry| {
            let primary = SignalSample {
                tow: self.tow,
                wnc: self.wnc,
                svid: entry.svid,
                signal_type: entry.signal_type,
                cn0: entry.cn0,
                lock_time: entry.lock_time,
            };
            let nested = entry.nested.iter().map(move |nested| SignalSample {
                tow: self.tow,
                wnc: self.wnc,
                svid: entry.svid,
                signal_type: nested.signal_type,
                cn0: nested.cn0,
                lock_time: nested.lock_time,
            });
            std::iter::once(primary).chain(nested)
        })
    }
}

impl MeasurementEntry {
    pub fn new(svid: u16, signal_type: u8, cn0: u16) -> Self {
        Self {
            svid,
            signal_type,
            cn0,
            lock_time: 0,
            nested: Vec::new(),
        }
    }

    pub fn with_nested(mut self, signal_type: u8, cn0: u16) -> Self {
        self.nested.push(NestedEntry {
            signal_type,
            cn0,
            lock_time: 0,
        });
        self
    }
}

impl BlockRecord {
    pub fn tow(&self) -> u32 {
        match self {
            BlockRecord::Measurement(record) => record.tow,
            BlockRecord::Event(record) => record.tow,
            BlockRecord::Gain(record) => record.tow,
        }
    }
}
