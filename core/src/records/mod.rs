pub mod block;
pub mod sample;

pub use block::{
    BlockRecord, EventRecord, FrontendGain, GainRecord, MeasurementEntry, MeasurementRecord,
    NestedEntry,
};
pub use sample::SignalSample;
