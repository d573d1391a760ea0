//! Signal-quality core for decoded receiver telemetry.
//!
//! Decoded measurement, event and gain blocks are classified into bands and
//! satellites, accumulated into per-satellite SNR series, and reduced to a flat
//! [`QualityReport`] per load. Nothing in this crate performs I/O.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod records;
pub mod series;
pub mod telemetry;
pub mod time;

pub use analysis::{MetricValue, QualityReport, StatisticsEngine};
pub use config::EngineConfig;
pub use pipeline::{LoadPipeline, LoadState};
pub use prelude::{EngineError, EngineResult, LoadStage};
