pub mod aligner;
pub mod report;
pub mod stats;

pub use aligner::EventAligner;
pub use report::{Metric, MetricValue, QualityReport};
pub use stats::{BandStatistics, GainStatistic, StatisticsEngine};
