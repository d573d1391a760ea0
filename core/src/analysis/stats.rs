use crate::analysis::aligner::EventAligner;
use crate::analysis::report::{MetricValue, QualityReport};
use crate::classify::{frontend_info, Band, FRONTEND_TABLE};
use crate::config::EngineConfig;
use crate::math::stats::StatsHelper;
use crate::series::{EventSet, SeriesStore};

/// Raw tow units per minute of mission duration.
const MISSION_DIVISOR: f64 = 60.0 * 1_000_000.0;

/// Ranked per-satellite means of one band and the figures derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStatistics {
    pub band: Band,
    /// Per-satellite means, largest first.
    pub means: Vec<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub top_count: usize,
    pub top_mean: f64,
    pub threshold_counts: Vec<(f64, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GainStatistic {
    pub frontend: u8,
    pub label: &'static str,
    pub mean: f64,
    pub samples: usize,
}

/// Read-only view deriving quality figures from a populated store.
pub struct StatisticsEngine<'a> {
    store: &'a SeriesStore,
    events: &'a EventSet,
    config: &'a EngineConfig,
    aligner: EventAligner,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(store: &'a SeriesStore, events: &'a EventSet, config: &'a EngineConfig) -> Self {
        Self {
            store,
            events,
            config,
            aligner: EventAligner::new(config.event_bucket_ms),
        }
    }

    pub fn band_means(&self, band: Band) -> Vec<f64> {
        let mut means: Vec<f64> = self
            .store
            .satellites(band)
            .map(|(_, series)| self.aligner.satellite_mean(series, self.events))
            .collect();
        StatsHelper::sort_descending(&mut means);
        means
    }

    /// Best satellite mean, `None` when the band has no satellites.
    pub fn max_of(&self, band: Band) -> Option<f64> {
        self.band_means(band).first().copied()
    }

    pub fn min_of(&self, band: Band) -> Option<f64> {
        self.band_means(band).last().copied()
    }

    /// Mean of the best `min(n, count)` satellites together with the count
    /// used. An empty band yields `(0, NaN)`.
    pub fn top_n_mean(&self, band: Band, n: usize) -> (usize, f64) {
        top_mean(&self.band_means(band), n)
    }

    pub fn threshold_count(&self, band: Band, threshold: f64) -> usize {
        count_at_or_above(&self.band_means(band), threshold)
    }

    pub fn mission_duration_minutes(&self) -> i64 {
        match self.store.tow_range() {
            Some((min, max)) => (f64::from(max - min) / MISSION_DIVISOR).round() as i64,
            None => 0,
        }
    }

    pub fn gain_report(&self) -> Vec<GainStatistic> {
        self.store
            .gain_samples()
            .filter_map(|(frontend, samples)| {
                let info = frontend_info(frontend).filter(|info| info.enabled)?;
                let values: Vec<f64> = samples.iter().map(|&(_, gain)| f64::from(gain)).collect();
                let mean = StatsHelper::mean(&values)?;
                Some(GainStatistic {
                    frontend,
                    label: info.label,
                    mean,
                    samples: values.len(),
                })
            })
            .collect()
    }

    pub fn band_statistics(&self, band: Band) -> BandStatistics {
        let means = self.band_means(band);
        let (top_count, top_mean) = top_mean(&means, self.config.top_n);
        let threshold_counts = self
            .config
            .thresholds
            .iter()
            .map(|&threshold| (threshold, count_at_or_above(&means, threshold)))
            .collect();

        BandStatistics {
            band,
            max: means.first().copied(),
            min: means.last().copied(),
            top_count,
            top_mean,
            threshold_counts,
            means,
        }
    }

    pub fn build_report(&self, source: &str) -> QualityReport {
        let mut report = QualityReport::new(source);

        for band in Band::aggregated() {
            let stats = self.band_statistics(band);
            report.push(format!("Band {} best", band), MetricValue::from_option(stats.max));
            report.push(format!("Band {} worst", band), MetricValue::from_option(stats.min));
            report.push(format!("Band {} top n", band), MetricValue::count(stats.top_count));
            report.push(
                format!("Band {} top mean", band),
                MetricValue::from_float(stats.top_mean),
            );
            report.push(format!("Band {} sats", band), MetricValue::count(stats.means.len()));
            for (threshold, count) in stats.threshold_counts {
                report.push(
                    format!("Band {} >= {}", band, threshold),
                    MetricValue::count(count),
                );
            }
        }

        report.push("Events", MetricValue::count(self.events.len()));
        report.push(
            "Mission duration [min]",
            MetricValue::Int(self.mission_duration_minutes()),
        );
        // One column per enabled frontend so every report has the same schema.
        let gains = self.gain_report();
        for info in FRONTEND_TABLE.iter().filter(|info| info.enabled) {
            let mean = gains
                .iter()
                .find(|gain| gain.label == info.label)
                .map(|gain| gain.mean);
            report.push(format!("Gain {}", info.label), MetricValue::from_option(mean));
        }

        report
    }
}

fn top_mean(sorted_means: &[f64], n: usize) -> (usize, f64) {
    let count = n.min(sorted_means.len());
    let mean = StatsHelper::mean(&sorted_means[..count]).unwrap_or(f64::NAN);
    (count, mean)
}

fn count_at_or_above(means: &[f64], threshold: f64) -> usize {
    means.iter().filter(|&&mean| mean >= threshold).count()
}
