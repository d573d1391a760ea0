use crate::series::{EventSet, SignalSeries};
use crate::math::stats::StatsHelper;

/// Matches trigger times against measurement epochs.
///
/// An event at `t` is matched only against samples recorded at exactly
/// `floor(t / bucket) * bucket`.
#[derive(Debug, Clone, Copy)]
pub struct EventAligner {
    bucket_ms: u32,
}

impl EventAligner {
    pub fn new(bucket_ms: u32) -> Self {
        Self {
            bucket_ms: bucket_ms.max(1),
        }
    }

    pub fn bucket(&self, tow: u32) -> u32 {
        tow / self.bucket_ms * self.bucket_ms
    }

    /// SNR values of every sample matched by any event.
    pub fn matched_values(&self, series: &SignalSeries, events: &EventSet) -> Vec<f64> {
        events
            .tows()
            .iter()
            .flat_map(|&tow| series.values_at(self.bucket(tow)))
            .collect()
    }

    /// Mean of matched values, `None` when no event hit a sample.
    pub fn try_event_mean(&self, series: &SignalSeries, events: &EventSet) -> Option<f64> {
        StatsHelper::mean(&self.matched_values(series, events))
    }

    /// Like [`EventAligner::try_event_mean`] but reports 0 when nothing
    /// matched, which is what existing reports contain.
    pub fn event_conditioned_mean(&self, series: &SignalSeries, events: &EventSet) -> f64 {
        self.try_event_mean(series, events).unwrap_or(0.0)
    }

    /// Per-satellite statistic: event-conditioned when events exist, plain
    /// mean of the whole series otherwise.
    pub fn satellite_mean(&self, series: &SignalSeries, events: &EventSet) -> f64 {
        if events.is_empty() {
            series.mean().unwrap_or(0.0)
        } else {
            self.event_conditioned_mean(series, events)
        }
    }
}

impl Default for EventAligner {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(u32, f64)]) -> SignalSeries {
        let mut series = SignalSeries::default();
        for &(tow, snr) in points {
            series.push(tow, snr);
        }
        series
    }

    #[test]
    fn bucket_truncates_instead_of_rounding() {
        let aligner = EventAligner::default();
        assert_eq!(aligner.bucket(1042), 1000);
        assert_eq!(aligner.bucket(1099), 1000);
        assert_eq!(aligner.bucket(999), 900);
        assert_eq!(aligner.bucket(1000), 1000);
    }

    #[test]
    fn event_matches_entry_in_its_bucket_only() {
        let aligner = EventAligner::default();
        let data = series(&[(1000, 42.0), (1100, 30.0)]);

        let hit = EventSet::from_tows([1042]);
        assert_eq!(aligner.try_event_mean(&data, &hit), Some(42.0));

        let miss = EventSet::from_tows([999]);
        assert_eq!(aligner.try_event_mean(&data, &miss), None);
        assert_eq!(aligner.event_conditioned_mean(&data, &miss), 0.0);
    }

    #[test]
    fn all_matched_values_are_averaged() {
        let aligner = EventAligner::default();
        let data = series(&[(1000, 40.0), (1000, 44.0), (2000, 48.0), (3000, 10.0)]);
        let events = EventSet::from_tows([1010, 2050, 4000]);
        assert_eq!(aligner.matched_values(&data, &events), vec![40.0, 44.0, 48.0]);
        assert_eq!(aligner.event_conditioned_mean(&data, &events), 44.0);
    }

    #[test]
    fn satellite_mean_without_events_uses_full_series() {
        let aligner = EventAligner::default();
        let data = series(&[(1000, 40.0), (1100, 50.0)]);
        assert_eq!(aligner.satellite_mean(&data, &EventSet::new()), 45.0);
        assert_eq!(aligner.satellite_mean(&SignalSeries::default(), &EventSet::new()), 0.0);
    }
}
