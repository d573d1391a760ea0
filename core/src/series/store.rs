use crate::classify::{
    band_of, classify_band, convert_snr, frontend_info, frontend_number, is_enabled,
    resolve_satellite_label, Band, SatelliteLabel,
};
use crate::math::stats::StatsHelper;
use crate::prelude::LoadStage;
use crate::records::{BlockRecord, SignalSample};
use crate::time::{to_instant, GnssInstant};
use std::collections::{BTreeMap, HashMap};

/// Append-only SNR series of one satellite in one band.
#[derive(Debug, Clone, Default)]
pub struct SignalSeries {
    points: Vec<(u32, f64)>,
    by_tow: HashMap<u32, Vec<usize>>,
}

impl SignalSeries {
    pub fn push(&mut self, tow: u32, snr: f64) {
        self.by_tow.entry(tow).or_default().push(self.points.len());
        self.points.push((tow, snr));
    }

    /// `(tow, snr)` pairs in insertion order.
    pub fn points(&self) -> &[(u32, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every SNR recorded at exactly `tow`.
    pub fn values_at(&self, tow: u32) -> impl Iterator<Item = f64> + '_ {
        self.by_tow
            .get(&tow)
            .into_iter()
            .flatten()
            .map(move |&idx| self.points[idx].1)
    }

    pub fn mean(&self) -> Option<f64> {
        let values: Vec<f64> = self.points.iter().map(|&(_, snr)| snr).collect();
        StatsHelper::mean(&values)
    }
}

/// Per-load container of classified measurements and gain samples.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: BTreeMap<(Band, SatelliteLabel), SignalSeries>,
    gains: BTreeMap<u8, Vec<(u32, i16)>>,
    tow_range: Option<(u32, u32)>,
    window: Option<((u16, u32), (u16, u32))>,
    accepted: usize,
    dropped: usize,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, signal_type_code: u8, raw_id: u16, raw_cn0: u16, time_of_week: u32) {
        self.insert(signal_type_code, raw_id, raw_cn0, time_of_week);
    }

    /// Same as [`SeriesStore::record`], additionally tracking the mission window
    /// with the sample's week number.
    pub fn record_sample(&mut self, sample: &SignalSample) {
        if self.insert(sample.signal_type, sample.svid, sample.cn0, sample.tow) {
            let epoch = (sample.wnc, sample.tow);
            self.window = Some(match self.window {
                Some((first, last)) => (first.min(epoch), last.max(epoch)),
                None => (epoch, epoch),
            });
        }
    }

    pub fn record_gain(&mut self, frontend_code: u8, raw_gain: i16, time_of_week: u32) {
        let number = frontend_number(frontend_code);
        match frontend_info(number) {
            Some(info) if info.enabled => {
                self.gains
                    .entry(number)
                    .or_default()
                    .push((time_of_week, raw_gain));
            }
            _ => self.dropped += 1,
        }
    }

    // Returns true when the sample landed in an aggregated band.
    fn insert(&mut self, signal_type_code: u8, raw_id: u16, raw_cn0: u16, tow: u32) -> bool {
        let signal_number = classify_band(signal_type_code);
        if !is_enabled(signal_number) {
            self.dropped += 1;
            return false;
        }

        let band = band_of(signal_number);
        let snr = convert_snr(raw_cn0, signal_number);
        self.series
            .entry((band, resolve_satellite_label(raw_id)))
            .or_default()
            .push(tow, snr);
        self.accepted += 1;

        if !band.is_aggregated() {
            return false;
        }
        self.tow_range = Some(match self.tow_range {
            Some((min, max)) => (min.min(tow), max.max(tow)),
            None => (tow, tow),
        });
        true
    }

    /// Points of one series; empty when the satellite was never seen in `band`.
    pub fn series_for(&self, band: Band, label: &SatelliteLabel) -> &[(u32, f64)] {
        self.series
            .get(&(band, *label))
            .map(SignalSeries::points)
            .unwrap_or(&[])
    }

    pub fn satellites(&self, band: Band) -> impl Iterator<Item = (&SatelliteLabel, &SignalSeries)> {
        self.series
            .iter()
            .filter(move |((series_band, _), _)| *series_band == band)
            .map(|((_, label), series)| (label, series))
    }

    pub fn satellite_count(&self, band: Band) -> usize {
        self.satellites(band).count()
    }

    pub fn gain_samples(&self) -> impl Iterator<Item = (u8, &[(u32, i16)])> {
        self.gains
            .iter()
            .map(|(number, samples)| (*number, samples.as_slice()))
    }

    /// Smallest and largest tow over band-1/band-2 samples.
    pub fn tow_range(&self) -> Option<(u32, u32)> {
        self.tow_range
    }

    pub fn mission_window(&self) -> Option<(GnssInstant, GnssInstant)> {
        self.window.map(|((first_wnc, first_tow), (last_wnc, last_tow))| {
            (
                to_instant(first_wnc, first_tow),
                to_instant(last_wnc, last_tow),
            )
        })
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.gains.is_empty()
    }
}

impl LoadStage for SeriesStore {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn apply(&mut self, record: &BlockRecord) {
        match record {
            BlockRecord::Measurement(meas) => {
                for sample in meas.samples() {
                    self.record_sample(&sample);
                }
            }
            BlockRecord::Gain(gain) => {
                for frontend in &gain.frontends {
                    self.record_gain(frontend.frontend, frontend.gain, gain.tow);
                }
            }
            BlockRecord::Event(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{MeasurementEntry, MeasurementRecord};

    fn g(number: u16) -> SatelliteLabel {
        SatelliteLabel::Named {
            system: 'G',
            number,
        }
    }

    #[test]
    fn record_routes_samples_by_band_and_label() {
        let mut store = SeriesStore::new();
        store.record(0, 5, 160, 1000);
        store.record(3, 5, 120, 1000);
        store.record(0, 5, 164, 1100);

        assert_eq!(
            store.series_for(Band::Primary, &g(5)),
            &[(1000, 50.0), (1100, 51.0)]
        );
        assert_eq!(store.series_for(Band::Secondary, &g(5)), &[(1000, 40.0)]);
        assert!(store.series_for(Band::Primary, &g(6)).is_empty());
    }

    #[test]
    fn disabled_signals_are_dropped() {
        let mut store = SeriesStore::new();
        store.record(16, 5, 160, 1000);
        store.record(23, 5, 160, 1000);
        assert_eq!(store.accepted(), 0);
        assert_eq!(store.dropped(), 2);
        assert_eq!(store.tow_range(), None);
    }

    #[test]
    fn raw_labels_are_valid_keys() {
        let mut store = SeriesStore::new();
        store.record(0, 62, 160, 1000);
        assert_eq!(store.series_for(Band::Primary, &SatelliteLabel::Raw(62)).len(), 1);
    }

    #[test]
    fn duplicate_tows_are_all_kept() {
        let mut series = SignalSeries::default();
        series.push(1000, 40.0);
        series.push(1000, 42.0);
        series.push(1100, 44.0);
        assert_eq!(series.values_at(1000).collect::<Vec<_>>(), vec![40.0, 42.0]);
        assert_eq!(series.values_at(900).count(), 0);
        assert_eq!(series.mean(), Some(42.0));
    }

    #[test]
    fn tow_range_ignores_other_bands() {
        let mut store = SeriesStore::new();
        store.record(0, 1, 160, 5_000);
        store.record(4, 1, 160, 100);
        store.record(2, 1, 160, 9_000);
        assert_eq!(store.tow_range(), Some((5_000, 9_000)));
    }

    #[test]
    fn gain_samples_respect_frontend_table() {
        let mut store = SeriesStore::new();
        store.record_gain(0, 30, 1000);
        store.record_gain(0b0010_0000, 32, 2000);
        store.record_gain(2, 50, 1000);
        store.record_gain(31, 50, 1000);

        let gains: Vec<_> = store.gain_samples().collect();
        assert_eq!(gains.len(), 1);
        assert_eq!(gains[0].0, 0);
        assert_eq!(gains[0].1, &[(1000, 30), (2000, 32)]);
        assert_eq!(store.dropped(), 2);
    }

    #[test]
    fn apply_flattens_measurements_and_reset_clears() {
        let mut store = SeriesStore::new();
        let record = BlockRecord::Measurement(MeasurementRecord::new(
            1000,
            2100,
            vec![MeasurementEntry::new(5, 0, 160).with_nested(3, 120)],
        ));
        store.apply(&record);
        assert_eq!(store.satellite_count(Band::Primary), 1);
        assert_eq!(store.satellite_count(Band::Secondary), 1);
        assert!(store.mission_window().is_some());

        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.tow_range(), None);
        assert_eq!(store.mission_window(), None);
    }
}
