use crate::analysis::{QualityReport, StatisticsEngine};
use crate::classify::Band;
use crate::config::EngineConfig;
use crate::prelude::{EngineError, EngineResult, LoadStage};
use crate::records::BlockRecord;
use crate::series::{EventSet, SeriesStore};
use crate::telemetry::{LogManager, MetricsRecorder};
use crate::time::GnssInstant;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loaded,
}

/// Runs one load at a time: reset, stream records into the store and event
/// set, then derive the report.
pub struct LoadPipeline {
    config: EngineConfig,
    store: SeriesStore,
    events: EventSet,
    state: LoadState,
    report: Option<QualityReport>,
    logger: LogManager,
    metrics: Arc<MetricsRecorder>,
}

impl LoadPipeline {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_metrics(config, Arc::new(MetricsRecorder::new()))
    }

    pub fn with_metrics(config: EngineConfig, metrics: Arc<MetricsRecorder>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store: SeriesStore::new(),
            events: EventSet::new(),
            state: LoadState::Empty,
            report: None,
            logger: LogManager::new(),
            metrics,
        })
    }

    fn stages(&mut self) -> [&mut dyn LoadStage; 2] {
        [&mut self.store, &mut self.events]
    }

    fn clear(&mut self) {
        for stage in self.stages() {
            stage.reset();
        }
        self.report = None;
        self.state = LoadState::Empty;
    }

    /// Loads a record stream. A stream that fails part way, or yields no
    /// records at all, leaves the pipeline `Empty`.
    pub fn load<I, E>(&mut self, source: &str, records: I) -> EngineResult<&QualityReport>
    where
        I: IntoIterator<Item = Result<BlockRecord, E>>,
        E: fmt::Display,
    {
        self.clear();
        self.logger.set_source(source);

        let mut consumed = 0usize;
        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    self.clear();
                    self.metrics.record_failed_load();
                    self.logger
                        .warn(&format!("stream failed after {} records: {}", consumed, err));
                    return Err(EngineError::Source(err.to_string()));
                }
            };
            for stage in self.stages() {
                stage.apply(&record);
            }
            consumed += 1;
        }

        if consumed == 0 {
            self.metrics.record_failed_load();
            self.logger.warn("no records in source");
            return Err(EngineError::NoData);
        }

        let report = StatisticsEngine::new(&self.store, &self.events, &self.config)
            .build_report(source);

        self.logger.record(&format!(
            "loaded {} records: {} samples ({} dropped), band 1 sats {}, band 2 sats {}, events {}",
            consumed,
            self.store.accepted(),
            self.store.dropped(),
            self.store.satellite_count(Band::Primary),
            self.store.satellite_count(Band::Secondary),
            self.events.len()
        ));
        if let Some((start, end)) = self.store.mission_window() {
            self.logger.detail(&format!("mission window {} .. {}", start, end));
        }
        self.metrics
            .record_samples(self.store.accepted(), self.store.dropped());
        self.metrics.record_load();

        self.state = LoadState::Loaded;
        Ok(&*self.report.insert(report))
    }

    /// Loads records that cannot fail.
    pub fn load_records<I>(&mut self, source: &str, records: I) -> EngineResult<&QualityReport>
    where
        I: IntoIterator<Item = BlockRecord>,
    {
        self.load(source, records.into_iter().map(Ok::<_, Infallible>))
    }

    /// Records that `source` could not be read at all.
    pub fn mark_unavailable(&mut self, source: &str, reason: &str) -> EngineError {
        self.clear();
        self.logger.set_source(source);
        self.logger.warn(&format!("source unavailable: {}", reason));
        self.metrics.record_failed_load();
        EngineError::NoData
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn report(&self) -> EngineResult<&QualityReport> {
        match self.state {
            LoadState::Loaded => self.report.as_ref().ok_or(EngineError::NoData),
            LoadState::Empty => Err(EngineError::NoData),
        }
    }

    pub fn statistics(&self) -> EngineResult<StatisticsEngine<'_>> {
        match self.state {
            LoadState::Loaded => Ok(StatisticsEngine::new(
                &self.store,
                &self.events,
                &self.config,
            )),
            LoadState::Empty => Err(EngineError::NoData),
        }
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn events(&self) -> &EventSet {
        &self.events
    }

    pub fn mission_window(&self) -> Option<(GnssInstant, GnssInstant)> {
        self.store.mission_window()
    }

    pub fn metrics(&self) -> &Arc<MetricsRecorder> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricValue;
    use crate::classify::SatelliteLabel;
    use crate::records::{
        EventRecord, FrontendGain, GainRecord, MeasurementEntry, MeasurementRecord,
    };

    fn epoch(tow: u32, entries: Vec<MeasurementEntry>) -> BlockRecord {
        BlockRecord::Measurement(MeasurementRecord::new(tow, 2100, entries))
    }

    fn first_mission() -> Vec<BlockRecord> {
        vec![
            epoch(
                1000,
                vec![
                    MeasurementEntry::new(1, 0, 140).with_nested(3, 120),
                    MeasurementEntry::new(72, 17, 150),
                ],
            ),
            BlockRecord::Event(EventRecord { tow: 1042, wnc: 2100 }),
            BlockRecord::Gain(GainRecord {
                tow: 1000,
                wnc: 2100,
                frontends: vec![FrontendGain { frontend: 0, gain: 40 }],
            }),
            epoch(1100, vec![MeasurementEntry::new(1, 0, 100)]),
        ]
    }

    #[test]
    fn load_populates_report() {
        let mut pipeline = LoadPipeline::new(EngineConfig::default()).unwrap();
        let report = pipeline.load_records("first", first_mission()).unwrap();

        assert_eq!(report.source, "first");
        assert_eq!(report.get("Events"), Some(&MetricValue::Int(1)));
        // E02 matched at 1000: 150 * 0.25 + 10.
        assert_eq!(report.get("Band 1 best"), Some(&MetricValue::Float(47.5)));
        assert_eq!(report.get("Band 1 sats"), Some(&MetricValue::Int(2)));
        assert_eq!(report.get("Band 2 best"), Some(&MetricValue::Float(40.0)));
        assert_eq!(report.get("Gain GPS L1/E1"), Some(&MetricValue::Float(40.0)));
        assert_eq!(pipeline.state(), LoadState::Loaded);
    }

    #[test]
    fn second_load_has_no_residue_from_first() {
        let mut pipeline = LoadPipeline::new(EngineConfig::default()).unwrap();
        pipeline.load_records("first", first_mission()).unwrap();

        let second = vec![epoch(5000, vec![MeasurementEntry::new(10, 0, 160)])];
        let report = pipeline.load_records("second", second).unwrap().clone();

        assert_eq!(report.get("Events"), Some(&MetricValue::Int(0)));
        assert_eq!(report.get("Band 1 sats"), Some(&MetricValue::Int(1)));
        assert_eq!(report.get("Band 2 sats"), Some(&MetricValue::Int(0)));
        assert_eq!(report.get("Gain GPS L1/E1"), Some(&MetricValue::NotAvailable));
        assert!(pipeline
            .store()
            .series_for(Band::Primary, &SatelliteLabel::Named { system: 'G', number: 1 })
            .is_empty());
        assert!(pipeline.events().is_empty());
    }

    #[test]
    fn failing_stream_leaves_pipeline_empty() {
        let mut pipeline = LoadPipeline::new(EngineConfig::default()).unwrap();
        pipeline.load_records("first", first_mission()).unwrap();

        let records: Vec<Result<BlockRecord, String>> = vec![
            Ok(epoch(1000, vec![MeasurementEntry::new(1, 0, 140)])),
            Err("truncated block".to_string()),
        ];
        let err = pipeline.load("broken", records).unwrap_err();

        assert_eq!(err, EngineError::Source("truncated block".into()));
        assert_eq!(pipeline.state(), LoadState::Empty);
        assert!(pipeline.store().is_empty());
        assert_eq!(pipeline.report().unwrap_err(), EngineError::NoData);
        assert!(pipeline.statistics().is_err());
    }

    #[test]
    fn empty_stream_reports_no_data() {
        let mut pipeline = LoadPipeline::new(EngineConfig::default()).unwrap();
        let err = pipeline.load_records("empty", Vec::<BlockRecord>::new()).unwrap_err();
        assert_eq!(err, EngineError::NoData);
        assert_eq!(pipeline.state(), LoadState::Empty);

        let err = pipeline.mark_unavailable("missing.jsonl", "not found");
        assert_eq!(err, EngineError::NoData);
        assert_eq!(pipeline.metrics().snapshot().failed_loads, 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            event_bucket_ms: 0,
            ..Default::default()
        };
        assert!(LoadPipeline::new(config).is_err());
    }
}
