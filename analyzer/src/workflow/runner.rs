use crate::generator::profile::{build_mission, MissionConfig};
use crate::input::decoded::open_records;
use crate::workflow::config::WorkflowConfig;
use anyhow::{bail, Context};
use log::{info, warn};
use sbfcore::telemetry::{MetricsRecorder, MetricsSnapshot};
use sbfcore::{EngineError, LoadPipeline, QualityReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs one pipeline over a batch of inputs, one load per file.
pub struct Runner {
    config: WorkflowConfig,
    pipeline: LoadPipeline,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> anyhow::Result<Self> {
        let metrics = Arc::new(MetricsRecorder::new());
        let pipeline = LoadPipeline::with_metrics(config.engine.clone(), metrics.clone())
            .context("building load pipeline")?;
        Ok(Self {
            config,
            pipeline,
            metrics,
        })
    }

    /// Files under `path` with a configured extension, skipping hidden
    /// folders. A plain file is returned as-is.
    pub fn collect_inputs(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if !path.exists() {
            bail!("input {} does not exist", path.display());
        }
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut inputs = Vec::new();
        let mut pending = vec![path.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir)
                .with_context(|| format!("listing {}", dir.display()))?;
            for entry in entries {
                let entry_path = entry?.path();
                let hidden = entry_path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with('.'))
                    .unwrap_or(false);
                if hidden {
                    continue;
                }
                if entry_path.is_dir() {
                    pending.push(entry_path);
                } else if self.config.matches_extension(&entry_path) {
                    inputs.push(entry_path);
                }
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    pub fn execute_path(&mut self, path: &Path) -> anyhow::Result<Vec<QualityReport>> {
        let inputs = self.collect_inputs(path)?;
        info!("found {} input files under {}", inputs.len(), path.display());

        let mut reports = Vec::with_capacity(inputs.len());
        for input in inputs {
            if let Some(report) = self.execute_file(&input)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Loads a single file. `Ok(None)` means the file held no usable data.
    pub fn execute_file(&mut self, path: &Path) -> anyhow::Result<Option<QualityReport>> {
        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let records = match open_records(path) {
            Ok(records) => records,
            Err(err) => {
                self.pipeline.mark_unavailable(&source, &format!("{:#}", err));
                return Ok(None);
            }
        };

        let outcome = self.pipeline.load(&source, records).map(|report| report.clone());
        self.finish(&source, outcome)
    }

    pub fn execute_synthetic(&mut self, mission: &MissionConfig) -> anyhow::Result<QualityReport> {
        let source = format!("synthetic-{}", mission.seed);
        let outcome = self
            .pipeline
            .load_records(&source, build_mission(mission))
            .map(|report| report.clone());
        self.finish(&source, outcome)?
            .with_context(|| format!("synthetic mission {} produced no data", source))
    }

    fn finish(
        &self,
        source: &str,
        outcome: Result<QualityReport, EngineError>,
    ) -> anyhow::Result<Option<QualityReport>> {
        match outcome {
            Ok(report) => {
                if let Some((start, end)) = self.pipeline.mission_window() {
                    info!("{}: mission window {} .. {}", source, start, end);
                }
                Ok(Some(report))
            }
            Err(EngineError::NoData) => {
                warn!("{}: no data", source);
                Ok(None)
            }
            Err(EngineError::Source(reason)) => {
                warn!("{}: skipped, {}", source, reason);
                Ok(None)
            }
            Err(err) => Err(err).with_context(|| format!("loading {}", source)),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
