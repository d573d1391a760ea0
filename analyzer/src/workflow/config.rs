use anyhow::Context;
use sbfcore::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub engine: EngineConfig,
    /// File extensions picked up when scanning a directory.
    pub extensions: Vec<String>,
    pub report: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            extensions: vec!["jsonl".to_string()],
            report: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(top_n: Option<usize>, report: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(top_n, report);
        config
    }

    /// Command-line values win over the YAML file.
    pub fn apply_overrides(&mut self, top_n: Option<usize>, report: Option<PathBuf>) {
        if let Some(top_n) = top_n {
            self.engine.top_n = top_n;
        }
        if report.is_some() {
            self.report = report;
        }
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
