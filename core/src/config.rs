use crate::prelude::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Tunables of the statistics stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of best satellites averaged into the top mean.
    pub top_n: usize,
    /// SNR thresholds in dB-Hz, one satellite count per threshold.
    pub thresholds: Vec<f64>,
    /// Quantization applied to event times before matching epochs.
    pub event_bucket_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: 7,
            thresholds: vec![35.0, 40.0, 45.0],
            event_bucket_ms: 100,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.top_n == 0 {
            return Err(EngineError::InvalidConfig("top_n must be at least 1".into()));
        }
        if self.event_bucket_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "event_bucket_ms must be at least 1".into(),
            ));
        }
        if let Some(bad) = self.thresholds.iter().find(|t| !t.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "threshold {} is not finite",
                bad
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.top_n, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_top = EngineConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(matches!(zero_top.validate(), Err(EngineError::InvalidConfig(_))));

        let nan_threshold = EngineConfig {
            thresholds: vec![40.0, f64::NAN],
            ..Default::default()
        };
        assert!(nan_threshold.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.event_bucket_ms, 100);
    }
}
