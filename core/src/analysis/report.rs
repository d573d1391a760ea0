use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

/// Numeric cell of a quality report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Float(f64),
    Int(i64),
    NotAvailable,
}

impl MetricValue {
    /// Non-finite values are reported as not available.
    pub fn from_float(value: f64) -> Self {
        if value.is_finite() {
            MetricValue::Float(value)
        } else {
            MetricValue::NotAvailable
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(MetricValue::NotAvailable, MetricValue::from_float)
    }

    pub fn count(value: usize) -> Self {
        MetricValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Cell text for tabular sinks; floats keep full precision.
    pub fn cell(&self) -> String {
        match self {
            MetricValue::Float(value) => value.to_string(),
            other => other.to_string(),
        }
    }
}

/// Rounded to two decimals for human-readable output.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Float(value) => write!(f, "{:.2}", value),
            MetricValue::Int(value) => write!(f, "{}", value),
            MetricValue::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            MetricValue::Float(value) => serializer.serialize_f64(value),
            MetricValue::Int(value) => serializer.serialize_i64(value),
            MetricValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

/// One row of quality figures for a single load, keyed by `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub source: String,
    pub metrics: Vec<Metric>,
}

impl QualityReport {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            metrics: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: MetricValue) {
        self.metrics.push(Metric {
            name: name.into(),
            value,
        });
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| &metric.value)
    }

    /// Header for tabular sinks, source column first.
    pub fn columns(&self) -> Vec<String> {
        std::iter::once("source".to_string())
            .chain(self.metrics.iter().map(|metric| metric.name.clone()))
            .collect()
    }

    pub fn row(&self) -> Vec<String> {
        std::iter::once(self.source.clone())
            .chain(self.metrics.iter().map(|metric| metric.value.cell()))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for QualityReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len() + 1))?;
        map.serialize_entry("source", &self.source)?;
        for metric in &self.metrics {
            map.serialize_entry(&metric.name, &metric.value)?;
        }
        map.end()
    }
}
