use std::sync::Mutex;

/// Load counters; one recorder can be shared by several pipelines.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub accepted: usize,
    pub dropped: usize,
    pub loads: usize,
    pub failed_loads: usize,
}

struct Metrics {
    accepted: usize,
    dropped: usize,
    loads: usize,
    failed_loads: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                accepted: 0,
                dropped: 0,
                loads: 0,
                failed_loads: 0,
            }),
        }
    }

    pub fn record_samples(&self, accepted: usize, dropped: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.accepted += accepted;
            metrics.dropped += dropped;
        }
    }

    pub fn record_load(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.loads += 1;
        }
    }

    pub fn record_failed_load(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed_loads += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                accepted: metrics.accepted,
                dropped: metrics.dropped,
                loads: metrics.loads,
                failed_loads: metrics.failed_loads,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
