use log::{debug, info, warn};

/// Tags engine log lines with the source currently being loaded.
pub struct LogManager {
    source: String,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            source: String::new(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.source, message);
    }

    pub fn detail(&self, message: &str) {
        debug!("[{}] {}", self.source, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.source, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
