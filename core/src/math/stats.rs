use std::cmp::Ordering;

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sorts in place, largest first.
    pub fn sort_descending(values: &mut [f64]) {
        values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    }
}
