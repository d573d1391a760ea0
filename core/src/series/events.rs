use crate::prelude::LoadStage;
use crate::records::BlockRecord;

/// Trigger times of the current load, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSet {
    tows: Vec<u32>,
}

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tows(tows: impl IntoIterator<Item = u32>) -> Self {
        Self {
            tows: tows.into_iter().collect(),
        }
    }

    pub fn push(&mut self, tow: u32) {
        self.tows.push(tow);
    }

    pub fn tows(&self) -> &[u32] {
        &self.tows
    }

    pub fn len(&self) -> usize {
        self.tows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tows.is_empty()
    }
}

impl LoadStage for EventSet {
    fn reset(&mut self) {
        self.tows.clear();
    }

    fn apply(&mut self, record: &BlockRecord) {
        if let BlockRecord::Event(event) = record {
            self.push(event.tow);
        }
    }
}
