use crate::records::BlockRecord;

/// Common error type for engine loads.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no data loaded")]
    NoData,
    #[error("record source failed: {0}")]
    Source(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// A container that is cleared at the start of every load and fed each
/// decoded record in emission order.
pub trait LoadStage {
    fn reset(&mut self);
    fn apply(&mut self, record: &BlockRecord);
}
