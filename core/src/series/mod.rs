pub mod events;
pub mod store;

pub use events::EventSet;
pub use store::{SeriesStore, SignalSeries};
