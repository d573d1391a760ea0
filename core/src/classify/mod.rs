//! Stateless classification of raw receiver codes.
//!
//! All lookups go through static tables; nothing here is mutated at runtime.

pub mod frontend;
pub mod signal;
pub mod svid;

pub use frontend::{frontend_info, frontend_number, FrontendInfo, FRONTEND_TABLE};
pub use signal::{
    band_of, classify_band, convert_snr, is_enabled, signal_info, Band, SignalInfo, SIGNAL_TABLE,
};
pub use svid::{resolve_satellite_label, SatelliteLabel};
