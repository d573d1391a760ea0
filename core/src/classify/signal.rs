use std::fmt;

const SIGNAL_NUMBER_MASK: u8 = 0b0001_1111;
const CN0_SCALE: f64 = 0.25;
const CN0_AUX_OFFSET: f64 = 10.0;

/// Coarse frequency grouping used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    Primary,
    Secondary,
    Other,
}

impl Band {
    pub fn from_number(number: u8) -> Self {
        match number {
            1 => Band::Primary,
            2 => Band::Secondary,
            _ => Band::Other,
        }
    }

    /// Bands that take part in quality statistics.
    pub fn aggregated() -> [Band; 2] {
        [Band::Primary, Band::Secondary]
    }

    pub fn is_aggregated(self) -> bool {
        matches!(self, Band::Primary | Band::Secondary)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Primary => write!(f, "1"),
            Band::Secondary => write!(f, "2"),
            Band::Other => write!(f, "other"),
        }
    }
}

/// Reference entry for one signal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalInfo {
    pub band: u8,
    pub constellation: &'static str,
    pub sig_type: &'static str,
    pub enabled: bool,
}

const fn signal(
    band: u8,
    constellation: &'static str,
    sig_type: &'static str,
    enabled: bool,
) -> SignalInfo {
    SignalInfo {
        band,
        constellation,
        sig_type,
        enabled,
    }
}

/// Signal number to band/label, indexed by signal number.
pub static SIGNAL_TABLE: [SignalInfo; 32] = [
    signal(1, "GPS", "L1CA", true),
    signal(1, "GPS", "L1P", true),
    signal(2, "GPS", "L2P", true),
    signal(2, "GPS", "L2C", true),
    signal(5, "GPS", "L5", true),
    signal(1, "GPS", "L1C", true),
    signal(1, "QZSS", "L1CA", true),
    signal(2, "QZSS", "L2C", true),
    signal(1, "GLONASS", "L1CA", true),
    signal(1, "GLONASS", "L1P", true),
    signal(2, "GLONASS", "L2P", true),
    signal(2, "GLONASS", "L2CA", true),
    signal(3, "GLONASS", "L3", true),
    signal(1, "BeiDou", "B1C", true),
    signal(5, "BeiDou", "B2a", true),
    signal(5, "NavIC", "L5", true),
    signal(0, "Reserved", "", false),
    signal(1, "Galileo", "E1", true),
    signal(0, "Reserved", "", false),
    signal(6, "Galileo", "E6", true),
    signal(5, "Galileo", "E5a", true),
    signal(7, "Galileo", "E5b", true),
    signal(5, "Galileo", "E5 AltBOC", true),
    signal(0, "MSS", "L-band", false),
    signal(1, "SBAS", "L1", true),
    signal(5, "SBAS", "L5", true),
    signal(5, "QZSS", "L5", true),
    signal(6, "QZSS", "L6", true),
    signal(1, "BeiDou", "B1I", true),
    signal(7, "BeiDou", "B2I", true),
    signal(6, "BeiDou", "B3I", true),
    signal(0, "Reserved", "", false),
];

/// Extracts the signal number from a raw signal-type code.
pub fn classify_band(signal_type_code: u8) -> u8 {
    signal_type_code & SIGNAL_NUMBER_MASK
}

pub fn signal_info(signal_number: u8) -> Option<&'static SignalInfo> {
    SIGNAL_TABLE.get(usize::from(signal_number))
}

pub fn band_of(signal_number: u8) -> Band {
    signal_info(signal_number)
        .map(|info| Band::from_number(info.band))
        .unwrap_or(Band::Other)
}

pub fn is_enabled(signal_number: u8) -> bool {
    signal_info(signal_number)
        .map(|info| info.enabled)
        .unwrap_or(false)
}

/// Converts a raw CN0 value to dB-Hz. Signal numbers 1 and 2 are reported
/// without the auxiliary-channel offset.
pub fn convert_snr(raw_cn0: u16, signal_number: u8) -> f64 {
    let scaled = f64::from(raw_cn0) * CN0_SCALE;
    match signal_number {
        1 | 2 => scaled,
        _ => scaled + CN0_AUX_OFFSET,
    }
}
