use std::fmt;

/// Satellite key derived from a raw SVID.
///
/// SVIDs outside the numbering ranges are kept as `Raw` and are still valid
/// series keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SatelliteLabel {
    Named { system: char, number: u16 },
    Raw(u16),
}

impl fmt::Display for SatelliteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SatelliteLabel::Named { system, number } => write!(f, "{}{:02}", system, number),
            SatelliteLabel::Raw(svid) => write!(f, "{}", svid),
        }
    }
}

struct SvidRange {
    first: u16,
    last: u16,
    system: char,
    offset: u16,
}

const fn range(first: u16, last: u16, system: char, offset: u16) -> SvidRange {
    SvidRange {
        first,
        last,
        system,
        offset,
    }
}

// Inclusive bounds, first match wins.
static SVID_RANGES: [SvidRange; 9] = [
    range(1, 37, 'G', 0),
    range(38, 61, 'R', 37),
    range(63, 68, 'R', 38),
    range(71, 106, 'E', 70),
    range(120, 140, 'S', 100),
    range(141, 177, 'C', 40),
    range(181, 187, 'J', 180),
    range(191, 197, 'I', 190),
    range(198, 215, 'S', 157),
];

pub fn resolve_satellite_label(raw_id: u16) -> SatelliteLabel {
    SVID_RANGES
        .iter()
        .find(|r| (r.first..=r.last).contains(&raw_id))
        .map(|r| SatelliteLabel::Named {
            system: r.system,
            number: raw_id - r.offset,
        })
        .unwrap_or(SatelliteLabel::Raw(raw_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(raw_id: u16) -> String {
        resolve_satellite_label(raw_id).to_string()
    }

    #[test]
    fn range_boundaries_map_to_constellation_labels() {
        assert_eq!(label(1), "G01");
        assert_eq!(label(37), "G37");
        assert_eq!(label(38), "R01");
        assert_eq!(label(61), "R24");
        assert_eq!(label(63), "R25");
        assert_eq!(label(68), "R30");
        assert_eq!(label(71), "E01");
        assert_eq!(label(106), "E36");
        assert_eq!(label(120), "S20");
        assert_eq!(label(140), "S40");
        assert_eq!(label(141), "C101");
        assert_eq!(label(181), "J01");
        assert_eq!(label(191), "I01");
        assert_eq!(label(198), "S41");
        assert_eq!(label(215), "S58");
    }

    #[test]
    fn gaps_pass_through_raw_id() {
        for raw_id in [0, 62, 69, 70, 107, 119, 178, 180, 188, 190, 216, 255] {
            assert_eq!(resolve_satellite_label(raw_id), SatelliteLabel::Raw(raw_id));
        }
        assert_eq!(label(62), "62");
    }
}
