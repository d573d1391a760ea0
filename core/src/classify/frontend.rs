const FRONTEND_NUMBER_MASK: u8 = 0b0001_1111;

/// Reference entry for one receiver frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendInfo {
    pub label: &'static str,
    pub enabled: bool,
}

const fn frontend(label: &'static str, enabled: bool) -> FrontendInfo {
    FrontendInfo { label, enabled }
}

/// Frontend number to display label, indexed by frontend number.
pub static FRONTEND_TABLE: [FrontendInfo; 11] = [
    frontend("GPS L1/E1", true),
    frontend("GLO L1", true),
    frontend("E6", false),
    frontend("GPS L2", true),
    frontend("L5/E5a", false),
    frontend("E5b/B2I", false),
    frontend("E5 AltBOC", false),
    frontend("B1", false),
    frontend("B3", false),
    frontend("GLO L2", true),
    frontend("GLO L3", false),
];

pub fn frontend_number(frontend_code: u8) -> u8 {
    frontend_code & FRONTEND_NUMBER_MASK
}

pub fn frontend_info(frontend_number: u8) -> Option<&'static FrontendInfo> {
    FRONTEND_TABLE.get(usize::from(frontend_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_code_upper_bits_are_ignored() {
        assert_eq!(frontend_number(0b1110_0011), 3);
        assert_eq!(frontend_info(frontend_number(0b1110_0011)).map(|f| f.label), Some("GPS L2"));
    }

    #[test]
    fn unknown_frontends_have_no_entry() {
        assert!(frontend_info(11).is_none());
        assert!(frontend_info(31).is_none());
        assert!(!frontend_info(2).map(|f| f.enabled).unwrap_or(false));
    }
}
