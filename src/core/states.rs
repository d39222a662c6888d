//! GST state and union territory codes.
//!
//! The first two digits of every GSTIN identify the registering state. Two
//! parties with the same code make an intrastate supply.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::KhataError;

/// Check whether `code` is an assigned two-digit GST state code.
pub fn is_known_state_code(code: &str) -> bool {
    STATE_CODES.binary_search_by(|(c, _)| c.cmp(&code)).is_ok()
}

/// State or union territory name for a GST state code.
pub fn state_name(code: &str) -> Option<&'static str> {
    STATE_CODES
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .map(|i| STATE_CODES[i].1)
}

/// A validated two-digit GST state code such as `"27"` (Maharashtra).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
    /// Accepts `"7"` or `"07"` style codes.
    pub fn new(code: &str) -> Result<Self, KhataError> {
        let code = code.trim();
        let normalized = if code.len() == 1 {
            format!("0{code}")
        } else {
            code.to_string()
        };
        if is_known_state_code(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(KhataError::InvalidStateCode { code: code.into() })
        }
    }

    /// State code from the first two characters of a GSTIN.
    pub fn from_gstin(gstin: &str) -> Result<Self, KhataError> {
        let gstin = gstin.trim();
        if gstin.len() != 15 || !gstin.is_ascii() {
            return Err(KhataError::InvalidStateCode { code: gstin.into() });
        }
        Self::new(&gstin[..2])
    }

    /// The two-digit code, e.g. `"07"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// State or union territory name.
    pub fn name(&self) -> &'static str {
        state_name(&self.0).unwrap_or("")
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StateCode {
    type Error = KhataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.0
    }
}

/// Sorted for binary search.
static STATE_CODES: &[(&str, &str)] = &[
    ("01", "Jammu and Kashmir"),
    ("02", "Himachal Pradesh"),
    ("03", "Punjab"),
    ("04", "Chandigarh"),
    ("05", "Uttarakhand"),
    ("06", "Haryana"),
    ("07", "Delhi"),
    ("08", "Rajasthan"),
    ("09", "Uttar Pradesh"),
    ("10", "Bihar"),
    ("11", "Sikkim"),
    ("12", "Arunachal Pradesh"),
    ("13", "Nagaland"),
    ("14", "Manipur"),
    ("15", "Mizoram"),
    ("16", "Tripura"),
    ("17", "Meghalaya"),
    ("18", "Assam"),
    ("19", "West Bengal"),
    ("20", "Jharkhand"),
    ("21", "Odisha"),
    ("22", "Chhattisgarh"),
    ("23", "Madhya Pradesh"),
    ("24", "Gujarat"),
    ("26", "Dadra and Nagar Haveli and Daman and Diu"),
    ("27", "Maharashtra"),
    ("29", "Karnataka"),
    ("30", "Goa"),
    ("31", "Lakshadweep"),
    ("32", "Kerala"),
    ("33", "Tamil Nadu"),
    ("34", "Puducherry"),
    ("35", "Andaman and Nicobar Islands"),
    ("36", "Telangana"),
    ("37", "Andhra Pradesh"),
    ("38", "Ladakh"),
    ("97", "Other Territory"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert!(is_known_state_code("27"));
        assert!(is_known_state_code("07"));
        assert!(is_known_state_code("38"));
        assert!(is_known_state_code("97"));
    }

    #[test]
    fn unknown_codes() {
        assert!(!is_known_state_code("25"));
        assert!(!is_known_state_code("28"));
        assert!(!is_known_state_code("99"));
        assert!(!is_known_state_code(""));
        assert!(!is_known_state_code("MH"));
    }

    #[test]
    fn single_digit_is_padded() {
        assert_eq!(StateCode::new("7").unwrap().as_str(), "07");
        assert_eq!(StateCode::new(" 27 ").unwrap().name(), "Maharashtra");
    }

    #[test]
    fn from_gstin_prefix() {
        let code = StateCode::from_gstin("29AABCU9603R1ZM").unwrap();
        assert_eq!(code.as_str(), "29");
        assert!(StateCode::from_gstin("29AABCU").is_err());
        assert!(StateCode::from_gstin("99AABCU9603R1ZM").is_err());
    }

    #[test]
    fn serde_validates() {
        let code: StateCode = serde_json::from_str("\"33\"").unwrap();
        assert_eq!(code.name(), "Tamil Nadu");
        assert!(serde_json::from_str::<StateCode>("\"00\"").is_err());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"33\"");
    }

    #[test]
    fn list_is_sorted() {
        for window in STATE_CODES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "state codes not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }
}
