//! Report categories.
//!
//! The portal handles four fixed form types. Each category owns an
//! independent reference sequence with a fixed two-letter prefix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four fixed form/report types.
///
/// Wire names are camelCase (`incident`, `assetDamage`, `dailyOccurrence`,
/// `cctvCheck`), matching both the JSON API and the persisted counter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Category {
    /// Incident report (`IN`).
    Incident = 1,
    /// Asset-damage report (`AD`).
    AssetDamage = 2,
    /// Daily-occurrence log (`DO`).
    DailyOccurrence = 3,
    /// CCTV-check form (`CC`).
    CctvCheck = 4,
}

impl Category {
    /// All categories, in fixed order.
    pub const ALL: [Self; 4] = [
        Self::Incident,
        Self::AssetDamage,
        Self::DailyOccurrence,
        Self::CctvCheck,
    ];

    /// The two-letter reference prefix for this category.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Incident => "IN",
            Self::AssetDamage => "AD",
            Self::DailyOccurrence => "DO",
            Self::CctvCheck => "CC",
        }
    }

    /// Minimum digit width for the sequence number.
    ///
    /// Sequence numbers below 10^width are zero-padded; larger numbers
    /// simply grow wider (`IN100`), the fixed width is a display minimum.
    #[must_use]
    pub const fn digit_width(self) -> usize {
        2
    }

    /// The category's wire name, also used as the persisted counter key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incident => "incident",
            Self::AssetDamage => "assetDamage",
            Self::DailyOccurrence => "dailyOccurrence",
            Self::CctvCheck => "cctvCheck",
        }
    }

    /// Convert the category to its numeric representation (for index keys).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert a numeric value back to a `Category`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Incident),
            2 => Some(Self::AssetDamage),
            3 => Some(Self::DailyOccurrence),
            4 => Some(Self::CctvCheck),
            _ => None,
        }
    }

    /// Look up a category by its reference prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Parse a category from its wire name.
    ///
    /// Any other string is a configuration/programmer error and fails fast
    /// with [`CoreError::UnknownCategory`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_fixed() {
        assert_eq!(Category::Incident.prefix(), "IN");
        assert_eq!(Category::AssetDamage.prefix(), "AD");
        assert_eq!(Category::DailyOccurrence.prefix(), "DO");
        assert_eq!(Category::CctvCheck.prefix(), "CC");
    }

    #[test]
    fn wire_name_roundtrip() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_category_fails_fast() {
        let result = "weeklyOccurrence".parse::<Category>();
        assert!(matches!(result, Err(CoreError::UnknownCategory(_))));
    }

    #[test]
    fn numeric_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_u8(category.as_u8()), Some(category));
        }
        assert_eq!(Category::from_u8(0), None);
        assert_eq!(Category::from_u8(5), None);
    }

    #[test]
    fn prefix_lookup() {
        assert_eq!(Category::from_prefix("DO"), Some(Category::DailyOccurrence));
        assert_eq!(Category::from_prefix("XX"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&Category::AssetDamage).unwrap();
        assert_eq!(json, "\"assetDamage\"");
        let parsed: Category = serde_json::from_str("\"cctvCheck\"").unwrap();
        assert_eq!(parsed, Category::CctvCheck);
    }
}
