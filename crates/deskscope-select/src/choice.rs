//! A selector value that is either a concrete label or the "all" sentinel.

use serde::{Deserialize, Serialize};

/// Sentinel label heading the asset-class list.
pub const ALL_ASSET_CLASSES: &str = "All asset classes";

/// Sentinel label heading the office list.
pub const ALL_OFFICES: &str = "All offices";

/// The value held by a filtering selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// No restriction on this column.
    #[default]
    All,
    /// Keep only rows whose column equals this label.
    Only(String),
}

impl Choice {
    /// Restrict to a single label.
    pub fn only(label: impl Into<String>) -> Self {
        Self::Only(label.into())
    }

    /// Interpret a label as shown in a selector, where `sentinel` stands for
    /// [`Choice::All`].
    pub fn from_label(label: &str, sentinel: &str) -> Self {
        if label == sentinel {
            Self::All
        } else {
            Self::only(label)
        }
    }

    /// Whether `value` passes this filter.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label == value,
        }
    }

    /// The label shown in a selector, with `sentinel` for [`Choice::All`].
    pub fn label<'a>(&'a self, sentinel: &'a str) -> &'a str {
        match self {
            Self::All => sentinel,
            Self::Only(label) => label.as_str(),
        }
    }

    /// Whether this is the sentinel.
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_lifts_filter() {
        let choice = Choice::from_label(ALL_OFFICES, ALL_OFFICES);
        assert!(choice.is_all());
        assert!(choice.matches("London"));
        assert!(choice.matches("Tokyo"));
    }

    #[test]
    fn test_only_matches_exactly() {
        let choice = Choice::from_label("London", ALL_OFFICES);
        assert_eq!(choice, Choice::only("London"));
        assert!(choice.matches("London"));
        assert!(!choice.matches("london"));
        assert!(!choice.matches("Tokyo"));
    }

    #[test]
    fn test_label() {
        assert_eq!(Choice::All.label(ALL_ASSET_CLASSES), ALL_ASSET_CLASSES);
        assert_eq!(Choice::only("FX").label(ALL_ASSET_CLASSES), "FX");
    }
}
