//! Snapshot keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use strata_core::Date;

/// The kind of risk factor held by a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    /// Par yield curve
    ParCurve,
    /// Bootstrapped spot curve
    SpotCurve,
    /// Implied dividend yield curve
    DividendCurve,
    /// Raw option chains
    OptionChains,
    /// Implied volatility surface
    VolSurface,
}

impl SnapshotKind {
    /// Returns the snake-case name used in rendered keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParCurve => "par_curve",
            Self::SpotCurve => "spot_curve",
            Self::DividendCurve => "dividend_curve",
            Self::OptionChains => "option_chains",
            Self::VolSurface => "vol_surface",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one stored snapshot.
///
/// Rate curves are market-wide and carry no underlying; option-derived
/// factors are keyed by their underlying. The rendered form
/// (`dividend_curve_SPY_2025-05-15`, `spot_curve_2025-05-15`) is also the
/// file stem used by [`FileSnapshotStore`](crate::FileSnapshotStore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    /// What the snapshot holds
    pub kind: SnapshotKind,
    /// Underlying symbol, if the factor is underlying-specific
    pub underlying: Option<String>,
    /// Snapshot date
    pub snapshot: Date,
}

impl SnapshotKey {
    /// Creates a key with no underlying.
    #[must_use]
    pub fn new(kind: SnapshotKind, snapshot: Date) -> Self {
        Self {
            kind,
            underlying: None,
            snapshot,
        }
    }

    /// Creates a key for an underlying-specific factor.
    #[must_use]
    pub fn for_underlying(kind: SnapshotKind, underlying: impl Into<String>, snapshot: Date) -> Self {
        Self {
            kind,
            underlying: Some(underlying.into()),
            snapshot,
        }
    }

    /// Renders the key as a filesystem-safe name.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.underlying {
            Some(underlying) => {
                let safe: String = underlying
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
                    .collect();
                write!(f, "{}_{}_{}", self.kind, safe, self.snapshot)
            }
            None => write!(f, "{}_{}", self.kind, self.snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> Date {
        Date::from_ymd(2025, 5, 15).unwrap()
    }

    #[test]
    fn test_render_with_underlying() {
        let key = SnapshotKey::for_underlying(SnapshotKind::DividendCurve, "SPY", date());
        assert_eq!(key.render(), "dividend_curve_SPY_2025-05-15");
    }

    #[test]
    fn test_render_without_underlying() {
        let key = SnapshotKey::new(SnapshotKind::SpotCurve, date());
        assert_eq!(key.to_string(), "spot_curve_2025-05-15");
    }

    #[test]
    fn test_render_sanitizes_separators() {
        let key = SnapshotKey::for_underlying(SnapshotKind::VolSurface, "BRK/B", date());
        assert_eq!(key.render(), "vol_surface_BRK_B_2025-05-15");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SnapshotKind::ParCurve.as_str(), "par_curve");
        assert_eq!(SnapshotKind::OptionChains.to_string(), "option_chains");
    }
}
