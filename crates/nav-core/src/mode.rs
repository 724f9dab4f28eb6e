//! Travel mode enum shared by the outdoor graph builder, router, and
//! composer.

use std::str::FromStr;

use crate::NavError;

/// How the visitor is travelling.  Determines which path records are
/// routable and whether a straight-line fallback is allowed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// On foot.  Paths reserved for accessible routing are excluded.
    #[default]
    Walking,
    /// Vehicle traffic; every path record is eligible.
    Driving,
    /// Wheelchair / step-free routing.  Only PWD-friendly paths.
    Accessible,
}

impl TravelMode {
    /// Should a path carrying these accessibility flags be part of the graph
    /// for this mode?
    ///
    /// | Mode         | Admits                                     |
    /// |--------------|--------------------------------------------|
    /// | `Accessible` | `pwd_friendly \|\| strictly_pwd_only`      |
    /// | `Walking`    | everything except `strictly_pwd_only`      |
    /// | `Driving`    | everything                                 |
    #[inline]
    pub fn admits(self, pwd_friendly: bool, strictly_pwd_only: bool) -> bool {
        match self {
            TravelMode::Accessible => pwd_friendly || strictly_pwd_only,
            TravelMode::Walking    => !strictly_pwd_only,
            TravelMode::Driving    => true,
        }
    }

    /// `false` for accessible routing, which must never hand the visitor a
    /// straight line through terrain it has not verified.
    #[inline]
    pub fn allows_direct_fallback(self) -> bool {
        !matches!(self, TravelMode::Accessible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking    => "walking",
            TravelMode::Driving    => "driving",
            TravelMode::Accessible => "accessible",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = NavError;

    /// Accepts the kiosk's mode names; `"pwd"` is an alias for accessible.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" | "walk"   => Ok(TravelMode::Walking),
            "driving" | "drive"  => Ok(TravelMode::Driving),
            "accessible" | "pwd" => Ok(TravelMode::Accessible),
            other => Err(NavError::UnknownMode(other.to_string())),
        }
    }
}
