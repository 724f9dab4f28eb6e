//! Routing configuration.
//!
//! Every tunable constant of the engine lives here so applications can load
//! them from a JSON/TOML file (with the `serde` feature) instead of
//! recompiling.  `Default` gives the values the campus kiosk ships with.

use crate::{NavError, NavResult};

// ── AlternativeConfig ─────────────────────────────────────────────────────────

/// Parameters of the diverse alternative-route search.
///
/// Routes are bucketed by how much longer they are than the shortest route:
///
/// | Bucket | Delta from shortest                          |
/// |--------|----------------------------------------------|
/// | A      | 0 (the shortest route itself)                |
/// | B      | `near_delta_m ..= far_delta_m`               |
/// | C      | `> far_delta_m`                              |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlternativeConfig {
    /// Maximum number of routes to return.  Default: 3.
    pub k: usize,

    /// Lower bound of bucket B, in metres.  Default: 5.
    pub near_delta_m: f64,

    /// Upper bound of bucket B (and lower bound of C), in metres.
    /// Default: 10.
    pub far_delta_m: f64,

    /// Weight of the reuse penalty: an edge already used `u` times costs
    /// `weight × (1 + u² × penalty_weight)`.  Default: 50.
    pub penalty_weight: f64,

    /// Iteration budget per requested route (`k × iterations_per_route`
    /// in total).  Default: 10.
    pub iterations_per_route: usize,
}

impl Default for AlternativeConfig {
    fn default() -> Self {
        Self {
            k:                    3,
            near_delta_m:         5.0,
            far_delta_m:          10.0,
            penalty_weight:       50.0,
            iterations_per_route: 10,
        }
    }
}

impl AlternativeConfig {
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.k.saturating_mul(self.iterations_per_route)
    }

    /// Cost multiplier for an edge already used by `usage` accepted routes.
    #[inline]
    pub fn penalty_multiplier(&self, usage: u32) -> f64 {
        let u = f64::from(usage);
        1.0 + u * u * self.penalty_weight
    }
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Floor-plan scale used for indoor edge weights.  Default: 0.02 m/px.
    pub meters_per_pixel: f64,

    /// Ramer–Douglas–Peucker tolerance for display polylines.  Default: 5 m.
    pub simplify_tolerance_m: f64,

    /// Bearing change below which consecutive segments merge into one
    /// instruction.  Default: 20°.
    pub turn_threshold_deg: f64,

    /// Cost of a stairway/elevator hop between floors, independent of pixel
    /// distance.  Default: 5.
    pub vertical_edge_cost: f64,

    pub alternatives: AlternativeConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            meters_per_pixel:     0.02,
            simplify_tolerance_m: 5.0,
            turn_threshold_deg:   20.0,
            vertical_edge_cost:   5.0,
            alternatives:         AlternativeConfig::default(),
        }
    }
}

impl NavConfig {
    /// Reject values that would make edge weights negative or the search
    /// budget empty.
    pub fn validate(&self) -> NavResult<()> {
        let positive = [
            ("meters_per_pixel", self.meters_per_pixel),
            ("turn_threshold_deg", self.turn_threshold_deg),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(NavError::Config(format!("{name} must be positive, got {v}")));
            }
        }

        let non_negative = [
            ("simplify_tolerance_m", self.simplify_tolerance_m),
            ("vertical_edge_cost", self.vertical_edge_cost),
            ("alternatives.near_delta_m", self.alternatives.near_delta_m),
            ("alternatives.penalty_weight", self.alternatives.penalty_weight),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(NavError::Config(format!("{name} must be non-negative, got {v}")));
            }
        }

        let alt = &self.alternatives;
        if alt.far_delta_m < alt.near_delta_m {
            return Err(NavError::Config(format!(
                "alternatives.far_delta_m ({}) is below near_delta_m ({})",
                alt.far_delta_m, alt.near_delta_m
            )));
        }
        if alt.k == 0 || alt.iterations_per_route == 0 {
            return Err(NavError::Config(
                "alternatives.k and iterations_per_route must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
