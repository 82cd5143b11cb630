//! World generation configuration.

use serde::{Deserialize, Serialize};

/// Default master seed when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Input parameters for a world build.
///
/// Geometry is given in kilometres for the world envelope and metres for the
/// place footprint; the derived grid arithmetic lives in
/// [`WorldMetrics`](crate::metrics::WorldMetrics).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in kilometres.
    pub world_width_km: f64,
    /// World height in kilometres.
    pub world_height_km: f64,
    /// Side length of a place footprint in metres.
    pub place_size_m: u32,
    /// Clearance between place footprints in metres.
    pub place_margin_m: u32,
    /// Master seed; defaults to [`DEFAULT_SEED`].
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Optional scaling applied to every row of the delta bias table.
    /// Scaled probabilities are clamped to `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_branching_factor: Option<f64>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl WorldConfig {
    /// World width in metres.
    pub fn world_width_m(&self) -> f64 {
        self.world_width_km * 1000.0
    }

    /// World height in metres.
    pub fn world_height_m(&self) -> f64 {
        self.world_height_km * 1000.0
    }

    /// Centre-to-centre spacing between adjacent places in metres.
    pub fn place_spacing_m(&self) -> f64 {
        (self.place_size_m + self.place_margin_m) as f64
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width_km: 14.5,
            world_height_km: 9.0,
            place_size_m: 100,
            place_margin_m: 200,
            seed: DEFAULT_SEED,
            global_branching_factor: None,
        }
    }
}
