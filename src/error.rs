//! Fatal error taxonomy for world generation.
//!
//! Recoverable conditions (a rejected bridge, a failed repair path, a
//! skipped stitch) are not errors: they are counted in
//! [`GenerationStats`](crate::world::GenerationStats) and the run carries
//! on. Everything here aborts the run; no partial world is ever returned.

use thiserror::Error;

use crate::grid::GridCoord;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldGenError {
    /// A pre-created band origin disappeared before expansion reached it.
    #[error("origin vertex missing for band '{band}'")]
    MissingOrigin { band: &'static str },

    /// A vertex ended up tagged with a band inconsistent with its grid
    /// column outside the bridge/marsh exceptions.
    #[error("vertex '{id}' at {grid} tagged '{tagged}' but its column belongs to '{expected}'")]
    BandInvariantViolated {
        id: String,
        grid: GridCoord,
        tagged: &'static str,
        expected: &'static str,
    },

    /// Post-generation validation failed. Carries the seed so the failure
    /// can be reproduced, plus every violation found.
    #[error("world generated from seed {seed} failed validation: {}", violations.join("; "))]
    GenerationInvariantViolated { seed: u64, violations: Vec<String> },
}
