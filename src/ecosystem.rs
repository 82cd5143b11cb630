//! Ecosystem bands and their fixed ecological profiles.
//!
//! The world is partitioned into five main bands ordered west to east, plus
//! a marsh band derived from the eastern edge of the jungle after exits are
//! synthesised. Marsh shares the jungle's routing band: every pathfinding
//! and policy decision treats the two as one band.

use serde::{Deserialize, Serialize};

/// Number of main west-to-east bands (marsh excluded).
pub const MAIN_BAND_COUNT: usize = 5;

/// Ecosystem tag carried by every vertex and place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    SteppeArid,
    GrasslandTemperate,
    ForestTemperate,
    MountainArid,
    JungleTropical,
    /// Post-process tag only; never produced by expansion or stitching.
    MarshTropical,
}

/// Fixed climate envelope for one ecosystem: `(min, max)` ranges for
/// temperature in °C, pressure in kPa, and relative humidity in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcologyProfile {
    pub temperature_c: (f64, f64),
    pub pressure_kpa: (f64, f64),
    pub humidity_pct: (f64, f64),
}

impl Ecosystem {
    /// The five main bands in west-to-east order.
    pub fn main_bands() -> [Ecosystem; MAIN_BAND_COUNT] {
        [
            Ecosystem::SteppeArid,
            Ecosystem::GrasslandTemperate,
            Ecosystem::ForestTemperate,
            Ecosystem::MountainArid,
            Ecosystem::JungleTropical,
        ]
    }

    /// Index of the band a tag routes through, west to east.
    ///
    /// Marsh resolves to the jungle band: marsh vertices sit in jungle
    /// columns and inherit jungle connectivity.
    pub fn pathfinding_band(&self) -> usize {
        match self {
            Ecosystem::SteppeArid => 0,
            Ecosystem::GrasslandTemperate => 1,
            Ecosystem::ForestTemperate => 2,
            Ecosystem::MountainArid => 3,
            Ecosystem::JungleTropical | Ecosystem::MarshTropical => 4,
        }
    }

    /// True when two tags route through the same band.
    pub fn same_band(&self, other: &Ecosystem) -> bool {
        self.pathfinding_band() == other.pathfinding_band()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::SteppeArid => "Arid Steppe",
            Ecosystem::GrasslandTemperate => "Temperate Grassland",
            Ecosystem::ForestTemperate => "Temperate Forest",
            Ecosystem::MountainArid => "Arid Mountains",
            Ecosystem::JungleTropical => "Tropical Jungle",
            Ecosystem::MarshTropical => "Tropical Marsh",
        }
    }

    /// Short lowercase token used in vertex identifiers.
    pub fn slug(&self) -> &'static str {
        match self {
            Ecosystem::SteppeArid => "steppe",
            Ecosystem::GrasslandTemperate => "grassland",
            Ecosystem::ForestTemperate => "forest",
            Ecosystem::MountainArid => "mountain",
            Ecosystem::JungleTropical => "jungle",
            Ecosystem::MarshTropical => "marsh",
        }
    }

    /// Fixed ecology envelope for places in this band.
    pub fn ecology(&self) -> EcologyProfile {
        match self {
            Ecosystem::SteppeArid => EcologyProfile {
                temperature_c: (8.0, 38.0),
                pressure_kpa: (99.0, 102.0),
                humidity_pct: (10.0, 30.0),
            },
            Ecosystem::GrasslandTemperate => EcologyProfile {
                temperature_c: (4.0, 26.0),
                pressure_kpa: (100.0, 102.5),
                humidity_pct: (35.0, 60.0),
            },
            Ecosystem::ForestTemperate => EcologyProfile {
                temperature_c: (0.0, 22.0),
                pressure_kpa: (99.5, 102.0),
                humidity_pct: (55.0, 80.0),
            },
            Ecosystem::MountainArid => EcologyProfile {
                temperature_c: (-12.0, 15.0),
                pressure_kpa: (85.0, 95.0),
                humidity_pct: (15.0, 40.0),
            },
            Ecosystem::JungleTropical => EcologyProfile {
                temperature_c: (20.0, 34.0),
                pressure_kpa: (100.0, 101.5),
                humidity_pct: (75.0, 98.0),
            },
            Ecosystem::MarshTropical => EcologyProfile {
                temperature_c: (18.0, 32.0),
                pressure_kpa: (100.5, 101.5),
                humidity_pct: (85.0, 100.0),
            },
        }
    }

    /// Overlay colour for map rendering.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Ecosystem::SteppeArid => [205, 170, 109],
            Ecosystem::GrasslandTemperate => [154, 205, 50],
            Ecosystem::ForestTemperate => [34, 120, 60],
            Ecosystem::MountainArid => [139, 125, 107],
            Ecosystem::JungleTropical => [0, 100, 40],
            Ecosystem::MarshTropical => [70, 110, 90],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_bands_run_west_to_east() {
        let bands = Ecosystem::main_bands();
        for (index, band) in bands.iter().enumerate() {
            assert_eq!(band.pathfinding_band(), index);
        }
    }

    #[test]
    fn test_marsh_routes_through_jungle_band() {
        assert_eq!(
            Ecosystem::MarshTropical.pathfinding_band(),
            Ecosystem::JungleTropical.pathfinding_band()
        );
        assert!(Ecosystem::MarshTropical.same_band(&Ecosystem::JungleTropical));
        assert!(!Ecosystem::MarshTropical.same_band(&Ecosystem::MountainArid));
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<&str> = Ecosystem::main_bands().iter().map(|b| b.slug()).collect();
        slugs.push(Ecosystem::MarshTropical.slug());
        let before = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), before);
    }

    #[test]
    fn test_ecology_ranges_are_ordered() {
        for band in Ecosystem::main_bands()
            .into_iter()
            .chain([Ecosystem::MarshTropical])
        {
            let ecology = band.ecology();
            assert!(ecology.temperature_c.0 < ecology.temperature_c.1);
            assert!(ecology.pressure_kpa.0 < ecology.pressure_kpa.1);
            assert!(ecology.humidity_pct.0 < ecology.humidity_pct.1);
        }
    }
}
