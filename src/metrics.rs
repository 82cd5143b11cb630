//! World-to-grid arithmetic and ecosystem band layout.
//!
//! Converts the metric world envelope into a discrete grid and splits the
//! grid's columns into five contiguous west-to-east bands. All downstream
//! components ask this module which band a column belongs to; none of them
//! re-derive the layout.

use crate::config::WorldConfig;
use crate::ecosystem::{Ecosystem, MAIN_BAND_COUNT};
use crate::grid::GridCoord;

/// Inclusive-start, exclusive-end column span of one main band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandRange {
    pub ecosystem: Ecosystem,
    pub start_col: i32,
    pub end_col: i32,
}

impl BandRange {
    /// Number of grid columns this band spans.
    pub fn columns(&self) -> i32 {
        self.end_col - self.start_col
    }

    /// True when `column` falls inside this band.
    pub fn contains(&self, column: i32) -> bool {
        self.start_col <= column && column < self.end_col
    }
}

/// Derived grid geometry for one world build.
#[derive(Clone, Debug)]
pub struct WorldMetrics {
    /// Centre-to-centre spacing between adjacent places, metres.
    pub place_spacing_m: f64,
    /// Clearance kept off every world edge, metres.
    pub margin_m: f64,
    /// Grid columns.
    pub grid_width: i32,
    /// Grid rows.
    pub grid_height: i32,
    bands: [BandRange; MAIN_BAND_COUNT],
}

impl WorldMetrics {
    pub fn new(config: &WorldConfig) -> Self {
        let margin = config.place_margin_m as f64;
        let spacing = config.place_spacing_m();
        let grid_width = ((config.world_width_m() - 2.0 * margin) / spacing).floor() as i32 + 1;
        let grid_height = ((config.world_height_m() - 2.0 * margin) / spacing).floor() as i32 + 1;

        // Leftover columns after the even split go to the westernmost bands.
        let base = grid_width / MAIN_BAND_COUNT as i32;
        let remainder = grid_width % MAIN_BAND_COUNT as i32;
        let mut bands = [BandRange {
            ecosystem: Ecosystem::SteppeArid,
            start_col: 0,
            end_col: 0,
        }; MAIN_BAND_COUNT];
        let mut cursor = 0;
        for (index, ecosystem) in Ecosystem::main_bands().into_iter().enumerate() {
            let width = base + if (index as i32) < remainder { 1 } else { 0 };
            bands[index] = BandRange {
                ecosystem,
                start_col: cursor,
                end_col: cursor + width,
            };
            cursor += width;
        }

        Self {
            place_spacing_m: spacing,
            margin_m: margin,
            grid_width,
            grid_height,
            bands,
        }
    }

    /// Column spans of the five main bands, west to east.
    pub fn bands(&self) -> &[BandRange; MAIN_BAND_COUNT] {
        &self.bands
    }

    /// Column span of the band at `index` (0 = steppe, 4 = jungle).
    pub fn band_range(&self, index: usize) -> BandRange {
        self.bands[index]
    }

    /// The band a grid column belongs to. Columns outside the grid resolve
    /// to the last band.
    pub fn ecosystem_for_column(&self, column: i32) -> Ecosystem {
        self.bands
            .iter()
            .find(|band| band.contains(column))
            .map(|band| band.ecosystem)
            .unwrap_or(Ecosystem::JungleTropical)
    }

    /// Routing-band index for a grid column.
    pub fn band_index_for_column(&self, column: i32) -> usize {
        self.ecosystem_for_column(column).pathfinding_band()
    }

    /// True when `cell` lies inside the grid.
    pub fn in_bounds(&self, cell: &GridCoord) -> bool {
        cell.x >= 0 && cell.x < self.grid_width && cell.y >= 0 && cell.y < self.grid_height
    }

    /// Row closest to the vertical middle of the grid; origins and stitch
    /// anchors are measured against it.
    pub fn mid_row(&self) -> i32 {
        self.grid_height / 2
    }

    /// World x coordinate of a grid column, metres.
    pub fn world_x(&self, grid_x: i32) -> f64 {
        self.margin_m + grid_x as f64 * self.place_spacing_m
    }

    /// World y coordinate of a grid row, metres.
    pub fn world_y(&self, grid_y: i32) -> f64 {
        self.margin_m + grid_y as f64 * self.place_spacing_m
    }
}
