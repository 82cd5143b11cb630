//! World generation orchestrator and the result bundle.
//!
//! `generate_world` is a pure function from configuration to world: it owns
//! the RNG, the vertex store, and the edge list, and runs the fixed phase
//! sequence (origins, per-band expansion and repair, stitching, places,
//! exits, marsh, validation). Reordering any phase, or any RNG consumer
//! inside one, changes the output stream and is a semantic regression.

use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use crate::delta::{expand_band, DELTA_BIAS_TABLE};
use crate::ecosystem::{Ecosystem, MAIN_BAND_COUNT};
use crate::error::WorldGenError;
use crate::exits::synthesize_exits;
use crate::grid::GridCoord;
use crate::marsh::apply_marsh;
use crate::metrics::WorldMetrics;
use crate::naming::{place_description, place_name};
use crate::place::Place;
use crate::repair::repair_band;
use crate::rng::WorldRng;
use crate::stitch::stitch_bands;
use crate::validate::validate_world;
use crate::vertex::{Edge, VertexKind, VertexStore, WorldVertex};

/// World-space rectangle of one main band, for overlay rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcosystemBoundary {
    pub ecosystem: Ecosystem,
    pub start_x: f64,
    pub end_x: f64,
    pub start_y: f64,
    pub end_y: f64,
    pub columns: i32,
}

/// Exit totals for the generated world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSummary {
    /// Directed exits; a reciprocal pair counts twice.
    pub total: usize,
}

/// Diagnostic counters accumulated across the build. Recoverable failures
/// land here instead of aborting the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub origin_vertices: usize,
    pub delta_vertices: usize,
    pub repair_vertices: usize,
    pub bridge_vertices: usize,
    pub repairs_made: usize,
    pub repairs_dropped: usize,
    pub bridges_built: usize,
    pub stitches_skipped: usize,
    pub exits_dropped: usize,
    pub marsh_places: usize,
}

/// Everything a generated world exposes to consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldResult {
    pub places: Vec<Place>,
    /// Vertex records in creation order; ids match the ids referenced by
    /// place exits.
    pub vertices: Vec<WorldVertex>,
    pub connections: ConnectionSummary,
    pub ecosystem_boundaries: Vec<EcosystemBoundary>,
    /// The input configuration, echoed back.
    pub config: WorldConfig,
    pub stats: GenerationStats,
}

/// Build a world from `config`. Either every validator passes and the full
/// result is returned, or the run fails with a single fatal error; no
/// partial world is ever produced.
pub fn generate_world(config: &WorldConfig) -> Result<WorldResult, WorldGenError> {
    let mut rng = WorldRng::new(config.seed);
    let metrics = WorldMetrics::new(config);
    let mut store = VertexStore::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut stats = GenerationStats::default();

    // Phase 1: one origin per band at (start_col, mid_row).
    for band in metrics.bands() {
        if band.columns() == 0 || metrics.grid_height < 1 {
            return Err(WorldGenError::MissingOrigin {
                band: band.ecosystem.slug(),
            });
        }
        store.insert(WorldVertex::mint(
            VertexKind::Origin,
            band.ecosystem,
            GridCoord::new(band.start_col, metrics.mid_row()),
            &metrics,
            &mut rng,
        ));
    }

    // Phase 2: expand then repair each band, west to east.
    for band_index in 0..MAIN_BAND_COUNT {
        let band = metrics.band_range(band_index);
        let origin_cell = GridCoord::new(band.start_col, metrics.mid_row());
        let origin = store
            .key_at(&origin_cell)
            .ok_or(WorldGenError::MissingOrigin {
                band: band.ecosystem.slug(),
            })?;

        let expansion = expand_band(
            &mut store,
            &metrics,
            &mut rng,
            band_index,
            origin,
            &DELTA_BIAS_TABLE,
            config.global_branching_factor,
        );
        edges.extend(expansion.edges);

        let report = repair_band(&mut store, &metrics, &mut rng, band_index, &edges)?;
        stats.repairs_made += report.repairs_made;
        stats.repairs_dropped += report.repairs_dropped;
        edges.extend(report.edges);
    }

    // Phase 3: stitch adjacent bands.
    let stitched = stitch_bands(&mut store, &metrics, &mut rng);
    stats.bridges_built = stitched.bridges_built;
    stats.stitches_skipped = stitched.stitches_skipped;
    edges.extend(stitched.edges.iter().copied());

    // Phase 4: a place per vertex, named in creation order.
    let mut places: Vec<Place> = store
        .iter()
        .map(|(_, vertex)| {
            let name = place_name(vertex.ecosystem, &mut rng);
            let description = place_description(vertex.ecosystem, &mut rng);
            Place::new(vertex.place_id.clone(), name, description, vertex.ecosystem)
        })
        .collect();

    // Phase 5: exits, then the marsh pass (after exits, so marsh inherits
    // jungle connectivity).
    let synthesis = synthesize_exits(&mut places, &store, &edges, &stitched.bridge_edges);
    stats.exits_dropped = synthesis.exits_dropped;
    stats.marsh_places = apply_marsh(&mut store, &mut places, &mut rng);

    // Phase 6: validate or fail the whole run.
    let violations = validate_world(&store, &places, &stitched.bridge_edges, &metrics);
    if !violations.is_empty() {
        return Err(WorldGenError::GenerationInvariantViolated {
            seed: config.seed,
            violations,
        });
    }

    for (_, vertex) in store.iter() {
        match vertex.kind {
            VertexKind::Origin => stats.origin_vertices += 1,
            VertexKind::Delta => stats.delta_vertices += 1,
            VertexKind::Link => stats.repair_vertices += 1,
            VertexKind::Bridge => stats.bridge_vertices += 1,
        }
    }

    let connections = ConnectionSummary {
        total: places.iter().map(|place| place.exits.len()).sum(),
    };
    let ecosystem_boundaries = metrics
        .bands()
        .iter()
        .map(|band| EcosystemBoundary {
            ecosystem: band.ecosystem,
            start_x: metrics.world_x(band.start_col),
            end_x: metrics.world_x(band.end_col),
            start_y: metrics.world_y(0),
            end_y: metrics.world_y(metrics.grid_height),
            columns: band.columns(),
        })
        .collect();

    Ok(WorldResult {
        places,
        vertices: store.iter().map(|(_, vertex)| vertex.clone()).collect(),
        connections,
        ecosystem_boundaries,
        config: config.clone(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world_generates_and_validates() {
        let world = generate_world(&WorldConfig::default()).unwrap();
        assert_eq!(world.stats.origin_vertices, MAIN_BAND_COUNT);
        assert_eq!(world.places.len(), world.vertices.len());
        assert_eq!(
            world.connections.total,
            world.places.iter().map(|p| p.exits.len()).sum::<usize>()
        );
        assert_eq!(world.config, WorldConfig::default());
    }

    #[test]
    fn test_boundaries_tile_the_grid_span() {
        let config = WorldConfig::default();
        let world = generate_world(&config).unwrap();
        let metrics = WorldMetrics::new(&config);

        assert_eq!(world.ecosystem_boundaries.len(), MAIN_BAND_COUNT);
        let total_columns: i32 = world.ecosystem_boundaries.iter().map(|b| b.columns).sum();
        assert_eq!(total_columns, metrics.grid_width);
        for pair in world.ecosystem_boundaries.windows(2) {
            assert_eq!(pair[0].end_x, pair[1].start_x);
        }
    }

    #[test]
    fn test_degenerate_geometry_fails_fast() {
        let config = WorldConfig {
            world_width_km: 1.0,
            world_height_km: 1.0,
            ..WorldConfig::default()
        };
        // 1 km minus margins leaves a 3-column grid: not enough for five
        // bands.
        assert!(matches!(
            generate_world(&config),
            Err(WorldGenError::MissingOrigin { .. })
        ));
    }

    #[test]
    fn test_vertex_ids_match_place_ids() {
        let world = generate_world(&WorldConfig::default()).unwrap();
        for (place, vertex) in world.places.iter().zip(&world.vertices) {
            assert_eq!(place.id, vertex.place_id);
            assert_eq!(place.ecosystem, vertex.ecosystem);
        }
    }
}
