//! World vertices, edges, and the orchestrator-owned vertex store.
//!
//! Vertices are created in three phases (band origins, delta expansion,
//! repair/stitch intermediates) and never move afterwards; the only
//! post-creation mutation is the marsh pass rewriting an ecosystem tag.
//! The store keeps creation order, grid occupancy, and id lookup in sync.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ecosystem::Ecosystem;
use crate::grid::GridCoord;
use crate::metrics::WorldMetrics;
use crate::rng::WorldRng;

/// Creation-ordered handle to a vertex in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey(pub usize);

/// How a vertex came into being.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    /// Pre-created band seed at `(start_col, mid_row)`.
    Origin,
    /// Grown by the delta expander.
    Delta,
    /// Intra-band repair intermediate.
    Link,
    /// Inter-band stitch intermediate; exempt from the marsh pass and from
    /// the band-column invariant.
    Bridge,
}

/// One node of the world graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldVertex {
    /// Unique token, e.g. `origin-steppe` or `delta-12-7-a3f09c`.
    pub id: String,
    /// External place identifier, `flux:place:<id>`.
    pub place_id: String,
    pub grid: GridCoord,
    /// World x in metres.
    pub x: f64,
    /// World y in metres.
    pub y: f64,
    pub ecosystem: Ecosystem,
    pub kind: VertexKind,
}

impl WorldVertex {
    /// Build a vertex at `grid`. Non-origin kinds consume one RNG token for
    /// the id, so creation order is part of the deterministic stream.
    pub fn mint(
        kind: VertexKind,
        ecosystem: Ecosystem,
        grid: GridCoord,
        metrics: &WorldMetrics,
        rng: &mut WorldRng,
    ) -> Self {
        let id = match kind {
            VertexKind::Origin => format!("origin-{}", ecosystem.slug()),
            VertexKind::Delta => format!("delta-{}-{}-{}", grid.x, grid.y, rng.token()),
            VertexKind::Link | VertexKind::Bridge => {
                format!("bridge-{}-{}-{}", grid.x, grid.y, rng.token())
            }
        };
        let place_id = format!("flux:place:{id}");
        Self {
            id,
            place_id,
            grid,
            x: metrics.world_x(grid.x),
            y: metrics.world_y(grid.y),
            ecosystem,
            kind,
        }
    }

    /// Euclidean distance to another vertex in world metres.
    pub fn distance_to(&self, other: &WorldVertex) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Undirected vertex pair recorded during construction; converted into a
/// reciprocal exit pair by the exit synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: VertexKey,
    pub b: VertexKey,
}

impl Edge {
    pub fn new(a: VertexKey, b: VertexKey) -> Self {
        Self { a, b }
    }
}

/// Owning container for every vertex of a build.
#[derive(Clone, Debug, Default)]
pub struct VertexStore {
    vertices: Vec<WorldVertex>,
    by_grid: HashMap<GridCoord, VertexKey>,
}

impl VertexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex. Panics if the cell is already occupied; callers
    /// check occupancy before minting.
    pub fn insert(&mut self, vertex: WorldVertex) -> VertexKey {
        let key = VertexKey(self.vertices.len());
        let previous = self.by_grid.insert(vertex.grid, key);
        assert!(
            previous.is_none(),
            "two vertices share grid cell {}",
            vertex.grid
        );
        self.vertices.push(vertex);
        key
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, key: VertexKey) -> &WorldVertex {
        &self.vertices[key.0]
    }

    pub fn get_mut(&mut self, key: VertexKey) -> &mut WorldVertex {
        &mut self.vertices[key.0]
    }

    /// Vertex occupying `cell`, if any.
    pub fn key_at(&self, cell: &GridCoord) -> Option<VertexKey> {
        self.by_grid.get(cell).copied()
    }

    pub fn is_occupied(&self, cell: &GridCoord) -> bool {
        self.by_grid.contains_key(cell)
    }

    /// Keys and vertices in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexKey, &WorldVertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (VertexKey(index), vertex))
    }

    /// Keys of vertices routing through band `band_index`, creation order.
    pub fn band_keys(&self, band_index: usize) -> Vec<VertexKey> {
        self.iter()
            .filter(|(_, vertex)| vertex.ecosystem.pathfinding_band() == band_index)
            .map(|(key, _)| key)
            .collect()
    }

    /// Grid cells of every vertex except the listed exclusions. Used as the
    /// occupancy set for pathfinding.
    pub fn occupied_cells_except(&self, exclude: &[VertexKey]) -> std::collections::HashSet<GridCoord> {
        self.iter()
            .filter(|(key, _)| !exclude.contains(key))
            .map(|(_, vertex)| vertex.grid)
            .collect()
    }
}
