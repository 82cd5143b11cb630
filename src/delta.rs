//! River-delta expansion of a single band.
//!
//! Growth starts at the band origin and fans eastward like a river delta:
//! a FIFO queue of frontier vertices, each attempting to spawn neighbours
//! in five directions under a fixed bias table. Westward growth is blocked
//! entirely, so every edge points east or runs vertical and the whole band
//! stays reachable from its origin by construction.

use std::collections::{HashSet, VecDeque};

use crate::grid::Direction;
use crate::metrics::WorldMetrics;
use crate::rng::WorldRng;
use crate::vertex::{Edge, VertexKey, VertexKind, VertexStore, WorldVertex};

/// One row of the directional bias table.
#[derive(Clone, Copy, Debug)]
pub struct BiasRow {
    pub direction: Direction,
    /// Base spawn probability; a uniform draw below this value spawns.
    /// Rows above 1.0 always fire when the target cell is free.
    pub probability: f64,
}

/// Spawn bias, evaluated in this order for every dequeued vertex. The
/// diagonals dominate, eastward drift is moderate, vertical fill is rare,
/// and the west side is blocked.
pub const DELTA_BIAS_TABLE: [BiasRow; 5] = [
    BiasRow {
        direction: Direction::E,
        probability: 0.6,
    },
    BiasRow {
        direction: Direction::NE,
        probability: 1.5,
    },
    BiasRow {
        direction: Direction::SE,
        probability: 1.5,
    },
    BiasRow {
        direction: Direction::N,
        probability: 0.2,
    },
    BiasRow {
        direction: Direction::S,
        probability: 0.2,
    },
];

/// Effective spawn probability for a row under an optional global branching
/// factor. Scaled values clamp to `[0, 1]`; without a factor the raw table
/// value applies unchanged.
pub fn effective_probability(row: &BiasRow, branching_factor: Option<f64>) -> f64 {
    match branching_factor {
        Some(factor) => (row.probability * factor).clamp(0.0, 1.0),
        None => row.probability,
    }
}

/// Vertices and edges produced by expanding one band.
#[derive(Clone, Debug, Default)]
pub struct DeltaExpansion {
    pub created: Vec<VertexKey>,
    pub edges: Vec<Edge>,
}

/// Grow band `band_index` from its pre-created origin under `bias`.
/// Callers normally pass [`DELTA_BIAS_TABLE`]; the table is a parameter so
/// per-band tuning stays possible without touching the expander.
pub fn expand_band(
    store: &mut VertexStore,
    metrics: &WorldMetrics,
    rng: &mut WorldRng,
    band_index: usize,
    origin: VertexKey,
    bias: &[BiasRow],
    branching_factor: Option<f64>,
) -> DeltaExpansion {
    let band = metrics.band_range(band_index);
    let ecosystem = band.ecosystem;
    let mut expansion = DeltaExpansion::default();
    let mut queue: VecDeque<VertexKey> = VecDeque::new();
    let mut visited: HashSet<VertexKey> = HashSet::new();
    queue.push_back(origin);

    // Every band gets at least one eastward edge: the cell immediately east
    // of the origin is created unconditionally before biased growth starts.
    let east = store.get(origin).grid.step(Direction::E);
    if band.contains(east.x) && metrics.in_bounds(&east) && !store.is_occupied(&east) {
        let key = store.insert(WorldVertex::mint(
            VertexKind::Delta,
            ecosystem,
            east,
            metrics,
            rng,
        ));
        expansion.created.push(key);
        expansion.edges.push(Edge::new(origin, key));
        queue.push_back(key);
    }

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        let from = store.get(current).grid;

        for row in bias {
            let roll = rng.next_f64();
            if roll >= effective_probability(row, branching_factor) {
                continue;
            }
            let cell = from.step(row.direction);
            if !band.contains(cell.x) || !metrics.in_bounds(&cell) || store.is_occupied(&cell) {
                continue;
            }
            let key = store.insert(WorldVertex::mint(
                VertexKind::Delta,
                ecosystem,
                cell,
                metrics,
                rng,
            ));
            expansion.created.push(key);
            expansion.edges.push(Edge::new(current, key));
            queue.push_back(key);
        }
    }

    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::ecosystem::Ecosystem;
    use crate::grid::GridCoord;
    use std::collections::HashMap;

    fn expand_steppe(seed: u64, branching: Option<f64>) -> (VertexStore, VertexKey, DeltaExpansion) {
        let metrics = WorldMetrics::new(&WorldConfig::default());
        let mut rng = WorldRng::new(seed);
        let mut store = VertexStore::new();
        let origin = store.insert(WorldVertex::mint(
            VertexKind::Origin,
            Ecosystem::SteppeArid,
            GridCoord::new(0, metrics.mid_row()),
            &metrics,
            &mut rng,
        ));
        let expansion = expand_band(
            &mut store,
            &metrics,
            &mut rng,
            0,
            origin,
            &DELTA_BIAS_TABLE,
            branching,
        );
        (store, origin, expansion)
    }

    #[test]
    fn test_mandatory_east_step_always_present() {
        let (store, origin, expansion) = expand_steppe(42, None);
        let first = expansion.edges.first().expect("band produced no edges");
        assert_eq!(first.a, origin);
        let east = store.get(first.b);
        assert_eq!(east.grid, GridCoord::new(1, 14));
    }

    #[test]
    fn test_no_westward_edges() {
        let (store, _, expansion) = expand_steppe(42, None);
        for edge in &expansion.edges {
            let from = store.get(edge.a).grid;
            let to = store.get(edge.b).grid;
            assert!(to.x >= from.x, "westward edge {} -> {}", from, to);
        }
    }

    #[test]
    fn test_created_vertices_stay_in_band_columns() {
        let metrics = WorldMetrics::new(&WorldConfig::default());
        let band = metrics.band_range(0);
        let (store, _, expansion) = expand_steppe(556622, None);
        for key in &expansion.created {
            let vertex = store.get(*key);
            assert!(band.contains(vertex.grid.x));
            assert_eq!(vertex.ecosystem, Ecosystem::SteppeArid);
            assert!(vertex.grid.y >= 0 && vertex.grid.y < metrics.grid_height);
        }
    }

    #[test]
    fn test_every_vertex_reachable_from_origin() {
        let (store, origin, expansion) = expand_steppe(480630, None);
        let mut adjacency: HashMap<VertexKey, Vec<VertexKey>> = HashMap::new();
        for edge in &expansion.edges {
            adjacency.entry(edge.a).or_default().push(edge.b);
        }
        let mut seen = HashSet::from([origin]);
        let mut queue = VecDeque::from([origin]);
        while let Some(current) = queue.pop_front() {
            for next in adjacency.get(&current).into_iter().flatten() {
                if seen.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
        assert_eq!(seen.len(), store.len());
    }

    #[test]
    fn test_zero_branching_factor_spawns_only_mandatory_step() {
        let (store, _, expansion) = expand_steppe(42, Some(0.0));
        assert_eq!(expansion.created.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_expansion_is_seed_deterministic() {
        let (store_a, _, a) = expand_steppe(12345, None);
        let (store_b, _, b) = expand_steppe(12345, None);
        assert_eq!(a.created.len(), b.created.len());
        assert_eq!(a.edges, b.edges);
        for (key_a, key_b) in a.created.iter().zip(&b.created) {
            assert_eq!(store_a.get(*key_a), store_b.get(*key_b));
        }
    }

    #[test]
    fn test_branching_clamp_preserves_row_ordering() {
        for factor in [0.25, 0.5, 1.0, 2.0, 10.0] {
            let probabilities: Vec<f64> = DELTA_BIAS_TABLE
                .iter()
                .map(|row| effective_probability(row, Some(factor)))
                .collect();
            for value in &probabilities {
                assert!((0.0..=1.0).contains(value));
            }
            // E sits between the diagonals and the vertical rows at any scale.
            assert!(probabilities[0] <= probabilities[1]);
            assert!(probabilities[3] <= probabilities[0]);
        }
    }
}
