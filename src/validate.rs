//! Post-generation validation.
//!
//! Runs after every build. A failed check here is fatal to the run: the
//! orchestrator wraps the collected violations in
//! [`WorldGenError::GenerationInvariantViolated`](crate::error::WorldGenError)
//! and returns no partial world.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::ecosystem::Ecosystem;
use crate::exits::cross_band_edge_allowed;
use crate::metrics::WorldMetrics;
use crate::place::Place;
use crate::vertex::{VertexKey, VertexKind, VertexStore};

/// Tolerance, in degrees, when checking exit bearings against 45°.
pub const BEARING_TOLERANCE_DEG: f64 = 1e-3;

/// Audit a finished world. Returns every violation found; an empty vector
/// means the world passed.
pub fn validate_world(
    store: &VertexStore,
    places: &[Place],
    bridge_edges: &HashSet<(VertexKey, VertexKey)>,
    metrics: &WorldMetrics,
) -> Vec<String> {
    let mut violations = Vec::new();

    let index_by_place_id: HashMap<&str, usize> = places
        .iter()
        .enumerate()
        .map(|(index, place)| (place.id.as_str(), index))
        .collect();

    check_exits(store, places, &index_by_place_id, bridge_edges, &mut violations);
    check_connectedness(store, places, &index_by_place_id, &mut violations);
    check_band_columns(store, metrics, &mut violations);

    violations
}

/// Bearing audit, cross-band legality, dangling targets, reciprocity.
fn check_exits(
    store: &VertexStore,
    places: &[Place],
    index_by_place_id: &HashMap<&str, usize>,
    bridge_edges: &HashSet<(VertexKey, VertexKey)>,
    violations: &mut Vec<String>,
) {
    for (index, place) in places.iter().enumerate() {
        let u = store.get(VertexKey(index));
        for exit in place.exits.values() {
            let Some(&target_index) = index_by_place_id.get(exit.to.as_str()) else {
                violations.push(format!(
                    "exit from '{}' references unknown place '{}'",
                    place.id, exit.to
                ));
                continue;
            };
            let v = store.get(VertexKey(target_index));

            let bearing = (v.y - u.y).atan2(v.x - u.x).to_degrees();
            let remainder = bearing.rem_euclid(45.0);
            if remainder.min(45.0 - remainder) > BEARING_TOLERANCE_DEG {
                violations.push(format!(
                    "exit '{}' -> '{}' bears {bearing:.3}°, not a multiple of 45°",
                    u.id, v.id
                ));
            }

            if u.ecosystem != v.ecosystem
                && !cross_band_edge_allowed(
                    u,
                    v,
                    crate::stitch::edge_key(VertexKey(index), VertexKey(target_index)),
                    bridge_edges,
                )
            {
                violations.push(format!(
                    "illegal cross-band exit '{}' ({}) -> '{}' ({})",
                    u.id,
                    u.ecosystem.slug(),
                    v.id,
                    v.ecosystem.slug()
                ));
            }

            let reciprocal = places[target_index]
                .exits
                .get(&exit.direction.opposite())
                .map(|back| back.to == place.id)
                .unwrap_or(false);
            if !reciprocal {
                violations.push(format!(
                    "exit '{}' -> '{}' has no reciprocal",
                    u.id, v.id
                ));
            }
        }
    }
}

/// BFS over exits from the westernmost vertex must reach everything.
fn check_connectedness(
    store: &VertexStore,
    places: &[Place],
    index_by_place_id: &HashMap<&str, usize>,
    violations: &mut Vec<String>,
) {
    if store.is_empty() {
        violations.push("world has no vertices".to_string());
        return;
    }

    let start = store
        .iter()
        .min_by(|(_, a), (_, b)| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(key, _)| key.0)
        .unwrap_or(0);

    let mut seen: HashSet<usize> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for exit in places[current].exits.values() {
            if let Some(&next) = index_by_place_id.get(exit.to.as_str()) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    if seen.len() != store.len() {
        violations.push(format!(
            "graph is disconnected: reached {} of {} vertices from '{}'",
            seen.len(),
            store.len(),
            store.get(VertexKey(start)).id
        ));
    }
}

/// Every vertex tag must match its column's band, except bridge vertices
/// (tagged with their target band) and marsh (a retagged jungle column).
fn check_band_columns(store: &VertexStore, metrics: &WorldMetrics, violations: &mut Vec<String>) {
    for (_, vertex) in store.iter() {
        if vertex.kind == VertexKind::Bridge {
            continue;
        }
        let expected = metrics.ecosystem_for_column(vertex.grid.x);
        let marsh_on_jungle_column = vertex.ecosystem == Ecosystem::MarshTropical
            && expected == Ecosystem::JungleTropical;
        if vertex.ecosystem != expected && !marsh_on_jungle_column {
            violations.push(format!(
                "vertex '{}' at {} tagged '{}' but its column belongs to '{}'",
                vertex.id,
                vertex.grid,
                vertex.ecosystem.slug(),
                expected.slug()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::grid::{Direction, GridCoord};
    use crate::place::Exit;
    use crate::rng::WorldRng;
    use crate::vertex::WorldVertex;

    struct Fixture {
        store: VertexStore,
        places: Vec<Place>,
        metrics: WorldMetrics,
        rng: WorldRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: VertexStore::new(),
                places: Vec::new(),
                metrics: WorldMetrics::new(&WorldConfig::default()),
                rng: WorldRng::new(42),
            }
        }

        fn add(&mut self, ecosystem: Ecosystem, x: i32, y: i32) -> VertexKey {
            let vertex = WorldVertex::mint(
                VertexKind::Delta,
                ecosystem,
                GridCoord::new(x, y),
                &self.metrics,
                &mut self.rng,
            );
            self.places.push(Place::new(
                vertex.place_id.clone(),
                "Test".into(),
                String::new(),
                ecosystem,
            ));
            self.store.insert(vertex)
        }

        fn connect(&mut self, a: VertexKey, b: VertexKey) {
            let u = self.store.get(a).clone();
            let v = self.store.get(b).clone();
            let direction = Direction::from_offset(v.x - u.x, v.y - u.y);
            self.places[a.0].exits.insert(
                direction,
                Exit {
                    direction,
                    to: v.place_id.clone(),
                    label: String::new(),
                },
            );
            self.places[b.0].exits.insert(
                direction.opposite(),
                Exit {
                    direction: direction.opposite(),
                    to: u.place_id.clone(),
                    label: String::new(),
                },
            );
        }

        fn validate(&self) -> Vec<String> {
            validate_world(&self.store, &self.places, &HashSet::new(), &self.metrics)
        }
    }

    #[test]
    fn test_clean_world_passes() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 0, 14);
        let b = fx.add(Ecosystem::SteppeArid, 1, 14);
        let c = fx.add(Ecosystem::SteppeArid, 2, 15);
        fx.connect(a, b);
        fx.connect(b, c);
        assert!(fx.validate().is_empty());
    }

    #[test]
    fn test_disconnection_is_reported() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 0, 14);
        let b = fx.add(Ecosystem::SteppeArid, 1, 14);
        fx.add(Ecosystem::SteppeArid, 5, 14);
        fx.connect(a, b);
        let violations = fx.validate();
        assert!(violations.iter().any(|v| v.contains("disconnected")));
    }

    #[test]
    fn test_non_45_degree_exit_is_reported() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 0, 14);
        let b = fx.add(Ecosystem::SteppeArid, 2, 15);
        // Hand-wire an exit with a 26.6° bearing.
        fx.connect(a, b);
        let violations = fx.validate();
        assert!(violations.iter().any(|v| v.contains("not a multiple of 45°")));
    }

    #[test]
    fn test_illegal_cross_band_exit_is_reported() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 9, 14);
        let b = fx.add(Ecosystem::GrasslandTemperate, 10, 14);
        fx.connect(a, b);
        let violations = fx.validate();
        assert!(violations.iter().any(|v| v.contains("illegal cross-band")));
    }

    #[test]
    fn test_dangling_exit_target_is_reported() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 0, 14);
        fx.places[a.0].exits.insert(
            Direction::E,
            Exit {
                direction: Direction::E,
                to: "flux:place:missing".into(),
                label: String::new(),
            },
        );
        let violations = fx.validate();
        assert!(violations.iter().any(|v| v.contains("unknown place")));
    }

    #[test]
    fn test_band_column_mismatch_is_reported() {
        let mut fx = Fixture::new();
        // A jungle-tagged vertex sitting in steppe columns.
        fx.add(Ecosystem::JungleTropical, 3, 14);
        let violations = fx.validate();
        assert!(violations
            .iter()
            .any(|v| v.contains("column belongs to 'steppe'")));
    }

    #[test]
    fn test_marsh_allowed_only_on_jungle_columns() {
        let mut fx = Fixture::new();
        fx.add(Ecosystem::MarshTropical, 47, 14);
        assert!(fx.validate().is_empty());

        let mut bad = Fixture::new();
        bad.add(Ecosystem::MarshTropical, 3, 14);
        assert!(!bad.validate().is_empty());
    }

    #[test]
    fn test_missing_reciprocal_is_reported() {
        let mut fx = Fixture::new();
        let a = fx.add(Ecosystem::SteppeArid, 0, 14);
        let b = fx.add(Ecosystem::SteppeArid, 1, 14);
        fx.places[a.0].exits.insert(
            Direction::E,
            Exit {
                direction: Direction::E,
                to: fx.store.get(b).place_id.clone(),
                label: String::new(),
            },
        );
        let violations = fx.validate();
        assert!(violations.iter().any(|v| v.contains("no reciprocal")));
    }
}
