//! Intra-band connectivity repair.
//!
//! Delta expansion guarantees reachability from the band origin, but the
//! repair pass re-derives the truth from the data: it labels connected
//! components over same-band vertices and edges, anchors on the component
//! holding the easternmost vertex, and pulls every other component in via
//! the closest vertex pair. A repair that cannot find a path is dropped;
//! no shortcut edges are fabricated across unwalked cells.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::bridge::{build_bridge, BridgeRequest};
use crate::error::WorldGenError;
use crate::metrics::WorldMetrics;
use crate::rng::WorldRng;
use crate::vertex::{Edge, VertexKey, VertexKind, VertexStore};

/// Step budget for one repair path. Repairs stay inside a single band, so
/// the walk is short by construction.
const REPAIR_STEP_BUDGET: u32 = 8;

/// Outcome of repairing one band.
#[derive(Clone, Debug, Default)]
pub struct RepairReport {
    /// Same-band components found before repair.
    pub components_found: usize,
    /// Components successfully reconnected to the anchor.
    pub repairs_made: usize,
    /// Components whose repair path failed; left for the validators.
    pub repairs_dropped: usize,
    /// New edges, appended by the orchestrator to the global edge list.
    pub edges: Vec<Edge>,
    /// Repair intermediates created along the way.
    pub intermediates: Vec<VertexKey>,
}

/// Label connected components among `keys` under the undirected `edges`,
/// returned in creation order of their earliest vertex.
pub fn connected_components(keys: &[VertexKey], edges: &[Edge]) -> Vec<Vec<VertexKey>> {
    let members: HashSet<VertexKey> = keys.iter().copied().collect();
    let mut adjacency: HashMap<VertexKey, Vec<VertexKey>> = HashMap::new();
    for edge in edges {
        if members.contains(&edge.a) && members.contains(&edge.b) {
            adjacency.entry(edge.a).or_default().push(edge.b);
            adjacency.entry(edge.b).or_default().push(edge.a);
        }
    }

    let mut assigned: HashSet<VertexKey> = HashSet::new();
    let mut components = Vec::new();
    for &start in keys {
        if assigned.contains(&start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        assigned.insert(start);
        while let Some(current) = queue.pop_front() {
            component.push(current);
            for &next in adjacency.get(&current).into_iter().flatten() {
                if assigned.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components
}

/// Reconnect every stray component of band `band_index` to its easternmost
/// component.
pub fn repair_band(
    store: &mut VertexStore,
    metrics: &WorldMetrics,
    rng: &mut WorldRng,
    band_index: usize,
    edges: &[Edge],
) -> Result<RepairReport, WorldGenError> {
    let keys = store.band_keys(band_index);
    let components = connected_components(&keys, edges);
    let mut report = RepairReport {
        components_found: components.len(),
        ..RepairReport::default()
    };
    if components.len() < 2 {
        return Ok(report);
    }

    // Anchor: the component holding the vertex with maximum world x.
    let anchor_index = components
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            let ax = a.iter().map(|k| store.get(*k).x).fold(f64::MIN, f64::max);
            let bx = b.iter().map(|k| store.get(*k).x).fold(f64::MIN, f64::max);
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index)
        .unwrap_or(0);
    let anchor = components[anchor_index].clone();

    for (index, component) in components.iter().enumerate() {
        if index == anchor_index {
            continue;
        }

        // Closest pair across the two components; earliest pair wins ties.
        let mut best: Option<(VertexKey, VertexKey, f64)> = None;
        for &candidate in component {
            for &target in &anchor {
                let distance = store.get(candidate).distance_to(store.get(target));
                if best.map(|(_, _, d)| distance < d).unwrap_or(true) {
                    best = Some((candidate, target, distance));
                }
            }
        }
        let Some((from, to, _)) = best else { continue };

        match build_bridge(
            store,
            metrics,
            rng,
            &BridgeRequest {
                from,
                to,
                allow_cross_band: false,
                bridge_band_tag: None,
                max_bridge_length: REPAIR_STEP_BUDGET,
                kind: VertexKind::Link,
            },
        ) {
            Ok(chain) => {
                for &key in &chain.intermediates {
                    let vertex = store.get(key);
                    let column_band = metrics.band_index_for_column(vertex.grid.x);
                    if vertex.ecosystem.pathfinding_band() != band_index
                        || column_band != band_index
                    {
                        return Err(WorldGenError::BandInvariantViolated {
                            id: vertex.id.clone(),
                            grid: vertex.grid,
                            tagged: vertex.ecosystem.slug(),
                            expected: metrics.band_range(band_index).ecosystem.slug(),
                        });
                    }
                }
                report.intermediates.extend(chain.intermediates);
                report.edges.extend(chain.edges);
                report.repairs_made += 1;
            }
            Err(_) => {
                report.repairs_dropped += 1;
            }
        }
    }

    Ok(report)
}
