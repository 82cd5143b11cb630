//! Exit synthesis: undirected construction edges become reciprocal
//! directional exits on the paired places.
//!
//! The compass direction of each exit comes from the world-space bearing of
//! the edge, bucketed into eight 45° sectors. A cross-band edge is only
//! honoured when it is a recorded inter-band bridge (or a marsh↔jungle
//! pair, which the marsh pass creates after synthesis); anything else is
//! dropped and counted, leaving both places untouched.

use std::collections::HashSet;

use crate::ecosystem::Ecosystem;
use crate::grid::Direction;
use crate::place::{Exit, Place};
use crate::stitch::edge_key;
use crate::vertex::{Edge, VertexKey, VertexStore, WorldVertex};

/// Counters from one synthesis pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExitSynthesis {
    /// Directed exits written (each honoured edge contributes two).
    pub exits_written: usize,
    /// Edges dropped by the cross-band guard.
    pub exits_dropped: usize,
}

/// True for the one cross-tag pairing the marsh pass legitimately creates.
fn is_marsh_jungle_pair(a: Ecosystem, b: Ecosystem) -> bool {
    matches!(
        (a, b),
        (Ecosystem::MarshTropical, Ecosystem::JungleTropical)
            | (Ecosystem::JungleTropical, Ecosystem::MarshTropical)
    )
}

/// True when an edge between differently-tagged vertices may become exits.
pub fn cross_band_edge_allowed(
    u: &WorldVertex,
    v: &WorldVertex,
    key: (VertexKey, VertexKey),
    bridge_edges: &HashSet<(VertexKey, VertexKey)>,
) -> bool {
    if is_marsh_jungle_pair(u.ecosystem, v.ecosystem) {
        return true;
    }
    let band_u = u.ecosystem.pathfinding_band();
    let band_v = v.ecosystem.pathfinding_band();
    band_u.abs_diff(band_v) == 1 && bridge_edges.contains(&key)
}

/// Convert every construction edge into a reciprocal pair of exits.
///
/// `places[i]` pairs with vertex key `i`. Edges are processed in creation
/// order; writes go by direction key, so a later edge in the same sector
/// overwrites an earlier one.
pub fn synthesize_exits(
    places: &mut [Place],
    store: &VertexStore,
    edges: &[Edge],
    bridge_edges: &HashSet<(VertexKey, VertexKey)>,
) -> ExitSynthesis {
    let mut summary = ExitSynthesis::default();

    for edge in edges {
        let u = store.get(edge.a);
        let v = store.get(edge.b);

        if u.ecosystem != v.ecosystem
            && !cross_band_edge_allowed(u, v, edge_key(edge.a, edge.b), bridge_edges)
        {
            summary.exits_dropped += 1;
            continue;
        }

        let direction = Direction::from_offset(v.x - u.x, v.y - u.y);
        let forward = Exit {
            direction,
            to: v.place_id.clone(),
            label: format!("{} toward {}", direction, places[edge.b.0].name),
        };
        let backward = Exit {
            direction: direction.opposite(),
            to: u.place_id.clone(),
            label: format!("{} toward {}", direction.opposite(), places[edge.a.0].name),
        };
        places[edge.a.0].exits.insert(direction, forward);
        places[edge.b.0].exits.insert(direction.opposite(), backward);
        summary.exits_written += 2;
    }

    summary
}
