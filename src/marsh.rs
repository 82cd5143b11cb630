//! Marsh reassignment along the jungle's eastern edge.
//!
//! Runs after exit synthesis so marsh places inherit jungle connectivity
//! unchanged. Jungle vertices on the easternmost occupied jungle column are
//! retagged `MarshTropical` and their places take the marsh ecology and a
//! marsh description; bridge vertices are immune. No edges are touched.

use crate::ecosystem::Ecosystem;
use crate::naming::place_description;
use crate::place::Place;
use crate::rng::WorldRng;
use crate::vertex::{VertexKind, VertexStore};

/// Retag eligible jungle vertices as marsh. Returns how many converted.
pub fn apply_marsh(store: &mut VertexStore, places: &mut [Place], rng: &mut WorldRng) -> usize {
    let jungle_max_x = store
        .iter()
        .filter(|(_, vertex)| vertex.ecosystem == Ecosystem::JungleTropical)
        .map(|(_, vertex)| vertex.grid.x)
        .max();
    let Some(jungle_max_x) = jungle_max_x else {
        return 0;
    };

    let eligible: Vec<usize> = store
        .iter()
        .filter(|(_, vertex)| {
            vertex.ecosystem == Ecosystem::JungleTropical
                && vertex.grid.x == jungle_max_x
                && vertex.kind != VertexKind::Bridge
        })
        .map(|(key, _)| key.0)
        .collect();

    for index in &eligible {
        let vertex = store.get_mut(crate::vertex::VertexKey(*index));
        vertex.ecosystem = Ecosystem::MarshTropical;

        let place = &mut places[*index];
        place.ecosystem = Ecosystem::MarshTropical;
        place.ecology = Ecosystem::MarshTropical.ecology();
        // Names stay put (exit labels reference them); the description is
        // rewritten to match the new ecosystem.
        place.description = place_description(Ecosystem::MarshTropical, rng);
    }

    eligible.len()
}
