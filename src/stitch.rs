//! Inter-band stitching.
//!
//! After every band is internally connected, one short bridge is built per
//! adjacent band pair: from an anchor on the current band's easternmost
//! occupied column to an anchor on the next band's westernmost occupied
//! column. Anchors sit as close to the grid's middle row as possible.
//! Bridge intermediates carry the *target* band's tag and are exempt from
//! the marsh pass; the chain's edges are recorded so the exit synthesizer
//! and the validators can recognise legitimate band crossings.

use std::collections::HashSet;

use crate::bridge::{build_bridge, BridgeRequest};
use crate::ecosystem::MAIN_BAND_COUNT;
use crate::metrics::WorldMetrics;
use crate::rng::WorldRng;
use crate::vertex::{Edge, VertexKey, VertexKind, VertexStore};

/// Longest allowed bridge chain, in cells. Boundary columns are adjacent,
/// so bridges are short and direct.
const MAX_BRIDGE_LENGTH: u32 = 3;

/// Everything produced by stitching all adjacent band pairs.
#[derive(Clone, Debug, Default)]
pub struct StitchOutcome {
    pub bridges_built: usize,
    /// Pairs skipped for a missing anchor, reversed progression, or a
    /// failed path. Recoverable; the validators have the final word.
    pub stitches_skipped: usize,
    /// Chain edges, in creation order.
    pub edges: Vec<Edge>,
    /// Normalised `(min, max)` key pairs of every chain edge; membership
    /// here is what legalises a cross-band exit.
    pub bridge_edges: HashSet<(VertexKey, VertexKey)>,
    pub intermediates: Vec<VertexKey>,
}

/// Normalised lookup key for an undirected edge.
pub fn edge_key(a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pick the anchor vertex of `band_index` for a stitch endpoint.
///
/// `columns` is scanned in order; the first column holding any vertex of
/// the band wins, preferring the exact boundary column. Within a column the
/// vertex nearest the middle row wins, lowest row on ties.
fn select_anchor<I>(
    store: &VertexStore,
    metrics: &WorldMetrics,
    band_index: usize,
    columns: I,
) -> Option<VertexKey>
where
    I: IntoIterator<Item = i32>,
{
    let mid = metrics.mid_row();
    for column in columns {
        let candidate = store
            .iter()
            .filter(|(_, vertex)| {
                vertex.ecosystem.pathfinding_band() == band_index && vertex.grid.x == column
            })
            .min_by_key(|(_, vertex)| ((vertex.grid.y - mid).abs(), vertex.grid.y))
            .map(|(key, _)| key);
        if candidate.is_some() {
            return candidate;
        }
    }
    None
}

/// Build one bridge per adjacent band pair, west to east.
pub fn stitch_bands(
    store: &mut VertexStore,
    metrics: &WorldMetrics,
    rng: &mut WorldRng,
) -> StitchOutcome {
    let mut outcome = StitchOutcome::default();

    for current in 0..MAIN_BAND_COUNT - 1 {
        let next = current + 1;
        let current_range = metrics.band_range(current);
        let next_range = metrics.band_range(next);

        // Easternmost occupied column of the current band, then westernmost
        // occupied column of the next.
        let from = select_anchor(
            store,
            metrics,
            current,
            (current_range.start_col..current_range.end_col).rev(),
        );
        let to = select_anchor(
            store,
            metrics,
            next,
            next_range.start_col..next_range.end_col,
        );
        let (Some(from), Some(to)) = (from, to) else {
            outcome.stitches_skipped += 1;
            continue;
        };

        // Bridges only ever run west to east.
        if store.get(from).x >= store.get(to).x {
            outcome.stitches_skipped += 1;
            continue;
        }

        match build_bridge(
            store,
            metrics,
            rng,
            &BridgeRequest {
                from,
                to,
                allow_cross_band: true,
                bridge_band_tag: Some(next_range.ecosystem),
                max_bridge_length: MAX_BRIDGE_LENGTH,
                kind: VertexKind::Bridge,
            },
        ) {
            Ok(chain) => {
                for edge in &chain.edges {
                    outcome.bridge_edges.insert(edge_key(edge.a, edge.b));
                }
                outcome.edges.extend(chain.edges);
                outcome.intermediates.extend(chain.intermediates);
                outcome.bridges_built += 1;
            }
            Err(_) => {
                outcome.stitches_skipped += 1;
            }
        }
    }

    outcome
}
