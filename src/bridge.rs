//! Band-aware bridging on top of the raw grid pathfinder.
//!
//! A bridge request connects two existing vertices by materialising the
//! pathfinder's intermediate cells as fresh vertices and chaining edges
//! through them. Policy lives here: cross-band requests are rejected unless
//! explicitly allowed, and intermediates are tagged with either the caller's
//! band override or the source vertex's band.

use crate::ecosystem::Ecosystem;
use crate::metrics::WorldMetrics;
use crate::pathfind::{find_path, PathConstraints};
use crate::rng::WorldRng;
use crate::vertex::{Edge, VertexKey, VertexKind, VertexStore, WorldVertex};

/// One bridging attempt between two existing vertices.
#[derive(Clone, Debug)]
pub struct BridgeRequest {
    pub from: VertexKey,
    pub to: VertexKey,
    /// Reject the request outright when the endpoints route through
    /// different bands and this is false.
    pub allow_cross_band: bool,
    /// Band tag stamped onto intermediates; defaults to the source band.
    pub bridge_band_tag: Option<Ecosystem>,
    /// Maximum number of cells in the connecting path.
    pub max_bridge_length: u32,
    /// Kind stamped onto intermediates (`Link` for repairs, `Bridge` for
    /// inter-band stitches).
    pub kind: VertexKind,
}

/// Vertices and edges produced by a successful bridge.
#[derive(Clone, Debug)]
pub struct BridgeChain {
    /// Intermediate vertices in path order (may be empty for adjacent
    /// endpoints).
    pub intermediates: Vec<VertexKey>,
    /// Edge chain `from -> v1 -> ... -> vk -> to`.
    pub edges: Vec<Edge>,
}

/// Why a bridge attempt produced nothing. Both variants are recoverable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeFailure {
    /// Endpoints sit in different bands and crossing was not allowed.
    CrossBandDisallowed,
    /// The pathfinder came back empty.
    PathNotFound,
}

/// Attempt to connect `request.from` to `request.to`, appending any
/// intermediates to the store.
pub fn build_bridge(
    store: &mut VertexStore,
    metrics: &WorldMetrics,
    rng: &mut WorldRng,
    request: &BridgeRequest,
) -> Result<BridgeChain, BridgeFailure> {
    let from = store.get(request.from).clone();
    let to = store.get(request.to).clone();

    if !request.allow_cross_band && !from.ecosystem.same_band(&to.ecosystem) {
        return Err(BridgeFailure::CrossBandDisallowed);
    }

    let constraints = PathConstraints {
        max_steps: request.max_bridge_length,
        min_x: 0,
        min_y: 0,
        max_x: metrics.grid_width - 1,
        max_y: metrics.grid_height - 1,
        occupied: store.occupied_cells_except(&[request.from, request.to]),
    };
    let path = find_path(from.grid, to.grid, &constraints);
    if path.is_empty() {
        return Err(BridgeFailure::PathNotFound);
    }

    let band_tag = request.bridge_band_tag.unwrap_or(from.ecosystem);
    let mut intermediates = Vec::new();
    let mut edges = Vec::new();
    let mut previous = request.from;

    // The final path cell is `to` itself; everything before it becomes a
    // fresh vertex.
    for cell in &path[..path.len() - 1] {
        let key = store.insert(WorldVertex::mint(
            request.kind,
            band_tag,
            *cell,
            metrics,
            rng,
        ));
        edges.push(Edge::new(previous, key));
        intermediates.push(key);
        previous = key;
    }
    edges.push(Edge::new(previous, request.to));

    Ok(BridgeChain {
        intermediates,
        edges,
    })
}
