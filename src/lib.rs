//! Flux worldkit library
//!
//! A deterministic 2D world map generator featuring:
//! - Five west-to-east ecosystem bands plus a derived marsh strip
//! - Seeded river-delta expansion of places within each band
//! - 45°-constrained grid pathfinding for repairs and bridges
//! - Inter-band stitching and reciprocal directional exits
//! - Post-generation validation (connectedness, bearings, band policy)
//! - Procedurally named places with fixed per-band ecology profiles
//!
//! The whole build is reproducible from a single integer seed: see
//! [`world::generate_world`].

pub mod bridge;
pub mod config;
pub mod delta;
pub mod ecosystem;
pub mod error;
pub mod exits;
pub mod export;
pub mod grid;
pub mod marsh;
pub mod metrics;
pub mod naming;
pub mod pathfind;
pub mod place;
pub mod repair;
pub mod rng;
pub mod stitch;
pub mod validate;
pub mod vertex;
pub mod worker;
pub mod world;
