//! Wire messages for running the generator behind a worker boundary.
//!
//! A thin adapter: one request maps to one generation call over the default
//! geometry. The message shapes (and their literal `type` tags) are the
//! contract; transport is the caller's business.

use serde::{Deserialize, Serialize};

use crate::config::{WorldConfig, DEFAULT_SEED};
use crate::world::{generate_world, WorldResult};

/// Inbound request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    #[serde(rename = "GENERATE_WORLD")]
    GenerateWorld {
        /// Smallest acceptable place count; fewer is answered with an
        /// error reply rather than a retry.
        min_places: usize,
        #[serde(default = "default_seed")]
        seed: u64,
    },
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Outbound reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WorkerReply {
    #[serde(rename = "WORLD_GENERATED")]
    WorldGenerated(Box<WorldResult>),
    #[serde(rename = "GENERATION_ERROR")]
    GenerationError(String),
}

/// Serve one request.
pub fn handle_request(request: &WorkerRequest) -> WorkerReply {
    match request {
        WorkerRequest::GenerateWorld { min_places, seed } => {
            let config = WorldConfig {
                seed: *seed,
                ..WorldConfig::default()
            };
            match generate_world(&config) {
                Ok(world) if world.places.len() >= *min_places => {
                    WorkerReply::WorldGenerated(Box::new(world))
                }
                Ok(world) => WorkerReply::GenerationError(format!(
                    "world from seed {seed} holds {} places, fewer than the requested {min_places}",
                    world.places.len()
                )),
                Err(error) => WorkerReply::GenerationError(error.to_string()),
            }
        }
    }
}
