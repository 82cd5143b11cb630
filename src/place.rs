//! External-facing place records.
//!
//! A place pairs one-to-one with a world vertex and is what consumers of a
//! generated world actually walk: a name, a description, a fixed ecology
//! envelope, and up to eight directional exits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ecosystem::{EcologyProfile, Ecosystem};
use crate::grid::Direction;

/// A directed connection out of a place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    pub direction: Direction,
    /// Place identifier of the destination, `flux:place:<id>`.
    pub to: String,
    /// Human-readable exit label, e.g. `"east toward Amber Flats"`.
    pub label: String,
}

/// One walkable location of the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// `flux:place:<vertex id>`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub ecosystem: Ecosystem,
    pub ecology: EcologyProfile,
    /// Exits keyed by compass direction; each direction appears at most
    /// once.
    pub exits: BTreeMap<Direction, Exit>,
}

impl Place {
    pub fn new(id: String, name: String, description: String, ecosystem: Ecosystem) -> Self {
        Self {
            id,
            name,
            description,
            ecology: ecosystem.ecology(),
            ecosystem,
            exits: BTreeMap::new(),
        }
    }
}
