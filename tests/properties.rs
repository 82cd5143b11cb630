//! Seed-quantified properties of the generator.

use std::collections::{HashMap, HashSet, VecDeque};

use proptest::prelude::*;

use flux_worldkit::config::WorldConfig;
use flux_worldkit::ecosystem::Ecosystem;
use flux_worldkit::world::{generate_world, WorldResult};

fn small_config(seed: u64, branching: Option<f64>) -> WorldConfig {
    WorldConfig {
        world_width_km: 5.0,
        world_height_km: 3.0,
        seed,
        global_branching_factor: branching,
        ..WorldConfig::default()
    }
}

fn check_world(world: &WorldResult) {
    // Column budget: band widths sum to the grid width (16 at 5 km).
    let columns: i32 = world.ecosystem_boundaries.iter().map(|b| b.columns).sum();
    assert_eq!(columns, 16);

    // Connectedness from the westernmost vertex.
    let index_by_id: HashMap<&str, usize> = world
        .places
        .iter()
        .enumerate()
        .map(|(index, place)| (place.id.as_str(), index))
        .collect();
    let start = world
        .vertices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
        .map(|(index, _)| index)
        .unwrap();
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for exit in world.places[current].exits.values() {
            let next = index_by_id[exit.to.as_str()];
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    assert_eq!(seen.len(), world.vertices.len());

    // Every exit bearing is a multiple of 45 degrees.
    for (index, place) in world.places.iter().enumerate() {
        let u = &world.vertices[index];
        for exit in place.exits.values() {
            let v = &world.vertices[index_by_id[exit.to.as_str()]];
            let bearing = (v.y - u.y).atan2(v.x - u.x).to_degrees();
            let remainder = bearing.rem_euclid(45.0);
            assert!(remainder.min(45.0 - remainder) < 1e-3);
        }
    }

    // Marsh is confined to a single grid column.
    let marsh_columns: HashSet<i32> = world
        .vertices
        .iter()
        .filter(|vertex| vertex.ecosystem == Ecosystem::MarshTropical)
        .map(|vertex| vertex.grid.x)
        .collect();
    assert!(marsh_columns.len() <= 1);

    // Exit targets all resolve and reciprocate.
    for place in &world.places {
        for exit in place.exits.values() {
            let target = &world.places[index_by_id[exit.to.as_str()]];
            let back = target
                .exits
                .get(&exit.direction.opposite())
                .expect("missing reciprocal exit");
            assert_eq!(back.to, place.id);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_seed_generates_a_valid_world(seed in any::<u64>()) {
        let world = generate_world(&small_config(seed, None)).unwrap();
        check_world(&world);
    }

    #[test]
    fn generation_is_repeatable(seed in any::<u64>()) {
        let config = small_config(seed, None);
        let first = generate_world(&config).unwrap();
        let second = generate_world(&config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn branching_scaled_worlds_hold_the_invariants(seed in any::<u64>(), factor in 1.0f64..4.0) {
        let world = generate_world(&small_config(seed, Some(factor))).unwrap();
        check_world(&world);
    }
}
