//! Procedural place naming.
//!
//! Generates short evocative names and one-sentence descriptions per
//! ecosystem from fixed word banks. All draws come from the world RNG, so
//! names are part of the deterministic output.

use crate::ecosystem::Ecosystem;
use crate::rng::WorldRng;

/// Generate a place name for `ecosystem`.
pub fn place_name(ecosystem: Ecosystem, rng: &mut WorldRng) -> String {
    let adjective = *rng.pick(name_adjectives(ecosystem));
    let noun = *rng.pick(name_nouns(ecosystem));
    format!("{adjective} {noun}")
}

/// Generate a one-sentence description for `ecosystem`.
pub fn place_description(ecosystem: Ecosystem, rng: &mut WorldRng) -> String {
    (*rng.pick(descriptions(ecosystem))).to_string()
}

fn name_adjectives(ecosystem: Ecosystem) -> &'static [&'static str] {
    match ecosystem {
        Ecosystem::SteppeArid => &[
            "Amber", "Dusty", "Sunbaked", "Windworn", "Pale", "Cracked", "Rust", "Hollow",
        ],
        Ecosystem::GrasslandTemperate => &[
            "Green", "Rolling", "Clover", "Meadow", "Lark", "Soft", "Windswept", "Golden",
        ],
        Ecosystem::ForestTemperate => &[
            "Mossy", "Shaded", "Old-Growth", "Bramble", "Fern", "Quiet", "Deep", "Cedar",
        ],
        Ecosystem::MountainArid => &[
            "Granite", "High", "Broken", "Scree", "Bleak", "Frost", "Sheer", "Stone",
        ],
        Ecosystem::JungleTropical => &[
            "Emerald", "Tangled", "Dripping", "Vine-Hung", "Howling", "Verdant", "Dense", "Humid",
        ],
        Ecosystem::MarshTropical => &[
            "Sunken", "Brackish", "Reed", "Mire", "Fog-Bound", "Drowned", "Silt", "Black-Water",
        ],
    }
}

fn name_nouns(ecosystem: Ecosystem) -> &'static [&'static str] {
    match ecosystem {
        Ecosystem::SteppeArid => &[
            "Flats", "Expanse", "Steppe", "Waste", "Plateau", "Reach", "Barrens", "Pan",
        ],
        Ecosystem::GrasslandTemperate => &[
            "Meadow", "Prairie", "Field", "Downs", "Lea", "Pasture", "Veldt", "Commons",
        ],
        Ecosystem::ForestTemperate => &[
            "Grove", "Thicket", "Wood", "Glade", "Hollow", "Copse", "Stand", "Understory",
        ],
        Ecosystem::MountainArid => &[
            "Ridge", "Crag", "Pass", "Spur", "Summit", "Col", "Tor", "Shelf",
        ],
        Ecosystem::JungleTropical => &[
            "Canopy", "Tangle", "Basin", "Verge", "Depths", "Clearing", "Thicket", "Gallery",
        ],
        Ecosystem::MarshTropical => &[
            "Marsh", "Fen", "Slough", "Backwater", "Shallows", "Mudflat", "Sump", "Bog",
        ],
    }
}

fn descriptions(ecosystem: Ecosystem) -> &'static [&'static str] {
    match ecosystem {
        Ecosystem::SteppeArid => &[
            "Cracked earth stretches to the horizon under a hard white sun.",
            "Dry grass rattles in a wind that never quite dies down.",
            "Low scrub clings to the pale soil between scattered stones.",
            "Heat shimmer blurs the flat line where land meets sky.",
        ],
        Ecosystem::GrasslandTemperate => &[
            "Tall grass rolls in slow waves toward every horizon.",
            "Wildflowers freckle a meadow loud with crickets.",
            "A mild breeze carries the smell of warm earth and clover.",
            "Grazing trails braid through the green toward a distant rise.",
        ],
        Ecosystem::ForestTemperate => &[
            "Old trunks crowd close, their canopy sifting the light to green.",
            "Moss swallows every footfall beneath the listening trees.",
            "Fallen leaves and fern cover the ground between grey pillars of bark.",
            "Somewhere above, unseen birds argue in the branches.",
        ],
        Ecosystem::MountainArid => &[
            "Bare rock climbs away in shelves of wind-scoured granite.",
            "Loose scree slides underfoot on the flank of the ridge.",
            "The air is thin and cold, and nothing grows above the stone line.",
            "A narrow track threads between boulders the size of houses.",
        ],
        Ecosystem::JungleTropical => &[
            "Vines hang in curtains from a canopy that swallows the sky.",
            "The air is thick with moisture and the din of hidden insects.",
            "Roots buckle the ground beneath walls of dripping green.",
            "Every surface steams; every shadow moves.",
        ],
        Ecosystem::MarshTropical => &[
            "Black water stands between hummocks of reed and rotting root.",
            "Mist hangs over the mire, and the ground gives with every step.",
            "Mangrove knees break a surface the colour of weak tea.",
            "Frogs fall silent as something large slides off a mudbank.",
        ],
    }
}
