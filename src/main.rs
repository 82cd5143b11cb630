use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use flux_worldkit::config::WorldConfig;
use flux_worldkit::ecosystem::Ecosystem;
use flux_worldkit::export;
use flux_worldkit::world::generate_world;

#[derive(Parser, Debug)]
#[command(name = "flux-worldkit")]
#[command(about = "Generate deterministic banded world maps")]
struct Args {
    /// World width in kilometres
    #[arg(short = 'W', long, default_value = "14.5")]
    width_km: f64,

    /// World height in kilometres
    #[arg(short = 'H', long, default_value = "9.0")]
    height_km: f64,

    /// Place footprint size in metres
    #[arg(long, default_value = "100")]
    place_size: u32,

    /// Margin between places in metres
    #[arg(long, default_value = "200")]
    place_margin: u32,

    /// Master seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Global branching factor applied to the delta bias table
    #[arg(short = 'b', long)]
    branching: Option<f64>,

    /// Write the full world result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Render the world map as PNG
    #[arg(long)]
    map: Option<PathBuf>,

    /// Use timestamped default filenames for both exports
    #[arg(long)]
    export_all: bool,

    /// Print the per-band place breakdown
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = WorldConfig {
        world_width_km: args.width_km,
        world_height_km: args.height_km,
        place_size_m: args.place_size,
        place_margin_m: args.place_margin,
        seed: args.seed,
        global_branching_factor: args.branching,
    };

    println!("Generating world with seed: {}", config.seed);
    println!(
        "Envelope: {} x {} km, spacing {} m",
        config.world_width_km,
        config.world_height_km,
        config.place_spacing_m()
    );

    let world = match generate_world(&config) {
        Ok(world) => world,
        Err(error) => {
            eprintln!("Generation failed: {error}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Generated {} places, {} directed exits",
        world.places.len(),
        world.connections.total
    );
    println!(
        "Vertices: {} origin, {} delta, {} repair, {} bridge; {} marsh places",
        world.stats.origin_vertices,
        world.stats.delta_vertices,
        world.stats.repair_vertices,
        world.stats.bridge_vertices,
        world.stats.marsh_places
    );
    if world.stats.repairs_dropped > 0 || world.stats.stitches_skipped > 0 {
        println!(
            "Diagnostics: {} repairs dropped, {} stitches skipped, {} exits dropped",
            world.stats.repairs_dropped, world.stats.stitches_skipped, world.stats.exits_dropped
        );
    }

    if args.summary {
        println!("Band breakdown:");
        for boundary in &world.ecosystem_boundaries {
            let count = world
                .places
                .iter()
                .filter(|place| place.ecosystem.same_band(&boundary.ecosystem))
                .count();
            println!(
                "  {:<22} {:>3} columns, {:>4} places",
                export::legend_entry(boundary.ecosystem),
                boundary.columns,
                count
            );
        }
        let marsh = world
            .places
            .iter()
            .filter(|place| place.ecosystem == Ecosystem::MarshTropical)
            .count();
        println!("  (of the jungle places, {marsh} are marsh)");
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let json_path = args.json.or_else(|| {
        args.export_all
            .then(|| PathBuf::from(format!("world_{}_{stamp}.json", config.seed)))
    });
    let map_path = args.map.or_else(|| {
        args.export_all
            .then(|| PathBuf::from(format!("world_{}_{stamp}.png", config.seed)))
    });

    if let Some(path) = json_path {
        if let Err(error) = export::export_json(&world, &path) {
            eprintln!("JSON export error: {error}");
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path.display());
    }
    if let Some(path) = map_path {
        if let Err(error) = export::export_map(&world, &path) {
            eprintln!("Map export error: {error}");
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path.display());
    }

    ExitCode::SUCCESS
}
