use std::process;

use clap::{App, Arg};
use log::{error, info};
use rand::{rngs::SmallRng, SeedableRng};

use radiance::{
    parse::DEFAULT_FRAMES_IN_FLIGHT, timer::Timer, ParserConfig, PermutationTable, SceneParser,
    SceneTables,
};

// ----------------------------------------------------------------

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments.
    let args = App::new("Radiance")
        .version(VERSION)
        .about("Loads a scene description and builds the sampler tables for rendering it")
        .arg(
            Arg::with_name("scene")
                .value_name("FILE")
                .help("Input scene document")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("N")
                .help("Seed for the sampler permutation table (random if omitted)")
                .takes_value(true)
                .validator(|s| {
                    s.parse::<u64>()
                        .map(|_| ())
                        .map_err(|_| "must be a non-negative integer".into())
                }),
        )
        .arg(
            Arg::with_name("frames_in_flight")
                .short("f")
                .long("frames-in-flight")
                .value_name("N")
                .help("Number of frames the renderer keeps in flight")
                .takes_value(true)
                .validator(|s| match s.parse::<u32>() {
                    Ok(n) if n > 0 => Ok(()),
                    _ => Err("must be a positive integer".into()),
                }),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print statistics about the loaded scene"),
        )
        .get_matches();

    let frames_in_flight = args
        .value_of("frames_in_flight")
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES_IN_FLIGHT);
    let seed = args.value_of("seed").and_then(|s| s.parse::<u64>().ok());

    // Load the scene
    let mut t = Timer::new();
    let path = args.value_of("scene").unwrap_or_default();
    let config = ParserConfig {
        frames_in_flight: frames_in_flight,
        ..ParserConfig::default()
    };
    let tables = match SceneParser::new(config).parse_file(path) {
        Ok(tables) => tables,
        Err(e) => {
            error!("Failed to load scene '{}'.", path);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("Parsed scene in {:.3}s.", t.tick());

    // Sampler tables
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let perms = PermutationTable::build(&mut rng);
    info!(
        "Built {} sampler permutation entries in {:.3}s.",
        perms.len(),
        t.tick()
    );

    if args.is_present("stats") {
        print_stats(&tables, &perms);
    }
}

fn print_stats(tables: &SceneTables, perms: &PermutationTable) {
    println!("Objects:    {}", tables.render_items.len());
    for item in tables.render_items_ordered() {
        println!(
            "  [{}] {} (material {}, mesh {})",
            item.obj_idx,
            item.name,
            item.material_name.as_deref().unwrap_or("default"),
            item.geometry_name.as_deref().unwrap_or("none")
        );
    }
    println!("Materials:  {}", tables.materials_ordered().len());
    println!("Textures:   {}", tables.textures.len());
    for tex in tables.textures_ordered() {
        println!("  [{}] {} ({}, {})", tex.texture_idx, tex.name, tex.texture_type, tex.path);
    }
    println!("Meshes:     {}", tables.geometries.len());
    println!(
        "Geometry:   {} vertices, {} triangles, {} bytes",
        tables.buffers.vertices.len() / 3,
        tables.triangle_count(),
        tables.buffers.byte_size()
    );
    println!("Lights:     {}", tables.lights.len());
    let cam = tables.camera;
    println!(
        "Camera:     position {:?}, target {:?}",
        cam.position.to_array(),
        cam.target().to_array()
    );
    println!(
        "Sampler:    {} permutation entries ({} bytes)",
        perms.len(),
        std::mem::size_of_val(perms.as_slice())
    );
}
