//! Landscape generator binary: builds one bundle and writes layer previews.
//!
//! Usage: cargo run --release --bin generate_landscape -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Load a GenerationConfig JSON file first
//!   --seed <SEED>        Seed (default: 42)
//!   --width <CELLS>      Map width (default: 256)
//!   --height <CELLS>     Map height (default: 256)
//!   --scale <SCALE>      Noise scale (default: 20.0)
//!   --water <LEVEL>      Water elevation threshold (default: 0.3)
//!   --resolution <N>     Mesh vertices per side (default: 256)
//!   --urban              Generate urban areas
//!   --burned             Generate burned areas
//!   --random             Randomize category weights from the seed
//!   --out <DIR>          Output directory (default: "output/landscape")
//!
//! Output structure:
//!   <out>/
//!     config.json          # Effective configuration
//!     summary.json         # Weights, thresholds, category counts, mesh size
//!     elevation.png
//!     classification.png
//!     density.png
//!     contour.png

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use fuelscape::generation::{generate, GenerationConfig};
use fuelscape::preview;
use fuelscape::terrain::Category;

fn main() -> fuelscape::Result<()> {
    fuelscape::core::logging::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => GenerationConfig::load(&PathBuf::from(path))?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = parse_i32_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(width) = parse_usize_arg(&args, "--width") {
        config.map_width = width;
    }
    if let Some(height) = parse_usize_arg(&args, "--height") {
        config.map_height = height;
    }
    if let Some(scale) = parse_f32_arg(&args, "--scale") {
        config.noise_scale = scale;
    }
    if let Some(water) = parse_f32_arg(&args, "--water") {
        config.water_elevation_threshold = water;
    }
    if let Some(resolution) = parse_usize_arg(&args, "--resolution") {
        config.mesh.resolution = resolution;
    }
    if has_flag(&args, "--urban") {
        config.generate_urban_areas = true;
    }
    if has_flag(&args, "--burned") {
        config.generate_burned_areas = true;
    }
    if has_flag(&args, "--random") {
        config.manual_percentage_control = false;
    }
    let output_dir = PathBuf::from(
        parse_str_arg(&args, "--out").unwrap_or_else(|| "output/landscape".to_string()),
    );

    println!("=== Fuelscape Landscape Generator ===");
    println!("Map:    {} x {}", config.map_width, config.map_height);
    println!("Seed:   {}", config.seed);
    println!("Scale:  {}, Water: {}", config.noise_scale, config.water_elevation_threshold);
    println!("Mesh:   {} x {}", config.mesh.resolution, config.mesh.resolution);
    println!("Output: {}", output_dir.display());
    println!();

    let start = Instant::now();
    let bundle = generate(&config)?;
    let elapsed = start.elapsed();

    let histogram = bundle.category_histogram();
    let cells = (config.map_width * config.map_height) as f64;
    println!("Generated in {:.2}s", elapsed.as_secs_f64());
    for cat in Category::ALL {
        let count = histogram[cat.id() as usize];
        println!("  {:<13} {:>8} cells ({:5.1}%)", cat.name(), count, 100.0 * count as f64 / cells);
    }

    let written = preview::save_layers(&bundle, &output_dir)?;
    config.save(&output_dir.join("config.json"))?;

    let (min_e, max_e) = bundle.elevation.min_max();
    let counts: serde_json::Map<String, serde_json::Value> = Category::ALL
        .iter()
        .map(|cat| (cat.name().to_string(), json!(histogram[cat.id() as usize])))
        .collect();
    let summary = json!({
        "seed": config.seed,
        "width": config.map_width,
        "height": config.map_height,
        "elevation_range": [min_e, max_e],
        "percentages": bundle.percentages,
        "thresholds": bundle.thresholds.boundaries(),
        "category_counts": counts,
        "mesh": {
            "vertices": bundle.mesh.vertex_count(),
            "triangles": bundle.mesh.triangle_count(),
        },
        "generation_ms": elapsed.as_secs_f64() * 1000.0,
    });
    std::fs::write(
        output_dir.join("summary.json"),
        serde_json::to_string_pretty(&summary)?,
    )?;

    println!();
    println!("Wrote {} layer images, config.json and summary.json", written.len());
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
