// Beatloom Rhythm Generator: command-line entry point.
//
// Generates a four-bar drum pattern, prints it as a text grid, and optionally
// writes it to MIDI and/or JSON.
//
// Usage:
//   cargo run -p beatloom_rhythm -- [--genre NAME] [--fusion A B | --fusion-random]
//     [--seed N] [--bpm BPM | --typical-tempo] [--config FILE] [--midi FILE] [--json FILE] [--verbose]
//
// Genres: house, techno, hiphop, trap, rock, funk, reggaeton, jazz,
// bossa-nova, experimental, random

use anyhow::{Context, Result};
use beatloom_rhythm::genre::{random_base_genre, random_fusion_pair};
use beatloom_rhythm::midi::write_midi;
use beatloom_rhythm::{GenerationRequest, GeneratorConfig, Pattern, generate};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Procedural drum pattern generator
#[derive(Parser, Debug)]
#[command(name = "beatloom")]
#[command(about = "Generate genre-aware four-bar drum patterns", long_about = None)]
struct Cli {
    /// Genre to generate, or "random" for any base genre
    #[arg(short, long, default_value = "house")]
    genre: String,

    /// Fuse two genres: kick/snare from the first, hats/crash/toms from the second
    #[arg(long, num_args = 2, value_names = ["PRIMARY", "SECONDARY"], conflicts_with = "fusion_random")]
    fusion: Option<Vec<String>>,

    /// Fuse two randomly chosen, distinct base genres
    #[arg(long)]
    fusion_random: bool,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tempo in BPM (default: picked from the genre's range)
    #[arg(short, long, conflicts_with = "typical_tempo")]
    bpm: Option<u16>,

    /// Use the genre's typical tempo instead of a random one from its range
    #[arg(long)]
    typical_tempo: bool,

    /// Generator config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the pattern as a MIDI file
    #[arg(long)]
    midi: Option<PathBuf>,

    /// Write the pattern as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct PatternExport<'a> {
    genre: &'a str,
    bpm: u16,
    pattern: &'a Pattern,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let request = if cli.fusion_random {
        let (primary, secondary) = random_fusion_pair(&mut rng);
        GenerationRequest::fusion(primary, secondary)
    } else if let Some(pair) = &cli.fusion {
        let names: Vec<&str> = pair.iter().map(String::as_str).collect();
        GenerationRequest::from_names(beatloom_rhythm::genre::GENRE_FUSION, &names)
    } else if cli.genre.eq_ignore_ascii_case("random") {
        GenerationRequest::from(random_base_genre(&mut rng))
    } else {
        GenerationRequest::from_names(&cli.genre, &[])
    };

    let label = match request {
        GenerationRequest::Single(choice) => choice.to_string(),
        GenerationRequest::Fusion { primary, secondary } => format!("{primary} + {secondary}"),
    };
    // Fusions take the primary genre's tempo.
    let tempo_genre = request.primary().name();
    let bpm = match cli.bpm {
        Some(bpm) => bpm,
        None if cli.typical_tempo => config.tempo.default_bpm(tempo_genre),
        None => config.tempo.pick_bpm(tempo_genre, &mut rng),
    };

    let pattern = generate(&request, &config, &mut rng);

    println!("=== Beatloom Rhythm Generator ===");
    println!("Genre: {label}");
    println!("Tempo: {bpm} BPM");
    if let Some(s) = cli.seed {
        println!("Seed: {s}");
    }
    println!("Hits: {}", pattern.hit_count());
    println!();
    print!("{}", pattern.render_grid());

    if let Some(path) = &cli.midi {
        write_midi(&pattern, bpm, path)
            .with_context(|| format!("failed to write MIDI to {}", path.display()))?;
        println!();
        println!("Wrote MIDI to {}", path.display());
    }

    if let Some(path) = &cli.json {
        let export = PatternExport {
            genre: &label,
            bpm,
            pattern: &pattern,
        };
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write JSON to {}", path.display()))?;
        println!("Wrote JSON to {}", path.display());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
