// Beatloom Rhythm Generator
//
// A procedural drum pattern generator. Given a genre, or a fusion of two
// genres, it produces a four-bar, five-instrument step pattern at 16th-note
// resolution: three loop bars built from the genre's rules plus a denser fill
// bar. Output is a plain 0/1 grid that players, MIDI exporters and grid
// editors can consume directly.
//
// Architecture:
// - pattern.rs: Core step grid (instruments x 16th-note steps), bar helpers
// - genre.rs: Genre identifiers, name resolution with house fallback
// - profiles.rs: Single-bar rules per genre (anchors + candidate hits)
// - fill.rs: Last-bar fill generation from per-genre fill profiles
// - experimental.rs: Whole-pattern chaotic generator with a sparseness guard
// - fusion.rs: Secondary hi-hat/crash/tom overlay for genre fusion
// - generate.rs: The assembler tying the above together (entry point)
// - config.rs: JSON-loadable tuning knobs
// - tempo.rs: Genre tempo ranges for callers picking a BPM
// - midi.rs: MIDI file output from completed patterns
// - error.rs: Error type for parsing, config loading and export
//
// Randomness is always injected as a `rand::Rng`. Output varies from call to
// call; pass a seeded RNG for reproducible patterns.

pub mod config;
pub mod error;
pub mod experimental;
pub mod fill;
pub mod fusion;
pub mod generate;
pub mod genre;
pub mod midi;
pub mod pattern;
pub mod profiles;
pub mod tempo;

#[cfg(test)]
mod test_log;

pub use config::GeneratorConfig;
pub use error::RhythmError;
pub use generate::{GenerationRequest, generate, generate_pattern};
pub use genre::{Genre, GenreChoice};
pub use pattern::{Instrument, NUM_BARS, Pattern, STEPS_PER_BAR, TOTAL_STEPS};
