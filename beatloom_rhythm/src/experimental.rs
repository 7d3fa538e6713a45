// Experimental ("no rules") generation.
//
// Unlike the genre profiles, this generator writes the whole four-bar pattern
// directly rather than tiling a bar. Every cell gets its own randomized hit
// probability, a handful of cells are then scrambled, and the last bar gets a
// chaotic fill overlay.
//
// A sparseness guard keeps the result from coming back near-silent: if the
// first attempt has too few hits, one fresh attempt is made and accepted as
// is. The guard is a floor checked once, not a retry loop.

use crate::config::chance;
use crate::pattern::{FILL_START, Instrument, Pattern, STEPS_PER_BAR, TOTAL_STEPS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tuning for the experimental generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalParams {
    /// Per-cell hit probability is drawn uniformly from
    /// `[threshold_low, threshold_high)`.
    pub threshold_low: f64,
    pub threshold_high: f64,
    /// Number of random cells rewritten after the sweep.
    pub perturbations: usize,
    /// Chance a perturbed cell becomes a hit (otherwise it is silenced).
    pub perturb_hit_chance: f64,
    /// Chance of each fill-bar cell being forced on.
    pub fill_hit_chance: f64,
    pub fill_crash_chance: f64,
    /// Below this many total hits the pattern is regenerated once.
    pub min_hits: usize,
}

impl Default for ExperimentalParams {
    fn default() -> Self {
        ExperimentalParams {
            threshold_low: 0.1,
            threshold_high: 0.5,
            perturbations: 20,
            perturb_hit_chance: 0.6,
            fill_hit_chance: 0.35,
            fill_crash_chance: 0.5,
            min_hits: 8,
        }
    }
}

/// Generate a full experimental pattern, regenerating once if it comes out
/// sparser than `params.min_hits`.
pub fn generate_experimental(params: &ExperimentalParams, rng: &mut impl Rng) -> Pattern {
    let pattern = chaotic_pattern(params, rng);
    let hits = pattern.hit_count();
    if hits >= params.min_hits {
        return pattern;
    }
    debug!(hits, min_hits = params.min_hits, "experimental pattern too sparse, regenerating");
    chaotic_pattern(params, rng)
}

/// One unguarded pass of the experimental generator.
pub fn chaotic_pattern(params: &ExperimentalParams, rng: &mut impl Rng) -> Pattern {
    let mut pattern = Pattern::new();
    let low = chance(params.threshold_low);
    let high = chance(params.threshold_high);

    for instrument in Instrument::ALL {
        for step in 0..TOTAL_STEPS {
            // An empty threshold range pins every cell to the lower bound.
            let threshold = if low < high { rng.random_range(low..high) } else { low };
            if rng.random::<f64>() < threshold {
                pattern.hit(instrument, step);
            }
        }
    }

    for _ in 0..params.perturbations {
        let instrument = Instrument::ALL[rng.random_range(0..Instrument::ALL.len())];
        let step = rng.random_range(0..TOTAL_STEPS);
        let on = rng.random_bool(chance(params.perturb_hit_chance));
        pattern.set(instrument, step, on);
    }

    for step in FILL_START..FILL_START + STEPS_PER_BAR {
        for instrument in Instrument::ALL {
            if rng.random_bool(chance(params.fill_hit_chance)) {
                pattern.hit(instrument, step);
            }
        }
    }
    if rng.random_bool(chance(params.fill_crash_chance)) {
        pattern.hit(Instrument::Crash, FILL_START);
    }

    pattern
}
