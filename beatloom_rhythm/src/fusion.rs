// Genre fusion: one genre's kick and snare under another genre's cymbals.
//
// Fusion is a two-phase build. The assembler first produces a complete
// pattern for the primary genre (loop bars plus fill). This module then
// computes a `SecondaryOverlay` (hi-hat, crash and tom rows for a contiguous
// range of bars) from the secondary genre, and applies it as a column-wise
// replace. Kick and snare are never touched by the overlay.
//
// Which bars the overlay covers depends on the secondary genre:
// - a base genre covers the loop bars, running its profile fresh per bar;
//   the fill keeps the primary genre's cymbals and toms.
// - experimental covers only the fill bar with a loose random sweep; the loop
//   keeps the primary genre's cymbals.

use crate::config::chance;
use crate::genre::{Genre, GenreChoice};
use crate::pattern::{BarPattern, FILL_BAR, Instrument, Pattern, STEPS_PER_BAR};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Tuning for an experimental secondary genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalOverlayParams {
    /// Chance of each hi-hat/crash/tom cell in the fill bar being a hit.
    pub hit_chance: f64,
    /// Chance of a crash on the first step of the fill.
    pub crash_chance: f64,
}

impl Default for ExperimentalOverlayParams {
    fn default() -> Self {
        ExperimentalOverlayParams {
            hit_chance: 0.4,
            crash_chance: 0.7,
        }
    }
}

/// Replacement hi-hat/crash/tom rows for a run of consecutive bars.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryOverlay {
    first_bar: usize,
    /// One entry per covered bar. Only the `Instrument::SECONDARY` rows are
    /// read when applying.
    bars: Vec<BarPattern>,
}

impl SecondaryOverlay {
    /// Build the overlay for a secondary genre.
    pub fn build(
        secondary: GenreChoice,
        experimental: &ExperimentalOverlayParams,
        rng: &mut impl Rng,
    ) -> Self {
        match secondary {
            GenreChoice::Base(genre) => SecondaryOverlay::from_genre(genre, rng),
            GenreChoice::Experimental => SecondaryOverlay::experimental_fill(experimental, rng),
        }
    }

    /// Loop-bar overlay from a genre profile, one independent bar per loop bar.
    pub fn from_genre(genre: Genre, rng: &mut impl Rng) -> Self {
        let bars = (0..FILL_BAR).map(|_| genre.generate_bar(rng)).collect();
        SecondaryOverlay { first_bar: 0, bars }
    }

    /// Fill-bar overlay of loosely scattered cymbals and toms.
    pub fn experimental_fill(params: &ExperimentalOverlayParams, rng: &mut impl Rng) -> Self {
        let mut bar = BarPattern::new();
        for instrument in Instrument::SECONDARY {
            for step in 0..STEPS_PER_BAR {
                if rng.random_bool(chance(params.hit_chance)) {
                    bar.hit(instrument, step);
                }
            }
        }
        if rng.random_bool(chance(params.crash_chance)) {
            bar.hit(Instrument::Crash, 0);
        }
        SecondaryOverlay {
            first_bar: FILL_BAR,
            bars: vec![bar],
        }
    }

    /// Bars this overlay replaces.
    pub fn bar_range(&self) -> Range<usize> {
        self.first_bar..self.first_bar + self.bars.len()
    }

    /// The overlay's rows for one covered bar.
    pub fn bar(&self, bar: usize) -> Option<&BarPattern> {
        bar.checked_sub(self.first_bar).and_then(|i| self.bars.get(i))
    }

    /// Return a copy of `base` with the secondary rows replaced over the
    /// covered bars. Everything outside the overlay is left as it was.
    pub fn apply(&self, base: &Pattern) -> Pattern {
        let mut merged = *base;
        for bar in self.bar_range() {
            if let Some(rows) = self.bar(bar) {
                merged.replace_bar_rows(bar, &Instrument::SECONDARY, rows);
            }
        }
        merged
    }
}
