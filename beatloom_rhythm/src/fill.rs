// Fill generation for the last bar of a pattern.
//
// The fill is a denser, busier bar that leads back into the loop. Every step
// independently rolls snare, tom, kick and hi-hat hits, scaled by a
// genre-dependent density. A crash then marks either the top of the fill or,
// less often, the very start of the pattern.
//
// `generate_fill` is pure: it returns a `Fill` value, and the assembler
// decides when to `apply` it.

use crate::config::chance;
use crate::genre::Genre;
use crate::pattern::{BarPattern, FILL_BAR, Instrument, Pattern, STEPS_PER_BAR};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-genre fill parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillProfile {
    /// Overall busyness, 0.0-1.0. Each instrument scales it by its own weight.
    pub density: f64,
    pub include_snare: bool,
    /// Probability that toms are used at all in a given fill.
    pub tom_chance: f64,
}

impl Default for FillProfile {
    fn default() -> Self {
        FillProfile {
            density: 0.5,
            include_snare: true,
            tom_chance: 1.0,
        }
    }
}

impl FillProfile {
    /// Built-in fill profile for a genre. Rock and funk fill hardest; jazz and
    /// bossa nova stay light and often leave the toms out.
    pub fn for_genre(genre: Genre) -> Self {
        let base = FillProfile::default();
        match genre {
            Genre::Rock | Genre::Funk => FillProfile { density: 0.7, ..base },
            Genre::Techno | Genre::Trap => FillProfile { density: 0.6, ..base },
            Genre::HipHop => FillProfile { density: 0.55, ..base },
            Genre::Jazz | Genre::BossaNova => FillProfile {
                density: 0.3,
                tom_chance: 0.5,
                ..base
            },
            Genre::House | Genre::Reggaeton => base,
        }
    }
}

const SNARE_WEIGHT: f64 = 0.6;
const TOM_WEIGHT: f64 = 0.5;
const KICK_WEIGHT: f64 = 0.2;
const HAT_WEIGHT: f64 = 0.4;
const FILL_CRASH_CHANCE: f64 = 0.6;
const OPENING_CRASH_CHANCE: f64 = 0.3;

/// A generated fill bar plus where its crash landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub bar: BarPattern,
    /// True when the crash went to step 0 of the whole pattern instead of
    /// the top of the fill.
    pub opening_crash: bool,
}

impl Fill {
    /// Write the fill into the last bar of `pattern`.
    pub fn apply(&self, pattern: &mut Pattern) {
        pattern.write_bar(FILL_BAR, &self.bar);
        if self.opening_crash {
            pattern.hit(Instrument::Crash, 0);
        }
    }
}

pub fn generate_fill(profile: &FillProfile, rng: &mut impl Rng) -> Fill {
    let density = profile.density;
    let toms = rng.random_bool(chance(profile.tom_chance));
    let mut bar = BarPattern::new();

    for step in 0..STEPS_PER_BAR {
        if profile.include_snare && rng.random_bool(chance(density * SNARE_WEIGHT)) {
            bar.hit(Instrument::Snare, step);
        }
        if toms && rng.random_bool(chance(density * TOM_WEIGHT)) {
            bar.hit(Instrument::Tom, step);
        }
        if rng.random_bool(chance(density * KICK_WEIGHT)) {
            bar.hit(Instrument::Kick, step);
        }
        if rng.random_bool(chance(density * HAT_WEIGHT)) {
            bar.hit(Instrument::HiHat, step);
        }
    }

    let mut opening_crash = false;
    if rng.random_bool(FILL_CRASH_CHANCE) {
        bar.hit(Instrument::Crash, 0);
    } else if rng.random_bool(OPENING_CRASH_CHANCE) {
        opening_crash = true;
    }

    Fill { bar, opening_crash }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::FILL_START;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_density_ordering() {
        let rock = FillProfile::for_genre(Genre::Rock).density;
        let techno = FillProfile::for_genre(Genre::Techno).density;
        let hip_hop = FillProfile::for_genre(Genre::HipHop).density;
        let house = FillProfile::for_genre(Genre::House).density;
        let jazz = FillProfile::for_genre(Genre::Jazz).density;
        assert!(rock > techno && techno > hip_hop && hip_hop > house && house > jazz);
    }

    #[test]
    fn test_fill_is_busier_for_denser_profiles() {
        let mut rng = StdRng::seed_from_u64(11);
        let dense = FillProfile::for_genre(Genre::Rock);
        let light = FillProfile::for_genre(Genre::Jazz);
        let total = |profile: &FillProfile, rng: &mut StdRng| -> usize {
            (0..200).map(|_| generate_fill(profile, rng).bar.hit_count()).sum()
        };
        let dense_hits = total(&dense, &mut rng);
        let light_hits = total(&light, &mut rng);
        assert!(dense_hits > light_hits * 2, "{dense_hits} vs {light_hits}");
    }

    #[test]
    fn test_snare_can_be_disabled() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = FillProfile {
            density: 1.0,
            include_snare: false,
            tom_chance: 0.0,
        };
        for _ in 0..100 {
            let fill = generate_fill(&profile, &mut rng);
            assert_eq!(fill.bar.instrument_hits(Instrument::Snare), 0);
            assert_eq!(fill.bar.instrument_hits(Instrument::Tom), 0);
        }
    }

    #[test]
    fn test_crash_lands_in_one_place() {
        let mut rng = StdRng::seed_from_u64(5);
        let profile = FillProfile::default();
        let mut saw_fill_crash = false;
        let mut saw_opening_crash = false;
        for _ in 0..500 {
            let fill = generate_fill(&profile, &mut rng);
            let top = fill.bar.get(Instrument::Crash, 0);
            assert!(!(top && fill.opening_crash));
            // Crashes only ever land on the first step.
            assert!(fill.bar.hit_steps(Instrument::Crash).all(|s| s == 0));
            saw_fill_crash |= top;
            saw_opening_crash |= fill.opening_crash;
        }
        assert!(saw_fill_crash && saw_opening_crash);
    }

    #[test]
    fn test_apply_writes_last_bar() {
        let mut bar = BarPattern::new();
        bar.hit(Instrument::Tom, 7);
        let fill = Fill {
            bar,
            opening_crash: true,
        };
        let mut pattern = Pattern::new();
        fill.apply(&mut pattern);
        assert!(pattern.get(Instrument::Tom, FILL_START + 7));
        assert!(pattern.get(Instrument::Crash, 0));
        assert_eq!(pattern.hit_count(), 2);
    }
}
