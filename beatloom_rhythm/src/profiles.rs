// Single-bar genre profiles.
//
// Each function builds one fresh 16-step bar for its genre. A profile mixes
// anchor hits (written unconditionally: four-on-the-floor kicks, backbeat
// snares, the dembow figure) with candidate hits written at per-genre odds.
// The anchors carry the genre's identity; the candidates make each bar of a
// loop a little different from the last.
//
// Steps are 16th notes: 0, 4, 8, 12 are the quarter-note beats, odd steps are
// the "e" and "a" subdivisions.
//
// The probability constants are tuning values. What matters is the shape:
// which steps are anchors, which are candidates, and how densely each genre
// fills its hats relative to the others.

use crate::pattern::Instrument::{Crash, HiHat, Kick, Snare};
use crate::pattern::{BarPattern, STEPS_PER_BAR};
use rand::Rng;

/// Pick `a` or `b` with equal odds.
fn either(rng: &mut impl Rng, a: usize, b: usize) -> usize {
    if rng.random_bool(0.5) { a } else { b }
}

/// Kick on every quarter note.
fn four_on_the_floor(bar: &mut BarPattern) {
    for step in (0..STEPS_PER_BAR).step_by(4) {
        bar.hit(Kick, step);
    }
}

fn backbeat(bar: &mut BarPattern) {
    bar.hit(Snare, 4);
    bar.hit(Snare, 12);
}

fn maybe_opening_crash(bar: &mut BarPattern, rng: &mut impl Rng, p: f64) {
    if rng.random_bool(p) {
        bar.hit(Crash, 0);
    }
}

pub fn house(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    four_on_the_floor(&mut bar);
    backbeat(&mut bar);
    for step in 0..STEPS_PER_BAR {
        let p = if step % 2 == 1 { 0.8 } else { 0.2 };
        if rng.random_bool(p) {
            bar.hit(HiHat, step);
        }
    }
    maybe_opening_crash(&mut bar, rng, 0.1);
    bar
}

pub fn techno(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    four_on_the_floor(&mut bar);
    if rng.random_bool(0.15) {
        let step = either(rng, 6, 14);
        bar.hit(Kick, step);
    }
    backbeat(&mut bar);
    if rng.random_bool(0.1) {
        let step = either(rng, 7, 15);
        bar.hit(Snare, step);
    }

    // Hat mode is chosen once per bar: a near-continuous 16th wash, or
    // straight 8ths on either the on- or off-beats.
    if rng.random_bool(0.6) {
        for step in 0..STEPS_PER_BAR {
            if rng.random_bool(0.85) {
                bar.hit(HiHat, step);
            }
        }
    } else {
        let start = if rng.random_bool(0.5) { 1 } else { 0 };
        for step in (start..STEPS_PER_BAR).step_by(2) {
            if rng.random_bool(0.9) {
                bar.hit(HiHat, step);
            }
        }
    }
    maybe_opening_crash(&mut bar, rng, 0.05);
    bar
}

pub fn hip_hop(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    bar.hit(Kick, 0);
    // (probability, first option, second option) for syncopated kicks.
    let kick_candidates = [(0.7, 3, 2), (0.6, 5, 6), (0.5, 10, 11), (0.7, 13, 14)];
    for (i, &(p, a, b)) in kick_candidates.iter().enumerate() {
        if rng.random_bool(p) {
            let step = either(rng, a, b);
            bar.hit(Kick, step);
        }
        // The kick on beat three sits between the early and late pushes.
        if i == 1 && rng.random_bool(0.8) {
            bar.hit(Kick, 8);
        }
    }

    backbeat(&mut bar);
    if rng.random_bool(0.3) {
        let step = either(rng, 11, 13);
        if rng.random_bool(0.5) {
            bar.hit(Snare, step);
        }
    }

    let tier: f64 = rng.random();
    if tier < 0.4 {
        // Sparse: 8ths, some dropped.
        for step in (0..STEPS_PER_BAR).step_by(2) {
            if rng.random_bool(0.6) {
                bar.hit(HiHat, step);
            }
        }
    } else if tier < 0.8 {
        // Busier: 8ths plus scattered 16ths.
        for step in 0..STEPS_PER_BAR {
            let p = if step % 2 == 0 { 0.7 } else { 0.3 };
            if rng.random_bool(p) {
                bar.hit(HiHat, step);
            }
        }
    }
    // Remaining bars leave the hats out entirely.
    maybe_opening_crash(&mut bar, rng, 0.1);
    bar
}

pub fn trap(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    bar.hit(Kick, 0);
    for (p, step) in [(0.6, 6), (0.4, 7), (0.7, 10), (0.5, 14)] {
        if rng.random_bool(p) {
            bar.hit(Kick, step);
        }
    }

    // Half-time backbeat, occasionally dragged to step 6.
    let first_snare = if rng.random_bool(0.8) { 4 } else { 6 };
    bar.hit(Snare, first_snare);
    bar.hit(Snare, 12);
    if rng.random_bool(0.3) {
        let step = rng.random_range(13..16);
        bar.hit(Snare, step);
    }

    // Hats: mostly 8ths with 16th fill-ins and occasional doubled rolls.
    let mut step = 0;
    while step < STEPS_PER_BAR {
        if (step % 2 == 0 && rng.random_bool(0.7)) || rng.random_bool(0.5) {
            bar.hit(HiHat, step);
        }
        if rng.random_bool(0.15) && step < STEPS_PER_BAR - 1 {
            bar.hit(HiHat, step);
            let doubled = rng.random_bool(0.8);
            bar.set(HiHat, step + 1, doubled);
            step += 1;
        }
        step += 1;
    }
    // Thin the roll back out so it breathes.
    for step in 0..STEPS_PER_BAR {
        if rng.random_bool(0.1) {
            bar.clear(HiHat, step);
        }
    }
    maybe_opening_crash(&mut bar, rng, 0.05);
    bar
}

pub fn rock(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    bar.hit(Kick, 0);
    bar.hit(Kick, 8);
    for (p, step) in [(0.3, 2), (0.2, 6), (0.2, 10), (0.1, 14)] {
        if rng.random_bool(p) {
            bar.hit(Kick, step);
        }
    }
    backbeat(&mut bar);
    for step in (0..STEPS_PER_BAR).step_by(2) {
        if rng.random_bool(0.9) {
            bar.hit(HiHat, step);
        }
    }
    // Open-hat accent on one of the first four off-beats.
    if rng.random_bool(0.2) {
        let step = rng.random_range(0..4) * 2 + 1;
        bar.hit(HiHat, step);
    }
    maybe_opening_crash(&mut bar, rng, 0.15);
    bar
}

pub fn funk(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    bar.hit(Kick, 0);
    for step in 1..STEPS_PER_BAR {
        if rng.random_bool(0.25) {
            bar.hit(Kick, step);
        }
    }
    if rng.random_bool(0.6) {
        bar.hit(Kick, 6);
    }
    if rng.random_bool(0.5) {
        bar.hit(Kick, 10);
    }

    backbeat(&mut bar);
    // Ghost notes around the backbeat.
    for step in 0..STEPS_PER_BAR {
        if step != 4 && step != 12 && rng.random_bool(0.15) {
            bar.hit(Snare, step);
        }
    }

    for step in 0..STEPS_PER_BAR {
        if rng.random_bool(0.75) {
            bar.hit(HiHat, step);
        }
    }
    for _ in 0..2 {
        if rng.random_bool(0.5) {
            let step = rng.random_range(0..STEPS_PER_BAR);
            bar.clear(HiHat, step);
        }
    }

    if rng.random_bool(0.1) {
        let step = if rng.random_bool(0.5) {
            0
        } else {
            rng.random_range(0..STEPS_PER_BAR)
        };
        bar.hit(Crash, step);
    }
    bar
}

pub fn reggaeton(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    four_on_the_floor(&mut bar);
    // Dembow.
    for step in [3, 7, 11, 14] {
        bar.hit(Snare, step);
    }
    for step in (0..STEPS_PER_BAR).step_by(2) {
        if rng.random_bool(0.8) {
            bar.hit(HiHat, step);
        }
    }
    maybe_opening_crash(&mut bar, rng, 0.05);
    bar
}

pub fn jazz(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();

    // Feathered kick, mostly off the grid's strong beats.
    if rng.random_bool(0.3) {
        bar.hit(Kick, 0);
    }
    for step in [3, 7, 10, 11, 14, 15] {
        if rng.random_bool(0.15) {
            bar.hit(Kick, step);
        }
    }

    // Comping on the snare.
    for step in [2, 3, 5, 6, 7, 9, 10, 11, 13, 14, 15] {
        if rng.random_bool(0.12) {
            bar.hit(Snare, step);
        }
    }
    if bar.instrument_hits(Snare) == 0 {
        let step = either(rng, 4, 12);
        bar.hit(Snare, step);
    }

    // Ride pattern: quarter pulse with the swung "skip" before beats 2 and 4.
    for beat_step in (0..STEPS_PER_BAR).step_by(4) {
        bar.hit(HiHat, beat_step);
        if rng.random_bool(0.8) {
            bar.hit(HiHat, beat_step + 3);
        }
    }

    maybe_opening_crash(&mut bar, rng, 0.02);
    bar
}

pub fn bossa_nova(rng: &mut impl Rng) -> BarPattern {
    let mut bar = BarPattern::new();
    bar.hit(Kick, 0);
    for (p, step) in [(0.7, 7), (0.4, 8), (0.7, 15)] {
        if rng.random_bool(p) {
            bar.hit(Kick, step);
        }
    }
    // Cross-stick clave figure.
    for step in [2, 5, 8, 11, 14] {
        bar.hit(Snare, step);
    }
    for step in (0..STEPS_PER_BAR).step_by(2) {
        if rng.random_bool(0.9) {
            bar.hit(HiHat, step);
        }
    }
    for step in [3, 7, 11, 15] {
        if rng.random_bool(0.3) {
            bar.hit(HiHat, step);
        }
    }
    maybe_opening_crash(&mut bar, rng, 0.02);
    bar
}
