// The step grid: the central representation for rhythm generation.
//
// A pattern is a 2D grid where rows are instruments (kick, snare, hi-hat,
// crash, tom) and columns are 16th-note steps. Each cell is either a hit or
// silence. The full pattern spans four bars of 4/4 (64 steps); a bar-local
// grid of 16 steps is used as scratch space while a single bar is generated,
// then copied into the full pattern at a bar offset.
//
// Rows are fixed-size arrays, so every pattern handed to a caller has exactly
// `TOTAL_STEPS` cells per instrument by construction. Serialization exposes
// the grid as `{"kick": [0, 1, ...], ...}` for players, exporters and UIs.
//
// The grid is the "source of truth" for playback and export. MIDI is derived
// from it, never the other way around.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 16th-note resolution, 4/4 meter.
pub const STEPS_PER_BAR: usize = 16;
/// Bars in a generated pattern: three loop bars plus one fill bar.
pub const NUM_BARS: usize = 4;
pub const TOTAL_STEPS: usize = STEPS_PER_BAR * NUM_BARS;
/// Index of the fill bar (always the last one).
pub const FILL_BAR: usize = NUM_BARS - 1;
/// First step of the fill bar.
pub const FILL_START: usize = FILL_BAR * STEPS_PER_BAR;

/// Drum voice, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    Kick = 0,
    Snare = 1,
    HiHat = 2,
    Crash = 3,
    Tom = 4,
}

impl Instrument {
    pub const ALL: [Instrument; 5] = [
        Instrument::Kick,
        Instrument::Snare,
        Instrument::HiHat,
        Instrument::Crash,
        Instrument::Tom,
    ];

    /// Instruments a fusion's secondary genre takes over.
    pub const SECONDARY: [Instrument; 3] = [Instrument::HiHat, Instrument::Crash, Instrument::Tom];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as used in serialized patterns.
    pub fn name(self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
            Instrument::HiHat => "hiHat",
            Instrument::Crash => "crash",
            Instrument::Tom => "tom",
        }
    }

    pub fn from_name(name: &str) -> Option<Instrument> {
        Instrument::ALL.into_iter().find(|i| i.name() == name)
    }

    /// General MIDI percussion key (channel 10).
    pub fn gm_note(self) -> u8 {
        match self {
            Instrument::Kick => 36,  // Acoustic Bass Drum
            Instrument::Snare => 38, // Acoustic Snare
            Instrument::HiHat => 42, // Closed Hi-Hat
            Instrument::Crash => 49, // Crash Cymbal 1
            Instrument::Tom => 45,   // Low Tom
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Musical position of a step: `bar:beat:sixteenth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub bar: usize,
    pub beat: usize,
    pub sub_beat: usize,
}

impl StepPosition {
    pub fn of(step: usize) -> Self {
        StepPosition {
            bar: step / STEPS_PER_BAR,
            beat: (step % STEPS_PER_BAR) / 4,
            sub_beat: step % 4,
        }
    }
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.bar, self.beat, self.sub_beat)
    }
}

/// A binary instrument-by-step grid of `STEPS` columns.
///
/// Indexed as `rows[instrument_index][step]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepGrid<const STEPS: usize> {
    rows: [[bool; STEPS]; 5],
}

/// A full four-bar pattern.
pub type Pattern = StepGrid<TOTAL_STEPS>;

/// A single bar, used while generating one bar of a genre profile.
pub type BarPattern = StepGrid<STEPS_PER_BAR>;

impl<const STEPS: usize> Default for StepGrid<STEPS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const STEPS: usize> StepGrid<STEPS> {
    /// An all-silent grid.
    pub fn new() -> Self {
        StepGrid {
            rows: [[false; STEPS]; 5],
        }
    }

    pub fn steps(&self) -> usize {
        STEPS
    }

    pub fn get(&self, instrument: Instrument, step: usize) -> bool {
        self.rows[instrument.index()][step]
    }

    /// The cell as a 0/1 value.
    pub fn value(&self, instrument: Instrument, step: usize) -> u8 {
        u8::from(self.get(instrument, step))
    }

    pub fn set(&mut self, instrument: Instrument, step: usize, on: bool) {
        self.rows[instrument.index()][step] = on;
    }

    pub fn hit(&mut self, instrument: Instrument, step: usize) {
        self.set(instrument, step, true);
    }

    pub fn clear(&mut self, instrument: Instrument, step: usize) {
        self.set(instrument, step, false);
    }

    /// Flip one cell. Used by collaborators for manual step editing.
    pub fn toggle(&mut self, instrument: Instrument, step: usize) {
        let cell = &mut self.rows[instrument.index()][step];
        *cell = !*cell;
    }

    pub fn row(&self, instrument: Instrument) -> &[bool; STEPS] {
        &self.rows[instrument.index()]
    }

    pub fn instrument_hits(&self, instrument: Instrument) -> usize {
        self.row(instrument).iter().filter(|&&on| on).count()
    }

    /// Total hits across every instrument and step.
    pub fn hit_count(&self) -> usize {
        Instrument::ALL.iter().map(|&i| self.instrument_hits(i)).sum()
    }

    pub fn is_silent(&self) -> bool {
        self.hit_count() == 0
    }

    /// Steps with a hit for one instrument, in order.
    pub fn hit_steps(&self, instrument: Instrument) -> impl Iterator<Item = usize> + '_ {
        self.row(instrument)
            .iter()
            .enumerate()
            .filter_map(|(step, &on)| on.then_some(step))
    }
}

impl Pattern {
    /// Merge a generated bar into the pattern at `bar`. Only hits are copied;
    /// silent cells leave the existing contents alone.
    pub fn write_bar(&mut self, bar: usize, source: &BarPattern) {
        let offset = bar * STEPS_PER_BAR;
        for instrument in Instrument::ALL {
            for step in source.hit_steps(instrument) {
                self.hit(instrument, offset + step);
            }
        }
    }

    /// Overwrite the given instrument rows within `bar` with `source`'s rows,
    /// silencing anything the source does not hit.
    pub fn replace_bar_rows(&mut self, bar: usize, instruments: &[Instrument], source: &BarPattern) {
        let offset = bar * STEPS_PER_BAR;
        for &instrument in instruments {
            let src = source.row(instrument);
            self.rows[instrument.index()][offset..offset + STEPS_PER_BAR].copy_from_slice(src);
        }
    }

    /// Copy one bar out of the pattern.
    pub fn bar(&self, bar: usize) -> BarPattern {
        let offset = bar * STEPS_PER_BAR;
        let mut out = BarPattern::new();
        for instrument in Instrument::ALL {
            out.rows[instrument.index()]
                .copy_from_slice(&self.rows[instrument.index()][offset..offset + STEPS_PER_BAR]);
        }
        out
    }

    /// Compact text rendering, one row per instrument, with bar separators.
    ///
    /// ```text
    ///    kick: x...x...x...x...|x...x...
    /// ```
    pub fn render_grid(&self) -> String {
        let mut out = String::new();
        for instrument in Instrument::ALL {
            out.push_str(&format!("{:>6}: ", instrument.name()));
            for (step, &on) in self.row(instrument).iter().enumerate() {
                if step > 0 && step % STEPS_PER_BAR == 0 {
                    out.push('|');
                }
                out.push(if on { 'x' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl<const STEPS: usize> Serialize for StepGrid<STEPS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Instrument::ALL.len()))?;
        for instrument in Instrument::ALL {
            let values: Vec<u8> = (0..STEPS).map(|step| self.value(instrument, step)).collect();
            map.serialize_entry(instrument.name(), &values)?;
        }
        map.end()
    }
}

impl<'de, const STEPS: usize> Deserialize<'de> for StepGrid<STEPS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Vec<u8>> = BTreeMap::deserialize(deserializer)?;
        let mut grid = StepGrid::new();
        for (name, values) in raw {
            let instrument = Instrument::from_name(&name)
                .ok_or_else(|| D::Error::custom(format!("unknown instrument '{name}'")))?;
            if values.len() != STEPS {
                return Err(D::Error::custom(format!(
                    "instrument '{name}' has {} steps, expected {STEPS}",
                    values.len()
                )));
            }
            for (step, value) in values.into_iter().enumerate() {
                match value {
                    0 => {}
                    1 => grid.hit(instrument, step),
                    other => {
                        return Err(D::Error::custom(format!(
                            "instrument '{name}' step {step} is {other}, expected 0 or 1"
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pattern_is_silent() {
        let pattern = Pattern::new();
        assert_eq!(pattern.steps(), 64);
        assert!(pattern.is_silent());
        for instrument in Instrument::ALL {
            assert_eq!(pattern.row(instrument).len(), TOTAL_STEPS);
        }
    }

    #[test]
    fn test_step_position() {
        assert_eq!(StepPosition::of(0), StepPosition { bar: 0, beat: 0, sub_beat: 0 });
        assert_eq!(StepPosition::of(21), StepPosition { bar: 1, beat: 1, sub_beat: 1 });
        assert_eq!(StepPosition::of(63).to_string(), "3:3:3");
    }

    #[test]
    fn test_write_bar_merges_hits_only() {
        let mut pattern = Pattern::new();
        pattern.hit(Instrument::HiHat, 17);

        let mut bar = BarPattern::new();
        bar.hit(Instrument::Kick, 0);
        bar.hit(Instrument::Snare, 4);
        pattern.write_bar(1, &bar);

        assert!(pattern.get(Instrument::Kick, 16));
        assert!(pattern.get(Instrument::Snare, 20));
        // Silent cells in the bar do not erase what was there.
        assert!(pattern.get(Instrument::HiHat, 17));
        assert_eq!(pattern.hit_count(), 3);
    }

    #[test]
    fn test_replace_bar_rows_only_touches_named_rows() {
        let mut pattern = Pattern::new();
        pattern.hit(Instrument::Kick, 32);
        pattern.hit(Instrument::HiHat, 33);
        pattern.hit(Instrument::HiHat, 49);

        let mut bar = BarPattern::new();
        bar.hit(Instrument::HiHat, 2);
        bar.hit(Instrument::Kick, 5);
        pattern.replace_bar_rows(2, &Instrument::SECONDARY, &bar);

        assert!(!pattern.get(Instrument::HiHat, 33));
        assert!(pattern.get(Instrument::HiHat, 34));
        assert!(pattern.get(Instrument::Kick, 32), "kick row is not replaced");
        assert!(!pattern.get(Instrument::Kick, 37), "kick row is not copied");
        assert!(pattern.get(Instrument::HiHat, 49), "other bars untouched");
    }

    #[test]
    fn test_bar_extraction_roundtrip() {
        let mut bar = BarPattern::new();
        bar.hit(Instrument::Tom, 15);
        bar.hit(Instrument::Crash, 0);
        let mut pattern = Pattern::new();
        pattern.write_bar(FILL_BAR, &bar);
        assert_eq!(pattern.bar(FILL_BAR), bar);
        assert!(pattern.bar(0).is_silent());
    }

    #[test]
    fn test_toggle() {
        let mut pattern = Pattern::new();
        pattern.toggle(Instrument::Snare, 12);
        assert_eq!(pattern.value(Instrument::Snare, 12), 1);
        pattern.toggle(Instrument::Snare, 12);
        assert_eq!(pattern.value(Instrument::Snare, 12), 0);
    }

    #[test]
    fn test_render_grid() {
        let mut pattern = Pattern::new();
        pattern.hit(Instrument::Kick, 0);
        pattern.hit(Instrument::Kick, 16);
        let text = pattern.render_grid();
        let kick_line = text.lines().next().unwrap();
        assert!(kick_line.starts_with("  kick: x..............."));
        assert_eq!(kick_line.matches('|').count(), NUM_BARS - 1);
        assert_eq!(text.lines().count(), Instrument::ALL.len());
    }

    #[test]
    fn test_serialization_shape() {
        let mut pattern = Pattern::new();
        pattern.hit(Instrument::HiHat, 3);
        let json = serde_json::to_value(pattern).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        let hats = obj["hiHat"].as_array().unwrap();
        assert_eq!(hats.len(), TOTAL_STEPS);
        assert_eq!(hats[3], 1);
        assert_eq!(hats[4], 0);

        let restored: Pattern = serde_json::from_value(json).unwrap();
        assert_eq!(restored, pattern);
    }

    #[test]
    fn test_deserialize_rejects_bad_rows() {
        let short = r#"{"kick": [0, 1]}"#;
        assert!(serde_json::from_str::<Pattern>(short).is_err());

        let mut values = vec![0u8; TOTAL_STEPS];
        values[0] = 2;
        let bad_value = serde_json::json!({ "kick": values });
        assert!(serde_json::from_value::<Pattern>(bad_value).is_err());

        let unknown = serde_json::json!({ "cowbell": vec![0u8; TOTAL_STEPS] });
        assert!(serde_json::from_value::<Pattern>(unknown).is_err());
    }
}
