// Genre tempo table.
//
// The generator only emits step positions and never looks at tempo. Callers
// (the CLI, players, exporters) use this table to pick a BPM that suits the
// genre they asked for. For a fusion, the primary genre's range is used.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tempo used for genres missing from the table.
pub const FALLBACK_BPM: u16 = 120;

/// Inclusive BPM range plus a typical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempoRange {
    pub min: u16,
    pub max: u16,
    pub default: u16,
}

impl TempoRange {
    pub const fn new(min: u16, max: u16, default: u16) -> Self {
        TempoRange { min, max, default }
    }

    pub fn contains(&self, bpm: u16) -> bool {
        (self.min..=self.max).contains(&bpm)
    }
}

/// Genre name to tempo range. Keyed by name so "experimental" can have an
/// entry alongside the base genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempoTable {
    ranges: BTreeMap<String, TempoRange>,
}

impl Default for TempoTable {
    fn default() -> Self {
        let ranges = [
            ("house", TempoRange::new(120, 130, 124)),
            ("techno", TempoRange::new(125, 140, 130)),
            ("hiphop", TempoRange::new(85, 100, 90)),
            // Trap is felt in half time; the grid runs at the full tempo.
            ("trap", TempoRange::new(130, 150, 140)),
            ("rock", TempoRange::new(100, 140, 120)),
            ("funk", TempoRange::new(95, 115, 105)),
            ("reggaeton", TempoRange::new(85, 100, 95)),
            ("jazz", TempoRange::new(100, 180, 140)),
            ("bossa-nova", TempoRange::new(110, 140, 125)),
            ("experimental", TempoRange::new(60, 180, 120)),
        ]
        .into_iter()
        .map(|(name, range)| (name.to_string(), range))
        .collect();
        TempoTable { ranges }
    }
}

impl TempoTable {
    pub fn range(&self, genre: &str) -> Option<&TempoRange> {
        self.ranges.get(genre)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TempoRange)> {
        self.ranges.iter().map(|(name, range)| (name.as_str(), range))
    }

    /// Pick a tempo uniformly from the genre's range (both ends included).
    /// An inverted range yields its typical tempo.
    pub fn pick_bpm(&self, genre: &str, rng: &mut impl Rng) -> u16 {
        match self.range(genre) {
            Some(range) if range.min <= range.max => rng.random_range(range.min..=range.max),
            Some(range) => range.default,
            None => FALLBACK_BPM,
        }
    }

    /// The genre's typical tempo.
    pub fn default_bpm(&self, genre: &str) -> u16 {
        self.range(genre).map_or(FALLBACK_BPM, |r| r.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::Genre;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_genre_has_a_range() {
        let table = TempoTable::default();
        for genre in Genre::ALL {
            let range = table.range(genre.name()).expect("missing tempo range");
            assert!(range.min <= range.max);
            assert!(range.contains(range.default));
        }
        assert!(table.range("experimental").is_some());
    }

    #[test]
    fn test_pick_bpm_within_range_and_reaches_ends() {
        let table = TempoTable::default();
        let range = *table.range("house").unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let bpm = table.pick_bpm("house", &mut rng);
            assert!(range.contains(bpm));
            seen_min |= bpm == range.min;
            seen_max |= bpm == range.max;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_unknown_genre_uses_fallback() {
        let table = TempoTable::default();
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(table.pick_bpm("polka", &mut rng), FALLBACK_BPM);
        assert_eq!(table.default_bpm("polka"), FALLBACK_BPM);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let table: TempoTable = serde_json::from_str(
            r#"{"dnb": {"min": 165, "max": 180, "default": 174}}"#,
        )
        .unwrap();
        assert_eq!(table.range("dnb"), Some(&TempoRange::new(165, 180, 174)));
        assert_eq!(table.default_bpm("dnb"), 174);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["dnb"]["max"], 180);
        let restored: TempoTable = serde_json::from_value(json).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_inverted_range_picks_typical_tempo() {
        let table: TempoTable = serde_json::from_str(
            r#"{"house": {"min": 130, "max": 120, "default": 124}}"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(table.pick_bpm("house", &mut rng), 124);
    }
}
