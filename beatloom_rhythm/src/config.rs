// Data-driven generator configuration.
//
// The tunable knobs of the generator that sit above the per-genre bar
// profiles live in `GeneratorConfig`: fill profiles, the global opening-crash
// chance, experimental generator settings, and the tempo table. It can be
// loaded from JSON so a front end can retune feel without recompiling. Any
// field missing from the file keeps its default.
//
// The anchor/candidate shape of each genre is fixed in profiles.rs and is
// deliberately not configurable.
//
// See also: generate.rs, which reads this config on every call.

use crate::error::{Result, RhythmError};
use crate::experimental::ExperimentalParams;
use crate::fill::FillProfile;
use crate::fusion::ExperimentalOverlayParams;
use crate::genre::Genre;
use crate::tempo::TempoTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fill parameters per base genre. Genres missing from the map use
    /// `FillProfile::for_genre`.
    pub fill_profiles: BTreeMap<Genre, FillProfile>,
    /// Chance of forcing a crash on step 0 after everything else is placed.
    pub opening_crash_chance: f64,
    pub experimental: ExperimentalParams,
    /// Used when the secondary genre of a fusion is experimental.
    pub experimental_overlay: ExperimentalOverlayParams,
    pub tempo: TempoTable,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            fill_profiles: Genre::ALL
                .into_iter()
                .map(|g| (g, FillProfile::for_genre(g)))
                .collect(),
            opening_crash_chance: 0.4,
            experimental: ExperimentalParams::default(),
            experimental_overlay: ExperimentalOverlayParams::default(),
            tempo: TempoTable::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn fill_profile(&self, genre: Genre) -> FillProfile {
        self.fill_profiles
            .get(&genre)
            .copied()
            .unwrap_or_else(|| FillProfile::for_genre(genre))
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| RhythmError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Check every probability is usable. Fill densities are scaled by at
    /// most 0.6 per instrument, so anything in [0, 1] is safe.
    pub fn validate(&self) -> Result<()> {
        for (genre, profile) in &self.fill_profiles {
            check_probability(&format!("fill_profiles.{genre}.density"), profile.density)?;
            check_probability(&format!("fill_profiles.{genre}.tom_chance"), profile.tom_chance)?;
        }
        check_probability("opening_crash_chance", self.opening_crash_chance)?;

        let exp = &self.experimental;
        check_probability("experimental.threshold_low", exp.threshold_low)?;
        check_probability("experimental.threshold_high", exp.threshold_high)?;
        if exp.threshold_low >= exp.threshold_high {
            return Err(RhythmError::InvalidConfig(format!(
                "experimental.threshold_low ({}) must be below threshold_high ({})",
                exp.threshold_low, exp.threshold_high
            )));
        }
        check_probability("experimental.perturb_hit_chance", exp.perturb_hit_chance)?;
        check_probability("experimental.fill_hit_chance", exp.fill_hit_chance)?;
        check_probability("experimental.fill_crash_chance", exp.fill_crash_chance)?;

        let overlay = &self.experimental_overlay;
        check_probability("experimental_overlay.hit_chance", overlay.hit_chance)?;
        check_probability("experimental_overlay.crash_chance", overlay.crash_chance)?;

        for (genre, range) in self.tempo.iter() {
            if range.min > range.max || !range.contains(range.default) {
                return Err(RhythmError::InvalidConfig(format!(
                    "tempo range for '{genre}' is inconsistent: {}..={} default {}",
                    range.min, range.max, range.default
                )));
            }
        }
        Ok(())
    }
}

/// Clamp a probability into `[0, 1]` for sampling, with NaN as never.
/// Every sampler goes through this, so unvalidated configs still generate.
pub fn chance(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

fn check_probability(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RhythmError::InvalidConfig(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}
