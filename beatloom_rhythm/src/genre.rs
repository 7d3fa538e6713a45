// Genre identifiers and name resolution.
//
// `Genre` is the closed set of nine base genres, each with its own single-bar
// profile in profiles.rs. `GenreChoice` widens that with the experimental
// generator, which is not a bar profile (it writes the whole pattern at once)
// but can stand in either fusion slot.
//
// Two ways in from strings:
// - `FromStr` is strict and returns `RhythmError::UnknownGenre`.
// - `resolve` never fails: unknown names log a warning and become house.
//   The generator uses this path, so a typo never produces an error.

use crate::error::RhythmError;
use crate::pattern::BarPattern;
use crate::profiles;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

pub const EXPERIMENTAL: &str = "experimental";
pub const GENRE_FUSION: &str = "genre-fusion";

/// Every name the generator accepts as its `genre` argument.
pub const GENRE_NAMES_WITH_SPECIAL: [&str; 11] = [
    "house",
    "techno",
    "hiphop",
    "trap",
    "rock",
    "funk",
    "reggaeton",
    "jazz",
    "bossa-nova",
    EXPERIMENTAL,
    GENRE_FUSION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    House,
    Techno,
    HipHop,
    Trap,
    Rock,
    Funk,
    Reggaeton,
    Jazz,
    #[serde(rename = "bossa-nova")]
    BossaNova,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::House,
        Genre::Techno,
        Genre::HipHop,
        Genre::Trap,
        Genre::Rock,
        Genre::Funk,
        Genre::Reggaeton,
        Genre::Jazz,
        Genre::BossaNova,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Genre::House => "house",
            Genre::Techno => "techno",
            Genre::HipHop => "hiphop",
            Genre::Trap => "trap",
            Genre::Rock => "rock",
            Genre::Funk => "funk",
            Genre::Reggaeton => "reggaeton",
            Genre::Jazz => "jazz",
            Genre::BossaNova => "bossa-nova",
        }
    }

    /// Look up a genre by name. Case-insensitive; accepts "hip-hop" and
    /// "bossanova" spellings.
    pub fn from_name(name: &str) -> Option<Genre> {
        match name.trim().to_ascii_lowercase().as_str() {
            "house" => Some(Genre::House),
            "techno" => Some(Genre::Techno),
            "hiphop" | "hip-hop" => Some(Genre::HipHop),
            "trap" => Some(Genre::Trap),
            "rock" => Some(Genre::Rock),
            "funk" => Some(Genre::Funk),
            "reggaeton" => Some(Genre::Reggaeton),
            "jazz" => Some(Genre::Jazz),
            "bossa-nova" | "bossanova" => Some(Genre::BossaNova),
            _ => None,
        }
    }

    /// Look up a genre, falling back to house with a warning.
    pub fn resolve(name: &str) -> Genre {
        Genre::from_name(name).unwrap_or_else(|| {
            warn!(genre = name, "unknown genre, defaulting to house");
            Genre::House
        })
    }

    /// Generate one bar of this genre's groove.
    pub fn generate_bar(self, rng: &mut impl Rng) -> BarPattern {
        match self {
            Genre::House => profiles::house(rng),
            Genre::Techno => profiles::techno(rng),
            Genre::HipHop => profiles::hip_hop(rng),
            Genre::Trap => profiles::trap(rng),
            Genre::Rock => profiles::rock(rng),
            Genre::Funk => profiles::funk(rng),
            Genre::Reggaeton => profiles::reggaeton(rng),
            Genre::Jazz => profiles::jazz(rng),
            Genre::BossaNova => profiles::bossa_nova(rng),
        }
    }

    /// Whether a pattern requested as this genre may receive the global
    /// opening crash. Jazz and bossa nova keep their cymbals restrained.
    pub fn takes_opening_crash(self) -> bool {
        !matches!(self, Genre::Jazz | Genre::BossaNova)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Genre {
    type Err = RhythmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::from_name(s).ok_or_else(|| RhythmError::UnknownGenre(s.to_string()))
    }
}

/// A base genre or the experimental generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenreChoice {
    Base(Genre),
    Experimental,
}

impl GenreChoice {
    pub fn name(self) -> &'static str {
        match self {
            GenreChoice::Base(genre) => genre.name(),
            GenreChoice::Experimental => EXPERIMENTAL,
        }
    }

    pub fn from_name(name: &str) -> Option<GenreChoice> {
        if name.trim().eq_ignore_ascii_case(EXPERIMENTAL) {
            Some(GenreChoice::Experimental)
        } else {
            Genre::from_name(name).map(GenreChoice::Base)
        }
    }

    /// Look up a choice, falling back to house with a warning.
    pub fn resolve(name: &str) -> GenreChoice {
        GenreChoice::from_name(name).unwrap_or_else(|| GenreChoice::Base(Genre::resolve(name)))
    }

    pub fn takes_opening_crash(self) -> bool {
        match self {
            GenreChoice::Base(genre) => genre.takes_opening_crash(),
            GenreChoice::Experimental => false,
        }
    }
}

impl fmt::Display for GenreChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenreChoice {
    type Err = RhythmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenreChoice::from_name(s).ok_or_else(|| RhythmError::UnknownGenre(s.to_string()))
    }
}

impl From<Genre> for GenreChoice {
    fn from(genre: Genre) -> Self {
        GenreChoice::Base(genre)
    }
}

/// Pick one of the nine base genres uniformly.
pub fn random_base_genre(rng: &mut impl Rng) -> Genre {
    Genre::ALL[rng.random_range(0..Genre::ALL.len())]
}

/// Pick two distinct base genres for a fusion: (kick/snare, hat/crash/tom).
pub fn random_fusion_pair(rng: &mut impl Rng) -> (Genre, Genre) {
    let first = random_base_genre(rng);
    // Draw from the remaining eight so the pair is always distinct.
    let mut index = rng.random_range(0..Genre::ALL.len() - 1);
    if index >= first as usize {
        index += 1;
    }
    (first, Genre::ALL[index])
}
