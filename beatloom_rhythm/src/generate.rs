// Pattern assembly: the generator's entry point.
//
// The pipeline for a single genre:
//   1. Generate a fresh bar from the genre profile for each loop bar and copy
//      it into the pattern at that bar's offset.
//   2. Generate the fill from the genre's fill profile into the last bar.
//   3. With some probability, accent the top of the pattern with a crash.
//
// For a fusion, step 2 is followed by building a secondary overlay from the
// second genre and applying it (fusion.rs). An experimental primary genre
// skips all of this and hands the whole pattern to experimental.rs.
//
// Nothing here fails. Unknown genre names resolve to house with a warning,
// and malformed fusion input degrades to a plain house pattern. Randomness is
// always passed in; the generator holds no state between calls.

use crate::config::{GeneratorConfig, chance};
use crate::experimental::generate_experimental;
use crate::fill::generate_fill;
use crate::fusion::SecondaryOverlay;
use crate::genre::{GENRE_FUSION, Genre, GenreChoice};
use crate::pattern::{FILL_BAR, Instrument, Pattern};
use rand::Rng;
use tracing::{debug, warn};

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationRequest {
    Single(GenreChoice),
    /// `primary` supplies kick, snare and the fill; `secondary` supplies
    /// hi-hat, crash and tom.
    Fusion {
        primary: GenreChoice,
        secondary: GenreChoice,
    },
}

impl GenerationRequest {
    /// Interpret the string form used by front ends: a genre name, or
    /// `"genre-fusion"` with exactly two fusion genre names.
    ///
    /// Never fails. Unknown names become house; a fusion request without
    /// exactly two genres becomes a plain house pattern.
    pub fn from_names(genre: &str, fusion_genres: &[&str]) -> Self {
        if genre != GENRE_FUSION {
            return GenerationRequest::Single(GenreChoice::resolve(genre));
        }
        match fusion_genres {
            [primary, secondary] => GenerationRequest::Fusion {
                primary: GenreChoice::resolve(primary),
                secondary: GenreChoice::resolve(secondary),
            },
            _ => {
                warn!(
                    count = fusion_genres.len(),
                    "genre fusion needs exactly two genres, defaulting to house"
                );
                GenerationRequest::Single(GenreChoice::Base(Genre::House))
            }
        }
    }

    pub fn fusion(primary: Genre, secondary: impl Into<GenreChoice>) -> Self {
        GenerationRequest::Fusion {
            primary: GenreChoice::Base(primary),
            secondary: secondary.into(),
        }
    }

    /// The genre that supplies kick, snare and fill.
    pub fn primary(&self) -> GenreChoice {
        match *self {
            GenerationRequest::Single(choice) => choice,
            GenerationRequest::Fusion { primary, .. } => primary,
        }
    }

    /// Whether the final opening-crash accent may be applied. Fusions
    /// always qualify; single genres defer to the genre.
    fn takes_opening_crash(&self) -> bool {
        match *self {
            GenerationRequest::Single(choice) => choice.takes_opening_crash(),
            GenerationRequest::Fusion { .. } => true,
        }
    }
}

impl From<Genre> for GenerationRequest {
    fn from(genre: Genre) -> Self {
        GenerationRequest::Single(GenreChoice::Base(genre))
    }
}

/// Generate a pattern from front-end style genre names with the default
/// config. See `GenerationRequest::from_names` for how names resolve.
pub fn generate_pattern(genre: &str, fusion_genres: &[&str], rng: &mut impl Rng) -> Pattern {
    let request = GenerationRequest::from_names(genre, fusion_genres);
    generate(&request, &GeneratorConfig::default(), rng)
}

/// Generate a four-bar pattern.
pub fn generate(request: &GenerationRequest, config: &GeneratorConfig, rng: &mut impl Rng) -> Pattern {
    let base = match request.primary() {
        GenreChoice::Experimental => {
            // The experimental generator owns the whole pattern; fills,
            // fusion and accents do not apply.
            return generate_experimental(&config.experimental, rng);
        }
        GenreChoice::Base(genre) => genre,
    };

    let mut pattern = Pattern::new();
    for bar in 0..FILL_BAR {
        let generated = base.generate_bar(rng);
        pattern.write_bar(bar, &generated);
    }

    let fill = generate_fill(&config.fill_profile(base), rng);
    fill.apply(&mut pattern);

    if let GenerationRequest::Fusion { secondary, .. } = *request {
        debug!(%base, %secondary, "applying fusion overlay");
        let overlay = SecondaryOverlay::build(secondary, &config.experimental_overlay, rng);
        pattern = overlay.apply(&pattern);
    }

    if request.takes_opening_crash() && rng.random_bool(chance(config.opening_crash_chance)) {
        pattern.hit(Instrument::Crash, 0);
    }

    pattern
}
