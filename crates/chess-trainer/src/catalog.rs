//! The puzzle catalog: a data-driven table of rating bands, embedded at
//! build time and validated on first load.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use serde::Deserialize;

use chess_core::{ChessRules, MoveCoords, Role, Rules};

use crate::puzzle::Puzzle;
use crate::TrainerError;

/// Lowest rating the trainer accepts.
pub const MIN_RATING: u32 = 800;
/// Highest rating the trainer accepts.
pub const MAX_RATING: u32 = 2500;

const BUILTIN_CATALOG: &str = include_str!("../data/puzzles.json");

/// The embedded catalog, loaded and validated at first access.
static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let catalog =
        Catalog::from_json(BUILTIN_CATALOG).expect("built-in puzzle catalog must be valid");
    tracing::info!(
        "Loaded puzzle catalog: {} bands, {} puzzles",
        catalog.bands.len(),
        catalog.len()
    );
    catalog
});

/// One contiguous rating band and its puzzles. Bounds are inclusive.
#[derive(Debug, Clone)]
pub struct RatingBand {
    pub min_rating: u32,
    pub max_rating: u32,
    puzzles: Vec<Puzzle>,
}

impl RatingBand {
    pub fn contains(&self, rating: u32) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    bands: Vec<RatingBand>,
    fallback: Puzzle,
}

impl Catalog {
    /// The catalog embedded in this crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse and validate a catalog table. Every puzzle must carry a
    /// parseable FEN, a non-empty solution, and a line that replays
    /// legally from its starting position — broken data fails here, not
    /// mid-session.
    pub fn from_json(json: &str) -> Result<Catalog, TrainerError> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|e| TrainerError::InvalidCatalog(e.to_string()))?;

        let bands = raw
            .bands
            .into_iter()
            .map(|band| {
                Ok(RatingBand {
                    min_rating: band.min_rating,
                    max_rating: band.max_rating,
                    puzzles: band
                        .puzzles
                        .into_iter()
                        .map(parse_puzzle)
                        .collect::<Result<Vec<_>, _>>()?,
                })
            })
            .collect::<Result<Vec<_>, TrainerError>>()?;
        let fallback = parse_puzzle(raw.fallback)?;

        Ok(Catalog { bands, fallback })
    }

    /// Check a user-declared rating against the supported range.
    pub fn validate_rating(rating: u32) -> Result<(), TrainerError> {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            Ok(())
        } else {
            Err(TrainerError::RatingOutOfRange(rating))
        }
    }

    /// The band covering `rating`, if any.
    pub fn band_for(&self, rating: u32) -> Option<&RatingBand> {
        self.bands.iter().find(|band| band.contains(rating))
    }

    /// Draw uniformly at random from the band covering `rating`. Ratings no
    /// band covers, and empty bands, fall back to the catalog's fallback
    /// puzzle.
    pub fn draw(&self, rating: u32) -> &Puzzle {
        match self.band_for(rating) {
            Some(band) => band
                .puzzles
                .choose(&mut rand::thread_rng())
                .unwrap_or(&self.fallback),
            None => {
                tracing::warn!("no rating band covers {rating}, using the fallback puzzle");
                &self.fallback
            }
        }
    }

    pub fn bands(&self) -> &[RatingBand] {
        &self.bands
    }

    pub fn fallback(&self) -> &Puzzle {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.bands.iter().map(|band| band.puzzles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    bands: Vec<RawBand>,
    fallback: RawPuzzle,
}

#[derive(Deserialize)]
struct RawBand {
    min_rating: u32,
    max_rating: u32,
    puzzles: Vec<RawPuzzle>,
}

#[derive(Deserialize)]
struct RawPuzzle {
    fen: String,
    solution: Vec<String>,
    rating: u32,
    /// Space-separated theme tags.
    themes: String,
}

fn parse_puzzle(raw: RawPuzzle) -> Result<Puzzle, TrainerError> {
    if raw.solution.is_empty() {
        return Err(TrainerError::InvalidCatalog(format!(
            "puzzle '{}' has an empty solution",
            raw.fen
        )));
    }

    let solution = raw
        .solution
        .iter()
        .map(|s| s.parse::<MoveCoords>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TrainerError::InvalidCatalog(e.to_string()))?;

    let mut rules = ChessRules::from_fen(&raw.fen)
        .map_err(|e| TrainerError::InvalidCatalog(e.to_string()))?;
    for mv in &solution {
        rules
            .attempt_move(mv.from, mv.to, mv.promotion.or(Some(Role::Queen)))
            .ok_or_else(|| {
                TrainerError::InvalidCatalog(format!(
                    "puzzle '{}': move {} is not legal",
                    raw.fen, mv
                ))
            })?;
    }

    Ok(Puzzle {
        fen: raw.fen,
        solution,
        rating: raw.rating,
        themes: raw.themes.split_whitespace().map(str::to_string).collect(),
    })
}
