//! Catalog tests: rating validation, band selection, and integrity of the
//! built-in puzzle table.

use chess_core::{ChessRules, Rules};
use chess_trainer::{Catalog, MAX_RATING, MIN_RATING};
use shakmaty::Role;

#[test]
fn builtin_catalog_loads_and_is_nonempty() {
    let catalog = Catalog::builtin();
    assert!(!catalog.is_empty());
    assert_eq!(catalog.bands().len(), 2);
}

#[test]
fn builtin_puzzles_replay_legally() {
    let catalog = Catalog::builtin();
    let puzzles = catalog
        .bands()
        .iter()
        .flat_map(|band| band.puzzles())
        .chain([catalog.fallback()]);

    for puzzle in puzzles {
        let mut rules = ChessRules::from_fen(&puzzle.fen)
            .unwrap_or_else(|e| panic!("bad FEN '{}': {e}", puzzle.fen));
        assert!(!puzzle.solution.is_empty());
        for mv in &puzzle.solution {
            assert!(
                rules
                    .attempt_move(mv.from, mv.to, mv.promotion.or(Some(Role::Queen)))
                    .is_some(),
                "illegal move {mv} in puzzle '{}'",
                puzzle.fen
            );
        }
    }
}

#[test]
fn builtin_puzzle_ratings_sit_inside_their_band() {
    for band in Catalog::builtin().bands() {
        for puzzle in band.puzzles() {
            assert!(
                band.contains(puzzle.rating),
                "puzzle rated {} filed in band {}-{}",
                puzzle.rating,
                band.min_rating,
                band.max_rating
            );
        }
    }
}

#[test]
fn rating_validation_matches_the_supported_range() {
    assert!(Catalog::validate_rating(700).is_err());
    assert!(Catalog::validate_rating(2501).is_err());
    assert!(Catalog::validate_rating(MIN_RATING).is_ok());
    assert!(Catalog::validate_rating(MAX_RATING).is_ok());
    assert!(Catalog::validate_rating(1200).is_ok());
}

#[test]
fn band_selection_partitions_the_rating_range() {
    let catalog = Catalog::builtin();

    let low = catalog.band_for(850).expect("850 has a band");
    assert_eq!((low.min_rating, low.max_rating), (800, 999));

    let high = catalog.band_for(1200).expect("1200 has a band");
    assert_eq!((high.min_rating, high.max_rating), (1000, 2500));

    assert!(catalog.band_for(700).is_none());
    assert!(catalog.band_for(2501).is_none());
}

#[test]
fn draw_stays_inside_the_matching_band() {
    let catalog = Catalog::builtin();
    let band = catalog.band_for(1200).unwrap();

    for _ in 0..50 {
        let puzzle = catalog.draw(1200);
        assert!(band.puzzles().iter().any(|p| p.fen == puzzle.fen));
    }
}

#[test]
fn uncovered_rating_draws_the_fallback() {
    let catalog = Catalog::builtin();
    // Unreachable through the API (ratings are validated first), but the
    // catalog still answers.
    assert_eq!(catalog.draw(100).fen, catalog.fallback().fen);
}
