//! The puzzle session state machine: one attempt at one puzzle.

use chess_core::{Role, Rules, Square};

use crate::puzzle::Puzzle;
use crate::TrainerError;

/// Verdict on a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The rules engine rejected the move; nothing changed.
    Illegal,
    /// Legal, but not the expected move: the session was reset to the
    /// puzzle's starting position.
    Incorrect,
    /// The expected move; the cursor advanced and any automated reply was
    /// played.
    Advanced,
    /// The expected move, and it completed the line.
    Solved,
}

impl MoveOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, MoveOutcome::Advanced | MoveOutcome::Solved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveOutcome::Illegal => "illegal",
            MoveOutcome::Incorrect => "incorrect",
            MoveOutcome::Advanced => "advanced",
            MoveOutcome::Solved => "solved",
        }
    }
}

/// One attempt at one puzzle.
///
/// The session owns the rules-engine position for its whole lifetime and is
/// the only mutator. It is replaced wholesale when the user moves on; there
/// is no pause or cancel.
#[derive(Debug)]
pub struct Session<R: Rules> {
    puzzle: Puzzle,
    rules: R,
    cursor: usize,
    solved: bool,
}

impl<R: Rules> Session<R> {
    /// Load the puzzle into the engine and apply any leading automated
    /// moves. Under the catalog convention (solver moves at even indices)
    /// the line opens with the solver, so a fresh session always waits on
    /// the user. Starting twice with the same puzzle yields the same state.
    pub fn start(puzzle: Puzzle, rules: R) -> Result<Self, TrainerError> {
        let mut session = Session {
            puzzle,
            rules,
            cursor: 0,
            solved: false,
        };
        session.reset()?;
        Ok(session)
    }

    /// Submit the user's drag. Exactly one of four things happens: the
    /// rules engine rejects it (no change), it is legal but off the
    /// expected line (full reset to the starting position), it advances the
    /// line, or it completes the puzzle. The caller should re-render from
    /// `fen()` in every case.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, TrainerError> {
        if self.solved || self.cursor >= self.puzzle.solution.len() {
            // Finished puzzles ignore input until the session is replaced.
            return Ok(MoveOutcome::Illegal);
        }

        if self
            .rules
            .attempt_move(from, to, Some(Role::Queen))
            .is_none()
        {
            return Ok(MoveOutcome::Illegal);
        }

        if !self.puzzle.solution[self.cursor].matches_squares(from, to) {
            // Wrong line, even if legal: the whole puzzle restarts.
            self.reset()?;
            return Ok(MoveOutcome::Incorrect);
        }

        self.cursor += 1;
        self.play_automated_replies()?;

        Ok(if self.solved {
            MoveOutcome::Solved
        } else {
            MoveOutcome::Advanced
        })
    }

    /// Readback of the full expected line; no state change.
    pub fn reveal_solution(&self) -> &[chess_core::MoveCoords] {
        &self.puzzle.solution
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Latest serialized position, for re-rendering.
    pub fn fen(&self) -> String {
        self.rules.fen()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    fn reset(&mut self) -> Result<(), TrainerError> {
        self.rules.load_position(&self.puzzle.fen)?;
        self.cursor = 0;
        self.solved = false;
        self.play_automated_replies()
    }

    /// Apply opponent replies (odd indices) until it is the solver's turn
    /// again, marking the session solved once the line is exhausted.
    fn play_automated_replies(&mut self) -> Result<(), TrainerError> {
        while self.cursor < self.puzzle.solution.len() && self.cursor % 2 == 1 {
            let mv = self.puzzle.solution[self.cursor];
            self.rules
                .attempt_move(mv.from, mv.to, mv.promotion.or(Some(Role::Queen)))
                .ok_or_else(|| {
                    TrainerError::InvalidCatalog(format!(
                        "automated reply {mv} is not legal in puzzle '{}'",
                        self.puzzle.fen
                    ))
                })?;
            self.cursor += 1;
        }
        if self.cursor >= self.puzzle.solution.len() {
            self.solved = true;
        }
        Ok(())
    }
}
