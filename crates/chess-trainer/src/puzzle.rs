use chess_core::MoveCoords;

/// A tactics puzzle: the position the solver faces plus the expected line.
///
/// Even solution indices are the solver's moves; odd indices are the
/// automated opponent's replies. Catalog entries never mutate — sessions
/// clone what they need.
#[derive(Debug, Clone)]
pub struct Puzzle {
    /// Starting position, serialized.
    pub fen: String,
    /// Expected line, solver first.
    pub solution: Vec<MoveCoords>,
    /// Difficulty rating.
    pub rating: u32,
    /// Theme tags ("fork", "mateIn2", ...).
    pub themes: Vec<String>,
}

impl Puzzle {
    /// The expected line in coordinate notation, for display.
    pub fn solution_uci(&self) -> Vec<String> {
        self.solution.iter().map(MoveCoords::to_string).collect()
    }
}
