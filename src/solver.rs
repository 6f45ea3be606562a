//! This module contains the solving logic built on top of the technique
//! library.
//!
//! The central type is [SolveState], which pairs a [SudokuGrid] with the
//! candidate digits of every cell, analogous to the pencil markings a human
//! player would make, plus a record of the techniques used so far. The
//! orchestration functions run techniques over such a state: [apply_bounded]
//! repeats a single technique, a [Procedure] sweeps an ordered technique
//! list to a fixpoint, and [hint] applies the single easiest technique that
//! makes progress.
//!
//! Solving has no branching or backtracking state. A solve is in exactly one
//! of two situations: progress is still possible, or it is terminal. A
//! terminal state is either a full grid or a stuck one; a stuck grid is a
//! normal [Outcome], not an error.

pub mod grade;
pub mod technique;

use crate::{Cell, CELL_COUNT, SudokuGrid};
use crate::topology;
use crate::util::DigitSet;

use grade::UsageRecord;
use technique::Technique;

/// The repeat bound that allows a technique to run as many times as is
/// structurally possible: no technique can fire more than once per cell.
pub const FULL_BOUND: usize = CELL_COUNT;

/// The state of one solve attempt: the grid, the candidate set of every
/// cell, and the usage record accumulated so far. Created fresh from a
/// puzzle at the start of a solve, mutated in place technique by technique,
/// and discarded or returned at the end; it has no identity beyond one solve
/// invocation.
///
/// The state maintains the following invariant across every operation: a
/// filled cell has an empty candidate set, and an unfilled cell's candidate
/// set never contains a digit held by any of its peers.
#[derive(Clone)]
pub struct SolveState {
    grid: SudokuGrid,
    candidates: [DigitSet; CELL_COUNT],
    usage: UsageRecord
}

impl SolveState {

    /// Creates a new solve state for the given grid, with the candidates of
    /// every cell derived from the filled values and a fresh usage record.
    pub fn from_grid(grid: SudokuGrid) -> SolveState {
        let mut state = SolveState {
            grid,
            candidates: [DigitSet::empty(); CELL_COUNT],
            usage: UsageRecord::new()
        };
        state.derive_candidates();
        state
    }

    /// Creates a new solve state from a grid and an externally maintained
    /// candidate map, such as a pencil-mark representation kept by a UI.
    /// Since the candidate invariant is owned by the engine and never by
    /// external callers, the provided candidates are sanitized at this
    /// boundary: filled cells get their sets cleared and digits held by a
    /// peer are removed.
    pub fn with_candidates(grid: SudokuGrid,
            mut candidates: [DigitSet; CELL_COUNT]) -> SolveState {
        for cell in Cell::all() {
            if grid.get(cell).is_some() {
                candidates[cell.index()].clear();
            }
            else {
                let peer_digits = grid.digits_in(topology::peers(cell));
                candidates[cell.index()] -= peer_digits;
            }
        }

        SolveState {
            grid,
            candidates,
            usage: UsageRecord::new()
        }
    }

    /// Recomputes the candidates of every cell from the filled values: an
    /// unfilled cell may hold any digit not held by one of its peers, and a
    /// filled cell holds no candidates. This discards any eliminations that
    /// techniques have made beyond the peer rule, so it is used to populate
    /// an empty or stale candidate map, not between technique calls.
    pub fn derive_candidates(&mut self) {
        for cell in Cell::all() {
            if self.grid.get(cell).is_some() {
                self.candidates[cell.index()].clear();
            }
            else {
                let peer_digits = self.grid.digits_in(topology::peers(cell));
                self.candidates[cell.index()] = DigitSet::full() - peer_digits;
            }
        }
    }

    /// Gets the grid in its current solving state.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Consumes this state and returns the grid, fully solved or partial.
    pub fn into_grid(self) -> SudokuGrid {
        self.grid
    }

    /// Gets the candidate digits of the given cell. Filled cells have an
    /// empty candidate set.
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.candidates[cell.index()]
    }

    /// Gets the record of how many times each technique has successfully
    /// fired on this state so far.
    pub fn usage(&self) -> &UsageRecord {
        &self.usage
    }

    /// Indicates whether the grid is full, i.e. the solve has succeeded.
    pub fn is_solved(&self) -> bool {
        self.grid.is_full()
    }

    /// Fills the given cell with the given digit and incrementally updates
    /// the candidate map: the cell's own candidates are cleared and the
    /// digit is removed from the candidates of all of its peers. Returns
    /// whether any peer candidate was removed.
    pub(crate) fn place(&mut self, cell: Cell, digit: usize) -> bool {
        // The digit always comes from a candidate set, so it is in range.
        self.grid.set(cell, digit).unwrap();
        self.candidates[cell.index()].clear();

        let mut removed = false;

        for &peer in topology::peers(cell) {
            removed |= self.candidates[peer.index()].remove(digit);
        }

        removed
    }

    /// Removes the given digits from the candidate set of the given cell.
    /// Returns whether any of them was actually present.
    pub(crate) fn eliminate(&mut self, cell: Cell, digits: DigitSet) -> bool {
        self.candidates[cell.index()].difference_assign(digits)
    }

    pub(crate) fn note_usage(&mut self, technique: Technique) {
        self.usage.record(technique);
    }
}

/// The result of running a [Procedure] to its fixpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {

    /// The grid is complete.
    Solved,

    /// No technique in the procedure can make further progress, but the grid
    /// is not complete. This is a normal result: the puzzle is unsolved *by
    /// this technique set*, which says nothing about its general
    /// solvability.
    Stuck
}

/// Applies the given technique to the state repeatedly, until it reports no
/// progress or `bound` applications have been made. Candidates are kept
/// current between calls by the state's incremental updates. Returns whether
/// any application made progress.
pub fn apply_bounded(state: &mut SolveState, technique: Technique,
        bound: usize) -> bool {
    let mut changed = false;

    for _ in 0..bound {
        if !technique.apply(state) {
            break;
        }

        changed = true;
    }

    changed
}

/// An ordered list of techniques, each with a repeat bound, that together
/// form one solving strategy. A procedure is swept from top to bottom until
/// a full sweep produces no progress; easier techniques placed earlier are
/// thereby preferred, which keeps the resulting usage record cheap.
///
/// Procedures are plain values constructed at the call site; see
/// [standard_procedures](grade::standard_procedures) for the canonical set
/// used in grading.
#[derive(Clone)]
pub struct Procedure {
    steps: Vec<(Technique, usize)>
}

impl Procedure {

    /// Creates a new procedure from an ordered list of techniques, each
    /// paired with its repeat bound.
    pub fn new(steps: Vec<(Technique, usize)>) -> Procedure {
        Procedure {
            steps
        }
    }

    /// Creates a new procedure from an ordered list of techniques, all with
    /// the [FULL_BOUND] repeat bound.
    pub fn of(techniques: &[Technique]) -> Procedure {
        Procedure::new(techniques.iter()
            .map(|&technique| (technique, FULL_BOUND))
            .collect())
    }

    /// Gets the ordered steps of this procedure.
    pub fn steps(&self) -> &[(Technique, usize)] {
        &self.steps
    }

    /// Sweeps the technique list over the given state repeatedly, until a
    /// full sweep produces no progress or the grid is complete, and reports
    /// the terminal [Outcome]. The result is deterministic: the same puzzle
    /// and the same procedure always yield the same usage record.
    pub fn solve(&self, state: &mut SolveState) -> Outcome {
        loop {
            let mut progress = false;

            for &(technique, bound) in &self.steps {
                progress |= apply_bounded(state, technique, bound);

                if state.is_solved() {
                    return Outcome::Solved;
                }
            }

            if !progress {
                break;
            }
        }

        if state.is_solved() {
            Outcome::Solved
        }
        else {
            Outcome::Stuck
        }
    }
}

/// Applies the single easiest technique that makes progress on the given
/// state, trying them in the canonical difficulty order, and returns which
/// one was applied. Returns `None` if every technique fails. This is the
/// entry point for interactive, one-step hints: the caller renders the
/// mutated state and the technique name.
pub fn hint(state: &mut SolveState) -> Option<Technique> {
    for &technique in &Technique::ALL {
        if technique.apply(state) {
            return Some(technique);
        }
    }

    None
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::digit_set;
    use crate::topology;

    /// The completed grid of the classic example puzzle used across the
    /// crate's tests.
    pub(crate) const SOLVED: &str =
        "534678912672195348198342567859761423426853791\
         713924856961537284287419635345286179";

    /// An easy classic puzzle whose solution is [SOLVED]; solvable with
    /// single candidates and single positions alone.
    pub(crate) const EASY: &str =
        "530070000600195000098000060800060003400803001\
         700020006060000280000419005000080079";

    /// A notoriously hard puzzle far beyond this technique library.
    pub(crate) const HARD: &str =
        "100007090030020008009600500005300900010080002\
         600004000300000010040000007007000300";

    pub(crate) fn assert_invariant(state: &SolveState) {
        for cell in Cell::all() {
            if state.grid().get(cell).is_some() {
                assert!(state.candidates(cell).is_empty(),
                    "filled cell {} still has candidates", cell);
            }
            else {
                for &peer in topology::peers(cell) {
                    if let Some(digit) = state.grid().get(peer) {
                        assert!(!state.candidates(cell).contains(digit),
                            "cell {} holds candidate {} of peer {}",
                            cell, digit, peer);
                    }
                }
            }
        }
    }

    fn singles() -> Procedure {
        Procedure::of(&[Technique::SingleCandidate,
            Technique::SinglePosition])
    }

    #[test]
    fn derived_candidates_satisfy_invariant() {
        let state = SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        assert_invariant(&state);

        // B3 sees 5, 3, 6, 9, 8 in its block, 6, 1, 9, 5 in its row and 8
        // in its column, leaving 2, 4 and 7.
        let cell = Cell::at(1, 2).unwrap();
        assert_eq!(digit_set!(2, 4, 7), state.candidates(cell));
    }

    #[test]
    fn place_updates_peers_incrementally() {
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        let cell = Cell::at(0, 2).unwrap();

        assert!(state.candidates(cell).contains(4));
        assert!(state.place(cell, 4));
        assert!(state.candidates(cell).is_empty());

        for &peer in topology::peers(cell) {
            assert!(!state.candidates(peer).contains(4));
        }

        assert_invariant(&state);
    }

    #[test]
    fn with_candidates_sanitizes_external_state() {
        let grid = SudokuGrid::parse(EASY).unwrap();
        // A deliberately inconsistent pencil-mark map: every cell marked
        // with every digit.
        let candidates = [DigitSet::full(); CELL_COUNT];
        let state = SolveState::with_candidates(grid, candidates);

        assert_invariant(&state);
    }

    #[test]
    fn solve_easy_puzzle_with_singles() {
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());

        assert_eq!(Outcome::Solved, singles().solve(&mut state));
        assert_eq!(SudokuGrid::parse(SOLVED).unwrap().to_puzzle_string(),
            state.grid().to_puzzle_string());
        assert_invariant(&state);
    }

    #[test]
    fn deduced_cells_are_not_original() {
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        singles().solve(&mut state);

        let grid = state.into_grid();

        assert!(grid.is_original(Cell::at(0, 0).unwrap()));
        assert!(!grid.is_original(Cell::at(0, 2).unwrap()));
    }

    #[test]
    fn solved_grid_terminates_without_usage() {
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(SOLVED).unwrap());

        assert_eq!(Outcome::Solved, singles().solve(&mut state));
        assert!(state.usage().is_empty());

        for cell in Cell::all() {
            assert!(state.candidates(cell).is_empty());
        }
    }

    #[test]
    fn empty_grid_is_stuck() {
        let mut state = SolveState::from_grid(SudokuGrid::empty());

        assert_eq!(Outcome::Stuck, singles().solve(&mut state));
        assert!(state.usage().is_empty());
    }

    #[test]
    fn hard_puzzle_gets_stuck_in_valid_state() {
        let procedure = Procedure::of(&Technique::ALL);
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(HARD).unwrap());

        assert_eq!(Outcome::Stuck, procedure.solve(&mut state));
        assert!(!state.is_solved());
        assert_invariant(&state);

        // The final sweep made no progress, so a rerun changes nothing.
        let grid_before = state.grid().clone();
        assert_eq!(Outcome::Stuck, procedure.solve(&mut state));
        assert_eq!(grid_before, *state.grid());
    }

    #[test]
    fn fixpoint_solve_is_idempotent() {
        let procedure = singles();
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        procedure.solve(&mut state);

        let usage_before = state.usage().clone();
        let grid_before = state.grid().clone();

        procedure.solve(&mut state);

        assert_eq!(usage_before, *state.usage());
        assert_eq!(grid_before, *state.grid());
    }

    #[test]
    fn progress_is_monotonic() {
        let candidate_total = |state: &SolveState| -> usize {
            Cell::all().map(|cell| state.candidates(cell).len()).sum()
        };
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        let mut clues = state.grid().count_clues();
        let mut candidates = candidate_total(&state);

        while apply_bounded(&mut state, Technique::SingleCandidate, 1)
                || apply_bounded(&mut state, Technique::SinglePosition, 1) {
            let next_clues = state.grid().count_clues();
            let next_candidates = candidate_total(&state);

            assert!(next_clues >= clues);
            assert!(next_candidates <= candidates);

            clues = next_clues;
            candidates = next_candidates;
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let solve = || {
            let mut state =
                SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
            singles().solve(&mut state);
            (state.usage().clone(), state.grid().to_puzzle_string())
        };

        assert_eq!(solve(), solve());
    }

    #[test]
    fn hint_applies_easiest_technique_first() {
        let mut state =
            SolveState::from_grid(SudokuGrid::parse(EASY).unwrap());
        let technique = hint(&mut state).unwrap();

        assert!(technique == Technique::SingleCandidate ||
            technique == Technique::SinglePosition);
        assert_eq!(1, state.usage().total());
    }

    #[test]
    fn hint_reports_none_when_stuck() {
        let mut state = SolveState::from_grid(SudokuGrid::empty());
        assert_eq!(None, hint(&mut state));
    }
}
