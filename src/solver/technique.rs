//! This module contains the library of deduction techniques that mirror the
//! patterns a human player looks for, from lone candidates up to hidden
//! quads.
//!
//! Every technique obeys the same bounded-work contract: one call to
//! [Technique::apply] makes at most one atomic discovery, either filling a
//! single cell or removing one set of candidate digits from one set of
//! cells, and reports whether it changed the state. A pattern that is
//! present but whose eliminations have all been made already does not count
//! as a change, which is what lets the fixpoint loop in
//! [Procedure](crate::solver::Procedure) terminate.
//!
//! Techniques scan the grid in a canonical order, blocks first, then rows,
//! then columns, each family in its fixed enumeration order, and commit the
//! first discovery they find. The scan restarts from the top on every call,
//! so repeated calls stay deterministic regardless of where the previous
//! discovery was made.

use crate::{BLOCK_SIZE, Cell, GRID_SIZE};
use crate::solver::SolveState;
use crate::topology;
use crate::util::{self, DigitSet, MAX_DIGIT, MIN_DIGIT};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// An enumeration of all deduction techniques known to the solver. The
/// variants are a closed set; dispatch happens by matching on the variant,
/// so adding a technique means adding a variant and its arm.
///
/// Apply a technique to a [SolveState] with [Technique::apply]; the
/// difficulty weights attached to each technique live in
/// [Weights](crate::solver::grade::Weights).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Technique {

    /// Fills a cell that has exactly one candidate left.
    SingleCandidate,

    /// Fills a cell that is the only place in its block where a digit can
    /// still go. Patterns that are confined within a row or column only are
    /// left to the line-based techniques.
    SinglePosition,

    /// If all candidates for a digit within a block lie on one row or
    /// column, removes the digit from the rest of that row or column outside
    /// the block.
    CandidateLines,

    /// If two blocks of a band confine a digit to the same two lines,
    /// removes the digit from those lines in the third block of the band.
    DoublePairs,

    /// If two blocks of a band jointly confine a digit to two lines, removes
    /// the digit from those lines in the third block of the band.
    MultipleLines,

    /// If two cells of a unit share the same two candidates, removes those
    /// candidates from the rest of the unit.
    NakedPair,

    /// If three cells of a unit together hold only three candidates, removes
    /// those candidates from the rest of the unit.
    NakedTriple,

    /// If four cells of a unit together hold only four candidates, removes
    /// those candidates from the rest of the unit.
    NakedQuad,

    /// If two digits are confined to the same two cells of a unit, removes
    /// all other candidates from those cells.
    HiddenPair,

    /// If three digits are confined to the same three cells of a unit,
    /// removes all other candidates from those cells.
    HiddenTriple,

    /// If four digits are confined to the same four cells of a unit, removes
    /// all other candidates from those cells.
    HiddenQuad,

    /// Not implemented; always reports no progress. Kept so that procedures
    /// and weight tables can already refer to it.
    XWing,

    /// Not implemented; always reports no progress. Kept so that procedures
    /// and weight tables can already refer to it.
    ForcingChains,

    /// Not implemented; always reports no progress. Kept so that procedures
    /// and weight tables can already refer to it.
    Swordfish
}

impl Technique {

    /// The number of techniques known to the solver.
    pub const COUNT: usize = 14;

    /// All techniques, ordered from easiest to hardest by their standard
    /// first-use cost. This is the order in which [hint](crate::solver::hint)
    /// tries techniques and the order in which the standard grading
    /// procedures extend each other.
    pub const ALL: [Technique; Technique::COUNT] = [
        Technique::SingleCandidate,
        Technique::SinglePosition,
        Technique::CandidateLines,
        Technique::DoublePairs,
        Technique::MultipleLines,
        Technique::NakedPair,
        Technique::HiddenPair,
        Technique::NakedTriple,
        Technique::HiddenTriple,
        Technique::XWing,
        Technique::ForcingChains,
        Technique::NakedQuad,
        Technique::HiddenQuad,
        Technique::Swordfish
    ];

    /// The position of this technique in the usage record, determined by
    /// declaration order.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Gets the human-readable name of this technique, as it would appear in
    /// a hint or a grading report.
    pub fn name(self) -> &'static str {
        match self {
            Technique::SingleCandidate => "Single Candidate",
            Technique::SinglePosition => "Single Position",
            Technique::CandidateLines => "Candidate Lines",
            Technique::DoublePairs => "Double Pairs",
            Technique::MultipleLines => "Multiple Lines",
            Technique::NakedPair => "Naked Pair",
            Technique::NakedTriple => "Naked Triple",
            Technique::NakedQuad => "Naked Quad",
            Technique::HiddenPair => "Hidden Pair",
            Technique::HiddenTriple => "Hidden Triple",
            Technique::HiddenQuad => "Hidden Quad",
            Technique::XWing => "X-Wing",
            Technique::ForcingChains => "Forcing Chains",
            Technique::Swordfish => "Swordfish"
        }
    }

    /// Applies this technique to the given state, making at most one atomic
    /// discovery. Returns `true` if and only if the state changed, that is,
    /// a cell was filled or at least one candidate was actually removed. A
    /// change is recorded in the state's usage record; a fruitless scan is
    /// not.
    pub fn apply(self, state: &mut SolveState) -> bool {
        let changed = match self {
            Technique::SingleCandidate => single_candidate(state),
            Technique::SinglePosition => single_position(state),
            Technique::CandidateLines => candidate_lines(state),
            Technique::DoublePairs => double_pairs(state),
            Technique::MultipleLines => multiple_lines(state),
            Technique::NakedPair => naked_subset(state, 2),
            Technique::NakedTriple => naked_subset(state, 3),
            Technique::NakedQuad => naked_subset(state, 4),
            Technique::HiddenPair => hidden_subset(state, 2),
            Technique::HiddenTriple => hidden_subset(state, 3),
            Technique::HiddenQuad => hidden_subset(state, 4),
            Technique::XWing => false,
            Technique::ForcingChains => false,
            Technique::Swordfish => false
        };

        if changed {
            state.note_usage(self);
        }

        changed
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn single_candidate(state: &mut SolveState) -> bool {
    for cell in Cell::all() {
        let candidates = state.candidates(cell);

        if candidates.len() == 1 {
            let digit = candidates.iter().next().unwrap();
            state.place(cell, digit);
            return true;
        }
    }

    false
}

fn single_position(state: &mut SolveState) -> bool {
    for block in topology::blocks() {
        for digit in MIN_DIGIT..=MAX_DIGIT {
            let mut locations = block.iter()
                .copied()
                .filter(|&cell| state.candidates(cell).contains(digit));

            if let (Some(cell), None) = (locations.next(), locations.next()) {
                state.place(cell, digit);
                return true;
            }
        }
    }

    false
}

fn eliminate_outside_block(state: &mut SolveState, line: &[Cell],
        block: usize, digit: usize) -> bool {
    let mut removed = false;

    for &cell in line {
        if cell.block() != block {
            removed |= state.eliminate(cell, DigitSet::singleton(digit));
        }
    }

    removed
}

fn candidate_lines(state: &mut SolveState) -> bool {
    for block in 0..GRID_SIZE {
        for digit in MIN_DIGIT..=MAX_DIGIT {
            let locations: Vec<Cell> = topology::blocks()[block].iter()
                .copied()
                .filter(|&cell| state.candidates(cell).contains(digit))
                .collect();

            if locations.is_empty() {
                continue;
            }

            let row = locations[0].row();

            if locations.iter().all(|cell| cell.row() == row) &&
                    eliminate_outside_block(state, &topology::rows()[row],
                        block, digit) {
                return true;
            }

            let column = locations[0].column();

            if locations.iter().all(|cell| cell.column() == column) &&
                    eliminate_outside_block(state,
                        &topology::columns()[column], block, digit) {
                return true;
            }
        }
    }

    false
}

/// The indices of the segments of the given block, row segments if `rows`
/// and column segments otherwise, in which the digit still has a candidate.
fn segment_indices(state: &SolveState, block: usize, digit: usize, rows: bool)
        -> Vec<usize> {
    (0..BLOCK_SIZE)
        .filter(|&segment| {
            let cells = if rows {
                topology::row_segment(block, segment)
            }
            else {
                topology::column_segment(block, segment)
            };

            cells.iter().any(|&cell| state.candidates(cell).contains(digit))
        })
        .collect()
}

/// Shared scan of the two band interaction techniques. For every band, every
/// ordered pair of blocks within it, and every digit, `shared` decides from
/// the two blocks' segment index sets whether the pattern applies and, if
/// so, from which segments of the remaining block the digit is removed.
fn band_interaction<F>(state: &mut SolveState, shared: F) -> bool
where
    F: Fn(&[usize], &[usize]) -> Option<Vec<usize>>
{
    for &rows in &[true, false] {
        for band in 0..BLOCK_SIZE {
            let blocks = if rows {
                topology::row_band(band)
            }
            else {
                topology::column_band(band)
            };

            for &(first, second, excluded) in &[(0, 1, 2), (0, 2, 1), (1, 2, 0)] {
                for digit in MIN_DIGIT..=MAX_DIGIT {
                    let first_segments =
                        segment_indices(state, blocks[first], digit, rows);
                    let second_segments =
                        segment_indices(state, blocks[second], digit, rows);
                    let shared_segments =
                        shared(&first_segments, &second_segments);

                    if let Some(segments) = shared_segments {
                        let mut removed = false;

                        for segment in segments {
                            let cells = if rows {
                                topology::row_segment(blocks[excluded],
                                    segment)
                            }
                            else {
                                topology::column_segment(blocks[excluded],
                                    segment)
                            };

                            for &cell in cells {
                                removed |= state.eliminate(cell,
                                    DigitSet::singleton(digit));
                            }
                        }

                        if removed {
                            return true;
                        }
                    }
                }
            }
        }
    }

    false
}

fn double_pairs(state: &mut SolveState) -> bool {
    band_interaction(state, |first, second| {
        if first.len() == 2 && first == second {
            Some(first.to_vec())
        }
        else {
            None
        }
    })
}

fn multiple_lines(state: &mut SolveState) -> bool {
    band_interaction(state, |first, second| {
        if first.is_empty() || second.is_empty() {
            return None;
        }

        let mut union = first.to_vec();

        for &segment in second {
            if !union.contains(&segment) {
                union.push(segment);
            }
        }

        if union.len() == 2 {
            union.sort_unstable();
            Some(union)
        }
        else {
            None
        }
    })
}

fn naked_subset(state: &mut SolveState, size: usize) -> bool {
    for unit in topology::all_units() {
        let open: Vec<Cell> = unit.iter()
            .copied()
            .filter(|&cell| {
                let len = state.candidates(cell).len();
                len >= 2 && len <= size
            })
            .collect();

        for cells in util::combinations(&open, size) {
            let union = cells.iter()
                .fold(DigitSet::empty(),
                    |union, &cell| union | state.candidates(cell));

            if union.len() != size {
                continue;
            }

            let mut removed = false;

            for &cell in unit.iter() {
                if !cells.contains(&cell) {
                    removed |= state.eliminate(cell, union);
                }
            }

            if removed {
                return true;
            }
        }
    }

    false
}

fn hidden_subset(state: &mut SolveState, size: usize) -> bool {
    for unit in topology::all_units() {
        let confined: Vec<usize> = (MIN_DIGIT..=MAX_DIGIT)
            .filter(|&digit| {
                let locations = unit.iter()
                    .filter(|&&cell| state.candidates(cell).contains(digit))
                    .count();
                locations >= 1 && locations <= size
            })
            .collect();

        for digits in util::combinations(&confined, size) {
            let digit_set = digits.iter()
                .fold(DigitSet::empty(),
                    |set, &digit| set | DigitSet::singleton(digit));
            let cells: Vec<Cell> = unit.iter()
                .copied()
                .filter(|&cell|
                    !(state.candidates(cell) & digit_set).is_empty())
                .collect();

            if cells.len() != size {
                continue;
            }

            let mut removed = false;

            for &cell in &cells {
                let others = state.candidates(cell) - digit_set;
                removed |= state.eliminate(cell, others);
            }

            if removed {
                return true;
            }
        }
    }

    false
}
