//! This module contains the difficulty grading built on top of the solver.
//!
//! The premise of grading is that a puzzle is as hard as the techniques a
//! human needs to solve it. [grade] therefore solves the same puzzle with
//! each of several [Procedure]s, scores the technique usage of every
//! successful run with a [Weights] table, and keeps the cheapest one. The
//! numeric score is mapped to a [Grade] label with fixed thresholds. An
//! unsolvable puzzle, that is, one no procedure completes, has no grade.
//!
//! All types in this module serialize with [serde](https://serde.rs/), so a
//! [Report] can be handed to a frontend as JSON directly.

use crate::SudokuGrid;
use crate::solver::{Outcome, Procedure, SolveState};
use crate::solver::technique::Technique;

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// Records how many times each technique fired during one solve. The record
/// starts at zero for every technique and is incremented by
/// [Technique::apply] whenever a technique actually changes the state; a
/// fruitless scan is not counted.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UsageRecord {
    counts: [u32; Technique::COUNT]
}

impl UsageRecord {

    /// Creates a new usage record with all counts at zero.
    pub fn new() -> UsageRecord {
        UsageRecord {
            counts: [0; Technique::COUNT]
        }
    }

    pub(crate) fn record(&mut self, technique: Technique) {
        self.counts[technique.index()] += 1;
    }

    /// Gets the number of times the given technique fired.
    pub fn count(&self, technique: Technique) -> usize {
        self.counts[technique.index()] as usize
    }

    /// Indicates whether the given technique fired at least once.
    pub fn is_used(&self, technique: Technique) -> bool {
        self.counts[technique.index()] > 0
    }

    /// Gets the total number of technique applications that were recorded.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&count| count as usize).sum()
    }

    /// Indicates whether no technique fired at all, as is the case for a
    /// puzzle that arrives already solved.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Returns an iterator over the techniques that fired at least once,
    /// ordered from easiest to hardest.
    pub fn used_techniques(&self) -> impl Iterator<Item = Technique> + '_ {
        Technique::ALL.iter()
            .copied()
            .filter(move |&technique| self.is_used(technique))
    }
}

impl Default for UsageRecord {
    fn default() -> UsageRecord {
        UsageRecord::new()
    }
}

/// The cost table that converts a [UsageRecord] into a numeric score. Each
/// technique has a cost for its first use and a usually lower cost for every
/// further use, reflecting that spotting a pattern once is the hard part and
/// repeating it is routine.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Weights {
    first: [u32; Technique::COUNT],
    subsequent: [u32; Technique::COUNT]
}

impl Weights {

    /// Creates a weights table from explicit cost arrays, both indexed by
    /// declaration order of the [Technique] variants.
    pub fn new(first: [u32; Technique::COUNT],
            subsequent: [u32; Technique::COUNT]) -> Weights {
        Weights {
            first,
            subsequent
        }
    }

    /// The standard cost table. The first-use costs induce the technique
    /// order of [Technique::ALL].
    pub fn standard() -> Weights {
        let mut first = [0; Technique::COUNT];
        let mut subsequent = [0; Technique::COUNT];

        for &technique in &Technique::ALL {
            let (first_cost, subsequent_cost) = match technique {
                Technique::SingleCandidate => (100, 100),
                Technique::SinglePosition => (100, 100),
                Technique::CandidateLines => (350, 200),
                Technique::DoublePairs => (500, 250),
                Technique::MultipleLines => (700, 400),
                Technique::NakedPair => (750, 500),
                Technique::HiddenPair => (1500, 1200),
                Technique::NakedTriple => (2000, 1400),
                Technique::HiddenTriple => (2400, 1600),
                Technique::XWing => (2800, 1600),
                Technique::ForcingChains => (4200, 2100),
                Technique::NakedQuad => (5000, 4000),
                Technique::HiddenQuad => (7000, 5000),
                Technique::Swordfish => (8000, 6000)
            };

            first[technique.index()] = first_cost;
            subsequent[technique.index()] = subsequent_cost;
        }

        Weights::new(first, subsequent)
    }

    /// Gets the cost of the first use of the given technique.
    pub fn first(&self, technique: Technique) -> u32 {
        self.first[technique.index()]
    }

    /// Gets the cost of every use of the given technique after the first.
    pub fn subsequent(&self, technique: Technique) -> u32 {
        self.subsequent[technique.index()]
    }

    /// Computes the score of the given usage record: for every technique
    /// that fired `n > 0` times, its first-use cost plus `n - 1` times its
    /// subsequent-use cost.
    pub fn score(&self, usage: &UsageRecord) -> u32 {
        Technique::ALL.iter()
            .copied()
            .filter(|&technique| usage.is_used(technique))
            .map(|technique| {
                let count = usage.count(technique) as u32;
                self.first(technique) + (count - 1) * self.subsequent(technique)
            })
            .sum()
    }
}

/// A difficulty label derived from a numeric score. The variants are ordered
/// from easiest to hardest, and the derived `Ord` follows that order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd,
    Serialize)]
pub enum Grade {

    /// Solvable with single candidates and single positions alone, with
    /// room to spare.
    Beginner,

    /// Solvable with the simplest techniques.
    Easy,

    /// Requires a few line/box interactions.
    Medium,

    /// Requires sustained use of intermediate techniques.
    Tricky,

    /// Requires advanced subset techniques.
    Fiendish,

    /// At or beyond the limits of this technique library.
    Diabolical
}

impl Grade {

    /// Maps a score produced with the standard [Weights] to a grade label.
    /// The thresholds are monotonic, so a higher score never yields an
    /// easier grade.
    pub fn from_score(score: u32) -> Grade {
        match score {
            0..=4500 => Grade::Beginner,
            4501..=5500 => Grade::Easy,
            5501..=6900 => Grade::Medium,
            6901..=9300 => Grade::Tricky,
            9301..=14000 => Grade::Fiendish,
            _ => Grade::Diabolical
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grade::Beginner => "Beginner",
            Grade::Easy => "Easy",
            Grade::Medium => "Medium",
            Grade::Tricky => "Tricky",
            Grade::Fiendish => "Fiendish",
            Grade::Diabolical => "Diabolical"
        };

        write!(f, "{}", name)
    }
}

/// The result of grading a solvable puzzle: the solved grid, the technique
/// usage of the cheapest successful procedure, and the score and grade
/// derived from it.
///
/// A report carries no candidate map: it describes a solved run, and every
/// cell of a full grid has an empty candidate set. Callers that need the
/// candidates of a partial solve run a [Procedure] themselves and read them
/// off the terminal [SolveState].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Report {

    /// The fully solved grid.
    pub grid: SudokuGrid,

    /// The technique usage of the cheapest successful procedure.
    pub usage: UsageRecord,

    /// The numeric difficulty score of the puzzle.
    pub score: u32,

    /// The difficulty label corresponding to the score.
    pub grade: Grade
}

/// Grades the given puzzle by solving it with each of the given procedures
/// and keeping the lowest-scoring successful run. Every procedure starts
/// from a fresh [SolveState] of the puzzle; runs do not share eliminations.
/// Ties are broken in favor of the earliest procedure, which keeps the
/// result deterministic for a fixed procedure list.
///
/// Returns `None` if no procedure solves the puzzle. That includes puzzles
/// which are logically solvable but beyond the given technique sets.
pub fn grade(grid: &SudokuGrid, procedures: &[Procedure], weights: &Weights)
        -> Option<Report> {
    let mut best: Option<Report> = None;

    for procedure in procedures {
        let mut state = SolveState::from_grid(grid.clone());

        if procedure.solve(&mut state) != Outcome::Solved {
            continue;
        }

        let score = weights.score(state.usage());

        if best.as_ref().map_or(true, |report| score < report.score) {
            let usage = state.usage().clone();

            best = Some(Report {
                grid: state.into_grid(),
                usage,
                score,
                grade: Grade::from_score(score)
            });
        }
    }

    best
}

/// The standard procedure ladder used for grading: each procedure extends
/// the previous one with the next techniques from [Technique::ALL], from a
/// singles-only procedure up to the full library. Grading with this ladder
/// finds the smallest technique prefix that solves the puzzle, since a
/// longer procedure never scores lower than a shorter one that also
/// succeeds.
pub fn standard_procedures() -> Vec<Procedure> {
    vec![
        Procedure::of(&Technique::ALL[..2]),
        Procedure::of(&Technique::ALL[..3]),
        Procedure::of(&Technique::ALL[..5]),
        Procedure::of(&Technique::ALL[..9]),
        Procedure::of(&Technique::ALL)
    ]
}
