// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements a human-style Sudoku deduction engine. Instead of
//! backtracking, it fills cells using the same logical techniques a human
//! solver would apply, records which techniques were needed, and converts
//! that usage into a difficulty score. It supports the following key
//! features:
//!
//! * Parsing and printing 9x9 Sudoku grids
//! * A library of elimination techniques, from single candidates up to
//! hidden quads
//! * Solving to a fixpoint with a configurable, ordered technique procedure
//! * Single-step hints that report which technique was applied
//! * Grading a puzzle by solving it with several procedures and keeping the
//! cheapest successful one
//!
//! # Parsing and printing grids
//!
//! A puzzle is given as an 81-character string of the digits `'0'` to `'9'`
//! in row-major order, where `'0'` denotes an empty cell. See
//! [SudokuGrid::parse] for details.
//!
//! ```
//! use sudoku_grader::SudokuGrid;
//!
//! let grid = SudokuGrid::parse(
//!     "530070000600195000098000060800060003400803001\
//!      700020006060000280000419005000080079").unwrap();
//! assert_eq!(30, grid.count_clues());
//! println!("{}", grid);
//! ```
//!
//! # Solving
//!
//! Solving is driven by a [Procedure](solver::Procedure), an ordered list of
//! techniques which is swept repeatedly until no technique makes progress.
//! The terminal state is either a full grid or a stuck one; a stuck grid is
//! a normal result, not an error.
//!
//! ```
//! use sudoku_grader::SudokuGrid;
//! use sudoku_grader::solver::{Outcome, Procedure, SolveState};
//! use sudoku_grader::solver::technique::Technique;
//!
//! let grid = SudokuGrid::parse(
//!     "530070000600195000098000060800060003400803001\
//!      700020006060000280000419005000080079").unwrap();
//! let mut state = SolveState::from_grid(grid);
//! let procedure = Procedure::of(
//!     &[Technique::SingleCandidate, Technique::SinglePosition]);
//!
//! assert_eq!(Outcome::Solved, procedure.solve(&mut state));
//! ```
//!
//! # Grading
//!
//! [grade](solver::grade::grade) solves the same puzzle with each of several
//! candidate procedures and keeps the lowest-scoring successful run. The
//! returned [Report](solver::grade::Report) carries the technique usage, the
//! numeric score, and a label derived from default thresholds.
//!
//! ```
//! use sudoku_grader::SudokuGrid;
//! use sudoku_grader::solver::grade::{grade, standard_procedures, Weights};
//!
//! let grid = SudokuGrid::parse(
//!     "530070000600195000098000060800060003400803001\
//!      700020006060000280000419005000080079").unwrap();
//! let report = grade(&grid, &standard_procedures(), &Weights::standard())
//!     .expect("puzzle should be solvable by the standard procedures");
//!
//! assert!(report.grid.is_full());
//! assert!(report.score > 0);
//! ```

pub mod error;
pub mod solver;
pub mod topology;
pub mod util;

use error::{
    PuzzleParseError,
    PuzzleParseResult,
    SudokuError,
    SudokuResult
};
use util::{DigitSet, MAX_DIGIT, MIN_DIGIT};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Display, Formatter};

/// The number of rows, columns, and blocks of the grid, as well as the
/// number of cells in each of them.
pub const GRID_SIZE: usize = 9;

/// The width and height of one 3x3 block.
pub const BLOCK_SIZE: usize = 3;

/// The total number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Identifies one of the 81 cells of the grid. Cells are enumerated in
/// row-major order, which is also the order of the characters in a puzzle
/// string. In textual form, rows are addressed with the letters 'A' to 'I'
/// and columns with the numbers 1 to 9, so the top-left cell displays as
/// `A1` and the bottom-right one as `I9`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell(u8);

impl Cell {

    pub(crate) const fn from_index_unchecked(index: usize) -> Cell {
        Cell(index as u8)
    }

    /// Creates the cell with the given index in row-major enumeration order,
    /// which must be less than [CELL_COUNT].
    ///
    /// # Errors
    ///
    /// If `index` is 81 or greater. In that case, `SudokuError::OutOfBounds`
    /// is returned.
    pub fn from_index(index: usize) -> SudokuResult<Cell> {
        if index >= CELL_COUNT {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(Cell(index as u8))
        }
    }

    /// Creates the cell at the given coordinates, both of which must be in
    /// the range `[0, 9[`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` is not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn at(row: usize, column: usize) -> SudokuResult<Cell> {
        if row >= GRID_SIZE || column >= GRID_SIZE {
            Err(SudokuError::OutOfBounds)
        }
        else {
            Ok(Cell((row * GRID_SIZE + column) as u8))
        }
    }

    /// Gets the index of this cell in row-major enumeration order, in the
    /// range `[0, 81[`.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Gets the row (y-coordinate) of this cell, in the range `[0, 9[`.
    pub fn row(self) -> usize {
        self.index() / GRID_SIZE
    }

    /// Gets the column (x-coordinate) of this cell, in the range `[0, 9[`.
    pub fn column(self) -> usize {
        self.index() % GRID_SIZE
    }

    /// Gets the index of the 3x3 block containing this cell, in the range
    /// `[0, 9[`. Blocks are enumerated in row-major order, like cells.
    pub fn block(self) -> usize {
        self.row() / BLOCK_SIZE * BLOCK_SIZE + self.column() / BLOCK_SIZE
    }

    /// Returns an iterator over all 81 cells in their fixed, row-major
    /// enumeration order. This order is stable and relied upon by the
    /// techniques for deterministic scanning.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(|index| Cell(index as u8))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row() as u8) as char, self.column() + 1)
    }
}

/// A 9x9 Sudoku grid. Each cell may or may not be occupied by a digit from 1
/// to 9. The grid additionally remembers which filled cells were part of the
/// starting puzzle and which were deduced later, which callers can query via
/// [SudokuGrid::is_original].
///
/// `SudokuGrid` implements `Display` with a pretty box-drawing frame, and
/// serializes with [serde](https://serde.rs/) as its puzzle string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudokuGrid {
    cells: [Option<usize>; CELL_COUNT],
    originals: [bool; CELL_COUNT]
}

fn to_char(cell: Option<usize>) -> char {
    if let Some(digit) = cell {
        (b'0' + digit as u8) as char
    }
    else {
        ' '
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char,
        newline: bool) -> String {
    let mut result = String::new();

    for x in 0..GRID_SIZE {
        if x == 0 {
            result.push(start);
        }
        else if x % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line('║', '║', '│',
        |x| to_char(grid.get(Cell::at(y, x).unwrap())), ' ', '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..GRID_SIZE {
            if y == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if y % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line().as_str())?;
            }
            else {
                f.write_str(thin_separator_line().as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row().as_str())?;
        Ok(())
    }
}

impl SudokuGrid {

    /// Creates a new, empty grid in which no cell contains a digit.
    pub fn empty() -> SudokuGrid {
        SudokuGrid {
            cells: [None; CELL_COUNT],
            originals: [false; CELL_COUNT]
        }
    }

    /// Parses an 81-character puzzle string into a grid. The characters are
    /// assigned to cells in row-major order, where each row is completed
    /// before the next one is started. Every character must be a digit;
    /// `'0'` denotes an empty cell. All cells filled by the puzzle string
    /// are marked as original clues.
    ///
    /// Parsing is a pure syntax check. Whether the described puzzle is
    /// actually solvable is decided later, by the solver, as a normal
    /// solving outcome.
    ///
    /// # Errors
    ///
    /// * `PuzzleParseError::WrongLength` if the string is not exactly 81
    /// characters long.
    /// * `PuzzleParseError::InvalidCharacter` if any character is not a
    /// digit from `'0'` to `'9'`.
    pub fn parse(puzzle: &str) -> PuzzleParseResult<SudokuGrid> {
        let bytes = puzzle.as_bytes();

        if bytes.len() != CELL_COUNT {
            return Err(PuzzleParseError::WrongLength);
        }

        let mut grid = SudokuGrid::empty();

        for (index, &byte) in bytes.iter().enumerate() {
            match byte {
                b'0' => { },
                b'1'..=b'9' => {
                    grid.cells[index] = Some((byte - b'0') as usize);
                    grid.originals[index] = true;
                },
                _ => return Err(PuzzleParseError::InvalidCharacter)
            }
        }

        Ok(grid)
    }

    /// Converts the grid into an 81-character puzzle string in a way that is
    /// consistent with [SudokuGrid::parse]. Empty cells become `'0'`. Note
    /// that the original-clue flags are not representable in this format, so
    /// a round trip marks every filled cell as original.
    pub fn to_puzzle_string(&self) -> String {
        self.cells.iter()
            .map(|&cell| to_char(cell))
            .map(|c| if c == ' ' { '0' } else { c })
            .collect()
    }

    /// Gets the content of the given cell, which is `None` for an empty
    /// cell.
    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.cells[cell.index()]
    }

    /// Sets the content of the given cell to the given digit, which must be
    /// in the range `[1, 9]`. If the cell was not empty, the old digit is
    /// overwritten. Digits entered this way are considered deduced, not
    /// original clues.
    ///
    /// # Errors
    ///
    /// If `digit` is not in the specified range. In that case,
    /// `SudokuError::InvalidDigit` is returned.
    pub fn set(&mut self, cell: Cell, digit: usize) -> SudokuResult<()> {
        if digit < MIN_DIGIT || digit > MAX_DIGIT {
            return Err(SudokuError::InvalidDigit);
        }

        self.cells[cell.index()] = Some(digit);
        Ok(())
    }

    /// Clears the content of the given cell. If the cell is already empty,
    /// it is left that way. The original-clue flag of the cell is cleared as
    /// well.
    pub fn clear(&mut self, cell: Cell) {
        self.cells[cell.index()] = None;
        self.originals[cell.index()] = false;
    }

    /// Indicates whether the given cell was filled by the starting puzzle,
    /// as opposed to being empty or having been deduced by the solver.
    pub fn is_original(&self, cell: Cell) -> bool {
        self.originals[cell.index()]
    }

    /// Counts the number of non-empty cells in this grid. While on average
    /// puzzles with fewer clues are harder, this is *not* a reliable measure
    /// of difficulty; use the [grade](solver::grade::grade) function for
    /// that.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// digit.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Indicates whether this grid configuration is a subset of another one.
    /// That is, all cells filled in this grid with some digit must be filled
    /// in `other` with the same digit. The solver only ever adds digits, so
    /// its input is always a subset of its output.
    pub fn is_subset(&self, other: &SudokuGrid) -> bool {
        self.cells.iter()
            .zip(other.cells.iter())
            .all(|(self_cell, other_cell)| match self_cell {
                Some(digit) => other_cell == &Some(*digit),
                None => true
            })
    }

    /// Computes the set of digits held by filled cells among the given
    /// cells. Used to derive the candidates of a cell from its peers.
    pub fn digits_in(&self, cells: &[Cell]) -> DigitSet {
        let mut digits = DigitSet::empty();

        for &cell in cells {
            if let Some(digit) = self.get(cell) {
                digits.insert(digit);
            }
        }

        digits
    }
}

impl Serialize for SudokuGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&self.to_puzzle_string())
    }
}

impl<'de> Deserialize<'de> for SudokuGrid {
    fn deserialize<D>(deserializer: D) -> Result<SudokuGrid, D::Error>
    where
        D: Deserializer<'de>
    {
        let puzzle = String::deserialize(deserializer)?;
        SudokuGrid::parse(&puzzle).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791\
         713924856961537284287419635345286179";

    #[test]
    fn cell_coordinates() {
        let cell = Cell::from_index(40).unwrap();

        assert_eq!(4, cell.row());
        assert_eq!(4, cell.column());
        assert_eq!(4, cell.block());
        assert_eq!("E5", cell.to_string());

        let cell = Cell::at(8, 0).unwrap();

        assert_eq!(72, cell.index());
        assert_eq!(6, cell.block());
        assert_eq!("I1", cell.to_string());
    }

    #[test]
    fn cell_out_of_bounds() {
        assert_eq!(Err(SudokuError::OutOfBounds), Cell::from_index(81));
        assert_eq!(Err(SudokuError::OutOfBounds), Cell::at(9, 0));
        assert_eq!(Err(SudokuError::OutOfBounds), Cell::at(0, 9));
    }

    #[test]
    fn cell_enumeration_is_row_major() {
        let cells: Vec<Cell> = Cell::all().collect();

        assert_eq!(CELL_COUNT, cells.len());
        assert_eq!("A1", cells[0].to_string());
        assert_eq!("A9", cells[8].to_string());
        assert_eq!("B1", cells[9].to_string());
        assert_eq!("I9", cells[80].to_string());
    }

    #[test]
    fn parse_ok() {
        let grid = SudokuGrid::parse(SOLVED).unwrap();

        assert!(grid.is_full());
        assert_eq!(Some(5), grid.get(Cell::at(0, 0).unwrap()));
        assert_eq!(Some(9), grid.get(Cell::at(8, 8).unwrap()));
        assert!(grid.is_original(Cell::at(0, 0).unwrap()));
    }

    #[test]
    fn parse_zero_is_empty_cell() {
        let mut puzzle = String::from("0");
        puzzle.push_str(&SOLVED[1..]);
        let grid = SudokuGrid::parse(&puzzle).unwrap();

        assert_eq!(None, grid.get(Cell::at(0, 0).unwrap()));
        assert!(!grid.is_original(Cell::at(0, 0).unwrap()));
        assert_eq!(80, grid.count_clues());
    }

    #[test]
    fn parse_wrong_length() {
        assert_eq!(Err(PuzzleParseError::WrongLength),
            SudokuGrid::parse("123"));
        assert_eq!(Err(PuzzleParseError::WrongLength),
            SudokuGrid::parse(&format!("{}0", SOLVED)));
    }

    #[test]
    fn parse_invalid_character() {
        let mut puzzle = String::from("x");
        puzzle.push_str(&SOLVED[1..]);
        assert_eq!(Err(PuzzleParseError::InvalidCharacter),
            SudokuGrid::parse(&puzzle));
    }

    #[test]
    fn puzzle_string_round_trip() {
        let mut puzzle = String::from("00");
        puzzle.push_str(&SOLVED[2..]);
        let grid = SudokuGrid::parse(&puzzle).unwrap();

        assert_eq!(puzzle, grid.to_puzzle_string());
        assert_eq!(grid, SudokuGrid::parse(&grid.to_puzzle_string()).unwrap());
    }

    #[test]
    fn set_marks_cell_as_deduced() {
        let mut grid = SudokuGrid::empty();
        let cell = Cell::at(3, 5).unwrap();
        grid.set(cell, 7).unwrap();

        assert_eq!(Some(7), grid.get(cell));
        assert!(!grid.is_original(cell));
    }

    #[test]
    fn set_rejects_invalid_digit() {
        let mut grid = SudokuGrid::empty();
        let cell = Cell::at(0, 0).unwrap();

        assert_eq!(Err(SudokuError::InvalidDigit), grid.set(cell, 0));
        assert_eq!(Err(SudokuError::InvalidDigit), grid.set(cell, 10));
    }

    #[test]
    fn serde_round_trip_preserves_cells() {
        let mut puzzle = String::from("00");
        puzzle.push_str(&SOLVED[2..]);
        let grid = SudokuGrid::parse(&puzzle).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(format!("\"{}\"", puzzle), json);
        assert_eq!(grid, serde_json::from_str(&json).unwrap());
    }

    #[test]
    fn deserialization_rejects_invalid_puzzles() {
        assert!(serde_json::from_str::<SudokuGrid>("\"123\"").is_err());
    }

    #[test]
    fn subset_relation() {
        let full = SudokuGrid::parse(SOLVED).unwrap();
        let mut partial = full.clone();
        partial.clear(Cell::at(4, 4).unwrap());

        assert!(partial.is_subset(&full));
        assert!(!full.is_subset(&partial));
        assert!(SudokuGrid::empty().is_subset(&partial));
    }
}
