//! This module contains the error and result definitions used in this crate.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Miscellaneous errors that can occur when manipulating grids in the
/// [root module](../index.html). Errors raised while parsing a puzzle string
/// are covered by [PuzzleParseError](enum.PuzzleParseError.html) instead.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that a digit outside the range 1 to 9 was provided to an
    /// operation that expects a final cell value. Note that 0 is only
    /// meaningful inside serialized puzzle strings, never as a cell value.
    InvalidDigit,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the 9x9 grid, that is, at least one of them is greater than 8.
    OutOfBounds
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::InvalidDigit =>
                write!(f, "digit outside the range 1 to 9"),
            SudokuError::OutOfBounds =>
                write!(f, "cell coordinates outside the 9x9 grid")
        }
    }
}

impl Error for SudokuError { }

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a puzzle string
/// into a [SudokuGrid](../struct.SudokuGrid.html). Parsing is purely
/// syntactic; a string that parses successfully may still describe a puzzle
/// that no technique can solve, which is a normal solving outcome and not an
/// error.
#[derive(Debug, Eq, PartialEq)]
pub enum PuzzleParseError {

    /// Indicates that the puzzle string does not contain exactly 81
    /// characters, one per cell in row-major order.
    WrongLength,

    /// Indicates that the puzzle string contains a character other than the
    /// digits '0' (empty cell) through '9'.
    InvalidCharacter
}

impl Display for PuzzleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleParseError::WrongLength =>
                write!(f, "puzzle string is not exactly 81 characters long"),
            PuzzleParseError::InvalidCharacter =>
                write!(f, "puzzle string contains a character other than \
                    '0' to '9'")
        }
    }
}

impl Error for PuzzleParseError { }

/// Syntactic sugar for `Result<V, PuzzleParseError>`.
pub type PuzzleParseResult<V> = Result<V, PuzzleParseError>;
