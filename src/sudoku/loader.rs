#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Turning token streams into populated boards.
//!
//! The loader consumes a sequence of [`Token`]s, one per cell in row-major
//! order, and produces a [`LoadedBoard`]: the populated [`Board`] plus the
//! *solved* list (the givens, kept for display) and the *unsolved* list
//! (the cells the search must fill, in insertion order).
//!
//! Givens are validated against the group masks as they are inserted, so
//! a duplicate in a row, column or block is caught at the first cell that
//! exhibits it and loading halts with
//! [`SudokuError::BoardInconsistent`] before any search starts.
//!
//! Tolerance policy: a symbol token outside `1..=N` is skipped without
//! consuming a board slot. This is deliberate leniency for noisy input,
//! not an error.
//!
//! [`tokenize`] covers the textual side: `#` starts a line comment, `-`
//! and `0` denote an empty cell, and boards larger than 9 symbols switch
//! from one-character-per-cell to whitespace-separated tokens.

use crate::sudoku::board::Board;
use crate::sudoku::cell::CellRef;
use crate::sudoku::error::SudokuError;

/// One raw input token: either an empty cell or a candidate symbol.
///
/// `Symbol` values are not range-checked here; the loader skips
/// out-of-range symbols per the tolerance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// An explicitly empty cell.
    Empty,
    /// A (claimed) symbol for the next cell.
    Symbol(usize),
}

/// The result of loading: a populated board and the two cell lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    /// The board with every given placed.
    pub board: Board,
    /// Cells whose values were given in the input, in row-major order.
    pub solved: Vec<CellRef>,
    /// Cells the search must fill, in row-major (insertion) order. The
    /// loader applies no heuristic ordering; that is the solver's job.
    pub unsolved: Vec<CellRef>,
}

/// Populates a `size` x `size` board from `tokens`.
///
/// Exactly `size * size` cells are filled; surplus tokens are left
/// unconsumed.
///
/// # Errors
///
/// - [`SudokuError::MalformedSize`] when `size` is not a perfect square.
/// - [`SudokuError::BoardInconsistent`] when a given conflicts with an
///   earlier given; loading halts at that cell.
/// - [`SudokuError::TruncatedInput`] when the tokens run out early.
pub fn load<I>(size: usize, tokens: I) -> Result<LoadedBoard, SudokuError>
where
    I: IntoIterator<Item = Token>,
{
    let mut board = Board::new(size)?;
    let total = board.cell_count();
    let mut solved = Vec::new();
    let mut unsolved = Vec::new();
    let mut index = 0;

    for token in tokens {
        if index == total {
            break;
        }
        match token {
            Token::Empty => {
                unsolved.push(board.cell(index));
                index += 1;
            }
            Token::Symbol(symbol) if (1..=size).contains(&symbol) => {
                let cell = board.cell(index);
                if !board.check(cell, symbol) {
                    return Err(SudokuError::BoardInconsistent { cell, symbol });
                }
                board.place(cell, symbol);
                solved.push(cell);
                index += 1;
            }
            Token::Symbol(symbol) => {
                // Out of range: tolerated, the slot stays unconsumed.
                log::trace!("skipping out-of-range symbol {symbol} before cell {index}");
            }
        }
    }

    if index < total {
        return Err(SudokuError::TruncatedInput {
            expected: total,
            found: index,
        });
    }

    Ok(LoadedBoard {
        board,
        solved,
        unsolved,
    })
}

/// Extracts cell tokens from text for a board of `size` symbols.
///
/// Comments run from `#` to end of line. For `size <= 9` every character
/// is a candidate token: `-` and `0` are empty, digits `1..=9` are
/// symbols, anything else is skipped. For larger sizes tokens are
/// whitespace-separated: `-` and `0` are empty, decimal integers are
/// symbols, unparsable words are skipped.
#[must_use]
pub fn tokenize(input: &str, size: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    for line in input.lines() {
        let line = line.split('#').next().unwrap_or("");
        if size <= 9 {
            for ch in line.chars() {
                match ch {
                    '-' | '0' => tokens.push(Token::Empty),
                    '1'..='9' => {
                        tokens.push(Token::Symbol(ch as usize - '0' as usize));
                    }
                    _ => {}
                }
            }
        } else {
            for word in line.split_whitespace() {
                match word {
                    "-" | "0" => tokens.push(Token::Empty),
                    _ => {
                        if let Ok(symbol) = word.parse::<usize>() {
                            tokens.push(Token::Symbol(symbol));
                        }
                    }
                }
            }
        }
    }
    tokens
}

/// Convenience wrapper: tokenizes `input` and loads the board.
///
/// # Errors
///
/// Same conditions as [`load`].
pub fn load_str(input: &str, size: usize) -> Result<LoadedBoard, SudokuError> {
    load(size, tokenize(input, size))
}
