//! Draughts-Rust: an English draughts (checkers) rules engine.
//!
//! The engine validates and applies moves on an 8x8 board: direction rules
//! for men and kings, mandatory captures, multi-jump continuation,
//! promotion and victory detection. A small parser turns commands such as
//! `"B3 to A4"` into moves, and a driver runs the turn loop over any reader
//! and writer.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, symbols and driver defaults
//! - [`position`] - Coordinates, directions and square notation
//! - [`error`] - Reasons a move is rejected
//! - [`board`] - The board engine
//! - [`command`] - Move command parsing
//! - [`playout`] - Seeded random self-play
//! - [`driver`] - Interactive and scripted turn loop, move log
//!
//! ## Example
//!
//! ```
//! use draughts_rust::board::{Board, MoveOutcome, Player};
//! use draughts_rust::command::parse_move;
//!
//! let mut board = Board::new();
//! let outcome = board.play(parse_move("B3 to A4").unwrap()).unwrap();
//! assert_eq!(outcome, MoveOutcome::TurnPassed);
//! assert_eq!(board.turn(), Player::White);
//! ```

pub mod board;
pub mod command;
pub mod constants;
pub mod driver;
pub mod error;
pub mod playout;
pub mod position;
