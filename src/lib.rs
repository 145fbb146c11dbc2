#![doc(html_root_url = "https://docs.rs/chess-movegen/0.1.0")]
//! # Legal move generation and move ordering for chess search
//!
//! This crate generates the moves of a chess position the way a search wants them: every legal
//! move, or only the captures in quiescence, sorted so the most promising moves come first.
//!
//! Generation runs against anything implementing `Position`.  `Board` is the one that ships
//! with the crate.
//!
//! ## Example
//!
//! ```
//! use chess_movegen::{Board, MoveGenerator, MoveType, Position};
//!
//! let mut board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
//!     .expect("valid fen");
//! let mut generator = MoveGenerator::new();
//!
//! let is_check = board.is_check(board.side_to_move());
//! let moves = generator.get_legal_moves(&mut board, 1, is_check);
//! assert_eq!(moves.len(), 48);
//!
//! // captures of the most valuable piece by the cheapest attacker come first
//! let best = moves[0].get_move();
//! assert!(best.is_capture());
//! assert_eq!(moves.iter().filter(|e| e.get_move().get_type() == MoveType::Castling).count(), 2);
//! ```

mod bitboard;
pub use crate::bitboard::*;

mod board;
pub use crate::board::*;

mod board_builder;
pub use crate::board_builder::*;

mod castle_rights;
pub use crate::castle_rights::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod direction;
pub use crate::direction::*;

mod error;
pub use crate::error::*;

mod file;
pub use crate::file::*;

mod move_list;
pub use crate::move_list::*;

mod movegen;
pub use crate::movegen::*;

mod perft;
pub use crate::perft::*;

mod piece;
pub use crate::piece::*;

mod position;
pub use crate::position::*;

mod rank;
pub use crate::rank::*;

mod square;
pub use crate::square::*;
