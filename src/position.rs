use crate::bitboard::BitBoard;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceType};
use crate::square::Square;

/// Everything the move generator needs to know about, and do to, a chess position.
///
/// The generator never copies a position.  It reads occupancy, asks attack questions, and
/// checks legality by calling `make_move` followed by `undo_move` on the same position, so
/// `undo_move` must restore exactly the state `make_move` started from.  Between those two
/// calls the position is only valid for that one move, and nothing else may touch it.
///
/// Implementations may assume they are only handed moves produced by the generator for the
/// current position.
pub trait Position {
    /// The squares occupied by `color`'s pieces of type `piece_type`.
    fn pieces(&self, color: Color, piece_type: PieceType) -> BitBoard;

    /// What, if anything, is on `square`?
    fn piece_on(&self, square: Square) -> Option<Piece>;

    /// Who moves next?
    fn side_to_move(&self) -> Color;

    /// Which ways may `color` still castle?
    fn castle_rights(&self, color: Color) -> CastleRights;

    /// The square a pawn may capture onto en passant, if the last move was a double step.
    fn en_passant(&self) -> Option<Square>;

    /// Play `chess_move` for the side to move.
    fn make_move(&mut self, chess_move: Move);

    /// Take back `chess_move`, which must be the last move made.
    fn undo_move(&mut self, chess_move: Move);

    /// Does any piece of color `by` attack `square`?
    fn is_attacked(&self, square: Square, by: Color) -> bool;

    /// Where is `color`'s king?
    #[inline]
    fn king_square(&self, color: Color) -> Square {
        let king = self.pieces(color, PieceType::King).to_square();
        debug_assert!(king.is_some(), "{:?} has no king", color);
        king.unwrap_or_default()
    }

    /// Is `color`'s king attacked?
    #[inline]
    fn is_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), !color)
    }
}
