use crate::piece::{Piece, PieceType, ALL_PIECE_TYPES, NUM_PIECES};
use crate::square::Square;
use std::fmt;

/// What kind of transition does a `Move` make?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    Normal,
    PawnDouble,
    PawnPromotion,
    EnPassant,
    Castling,
}

/// How many move types are there?
pub const NUM_MOVE_TYPES: usize = 5;

/// List all move types.
pub const ALL_MOVE_TYPES: [MoveType; NUM_MOVE_TYPES] = [
    MoveType::Normal,
    MoveType::PawnDouble,
    MoveType::PawnPromotion,
    MoveType::EnPassant,
    MoveType::Castling,
];

impl MoveType {
    /// Convert the `MoveType` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

const TYPE_SHIFT: u32 = 0;
const TYPE_MASK: u32 = 0x7;
const ORIGIN_SHIFT: u32 = 3;
const TARGET_SHIFT: u32 = 9;
const SQUARE_MASK: u32 = 0x3F;
const ORIGIN_PIECE_SHIFT: u32 = 15;
const CAPTURED_PIECE_SHIFT: u32 = 19;
const PIECE_MASK: u32 = 0xF;
const NO_PIECE: u32 = PIECE_MASK;
const PROMOTION_SHIFT: u32 = 23;
const PROMOTION_MASK: u32 = 0x7;
const NO_PROMOTION: u32 = PROMOTION_MASK;

/// Represent a move in memory.
///
/// Every field is packed into a single `u32`:
///
/// ```text
/// bits  0..3   move type
/// bits  3..9   origin square
/// bits  9..15  target square
/// bits 15..19  origin piece
/// bits 19..23  captured piece (all ones for none)
/// bits 23..26  promotion piece type (all ones for none)
/// ```
///
/// Two moves are equal exactly when all of their fields are equal.
///
/// ```
/// use chess_movegen::{Color, Move, MoveType, Piece, PieceType, Square};
///
/// let pawn = Piece::new(Color::White, PieceType::Pawn);
/// let rook = Piece::new(Color::Black, PieceType::Rook);
/// let m = Move::new(
///     MoveType::PawnPromotion,
///     Square::G7,
///     Square::H8,
///     pawn,
///     Some(rook),
///     Some(PieceType::Queen),
/// );
///
/// assert_eq!(m.get_origin(), Square::G7);
/// assert_eq!(m.get_captured_piece(), Some(rook));
/// assert_eq!(m.to_string(), "g7h8q");
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Move(u32);

impl Move {
    /// Create a new move from all of its fields.
    ///
    /// A promotion piece type is only meaningful for `MoveType::PawnPromotion`, and must then be
    /// one of queen, rook, bishop or knight.
    #[inline]
    pub fn new(
        move_type: MoveType,
        origin: Square,
        target: Square,
        origin_piece: Piece,
        captured_piece: Option<Piece>,
        promotion: Option<PieceType>,
    ) -> Move {
        debug_assert_eq!(
            move_type == MoveType::PawnPromotion,
            promotion.is_some(),
            "promotion piece given for a {:?} move",
            move_type
        );
        debug_assert!(promotion.map_or(true, |p| p.is_promotion()));
        debug_assert!(origin != target);

        let captured = captured_piece.map_or(NO_PIECE, |p| p.to_index() as u32);
        let promotion = promotion.map_or(NO_PROMOTION, |p| p.to_index() as u32);

        Move(
            (move_type.to_index() as u32) << TYPE_SHIFT
                | (origin.to_int() as u32) << ORIGIN_SHIFT
                | (target.to_int() as u32) << TARGET_SHIFT
                | (origin_piece.to_index() as u32) << ORIGIN_PIECE_SHIFT
                | captured << CAPTURED_PIECE_SHIFT
                | promotion << PROMOTION_SHIFT,
        )
    }

    /// What kind of move is this?
    #[inline]
    pub fn get_type(&self) -> MoveType {
        ALL_MOVE_TYPES[((self.0 >> TYPE_SHIFT) & TYPE_MASK) as usize]
    }

    /// Get the origin square (square the piece is currently on).
    #[inline]
    pub fn get_origin(&self) -> Square {
        Square::new(((self.0 >> ORIGIN_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Get the target square (square the piece is going to).
    #[inline]
    pub fn get_target(&self) -> Square {
        Square::new(((self.0 >> TARGET_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Get the piece that moves.
    #[inline]
    pub fn get_origin_piece(&self) -> Piece {
        Piece::from_index(((self.0 >> ORIGIN_PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    /// Get the piece this move captures, if any.  For en passant this is the pawn behind the
    /// target square.
    #[inline]
    pub fn get_captured_piece(&self) -> Option<Piece> {
        let captured = (self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK;
        if captured == NO_PIECE {
            None
        } else {
            debug_assert!((captured as usize) < NUM_PIECES);
            Some(Piece::from_index(captured as usize))
        }
    }

    /// Get the promotion piece type (maybe).
    #[inline]
    pub fn get_promotion(&self) -> Option<PieceType> {
        let promotion = (self.0 >> PROMOTION_SHIFT) & PROMOTION_MASK;
        if promotion == NO_PROMOTION {
            None
        } else {
            Some(ALL_PIECE_TYPES[promotion as usize])
        }
    }

    /// Does this move take something?
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.get_captured_piece().is_some()
    }

    /// The raw packed value.
    #[inline]
    pub fn to_int(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get_promotion() {
            None => write!(f, "{}{}", self.get_origin(), self.get_target()),
            Some(x) => write!(f, "{}{}{}", self.get_origin(), self.get_target(), x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ALL_COLORS};
    use crate::piece::{ALL_PIECE_TYPES, PROMOTION_PIECES};
    use crate::square::ALL_SQUARES;

    fn decode(
        m: Move,
    ) -> (
        MoveType,
        Square,
        Square,
        Piece,
        Option<Piece>,
        Option<PieceType>,
    ) {
        (
            m.get_type(),
            m.get_origin(),
            m.get_target(),
            m.get_origin_piece(),
            m.get_captured_piece(),
            m.get_promotion(),
        )
    }

    #[test]
    fn decode_inverts_encode() {
        let mut captures = vec![None];
        for color in ALL_COLORS.iter() {
            for piece_type in ALL_PIECE_TYPES.iter() {
                captures.push(Some(Piece::new(*color, *piece_type)));
            }
        }

        for origin in ALL_SQUARES.iter().step_by(7) {
            for target in ALL_SQUARES.iter().rev().step_by(5) {
                if origin == target {
                    continue;
                }
                for mover in 0..NUM_PIECES {
                    let mover = Piece::from_index(mover);
                    for captured in captures.iter() {
                        for move_type in ALL_MOVE_TYPES.iter() {
                            let promotions = if *move_type == MoveType::PawnPromotion {
                                PROMOTION_PIECES.iter().map(|p| Some(*p)).collect()
                            } else {
                                vec![None]
                            };
                            for promotion in promotions {
                                let fields =
                                    (*move_type, *origin, *target, mover, *captured, promotion);
                                let m = Move::new(
                                    fields.0, fields.1, fields.2, fields.3, fields.4, fields.5,
                                );
                                assert_eq!(decode(m), fields);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn equality_covers_every_field() {
        let pawn = Piece::new(Color::White, PieceType::Pawn);
        let knight = Piece::new(Color::Black, PieceType::Knight);
        let quiet = Move::new(MoveType::Normal, Square::E2, Square::E3, pawn, None, None);
        let double = Move::new(MoveType::PawnDouble, Square::E2, Square::E4, pawn, None, None);
        let capture = Move::new(
            MoveType::Normal,
            Square::E2,
            Square::E3,
            pawn,
            Some(knight),
            None,
        );

        assert_eq!(
            quiet,
            Move::new(MoveType::Normal, Square::E2, Square::E3, pawn, None, None)
        );
        assert_ne!(quiet, capture);
        assert_ne!(quiet, double);
        assert!(capture.is_capture());
        assert!(!double.is_capture());
    }

    #[test]
    fn uci_text() {
        let king = Piece::new(Color::Black, PieceType::King);
        let castle = Move::new(MoveType::Castling, Square::E8, Square::C8, king, None, None);
        assert_eq!(castle.to_string(), "e8c8");

        let pawn = Piece::new(Color::Black, PieceType::Pawn);
        let promotion = Move::new(
            MoveType::PawnPromotion,
            Square::B2,
            Square::B1,
            pawn,
            None,
            Some(PieceType::Knight),
        );
        assert_eq!(promotion.to_string(), "b2b1n");
    }
}
