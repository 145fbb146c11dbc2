use crate::color::{Color, ALL_COLORS};
use crate::direction::{
    Direction, BISHOP_DIRECTIONS, KING_DIRECTIONS, KNIGHT_DIRECTIONS, PAWN_DIRECTIONS,
    QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
use std::fmt;

/// Represent a chess piece type as a very simple enum
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_PIECE_TYPES: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECE_TYPES: [PieceType; NUM_PIECE_TYPES] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// What pieces can I promote to, in the order they are generated?
pub const PROMOTION_PIECES: [PieceType; NUM_PROMOTION_PIECES] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 325;
pub const BISHOP_VALUE: i32 = 325;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 975;
/// Only ever used for move-ordering arithmetic, never for material balance.
pub const KING_VALUE: i32 = 20000;

impl PieceType {
    /// Convert the `PieceType` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Does this piece keep moving along a direction until it is blocked?
    #[inline]
    pub fn is_sliding(&self) -> bool {
        match *self {
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => true,
            PieceType::Pawn | PieceType::Knight | PieceType::King => false,
        }
    }

    /// The material value of this piece.
    #[inline]
    pub fn value(&self) -> i32 {
        match *self {
            PieceType::Pawn => PAWN_VALUE,
            PieceType::Knight => KNIGHT_VALUE,
            PieceType::Bishop => BISHOP_VALUE,
            PieceType::Rook => ROOK_VALUE,
            PieceType::Queen => QUEEN_VALUE,
            PieceType::King => KING_VALUE,
        }
    }

    /// The directions this piece moves in.  Only pawns care about the color.
    #[inline]
    pub fn directions(&self, color: Color) -> &'static [Direction] {
        match *self {
            PieceType::Pawn => &PAWN_DIRECTIONS[color.to_index()],
            PieceType::Knight => &KNIGHT_DIRECTIONS,
            PieceType::Bishop => &BISHOP_DIRECTIONS,
            PieceType::Rook => &ROOK_DIRECTIONS,
            PieceType::Queen => &QUEEN_DIRECTIONS,
            PieceType::King => &KING_DIRECTIONS,
        }
    }

    /// Is this a piece a pawn may promote to?
    #[inline]
    pub fn is_promotion(&self) -> bool {
        PROMOTION_PIECES.contains(self)
    }

    /// Convert a piece type to its lowercase letter.
    pub fn to_char(&self) -> char {
        match *self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A piece of a particular color.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    color: Color,
    piece_type: PieceType,
}

/// How many colored pieces are there?
pub const NUM_PIECES: usize = NUM_PIECE_TYPES * 2;

impl Piece {
    #[inline]
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { color, piece_type }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Convert the `Piece` to a `usize` in `0..NUM_PIECES`, white pieces first.
    #[inline]
    pub fn to_index(&self) -> usize {
        self.color.to_index() * NUM_PIECE_TYPES + self.piece_type.to_index()
    }

    /// The inverse of `to_index`.
    /// Note: It is invalid to pass in a number >= NUM_PIECES.  Doing so will panic.
    #[inline]
    pub fn from_index(i: usize) -> Piece {
        Piece::new(
            ALL_COLORS[i / NUM_PIECE_TYPES],
            ALL_PIECE_TYPES[i % NUM_PIECE_TYPES],
        )
    }

    /// Parse a FEN piece letter.  Uppercase is white, lowercase is black.
    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, piece_type))
    }

    /// Convert a piece to its FEN letter.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_type.to_char().to_ascii_uppercase(),
            Color::Black => self.piece_type.to_char(),
        }
    }

    /// The directions this piece moves in.
    #[inline]
    pub fn directions(&self) -> &'static [Direction] {
        self.piece_type.directions(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
