use crate::bitboard::BitBoard;
use crate::color::Color;
use crate::file::File;
use crate::square::Square;

/// What castle rights does a particular player have?
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CastleRights {
    NoRights,
    KingSide,
    QueenSide,
    Both,
}

/// How many different types of `CastleRights` are there?
pub const NUM_CASTLE_RIGHTS: usize = 4;

/// Enumerate all castle rights.
pub const ALL_CASTLE_RIGHTS: [CastleRights; NUM_CASTLE_RIGHTS] = [
    CastleRights::NoRights,
    CastleRights::KingSide,
    CastleRights::QueenSide,
    CastleRights::Both,
];

/// Which rights are lost when a piece moves from, or is captured on, each square.
const CASTLES_PER_SQUARE: [[u8; 64]; 2] = [
    [
        2, 0, 0, 0, 3, 0, 0, 1, // 1
        0, 0, 0, 0, 0, 0, 0, 0, // 2
        0, 0, 0, 0, 0, 0, 0, 0, // 3
        0, 0, 0, 0, 0, 0, 0, 0, // 4
        0, 0, 0, 0, 0, 0, 0, 0, // 5
        0, 0, 0, 0, 0, 0, 0, 0, // 6
        0, 0, 0, 0, 0, 0, 0, 0, // 7
        0, 0, 0, 0, 0, 0, 0, 0, // 8
    ],
    [
        0, 0, 0, 0, 0, 0, 0, 0, // 1
        0, 0, 0, 0, 0, 0, 0, 0, // 2
        0, 0, 0, 0, 0, 0, 0, 0, // 3
        0, 0, 0, 0, 0, 0, 0, 0, // 4
        0, 0, 0, 0, 0, 0, 0, 0, // 5
        0, 0, 0, 0, 0, 0, 0, 0, // 6
        0, 0, 0, 0, 0, 0, 0, 0, // 7
        2, 0, 0, 0, 3, 0, 0, 1, // 8
    ],
];

impl CastleRights {
    /// Can I castle kingside?
    #[inline]
    pub fn has_kingside(&self) -> bool {
        self.to_index() & 1 == 1
    }

    /// Can I castle queenside?
    #[inline]
    pub fn has_queenside(&self) -> bool {
        self.to_index() & 2 == 2
    }

    /// Do I have the right to castle towards this side?
    #[inline]
    pub fn has(&self, castle_type: CastleType) -> bool {
        match castle_type {
            CastleType::Kingside => self.has_kingside(),
            CastleType::Queenside => self.has_queenside(),
        }
    }

    /// The rights `color` loses when a move starts or ends on `sq`.
    #[inline]
    pub fn square_to_castle_rights(color: Color, sq: Square) -> CastleRights {
        CastleRights::from_index(CASTLES_PER_SQUARE[color.to_index()][sq.to_index()] as usize)
    }

    /// Remove castle rights, and return a new `CastleRights`.
    #[inline]
    pub fn remove(&self, remove: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() & !remove.to_index())
    }

    /// Add some castle rights, and return a new `CastleRights`.
    #[inline]
    pub fn add(&self, add: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() | add.to_index())
    }

    /// Convert `CastleRights` to `usize` for table lookups
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert `usize` to `CastleRights`.  Only the two low bits are used.
    #[inline]
    pub fn from_index(i: usize) -> CastleRights {
        ALL_CASTLE_RIGHTS[i & 3]
    }

    /// Convert the castle rights to an FEN compatible string.
    ///
    /// ```
    /// use chess_movegen::{CastleRights, Color};
    ///
    /// assert_eq!(CastleRights::NoRights.to_string(Color::White), "");
    /// assert_eq!(CastleRights::Both.to_string(Color::Black), "kq");
    /// assert_eq!(CastleRights::KingSide.to_string(Color::White), "K");
    /// assert_eq!(CastleRights::QueenSide.to_string(Color::Black), "q");
    /// ```
    pub fn to_string(&self, color: Color) -> String {
        let result = match *self {
            CastleRights::NoRights => "",
            CastleRights::KingSide => "k",
            CastleRights::QueenSide => "q",
            CastleRights::Both => "kq",
        };

        if color == Color::White {
            result.to_uppercase()
        } else {
            result.to_string()
        }
    }
}

/// Which way is the king castling?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum CastleType {
    Kingside,
    Queenside,
}

pub const ALL_CASTLE_TYPES: [CastleType; 2] = [CastleType::Kingside, CastleType::Queenside];

impl CastleType {
    /// Where the king lands.
    #[inline]
    pub fn king_target(&self, color: Color) -> Square {
        match *self {
            CastleType::Kingside => Square::make_square(color.to_my_backrank(), File::G),
            CastleType::Queenside => Square::make_square(color.to_my_backrank(), File::C),
        }
    }

    /// The square the king crosses on its way to `king_target`.  This is also where the rook
    /// lands.
    #[inline]
    pub fn king_pass(&self, color: Color) -> Square {
        match *self {
            CastleType::Kingside => Square::make_square(color.to_my_backrank(), File::F),
            CastleType::Queenside => Square::make_square(color.to_my_backrank(), File::D),
        }
    }

    /// Where the rook starts.
    #[inline]
    pub fn rook_origin(&self, color: Color) -> Square {
        match *self {
            CastleType::Kingside => Square::make_square(color.to_my_backrank(), File::H),
            CastleType::Queenside => Square::make_square(color.to_my_backrank(), File::A),
        }
    }

    /// Where the rook lands.
    #[inline]
    pub fn rook_target(&self, color: Color) -> Square {
        self.king_pass(color)
    }

    /// What squares need to be empty to castle this way?  These are all the squares strictly
    /// between the king and the rook.
    pub fn empty_squares(&self, color: Color) -> BitBoard {
        let files: &[File] = match *self {
            CastleType::Kingside => &[File::F, File::G],
            CastleType::Queenside => &[File::B, File::C, File::D],
        };
        files.iter().fold(BitBoard::new(0), |bb, file| {
            bb | BitBoard::from_square(Square::make_square(color.to_my_backrank(), *file))
        })
    }

    /// Which way does a king move that lands on `target` castle?
    #[inline]
    pub fn from_king_target(target: Square) -> Option<CastleType> {
        match target.get_file() {
            File::G => Some(CastleType::Kingside),
            File::C => Some(CastleType::Queenside),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        assert_eq!(
            CastleRights::KingSide.add(CastleRights::QueenSide),
            CastleRights::Both
        );
        assert_eq!(
            CastleRights::Both.remove(CastleRights::KingSide),
            CastleRights::QueenSide
        );
        assert!(CastleRights::Both.has(CastleType::Kingside));
        assert!(!CastleRights::KingSide.has(CastleType::Queenside));
    }

    #[test]
    fn moving_from_corners_loses_rights() {
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::White, Square::E1),
            CastleRights::Both
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::White, Square::H1),
            CastleRights::KingSide
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::Black, Square::A8),
            CastleRights::QueenSide
        );
        assert_eq!(
            CastleRights::square_to_castle_rights(Color::Black, Square::A1),
            CastleRights::NoRights
        );
    }

    #[test]
    fn castling_squares() {
        assert_eq!(CastleType::Kingside.king_target(Color::White), Square::G1);
        assert_eq!(CastleType::Kingside.king_pass(Color::White), Square::F1);
        assert_eq!(CastleType::Queenside.king_pass(Color::Black), Square::D8);
        assert_eq!(CastleType::Queenside.rook_origin(Color::Black), Square::A8);
        assert_eq!(
            CastleType::Queenside
                .empty_squares(Color::White)
                .collect::<Vec<_>>(),
            vec![Square::B1, Square::C1, Square::D1]
        );
        assert_eq!(
            CastleType::from_king_target(Square::C8),
            Some(CastleType::Queenside)
        );
        assert_eq!(CastleType::from_king_target(Square::F1), None);
    }
}
