use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::file::{File, ALL_FILES};
use crate::piece::{Piece, PieceType};
use crate::position::Position;
use crate::rank::{Rank, ALL_RANKS};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Represents a chess position that has *not* been validated for legality.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess board manually in code.
/// * You want to read or write FEN.
///
/// A `Board` refuses positions the move generator cannot work with.  This structure will not.
///
/// ```
/// use chess_movegen::{BoardBuilder, Board, Square, Color, Piece, PieceType};
/// use std::convert::TryFrom;
///
/// let mut position = BoardBuilder::new();
/// position.piece(Square::A1, Piece::new(Color::White, PieceType::King));
/// position.piece(Square::A8, Piece::new(Color::Black, PieceType::Rook));
/// position.piece(Square::D1, Piece::new(Color::Black, PieceType::King));
///
/// // You can index the position by the square:
/// assert_eq!(position[Square::A1], Some(Piece::new(Color::White, PieceType::King)));
///
/// // White is in check, but that's ok, it's white's turn to move.
/// assert!(Board::try_from(&position).is_ok());
///
/// // Now White is in check, but Black is ready to move.  This position is invalid.
/// position.side_to_move(Color::Black);
/// assert!(Board::try_from(position).is_err());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<Piece>; NUM_SQUARES],
    side_to_move: Color,
    castle_rights: [CastleRights; 2],
    en_passant: Option<Square>,
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    ///
    /// * No pieces are on the board
    /// * `CastleRights` are empty for both sides
    /// * `en_passant` is not set
    /// * `side_to_move` is Color::White
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights, CastleRights::NoRights],
            en_passant: None,
        }
    }

    /// Set up a board with everything pre-loaded.
    ///
    /// ```
    /// use chess_movegen::{BoardBuilder, Board, Square, Color, Piece, PieceType, CastleRights};
    /// use std::convert::TryInto;
    ///
    /// # use chess_movegen::Error;
    /// # fn main() -> Result<(), Error> {
    /// let board: Board = BoardBuilder::setup(
    ///         &[
    ///             (Square::A1, Piece::new(Color::White, PieceType::King)),
    ///             (Square::H8, Piece::new(Color::Black, PieceType::King)),
    ///         ],
    ///         Color::Black,
    ///         CastleRights::NoRights,
    ///         CastleRights::NoRights,
    ///         None)
    ///     .try_into()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, Piece)>,
        side_to_move: Color,
        white_castle_rights: CastleRights,
        black_castle_rights: CastleRights,
        en_passant: Option<Square>,
    ) -> BoardBuilder {
        let mut result = BoardBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move,
            castle_rights: [white_castle_rights, black_castle_rights],
            en_passant,
        };

        for (square, piece) in pieces.into_iter() {
            result.pieces[square.to_index()] = Some(*piece);
        }

        result
    }

    /// Get the current player
    ///
    /// ```
    /// use chess_movegen::{BoardBuilder, Board, Color};
    ///
    /// let bb: BoardBuilder = Board::default().into();
    /// assert_eq!(bb.get_side_to_move(), Color::White);
    /// ```
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Get the castle rights for a player
    pub fn get_castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    /// Get the square a pawn may capture onto en passant, if any.
    ///
    /// ```
    /// use chess_movegen::{BoardBuilder, Square};
    /// use std::str::FromStr;
    ///
    /// let bb = BoardBuilder::from_str("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("valid fen");
    /// assert_eq!(bb.get_en_passant(), Some(Square::D6));
    /// ```
    pub fn get_en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set the side to move on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn side_to_move<'a>(&'a mut self, color: Color) -> &'a mut Self {
        self.side_to_move = color;
        self
    }

    /// Set the castle rights for a particular color on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn castle_rights<'a>(
        &'a mut self,
        color: Color,
        castle_rights: CastleRights,
    ) -> &'a mut Self {
        self.castle_rights[color.to_index()] = castle_rights;
        self
    }

    /// Set a piece on a square.
    ///
    /// Note that this can and will overwrite another piece on the square if need.
    ///
    /// Note also that this will not update your castle rights.
    pub fn piece<'a>(&'a mut self, square: Square, piece: Piece) -> &'a mut Self {
        self[square] = Some(piece);
        self
    }

    /// Clear a square on the board.
    ///
    /// Note that this will not update your castle rights.
    pub fn clear_square<'a>(&'a mut self, square: Square) -> &'a mut Self {
        self[square] = None;
        self
    }

    /// Set or clear the en passant target square.
    pub fn en_passant<'a>(&'a mut self, square: Option<Square>) -> &'a mut Self {
        self.en_passant = square;
        self
    }

    fn invalid_fen(fen: &str) -> Error {
        log::debug!("rejecting fen {:?}", fen);
        Error::InvalidFen {
            fen: fen.to_string(),
        }
    }

    fn parse_castle_rights(castles: &str, color: Color) -> CastleRights {
        let (king, queen) = match color {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };

        match (castles.contains(king), castles.contains(queen)) {
            (true, true) => CastleRights::Both,
            (true, false) => CastleRights::KingSide,
            (false, true) => CastleRights::QueenSide,
            (false, false) => CastleRights::NoRights,
        }
    }
}

impl Index<Square> for BoardBuilder {
    type Output = Option<Piece>;

    fn index<'a>(&'a self, index: Square) -> &'a Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for BoardBuilder {
    fn index_mut<'a>(&'a mut self, index: Square) -> &'a mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut count = 0;
        for rank in ALL_RANKS.iter().rev() {
            for file in ALL_FILES.iter() {
                let square = Square::make_square(*rank, *file);

                match self[square] {
                    Some(piece) => {
                        if count != 0 {
                            write!(f, "{}", count)?;
                            count = 0;
                        }
                        write!(f, "{}", piece)?;
                    }
                    None => count += 1,
                }
            }

            if count != 0 {
                write!(f, "{}", count)?;
            }

            if *rank != Rank::First {
                write!(f, "/")?;
            }
            count = 0;
        }

        write!(f, " ")?;

        if self.side_to_move == Color::White {
            write!(f, "w ")?;
        } else {
            write!(f, "b ")?;
        }

        for color in ALL_COLORS.iter() {
            write!(f, "{}", self.get_castle_rights(*color).to_string(*color))?;
        }
        if self.castle_rights[0] == CastleRights::NoRights
            && self.castle_rights[1] == CastleRights::NoRights
        {
            write!(f, "-")?;
        }

        write!(f, " ")?;
        if let Some(sq) = self.get_en_passant() {
            write!(f, "{}", sq)?;
        } else {
            write!(f, "-")?;
        }

        write!(f, " 0 1")
    }
}

impl Default for BoardBuilder {
    fn default() -> BoardBuilder {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut result = BoardBuilder::new();
        for color in ALL_COLORS.iter() {
            for (file, piece_type) in ALL_FILES.iter().zip(BACK_RANK.iter()) {
                let back = Square::make_square(color.to_my_backrank(), *file);
                result.piece(back, Piece::new(*color, *piece_type));
                if let Some(front) = back.forward(*color) {
                    result.piece(front, Piece::new(*color, PieceType::Pawn));
                }
            }
            result.castle_rights(*color, CastleRights::Both);
        }

        result
    }
}

impl FromStr for BoardBuilder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut fen = BoardBuilder::new();

        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(BoardBuilder::invalid_fen(value));
        }

        let pieces = tokens[0];
        let side = tokens[1];
        let castles = tokens[2];
        let ep = tokens[3];

        let ranks: Vec<&str> = pieces.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardBuilder::invalid_fen(value));
        }

        for (rank, row) in ALL_RANKS.iter().rev().zip(ranks.iter()) {
            let mut file = 0;
            for x in row.chars() {
                if let Some(skip) = x.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                } else if let Some(piece) = Piece::from_char(x) {
                    if file >= 8 {
                        return Err(BoardBuilder::invalid_fen(value));
                    }
                    fen.piece(Square::make_square(*rank, File::from_index(file)), piece);
                    file += 1;
                } else {
                    return Err(BoardBuilder::invalid_fen(value));
                }
            }
            if file != 8 {
                return Err(BoardBuilder::invalid_fen(value));
            }
        }

        match side {
            "w" | "W" => fen.side_to_move(Color::White),
            "b" | "B" => fen.side_to_move(Color::Black),
            _ => return Err(BoardBuilder::invalid_fen(value)),
        };

        for color in ALL_COLORS.iter() {
            fen.castle_rights(*color, BoardBuilder::parse_castle_rights(castles, *color));
        }

        if ep != "-" {
            let sq = Square::from_str(ep).map_err(|_| BoardBuilder::invalid_fen(value))?;
            fen.en_passant(Some(sq));
        }

        Ok(fen)
    }
}

impl From<&Board> for BoardBuilder {
    fn from(board: &Board) -> Self {
        let mut pieces = vec![];
        for sq in ALL_SQUARES.iter() {
            if let Some(piece) = board.piece_on(*sq) {
                pieces.push((*sq, piece));
            }
        }

        BoardBuilder::setup(
            &pieces,
            board.side_to_move(),
            board.castle_rights(Color::White),
            board.castle_rights(Color::Black),
            board.en_passant(),
        )
    }
}

impl From<Board> for BoardBuilder {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

#[cfg(test)]
use std::convert::TryInto;

#[test]
fn check_initial_position() {
    let initial_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let fen: BoardBuilder = Board::default().into();
    let computed_initial_fen = format!("{}", fen);
    assert_eq!(computed_initial_fen, initial_fen);

    let pass_through = format!("{}", BoardBuilder::default());
    assert_eq!(pass_through, initial_fen);

    assert_eq!(BoardBuilder::from_str(initial_fen), Ok(BoardBuilder::default()));
}

#[test]
fn invalid_castle_rights() {
    let mut bb = BoardBuilder::new();
    bb.piece(Square::A1, Piece::new(Color::White, PieceType::King))
        .piece(Square::A8, Piece::new(Color::Black, PieceType::King))
        .castle_rights(Color::White, CastleRights::Both);
    let res: Result<Board, _> = (&bb).try_into();
    assert!(res.is_err());
}

#[test]
fn test_in_check() {
    let mut bb: BoardBuilder = BoardBuilder::new();
    bb.piece(Square::A1, Piece::new(Color::White, PieceType::King))
        .piece(Square::A8, Piece::new(Color::Black, PieceType::King))
        .piece(Square::H1, Piece::new(Color::Black, PieceType::Rook));

    let board: Board = (&bb).try_into().expect("white may be in check on its own move");
    assert!(board.is_check(Color::White));

    bb.side_to_move(Color::Black);
    let res: Result<Board, _> = bb.try_into();
    assert!(res.is_err()); // My opponent cannot be in check when it's my move.
}

#[test]
fn malformed_fen() {
    for fen in [
        "",
        "8/8/8/8/8/8/8/8 w -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppx/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
    ]
    .iter()
    {
        assert_eq!(
            BoardBuilder::from_str(fen),
            Err(Error::InvalidFen {
                fen: fen.to_string()
            })
        );
    }
}

#[test]
fn fen_fields() {
    let bb = BoardBuilder::from_str("r3k3/8/8/8/4Pp2/8/8/4K2R b Kq e3 0 1").expect("valid fen");
    assert_eq!(bb.get_side_to_move(), Color::Black);
    assert_eq!(bb.get_castle_rights(Color::White), CastleRights::KingSide);
    assert_eq!(bb.get_castle_rights(Color::Black), CastleRights::QueenSide);
    assert_eq!(bb.get_en_passant(), Some(Square::E3));
    assert_eq!(bb[Square::F4], Some(Piece::new(Color::Black, PieceType::Pawn)));
    assert_eq!(bb[Square::H1], Some(Piece::new(Color::White, PieceType::Rook)));
    assert_eq!(bb[Square::H8], None);
}
