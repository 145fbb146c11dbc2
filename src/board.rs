use crate::bitboard::{BitBoard, EMPTY};
use crate::board_builder::BoardBuilder;
use crate::castle_rights::{CastleRights, CastleType};
use crate::chess_move::{Move, MoveType};
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::direction::{
    pawn_captures, BISHOP_DIRECTIONS, KING_DIRECTIONS, KNIGHT_DIRECTIONS, ROOK_DIRECTIONS,
};
use crate::error::Error;
use crate::file::File;
use crate::piece::{Piece, PieceType, NUM_PIECE_TYPES};
use crate::position::Position;
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// The parts of a `Board` a move cannot be undone without.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
struct Irreversible {
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: Option<Square>,
}

/// A representation of a chess board.  That's why you're here, right?
///
/// The board keeps a mailbox for square lookups next to one `BitBoard` per color and piece
/// type.  Moves are made and unmade in place; `undo_move` restores the board exactly.
///
/// ```
/// use chess_movegen::{Board, MoveGenerator, Position};
///
/// let mut board = Board::default();
/// let original = board.clone();
/// let mut generator = MoveGenerator::new();
///
/// let moves = generator.get_legal_moves(&mut board, 1, false);
/// assert_eq!(moves.len(), 20);
///
/// let first = moves[0].get_move();
/// board.make_move(first);
/// assert_ne!(board, original);
/// board.undo_move(first);
/// assert_eq!(board, original);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
    pieces: [[BitBoard; NUM_PIECE_TYPES]; NUM_COLORS],
    color_combined: [BitBoard; NUM_COLORS],
    side_to_move: Color,
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: Option<Square>,
    history: Vec<Irreversible>,
}

impl Board {
    /// Construct a new `Board` that is completely empty.
    /// Note: This does NOT give you the initial position.  Just a blank slate, which is not a
    /// valid position until kings are added.
    fn new() -> Board {
        Board {
            squares: [None; NUM_SQUARES],
            pieces: [[EMPTY; NUM_PIECE_TYPES]; NUM_COLORS],
            color_combined: [EMPTY; NUM_COLORS],
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights; NUM_COLORS],
            en_passant: None,
            history: Vec::new(),
        }
    }

    /// Construct a board from a FEN string.
    ///
    /// ```
    /// use chess_movegen::{Board, Color, Position, Square};
    ///
    /// let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("valid fen");
    /// assert_eq!(board.side_to_move(), Color::White);
    /// assert_eq!(board.en_passant(), Some(Square::D6));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Board, Error> {
        Board::from_str(fen)
    }

    /// Every square occupied by `color`.
    #[inline]
    pub fn color_combined(&self, color: Color) -> BitBoard {
        self.color_combined[color.to_index()]
    }

    /// Every occupied square.
    #[inline]
    pub fn combined(&self) -> BitBoard {
        self.color_combined[0] | self.color_combined[1]
    }

    /// How many moves have been made and not yet taken back?
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Put a piece on an empty square.
    #[inline]
    fn put(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.squares[square.to_index()].is_none());
        let bb = BitBoard::from_square(square);
        self.squares[square.to_index()] = Some(piece);
        self.pieces[piece.color().to_index()][piece.piece_type().to_index()] ^= bb;
        self.color_combined[piece.color().to_index()] ^= bb;
    }

    /// Take the piece off an occupied square.
    #[inline]
    fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.squares[square.to_index()].take()?;
        let bb = BitBoard::from_square(square);
        self.pieces[piece.color().to_index()][piece.piece_type().to_index()] ^= bb;
        self.color_combined[piece.color().to_index()] ^= bb;
        Some(piece)
    }

    /// Is there a piece of `color` and one of `piece_types` on `square`?
    #[inline]
    fn is_one_of(&self, square: Square, color: Color, piece_types: &[PieceType]) -> bool {
        match self.squares[square.to_index()] {
            Some(p) => p.color() == color && piece_types.contains(&p.piece_type()),
            None => false,
        }
    }

    /// The square of the pawn an en-passant move removes.
    #[inline]
    fn en_passant_victim(target: Square, mover: Color) -> Square {
        let victim = target.backward(mover);
        debug_assert!(victim.is_some());
        victim.unwrap_or(target)
    }

    /// Check the structural invariants the move generator relies on.
    fn is_sane(&self) -> bool {
        let backranks = ALL_COLORS.iter().fold(EMPTY, |bb, c| {
            bb | BitBoard::new(0xFF << (c.to_my_backrank().to_index() * 8))
        });

        for color in ALL_COLORS.iter() {
            if self.pieces(*color, PieceType::King).popcnt() != 1 {
                return false;
            }

            if self.pieces(*color, PieceType::Pawn) & backranks != EMPTY {
                return false;
            }

            for castle_type in [CastleType::Kingside, CastleType::Queenside].iter() {
                if !self.castle_rights(*color).has(*castle_type) {
                    continue;
                }
                let king_home = Square::make_square(color.to_my_backrank(), File::E);
                let king = Piece::new(*color, PieceType::King);
                let rook = Piece::new(*color, PieceType::Rook);
                if self.piece_on(king_home) != Some(king)
                    || self.piece_on(castle_type.rook_origin(*color)) != Some(rook)
                {
                    return false;
                }
            }
        }

        // the side that just moved cannot have left its king en prise
        if self.is_check(!self.side_to_move) {
            return false;
        }

        if let Some(ep) = self.en_passant {
            let them = !self.side_to_move;
            let victim = ep.backward(self.side_to_move);
            let origin = ep.forward(self.side_to_move);
            if ep.get_rank() != self.side_to_move.to_en_passant_rank()
                || self.piece_on(ep).is_some()
                || victim.and_then(|sq| self.piece_on(sq))
                    != Some(Piece::new(them, PieceType::Pawn))
                || origin.map_or(true, |sq| self.piece_on(sq).is_some())
            {
                return false;
            }
        }

        true
    }
}

impl Position for Board {
    #[inline]
    fn pieces(&self, color: Color, piece_type: PieceType) -> BitBoard {
        self.pieces[color.to_index()][piece_type.to_index()]
    }

    #[inline]
    fn piece_on(&self, square: Square) -> Option<Piece> {
        self.squares[square.to_index()]
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    #[inline]
    fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    fn make_move(&mut self, m: Move) {
        self.history.push(Irreversible {
            castle_rights: self.castle_rights,
            en_passant: self.en_passant,
        });

        let color = self.side_to_move;
        let origin = m.get_origin();
        let target = m.get_target();
        let piece = m.get_origin_piece();
        debug_assert_eq!(piece.color(), color);
        debug_assert_eq!(self.piece_on(origin), Some(piece));

        match m.get_type() {
            MoveType::Normal | MoveType::PawnDouble => {
                let captured = self.remove(target);
                debug_assert_eq!(captured, m.get_captured_piece());
                self.remove(origin);
                self.put(target, piece);
            }
            MoveType::PawnPromotion => {
                let captured = self.remove(target);
                debug_assert_eq!(captured, m.get_captured_piece());
                self.remove(origin);
                let promotion = m.get_promotion().unwrap_or(PieceType::Queen);
                self.put(target, Piece::new(color, promotion));
            }
            MoveType::EnPassant => {
                let captured = self.remove(Board::en_passant_victim(target, color));
                debug_assert_eq!(captured, m.get_captured_piece());
                self.remove(origin);
                self.put(target, piece);
            }
            MoveType::Castling => {
                self.remove(origin);
                self.put(target, piece);
                if let Some(castle_type) = CastleType::from_king_target(target) {
                    let rook = self.remove(castle_type.rook_origin(color));
                    debug_assert_eq!(rook, Some(Piece::new(color, PieceType::Rook)));
                    if let Some(rook) = rook {
                        self.put(castle_type.rook_target(color), rook);
                    }
                }
            }
        }

        for c in ALL_COLORS.iter() {
            let lost = CastleRights::square_to_castle_rights(*c, origin)
                .add(CastleRights::square_to_castle_rights(*c, target));
            self.castle_rights[c.to_index()] = self.castle_rights[c.to_index()].remove(lost);
        }

        self.en_passant = if m.get_type() == MoveType::PawnDouble {
            origin.forward(color)
        } else {
            None
        };

        self.side_to_move = !color;
    }

    fn undo_move(&mut self, m: Move) {
        let state = match self.history.pop() {
            Some(state) => state,
            None => {
                debug_assert!(false, "undo_move({}) without a matching make_move", m);
                return;
            }
        };

        let color = !self.side_to_move;
        let origin = m.get_origin();
        let target = m.get_target();
        let piece = m.get_origin_piece();
        debug_assert_eq!(piece.color(), color);

        match m.get_type() {
            MoveType::Normal | MoveType::PawnDouble | MoveType::PawnPromotion => {
                self.remove(target);
                self.put(origin, piece);
                if let Some(captured) = m.get_captured_piece() {
                    self.put(target, captured);
                }
            }
            MoveType::EnPassant => {
                self.remove(target);
                self.put(origin, piece);
                if let Some(captured) = m.get_captured_piece() {
                    self.put(Board::en_passant_victim(target, color), captured);
                }
            }
            MoveType::Castling => {
                self.remove(target);
                self.put(origin, piece);
                if let Some(castle_type) = CastleType::from_king_target(target) {
                    if let Some(rook) = self.remove(castle_type.rook_target(color)) {
                        self.put(castle_type.rook_origin(color), rook);
                    }
                }
            }
        }

        self.castle_rights = state.castle_rights;
        self.en_passant = state.en_passant;
        self.side_to_move = color;
    }

    fn is_attacked(&self, square: Square, by: Color) -> bool {
        // a pawn of `by` attacks us from where our own pawn would capture
        for direction in pawn_captures(!by) {
            if let Some(sq) = square.offset(*direction) {
                if self.is_one_of(sq, by, &[PieceType::Pawn]) {
                    return true;
                }
            }
        }

        for direction in KNIGHT_DIRECTIONS.iter() {
            if let Some(sq) = square.offset(*direction) {
                if self.is_one_of(sq, by, &[PieceType::Knight]) {
                    return true;
                }
            }
        }

        for direction in KING_DIRECTIONS.iter() {
            if let Some(sq) = square.offset(*direction) {
                if self.is_one_of(sq, by, &[PieceType::King]) {
                    return true;
                }
            }
        }

        let sliders = [
            (&BISHOP_DIRECTIONS, [PieceType::Bishop, PieceType::Queen]),
            (&ROOK_DIRECTIONS, [PieceType::Rook, PieceType::Queen]),
        ];
        for (directions, attackers) in sliders.iter() {
            for direction in directions.iter() {
                let mut next = square.offset(*direction);
                while let Some(sq) = next {
                    if self.squares[sq.to_index()].is_some() {
                        if self.is_one_of(sq, by, attackers) {
                            return true;
                        }
                        break;
                    }
                    next = sq.offset(*direction);
                }
            }
        }

        false
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: &BoardBuilder) -> Result<Self, Self::Error> {
        let mut board = Board::new();

        for sq in ALL_SQUARES.iter() {
            if let Some(piece) = builder[*sq] {
                board.put(*sq, piece);
            }
        }

        board.side_to_move = builder.get_side_to_move();
        for color in ALL_COLORS.iter() {
            board.castle_rights[color.to_index()] = builder.get_castle_rights(*color);
        }
        board.en_passant = builder.get_en_passant();

        if board.is_sane() {
            Ok(board)
        } else {
            log::debug!("rejecting board {}", builder);
            Err(Error::InvalidBoard)
        }
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(builder: BoardBuilder) -> Result<Self, Self::Error> {
        Board::try_from(&builder)
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Board::try_from(&BoardBuilder::from_str(value)?)
    }
}

impl Default for Board {
    /// The starting position.
    #[inline]
    fn default() -> Board {
        Board::try_from(&BoardBuilder::default()).unwrap_or_else(|_| Board::new())
    }
}

impl fmt::Display for Board {
    /// Print the board as a FEN string.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let builder: BoardBuilder = self.into();
        write!(f, "{}", builder)
    }
}
