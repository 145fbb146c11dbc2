use crate::chess_move::Move;
use crate::piece::{KING_VALUE, PAWN_VALUE, QUEEN_VALUE};
use arrayvec::ArrayVec;
use std::ops::Index;

/// How many moves can a `MoveList` hold?  No reachable chess position has more than 218 legal
/// moves, and pseudo-legal generation adds at most a handful on top of that.
pub const MAX_MOVES: usize = 256;

/// A move together with the value used to order it during search.
///
/// The value is recomputed on every generation call and means nothing outside of it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MoveEntry {
    chess_move: Move,
    value: i32,
}

impl MoveEntry {
    #[inline]
    pub fn new(chess_move: Move, value: i32) -> MoveEntry {
        MoveEntry { chess_move, value }
    }

    #[inline]
    pub fn get_move(&self) -> Move {
        self.chess_move
    }

    #[inline]
    pub fn get_value(&self) -> i32 {
        self.value
    }
}

/// A fixed-capacity, reusable list of moves.
///
/// Clearing only resets the length, so one `MoveList` can be filled and drained millions of
/// times without allocating.
///
/// ```
/// use chess_movegen::{Color, Move, MoveList, MoveType, Piece, PieceType, Square};
///
/// let pawn = Piece::new(Color::White, PieceType::Pawn);
/// let queen = Piece::new(Color::White, PieceType::Queen);
/// let rook = Piece::new(Color::Black, PieceType::Rook);
///
/// let mut list = MoveList::new();
/// list.push(Move::new(MoveType::Normal, Square::D1, Square::D5, queen, None, None));
/// list.push(Move::new(MoveType::Normal, Square::E4, Square::D5, pawn, Some(rook), None));
/// list.rate_from_mvv_lva();
/// list.sort();
///
/// // pawn takes rook comes first
/// assert_eq!(list[0].get_move().get_origin(), Square::E4);
/// assert_eq!(list[0].get_value(), 200 + 10 * 500);
/// assert_eq!(list[1].get_value(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct MoveList {
    entries: ArrayVec<MoveEntry, MAX_MOVES>,
}

impl MoveList {
    /// Create an empty `MoveList`.
    pub fn new() -> MoveList {
        MoveList {
            entries: ArrayVec::new(),
        }
    }

    /// How many moves are in the list?
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the list empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every move in the list.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a move with an ordering value of zero.
    ///
    /// Panics if the list is full, which no chess position can cause.
    #[inline]
    pub fn push(&mut self, chess_move: Move) {
        self.entries.push(MoveEntry::new(chess_move, 0));
    }

    /// Get the move at `index`, if there is one.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Move> {
        self.entries.get(index).map(|e| e.chess_move)
    }

    /// Does the list contain this move?
    pub fn contains(&self, chess_move: Move) -> bool {
        self.entries.iter().any(|e| e.chess_move == chess_move)
    }

    /// Iterate over the entries, in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<MoveEntry> {
        self.entries.iter()
    }

    /// Iterate over the moves, in order.
    #[inline]
    pub fn moves<'a>(&'a self) -> impl Iterator<Item = Move> + 'a {
        self.entries.iter().map(|e| e.chess_move)
    }

    /// Keep only the entries for which `keep` returns true, preserving their order.
    #[inline]
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&MoveEntry) -> bool,
    {
        self.entries.retain(|e| keep(&*e));
    }

    /// Give every move an MVV-LVA (most valuable victim, least valuable aggressor) value.
    ///
    /// The aggressor term is `KING_VALUE / attacker value` with integer division, so cheap
    /// attackers rank first even among quiet moves.  Captures add ten times the victim's value.
    pub fn rate_from_mvv_lva(&mut self) {
        for entry in self.entries.iter_mut() {
            let m = entry.chess_move;
            let mut value = KING_VALUE / m.get_origin_piece().piece_type().value();

            if let Some(captured) = m.get_captured_piece() {
                value += 10 * captured.piece_type().value();
            }

            debug_assert!(
                value >= KING_VALUE / KING_VALUE
                    && value <= KING_VALUE / PAWN_VALUE + 10 * QUEEN_VALUE
            );

            entry.value = value;
        }
    }

    /// Sort the list by descending value.
    ///
    /// This is an insertion sort that only shifts on a strictly smaller value, so entries with
    /// equal values keep their relative order.  Lists are short and usually close to sorted,
    /// and nothing is allocated.
    pub fn sort(&mut self) {
        let entries = self.entries.as_mut_slice();
        for i in 1..entries.len() {
            let entry = entries[i];

            let mut j = i;
            while j > 0 && entries[j - 1].value < entry.value {
                entries[j] = entries[j - 1];
                j -= 1;
            }

            entries[j] = entry;
        }
    }
}

impl Default for MoveList {
    fn default() -> MoveList {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = MoveEntry;

    #[inline]
    fn index(&self, index: usize) -> &MoveEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a MoveEntry;
    type IntoIter = std::slice::Iter<'a, MoveEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveType;
    use crate::color::Color;
    use crate::piece::{Piece, PieceType};
    use crate::square::Square;

    fn quiet(piece_type: PieceType, origin: Square, target: Square) -> Move {
        Move::new(
            MoveType::Normal,
            origin,
            target,
            Piece::new(Color::White, piece_type),
            None,
            None,
        )
    }

    fn capture(piece_type: PieceType, origin: Square, target: Square, victim: PieceType) -> Move {
        Move::new(
            MoveType::Normal,
            origin,
            target,
            Piece::new(Color::White, piece_type),
            Some(Piece::new(Color::Black, victim)),
            None,
        )
    }

    #[test]
    fn mvv_lva_values() {
        let mut list = MoveList::new();
        list.push(quiet(PieceType::Pawn, Square::A2, Square::A3));
        list.push(quiet(PieceType::Knight, Square::B1, Square::C3));
        list.push(quiet(PieceType::Rook, Square::A1, Square::A2));
        list.push(quiet(PieceType::Queen, Square::D1, Square::D2));
        list.push(quiet(PieceType::King, Square::E1, Square::E2));
        list.push(capture(
            PieceType::Pawn,
            Square::E4,
            Square::D5,
            PieceType::Queen,
        ));
        list.push(capture(
            PieceType::Queen,
            Square::D1,
            Square::D7,
            PieceType::Pawn,
        ));
        list.rate_from_mvv_lva();

        let values = list.iter().map(|e| e.get_value()).collect::<Vec<_>>();
        assert_eq!(values, vec![200, 61, 40, 20, 1, 200 + 9750, 20 + 1000]);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut list = MoveList::new();
        let first_knight = quiet(PieceType::Knight, Square::B1, Square::C3);
        let king = quiet(PieceType::King, Square::E1, Square::E2);
        let second_knight = quiet(PieceType::Knight, Square::G1, Square::F3);
        let bishop = quiet(PieceType::Bishop, Square::C1, Square::D2);
        let pawn_takes = capture(PieceType::Pawn, Square::E4, Square::D5, PieceType::Pawn);
        for m in [first_knight, king, second_knight, bishop, pawn_takes].iter() {
            list.push(*m);
        }
        list.rate_from_mvv_lva();
        list.sort();

        // knights and bishops share a value and keep their generation order
        assert_eq!(
            list.moves().collect::<Vec<_>>(),
            vec![pawn_takes, first_knight, second_knight, bishop, king]
        );
        for pair in list.iter().collect::<Vec<_>>().windows(2) {
            assert!(pair[0].get_value() >= pair[1].get_value());
        }
    }

    #[test]
    fn clear_resets_length_only() {
        let mut list = MoveList::new();
        list.push(quiet(PieceType::Pawn, Square::A2, Square::A3));
        list.push(quiet(PieceType::Pawn, Square::B2, Square::B3));
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.get(0), None);

        list.push(quiet(PieceType::Pawn, Square::C2, Square::C3));
        assert_eq!(
            list.get(0),
            Some(quiet(PieceType::Pawn, Square::C2, Square::C3))
        );
    }

    #[test]
    fn retain_keeps_order() {
        let mut list = MoveList::new();
        let a = quiet(PieceType::Pawn, Square::A2, Square::A3);
        let b = capture(PieceType::Pawn, Square::B4, Square::C5, PieceType::Rook);
        let c = quiet(PieceType::Pawn, Square::C2, Square::C3);
        let d = capture(PieceType::Knight, Square::D4, Square::E6, PieceType::Pawn);
        for m in [a, b, c, d].iter() {
            list.push(*m);
        }

        list.retain(|e| e.get_move().is_capture());
        assert_eq!(list.moves().collect::<Vec<_>>(), vec![b, d]);
        assert!(list.contains(d));
        assert!(!list.contains(a));
    }

    #[test]
    fn holds_max_moves() {
        let mut list = MoveList::new();
        for _ in 0..MAX_MOVES {
            list.push(quiet(PieceType::Queen, Square::D1, Square::D2));
        }
        assert_eq!(list.len(), MAX_MOVES);
    }
}
