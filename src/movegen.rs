use crate::castle_rights::ALL_CASTLE_TYPES;
use crate::chess_move::{Move, MoveType};
use crate::direction::{pawn_captures, pawn_push};
use crate::file::File;
use crate::move_list::MoveList;
use crate::piece::{Piece, PieceType, PROMOTION_PIECES};
use crate::position::Position;
use crate::square::Square;

/// The piece types other than pawns, in the order their moves are generated.
const PIECE_ORDER: [PieceType; 5] = [
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/// Generate the moves for a position, ordered for search.
///
/// A `MoveGenerator` owns one `MoveList` and refills it on every call, so the list returned by
/// `get_moves` or `get_legal_moves` is only good until the next call.  A search wants one
/// generator per ply.
///
/// ```
/// use chess_movegen::{Board, MoveGenerator, Position};
///
/// let mut board = Board::default();
/// let mut generator = MoveGenerator::new();
///
/// let is_check = board.is_check(board.side_to_move());
/// let moves = generator.get_legal_moves(&mut board, 1, is_check);
/// assert_eq!(moves.len(), 20);
///
/// // nothing to capture in the initial position
/// let captures = generator.get_legal_moves(&mut board, 0, is_check);
/// assert!(captures.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MoveGenerator {
    moves: MoveList,
}

impl MoveGenerator {
    /// Create a generator with an empty move list.
    pub fn new() -> MoveGenerator {
        MoveGenerator {
            moves: MoveList::new(),
        }
    }

    /// Generate the pseudo-legal moves for the side to move, best first.
    ///
    /// With `depth > 0` every piece move is generated, plus castling unless `is_check`.  With
    /// `depth <= 0` only captures are kept, unless `is_check`, in which case every evasion
    /// candidate is kept.  Castling is never generated at `depth <= 0`.
    ///
    /// `is_check` must say whether the side to move is in check.
    pub fn get_moves<P: Position>(
        &mut self,
        position: &P,
        depth: i32,
        is_check: bool,
    ) -> &MoveList {
        self.moves.clear();

        MoveGenerator::add_moves(&mut self.moves, position);

        if depth > 0 {
            if !is_check {
                let king = position.king_square(position.side_to_move());
                MoveGenerator::add_castling_moves(&mut self.moves, king, position);
            }
        } else if !is_check {
            self.moves.retain(|entry| entry.get_move().is_capture());
        }

        self.moves.rate_from_mvv_lva();
        self.moves.sort();

        &self.moves
    }

    /// Generate the legal moves for the side to move, best first.
    ///
    /// This is `get_moves` followed by making each move on `position`, dropping it if it leaves
    /// the mover's king attacked, and taking it back.  `position` is unchanged when this returns.
    pub fn get_legal_moves<P: Position>(
        &mut self,
        position: &mut P,
        depth: i32,
        is_check: bool,
    ) -> &MoveList {
        self.get_moves(&*position, depth, is_check);

        let color = position.side_to_move();
        self.moves.retain(|entry| {
            let m = entry.get_move();
            position.make_move(m);
            let legal = !position.is_check(color);
            position.undo_move(m);

            if !legal {
                log::trace!("{} leaves the {:?} king attacked", m, color);
            }
            legal
        });

        &self.moves
    }

    /// Add the moves of every piece of the side to move: pawns, knights, bishops, rooks,
    /// queens, then the king.
    fn add_moves<P: Position>(list: &mut MoveList, position: &P) {
        let color = position.side_to_move();

        for square in position.pieces(color, PieceType::Pawn) {
            MoveGenerator::add_pawn_moves(list, square, position);
        }

        for piece_type in PIECE_ORDER.iter() {
            for square in position.pieces(color, *piece_type) {
                MoveGenerator::add_piece_moves(list, square, position);
            }
        }
    }

    /// Walk every direction of the piece on `origin`.  Sliders keep going over empty squares,
    /// everything else takes a single step.
    fn add_piece_moves<P: Position>(list: &mut MoveList, origin: Square, position: &P) {
        let origin_piece = match position.piece_on(origin) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "no piece on {}", origin);
                return;
            }
        };
        let sliding = origin_piece.piece_type().is_sliding();

        for direction in origin_piece.directions() {
            let mut target = origin.offset(*direction);

            while let Some(square) = target {
                match position.piece_on(square) {
                    None => {
                        list.push(Move::new(
                            MoveType::Normal,
                            origin,
                            square,
                            origin_piece,
                            None,
                            None,
                        ));

                        if !sliding {
                            break;
                        }
                        target = square.offset(*direction);
                    }
                    Some(captured) => {
                        if captured.color() != origin_piece.color() {
                            list.push(Move::new(
                                MoveType::Normal,
                                origin,
                                square,
                                origin_piece,
                                Some(captured),
                                None,
                            ));
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Add a pawn move to `target`, or all four promotions if `target` is on the last rank.
    fn add_pawn_move(
        list: &mut MoveList,
        origin: Square,
        target: Square,
        pawn: Piece,
        captured: Option<Piece>,
    ) {
        if target.get_rank() == pawn.color().to_their_backrank() {
            for promotion in PROMOTION_PIECES.iter() {
                list.push(Move::new(
                    MoveType::PawnPromotion,
                    origin,
                    target,
                    pawn,
                    captured,
                    Some(*promotion),
                ));
            }
        } else {
            list.push(Move::new(
                MoveType::Normal,
                origin,
                target,
                pawn,
                captured,
                None,
            ));
        }
    }

    /// Captures, then en passant, then the single push, then the double push.
    fn add_pawn_moves<P: Position>(list: &mut MoveList, origin: Square, position: &P) {
        let pawn = match position.piece_on(origin) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "no pawn on {}", origin);
                return;
            }
        };
        debug_assert_eq!(pawn.piece_type(), PieceType::Pawn);
        let color = pawn.color();

        for direction in pawn_captures(color) {
            if let Some(target) = origin.offset(*direction) {
                if let Some(captured) = position.piece_on(target) {
                    if captured.color() != color {
                        MoveGenerator::add_pawn_move(list, origin, target, pawn, Some(captured));
                    }
                }
            }
        }

        if let Some(ep) = position.en_passant() {
            for direction in pawn_captures(color) {
                if origin.offset(*direction) != Some(ep) {
                    continue;
                }
                debug_assert_eq!(ep.get_rank(), color.to_en_passant_rank());

                let captured = ep.backward(color).and_then(|sq| position.piece_on(sq));
                debug_assert_eq!(captured, Some(Piece::new(!color, PieceType::Pawn)));

                list.push(Move::new(
                    MoveType::EnPassant,
                    origin,
                    ep,
                    pawn,
                    captured,
                    None,
                ));
            }
        }

        let push = pawn_push(color);
        let target = match origin.offset(push) {
            Some(target) if position.piece_on(target).is_none() => target,
            _ => return,
        };

        MoveGenerator::add_pawn_move(list, origin, target, pawn, None);
        if target.get_rank() == color.to_their_backrank() {
            return;
        }

        if let Some(double) = target.offset(push) {
            if double.get_rank() == color.to_fourth_rank() && position.piece_on(double).is_none() {
                list.push(Move::new(
                    MoveType::PawnDouble,
                    origin,
                    double,
                    pawn,
                    None,
                    None,
                ));
            }
        }
    }

    /// Kingside, then queenside.  The square the king lands on is left to the legality check.
    fn add_castling_moves<P: Position>(list: &mut MoveList, king_square: Square, position: &P) {
        let color = position.side_to_move();
        let king = Piece::new(color, PieceType::King);
        let rights = position.castle_rights(color);

        for castle_type in ALL_CASTLE_TYPES.iter() {
            if !rights.has(*castle_type) {
                continue;
            }

            let clear = castle_type
                .empty_squares(color)
                .all(|sq| position.piece_on(sq).is_none());
            if !clear || position.is_attacked(castle_type.king_pass(color), !color) {
                continue;
            }

            debug_assert_eq!(
                king_square,
                Square::make_square(color.to_my_backrank(), File::E)
            );
            debug_assert_eq!(position.piece_on(king_square), Some(king));
            debug_assert_eq!(
                position.piece_on(castle_type.rook_origin(color)),
                Some(Piece::new(color, PieceType::Rook))
            );

            list.push(Move::new(
                MoveType::Castling,
                king_square,
                castle_type.king_target(color),
                king,
                None,
                None,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::color::Color;
    use crate::move_list::MAX_MOVES;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).expect("valid fen")
    }

    fn names(list: &MoveList) -> Vec<String> {
        list.moves().map(|m| m.to_string()).collect()
    }

    #[test]
    fn initial_position_order() {
        let board = Board::default();
        let mut generator = MoveGenerator::new();
        let moves = generator.get_moves(&board, 1, false);

        assert_eq!(moves.len(), 20);
        let names = names(moves);
        assert_eq!(&names[0..4], &["a2a3", "a2a4", "b2b3", "b2b4"]);
        assert_eq!(&names[16..20], &["b1c3", "b1a3", "g1h3", "g1f3"]);
        assert_eq!(moves[1].get_move().get_type(), MoveType::PawnDouble);
        assert_eq!(moves[0].get_value(), 200);
        assert_eq!(moves[19].get_value(), 61);
    }

    #[test]
    fn initial_position_all_legal() {
        let mut board = Board::default();
        let mut generator = MoveGenerator::new();
        let pseudo = generator.get_moves(&board, 1, false).clone();
        let legal = generator.get_legal_moves(&mut board, 1, false);

        assert_eq!(
            legal.moves().collect::<Vec<_>>(),
            pseudo.moves().collect::<Vec<_>>()
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn quiescence_only_captures() {
        let board = board(KIWIPETE);
        let mut generator = MoveGenerator::new();
        let captures = generator.get_moves(&board, 0, false);

        assert!(!captures.is_empty());
        assert!(captures.moves().all(|m| m.is_capture()));
        assert!(captures.contains(Move::new(
            MoveType::Normal,
            Square::E2,
            Square::A6,
            Piece::new(Color::White, PieceType::Bishop),
            Some(Piece::new(Color::Black, PieceType::Bishop)),
            None,
        )));

        let captures = generator.get_moves(&board, -3, false);
        assert!(captures.moves().all(|m| m.is_capture()));
    }

    #[test]
    fn quiescence_skips_quiet_promotions() {
        let board = board("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mut generator = MoveGenerator::new();

        let captures = generator.get_moves(&board, 0, false);
        assert_eq!(names(captures), vec!["b7a8q", "b7a8r", "b7a8b", "b7a8n"]);

        let all = generator.get_moves(&board, 1, false);
        assert!(all.moves().any(|m| m.to_string() == "b7b8q"));
    }

    #[test]
    fn quiescence_in_check_keeps_evasions() {
        let board = board("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
        let mut generator = MoveGenerator::new();

        assert_eq!(names(generator.get_moves(&board, 0, false)), vec!["e1e2"]);

        let evasions = generator.get_moves(&board, 0, true);
        assert_eq!(evasions.len(), 5);
        assert!(evasions.moves().any(|m| !m.is_capture()));
        assert_eq!(evasions[0].get_move().to_string(), "e1e2");
    }

    #[test]
    fn promotion_order() {
        let board = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mut generator = MoveGenerator::new();
        let moves = generator.get_moves(&board, 1, false);

        let promotions = moves
            .moves()
            .filter(|m| m.get_type() == MoveType::PawnPromotion)
            .map(|m| m.get_promotion())
            .collect::<Vec<_>>();
        assert_eq!(
            promotions,
            vec![
                Some(PieceType::Queen),
                Some(PieceType::Rook),
                Some(PieceType::Bishop),
                Some(PieceType::Knight)
            ]
        );
    }

    #[test]
    fn en_passant_needs_the_square() {
        let mut generator = MoveGenerator::new();

        let with = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let moves = generator.get_moves(&with, 1, false);
        let ep = Move::new(
            MoveType::EnPassant,
            Square::E5,
            Square::D6,
            Piece::new(Color::White, PieceType::Pawn),
            Some(Piece::new(Color::Black, PieceType::Pawn)),
            None,
        );
        assert_eq!(moves[0].get_move(), ep);
        assert_eq!(moves[0].get_value(), 200 + 1000);

        let without = board("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2");
        let moves = generator.get_moves(&without, 1, false);
        assert!(moves.moves().all(|m| m.get_type() != MoveType::EnPassant));
    }

    #[test]
    fn en_passant_discovered_check() {
        let mut board = board("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1");
        let mut generator = MoveGenerator::new();

        let capture = "b5c6".to_string();
        assert!(names(generator.get_moves(&board, 1, false)).contains(&capture));
        assert!(!names(generator.get_legal_moves(&mut board, 1, false)).contains(&capture));
    }

    #[test]
    fn castling_into_check_is_filtered_late() {
        let mut board = board("k5r1/8/8/8/8/8/8/4K2R w K - 0 1");
        let mut generator = MoveGenerator::new();

        let pseudo = generator.get_moves(&board, 1, false);
        assert!(pseudo
            .moves()
            .any(|m| m.get_type() == MoveType::Castling && m.get_target() == Square::G1));

        let legal = generator.get_legal_moves(&mut board, 1, false);
        assert!(legal.moves().all(|m| m.get_type() != MoveType::Castling));
        assert!(names(legal).contains(&"e1f1".to_string()));
    }

    #[test]
    fn no_castling_through_attack() {
        let board = board("k4r2/8/8/8/8/8/8/4K2R w K - 0 1");
        let mut generator = MoveGenerator::new();
        let moves = generator.get_moves(&board, 1, false);
        assert!(moves.moves().all(|m| m.get_type() != MoveType::Castling));
    }

    #[test]
    fn no_castling_in_check_or_quiescence() {
        let board = board("k3r3/8/8/8/8/8/8/4K2R w K - 0 1");
        let mut generator = MoveGenerator::new();

        let castles = |list: &MoveList| {
            list.moves()
                .filter(|m| m.get_type() == MoveType::Castling)
                .count()
        };

        assert_eq!(castles(generator.get_moves(&board, 1, true)), 0);
        assert_eq!(castles(generator.get_moves(&board, 0, true)), 0);
        // the pass square is safe, so only the check flag holds it back
        assert_eq!(castles(generator.get_moves(&board, 1, false)), 1);
    }

    #[test]
    fn both_castles_in_order() {
        let board = board("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let mut generator = MoveGenerator::new();
        let castles = generator
            .get_moves(&board, 1, false)
            .moves()
            .filter(|m| m.get_type() == MoveType::Castling)
            .map(|m| m.to_string())
            .collect::<Vec<_>>();
        assert_eq!(castles, vec!["e8g8", "e8c8"]);
    }

    // Only the square the king passes over is checked; an attacked b1 does not matter.
    #[test]
    fn queenside_castle_ignores_b_file_attack() {
        let mut board = board("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let mut generator = MoveGenerator::new();
        let legal = generator.get_legal_moves(&mut board, 1, false);
        assert!(legal
            .moves()
            .any(|m| m.get_type() == MoveType::Castling && m.get_target() == Square::C1));
        assert!(names(legal).contains(&"e1c1".to_string()));
    }

    #[test]
    fn most_moves_fit_the_buffer() {
        let mut board = board("R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1");
        let mut generator = MoveGenerator::new();

        let pseudo = generator.get_moves(&board, 1, false).len();
        assert_eq!(pseudo, 218);
        assert!(pseudo <= MAX_MOVES);

        let legal = generator.get_legal_moves(&mut board, 1, false).len();
        assert_eq!(legal, 218);
        assert!(legal <= MAX_MOVES);
    }

    #[test]
    fn legal_moves_never_leave_the_king_attacked() {
        let mut generator = MoveGenerator::new();
        for fen in [
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1",
            "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
        ]
        .iter()
        {
            let mut board = board(fen);
            let original = board.clone();
            let color = board.side_to_move();
            let is_check = board.is_check(color);

            let legal = generator.get_legal_moves(&mut board, 1, is_check).clone();
            assert!(!legal.is_empty());
            assert_eq!(board, original);

            for m in legal.moves() {
                board.make_move(m);
                assert!(!board.is_check(color), "{} leaves {:?} in check", m, color);
                board.undo_move(m);
            }
        }
    }

    #[test]
    fn values_never_increase() {
        let mut board = board(KIWIPETE);
        let mut generator = MoveGenerator::new();
        let moves = generator.get_legal_moves(&mut board, 1, false);

        assert_eq!(moves.len(), 48);
        for pair in moves.iter().collect::<Vec<_>>().windows(2) {
            assert!(pair[0].get_value() >= pair[1].get_value());
        }
    }
}
