use crate::chess_move::Move;
use crate::movegen::MoveGenerator;
use crate::position::Position;

/// One generator per remaining ply, so a list is never refilled while it is being walked.
fn generators(depth: usize) -> Vec<MoveGenerator> {
    (0..depth).map(|_| MoveGenerator::new()).collect()
}

fn perft_inner<P: Position>(position: &mut P, generators: &mut [MoveGenerator]) -> u64 {
    let (generator, rest) = match generators.split_first_mut() {
        Some(split) => split,
        None => return 1,
    };

    let is_check = position.is_check(position.side_to_move());
    let moves = generator.get_legal_moves(position, 1, is_check);
    if rest.is_empty() {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for m in moves.moves() {
        position.make_move(m);
        nodes += perft_inner(position, rest);
        position.undo_move(m);
    }
    nodes
}

/// Count the leaves of the legal move tree `depth` plies deep.
///
/// `position` is left as it was found.
///
/// ```
/// use chess_movegen::{perft, Board};
///
/// let mut board = Board::default();
/// assert_eq!(perft(&mut board, 0), 1);
/// assert_eq!(perft(&mut board, 2), 400);
/// ```
pub fn perft<P: Position>(position: &mut P, depth: usize) -> u64 {
    perft_inner(position, &mut generators(depth))
}

/// Like `perft`, but broken down by root move, in the order the generator returns them.
///
/// A depth of zero has no root moves and gives an empty list.
pub fn divide<P: Position>(position: &mut P, depth: usize) -> Vec<(Move, u64)> {
    let mut generators = generators(depth);
    let (root, rest) = match generators.split_first_mut() {
        Some(split) => split,
        None => return vec![],
    };

    let is_check = position.is_check(position.side_to_move());
    let mut result = vec![];
    for m in root.get_legal_moves(position, 1, is_check).moves() {
        position.make_move(m);
        let nodes = perft_inner(position, rest);
        position.undo_move(m);

        log::debug!("{}: {}", m, nodes);
        result.push((m, nodes));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn perft_fen(fen: &str, depth: usize, result: u64) {
        let mut board = Board::from_fen(fen).expect("valid fen");
        let original = board.clone();
        assert_eq!(perft(&mut board, depth), result, "{} at depth {}", fen, depth);
        assert_eq!(board, original);
    }

    #[test]
    fn perft_initial_position() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        perft_fen(fen, 1, 20);
        perft_fen(fen, 2, 400);
        perft_fen(fen, 3, 8902);
    }

    #[test]
    fn perft_kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        perft_fen(fen, 1, 48);
        perft_fen(fen, 2, 2039);
        perft_fen(fen, 3, 97862);
    }

    #[test]
    fn perft_rook_endgame() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        perft_fen(fen, 1, 14);
        perft_fen(fen, 2, 191);
        perft_fen(fen, 3, 2812);
        perft_fen(fen, 4, 43238);
    }

    #[test]
    fn perft_promotions_and_pins() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        perft_fen(fen, 1, 6);
        perft_fen(fen, 2, 264);
        perft_fen(fen, 3, 9467);
    }

    #[test]
    fn perft_discovered_promotions() {
        let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
        perft_fen(fen, 1, 44);
        perft_fen(fen, 2, 1486);
        perft_fen(fen, 3, 62379);
    }

    // The en passant pair can be answered by a pawn that is pinned along the rank or diagonal.
    #[test]
    fn perft_en_passant_pins() {
        perft_fen("8/5bk1/8/2Pp4/8/1K6/8/8 w - d6 0 1", 6, 824064);
        perft_fen("8/8/1k6/8/2pP4/8/5BK1/8 b - d3 0 1", 6, 824064);
        perft_fen("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1440467);
        perft_fen("8/5k2/8/2Pp4/2B5/1K6/8/8 w - d6 0 1", 6, 1440467);
    }

    #[test]
    fn perft_castling_rights() {
        perft_fen("5k2/8/8/8/8/8/8/4K2R w K - 0 1", 6, 661072);
        perft_fen("4k2r/8/8/8/8/8/8/5K2 b k - 0 1", 6, 661072);
        perft_fen("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 803711);
        perft_fen("r3k3/8/8/8/8/8/8/3K4 b q - 0 1", 6, 803711);
    }

    #[test]
    fn perft_promotion_out_of_check() {
        perft_fen("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3821001);
        perft_fen("3K4/8/8/8/8/8/4p3/2k2R2 b - - 0 1", 6, 3821001);
    }

    #[test]
    fn divide_initial_position() {
        let mut board = Board::default();
        let mut generator = MoveGenerator::new();
        let expected = generator
            .get_legal_moves(&mut board, 1, false)
            .moves()
            .collect::<Vec<_>>();

        let split = divide(&mut board, 2);
        assert_eq!(split.iter().map(|(m, _)| *m).collect::<Vec<_>>(), expected);
        assert!(split.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
        assert_eq!(board, Board::default());

        assert!(divide(&mut board, 0).is_empty());
    }
}
