use chess_movegen::{divide, perft, Board};
use log::info;
use std::process;
use std::str::FromStr;
use std::time::Instant;

const USAGE: &str = "usage: chess-movegen <depth> [\"<fen>\"] [--divide]";

fn main() {
    env_logger::init();

    let mut split = false;
    let mut positional = vec![];
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--divide" => split = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        eprintln!("{}", USAGE);
        process::exit(2);
    }

    let depth = match usize::from_str(&positional[0]) {
        Ok(depth) => depth,
        Err(e) => {
            eprintln!("invalid depth {:?}: {}", positional[0], e);
            process::exit(2);
        }
    };

    let mut board = match positional.get(1) {
        Some(fen) => match Board::from_fen(fen) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(2);
            }
        },
        None => Board::default(),
    };
    info!("position {}", board);

    let start = Instant::now();
    let nodes = if split {
        let moves = divide(&mut board, depth);
        for (m, count) in moves.iter() {
            println!("{}: {}", m, count);
        }
        println!();
        moves.iter().map(|(_, count)| count).sum::<u64>()
    } else {
        perft(&mut board, depth)
    };
    let elapsed = start.elapsed();

    println!("Perft {}: {}", depth, nodes);
    info!(
        "{} nodes in {:.3} seconds ({:.0} nodes/s)",
        nodes,
        elapsed.as_secs_f64(),
        nodes as f64 / elapsed.as_secs_f64().max(1e-9)
    );
}
