use crate::color::{Color, NUM_COLORS};

/// One step across the board, expressed as a change of file and a change of rank.
///
/// Stepping off the edge of the board is detected by `Square::offset`, which range-tests the
/// resulting file and rank separately, so a step can never wrap from the h-file onto the
/// a-file.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Direction {
    file: i8,
    rank: i8,
}

impl Direction {
    /// Create a direction from a file delta and a rank delta.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Direction {
        Direction { file, rank }
    }

    /// How many files does this step move?
    #[inline]
    pub fn file_delta(&self) -> i8 {
        self.file
    }

    /// How many ranks does this step move?
    #[inline]
    pub fn rank_delta(&self) -> i8 {
        self.rank
    }

    /// Combine two steps into one.
    #[inline]
    pub const fn then(self, other: Direction) -> Direction {
        Direction::new(self.file + other.file, self.rank + other.rank)
    }
}

pub const NORTH: Direction = Direction::new(0, 1);
pub const SOUTH: Direction = Direction::new(0, -1);
pub const EAST: Direction = Direction::new(1, 0);
pub const WEST: Direction = Direction::new(-1, 0);
pub const NORTH_EAST: Direction = NORTH.then(EAST);
pub const NORTH_WEST: Direction = NORTH.then(WEST);
pub const SOUTH_EAST: Direction = SOUTH.then(EAST);
pub const SOUTH_WEST: Direction = SOUTH.then(WEST);

pub const KNIGHT_DIRECTIONS: [Direction; 8] = [
    NORTH.then(NORTH).then(EAST),
    NORTH.then(NORTH).then(WEST),
    NORTH.then(EAST).then(EAST),
    NORTH.then(WEST).then(WEST),
    SOUTH.then(SOUTH).then(EAST),
    SOUTH.then(SOUTH).then(WEST),
    SOUTH.then(EAST).then(EAST),
    SOUTH.then(WEST).then(WEST),
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST];

pub const ROOK_DIRECTIONS: [Direction; 4] = [NORTH, EAST, SOUTH, WEST];

pub const QUEEN_DIRECTIONS: [Direction; 8] = [
    NORTH, EAST, SOUTH, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];

pub const KING_DIRECTIONS: [Direction; 8] = QUEEN_DIRECTIONS;

/// Pawn steps per color.  The first entry is the push, the other two are the captures.
pub const PAWN_DIRECTIONS: [[Direction; 3]; NUM_COLORS] = [
    [NORTH, NORTH_EAST, NORTH_WEST],
    [SOUTH, SOUTH_EAST, SOUTH_WEST],
];

/// The forward push of a pawn of this color.
#[inline]
pub fn pawn_push(color: Color) -> Direction {
    PAWN_DIRECTIONS[color.to_index()][0]
}

/// The two diagonal captures of a pawn of this color.
#[inline]
pub fn pawn_captures(color: Color) -> &'static [Direction] {
    &PAWN_DIRECTIONS[color.to_index()][1..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_steps_are_distinct_l_shapes() {
        for (i, a) in KNIGHT_DIRECTIONS.iter().enumerate() {
            let lengths = (a.file_delta().abs(), a.rank_delta().abs());
            assert!(lengths == (1, 2) || lengths == (2, 1));
            for b in KNIGHT_DIRECTIONS[i + 1..].iter() {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn pawn_table_starts_with_push() {
        assert_eq!(pawn_push(Color::White), NORTH);
        assert_eq!(pawn_push(Color::Black), SOUTH);
        assert_eq!(pawn_captures(Color::White), &[NORTH_EAST, NORTH_WEST]);
        assert_eq!(pawn_captures(Color::Black), &[SOUTH_EAST, SOUTH_WEST]);
    }
}
