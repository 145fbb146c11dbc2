use crate::error::Error;
use std::str::FromStr;

/// Describe a rank (row) on a chess board
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

/// How many ranks are there?
pub const NUM_RANKS: usize = 8;

/// Enumerate all ranks
pub const ALL_RANKS: [Rank; NUM_RANKS] = [
    Rank::First,
    Rank::Second,
    Rank::Third,
    Rank::Fourth,
    Rank::Fifth,
    Rank::Sixth,
    Rank::Seventh,
    Rank::Eighth,
];

impl Rank {
    /// Convert a `usize` into a `Rank` (the inverse of to_index).  If the number is > 7, wrap
    /// around.
    #[inline]
    pub fn from_index(i: usize) -> Rank {
        ALL_RANKS[i & 7]
    }

    /// Convert this `Rank` into a `usize` between 0 and 7 (inclusive).
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            Some('1') => Ok(Rank::First),
            Some('2') => Ok(Rank::Second),
            Some('3') => Ok(Rank::Third),
            Some('4') => Ok(Rank::Fourth),
            Some('5') => Ok(Rank::Fifth),
            Some('6') => Ok(Rank::Sixth),
            Some('7') => Ok(Rank::Seventh),
            Some('8') => Ok(Rank::Eighth),
            _ => Err(Error::InvalidRank),
        }
    }
}

#[test]
fn rank_from_index_and_text() {
    assert_eq!(Rank::from_index(7), Rank::Eighth);
    assert_eq!(Rank::from_index(8), Rank::First);
    assert_eq!("5".parse::<Rank>(), Ok(Rank::Fifth));
    assert_eq!("9".parse::<Rank>(), Err(Error::InvalidRank));
}
