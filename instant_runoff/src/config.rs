// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One voter's complete strict ranking of all the candidates.
///
/// Rankings are 1-based candidate identifiers, listed from most preferred
/// to least preferred. A well-formed ballot is a permutation of `1..=N`
/// where `N` is the number of registered candidates: every candidate is
/// ranked exactly once, with no truncation and no ties.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub rankings: Vec<u32>,
}

impl Ballot {
    pub fn new(rankings: &[u32]) -> Ballot {
        Ballot {
            rankings: rankings.to_vec(),
        }
    }
}

/// A batch of ballots over a fixed candidate registry.
///
/// The registry is an ordered list of names: identifier `i` on a ballot
/// refers to `candidates[i - 1]`. The election is immutable for the
/// duration of a tabulation run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    pub candidates: Vec<String>,
    pub ballots: Vec<Ballot>,
}

impl Election {
    pub fn tabulate(&self) -> Result<TabulationResult, TabulationError> {
        crate::tabulate(&self.ballots, &self.candidates)
    }
}

// ******** Output data structures *********

/// The winning candidate and its front-preference count in the final round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Winner {
    pub name: String,
    pub votes: u64,
}

/// Statistics for one elimination round.
///
/// The tally lists every candidate holding at least one front preference
/// this round, in ranked order (most votes first). `eliminated` is empty
/// for the winning round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    pub tally: Vec<(String, u64)>,
    pub eliminated: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TabulationResult {
    pub winner: Winner,
    /// Smallest front-preference count that wins the election outright.
    pub threshold: u64,
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent the algorithm from completing successfully.
///
/// The malformed-ballot variants are raised before any round is tallied;
/// a batch that passes validation cannot fail afterwards, short of the
/// round guard tripping.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TabulationError {
    EmptyElection,
    WrongBallotLength {
        ballot: usize,
        expected: usize,
        actual: usize,
    },
    NotAFullRanking {
        ballot: usize,
    },
    NoConvergence,
}

impl Error for TabulationError {}

impl Display for TabulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabulationError::EmptyElection => {
                write!(f, "election has no ballots or no candidates")
            }
            TabulationError::WrongBallotLength {
                ballot,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "ballot {} has {} rankings, expected {}",
                    ballot, actual, expected
                )
            }
            TabulationError::NotAFullRanking { ballot } => {
                write!(
                    f,
                    "ballot {} is not a full ranking: a candidate is repeated, missing or out of range",
                    ballot
                )
            }
            TabulationError::NoConvergence => {
                write!(f, "tabulation did not converge to a winner")
            }
        }
    }
}
