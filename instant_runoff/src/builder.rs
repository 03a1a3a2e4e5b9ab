pub use crate::config::*;

/// A builder for assembling an election ballot by ballot.
///
/// Ballots are validated as they are added, so a malformed ranking is
/// reported at the call site that produced it rather than at tabulation
/// time.
///
/// ```
/// pub use instant_runoff::Builder;
/// # use instant_runoff::TabulationError;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string()]);
///
/// builder.add_ballot(&[2, 1])?;
/// builder.add_ballot(&[1, 2])?;
/// builder.add_ballot(&[2, 1])?;
///
/// let result = builder.tabulate()?;
/// assert_eq!(result.winner.name, "Bob");
///
/// # Ok::<(), TabulationError>(())
/// ```
pub struct Builder {
    _candidates: Vec<String>,
    _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _candidates: Vec::new(),
            _ballots: Vec::new(),
        }
    }

    /// Sets the candidate registry. Identifier `i` in subsequent ballots
    /// refers to `cands[i - 1]`.
    pub fn candidates(self, cands: &[String]) -> Builder {
        Builder {
            _candidates: cands.to_vec(),
            _ballots: self._ballots,
        }
    }

    /// Adds one complete ranking, most preferred first.
    ///
    /// Fails if the registry has not been set yet, or if the ranking is
    /// not a permutation of `1..=N`.
    pub fn add_ballot(&mut self, rankings: &[u32]) -> Result<(), TabulationError> {
        if self._candidates.is_empty() {
            return Err(TabulationError::EmptyElection);
        }
        let expected = self._candidates.len();
        let ballot = self._ballots.len();
        if rankings.len() != expected {
            return Err(TabulationError::WrongBallotLength {
                ballot,
                expected,
                actual: rankings.len(),
            });
        }
        let mut seen = vec![false; expected];
        for &rank in rankings.iter() {
            match (rank as usize).checked_sub(1) {
                Some(pos) if pos < expected && !seen[pos] => seen[pos] = true,
                _ => return Err(TabulationError::NotAFullRanking { ballot }),
            }
        }
        self._ballots.push(Ballot::new(rankings));
        Ok(())
    }

    pub fn tabulate(&self) -> Result<TabulationResult, TabulationError> {
        crate::tabulate(&self._ballots, &self._candidates)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
