mod builder;
mod config;
pub mod manual;

use log::{debug, info};

use std::cmp::Reverse;
use std::ops::AddAssign;

pub use crate::builder::Builder;
pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateId(u32);

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct VoteCount(u64);

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

// One ballot during tabulation: the immutable ranking arena plus a cursor
// to the current front preference. The caller's ballots are never touched.
#[derive(Eq, PartialEq, Debug, Clone)]
struct BallotState {
    prefs: Vec<CandidateId>,
    cursor: usize,
}

impl BallotState {
    fn front(&self) -> Option<CandidateId> {
        self.prefs.get(self.cursor).copied()
    }

    // Pops exactly one preference. The newly exposed front is whatever the
    // ballot ranked next, which may be a candidate eliminated in an earlier
    // round; such a front is tallied under that candidate again. This
    // matches the reference tabulator and is what makes merged electorates
    // behave non-monotonically (see the manual).
    fn advance(&mut self) {
        self.cursor += 1;
    }
}

// Guard against a tabulation that never reaches the threshold.
const MAX_ROUNDS: usize = 10_000;

/// Runs the instant-runoff elimination algorithm over a batch of ballots.
///
/// Arguments:
/// * `ballots` the collection of complete rankings to process
/// * `candidates` the registered candidate names, in identifier order:
///   identifier `i` on a ballot refers to `candidates[i - 1]`.
///
/// Each round tallies the current front preference of every ballot. A
/// candidate holding strictly more than half of the ballots wins; otherwise
/// the candidate ranked last in the round tally is eliminated and the
/// ballots fronting it advance to their next preference. Ties for the
/// fewest votes are resolved deterministically: the round ranking is a
/// stable descending sort over first-encounter order, and the final entry
/// of that ranking is the one eliminated.
pub fn tabulate(
    ballots: &[Ballot],
    candidates: &[String],
) -> Result<TabulationResult, TabulationError> {
    info!(
        "tabulate: processing {:?} ballots, {:?} candidates",
        ballots.len(),
        candidates.len()
    );
    let mut states = check_ballots(ballots, candidates)?;
    for (idx, name) in candidates.iter().enumerate() {
        info!("Candidate: {}: {}", idx + 1, name);
    }

    let total = VoteCount(ballots.len() as u64);
    // Strictly more than half of the ballots, in integer form.
    let threshold = VoteCount(total.0 / 2 + 1);
    debug!("tabulate: winning threshold: {:?}", threshold);

    let mut round_stats: Vec<RoundStats> = Vec::new();
    while round_stats.len() < MAX_ROUNDS {
        let round_id = (round_stats.len() + 1) as u32;
        let ranking = ranked_tally(&states);
        debug!("Round {:?} ranking: {:?}", round_id, ranking);
        if ranking.is_empty() {
            // Every ballot ran out of preferences without a winner.
            return Err(TabulationError::NoConvergence);
        }

        info!("Round {} (winning threshold: {})", round_id, threshold.0);
        for (cid, count) in ranking.iter() {
            info!("    {:>7} {}", count.0, candidate_name(candidates, *cid));
        }

        let (top_cid, top_count) = ranking[0];
        if top_count >= threshold {
            round_stats.push(RoundStats {
                round: round_id,
                tally: named_tally(candidates, &ranking),
                eliminated: None,
            });
            return Ok(TabulationResult {
                winner: Winner {
                    name: candidate_name(candidates, top_cid),
                    votes: top_count.0,
                },
                threshold: threshold.0,
                round_stats,
            });
        }

        let (loser, loser_count) = *ranking.last().unwrap();
        info!(
            "Round {}: eliminating {} with {} votes",
            round_id,
            candidate_name(candidates, loser),
            loser_count.0
        );
        for st in states.iter_mut() {
            if st.front() == Some(loser) {
                st.advance();
            }
        }
        round_stats.push(RoundStats {
            round: round_id,
            tally: named_tally(candidates, &ranking),
            eliminated: Some(candidate_name(candidates, loser)),
        });
    }
    Err(TabulationError::NoConvergence)
}

// Validates the preconditions and builds the working states.
//
// Every ballot must have exactly as many rankings as there are registered
// candidates and must rank each identifier of 1..=N exactly once. A
// violation is a caller error: no partial tabulation is attempted.
fn check_ballots(
    ballots: &[Ballot],
    candidates: &[String],
) -> Result<Vec<BallotState>, TabulationError> {
    if ballots.is_empty() || candidates.is_empty() {
        return Err(TabulationError::EmptyElection);
    }
    let expected = candidates.len();
    let mut states: Vec<BallotState> = Vec::with_capacity(ballots.len());
    for (idx, ballot) in ballots.iter().enumerate() {
        if ballot.rankings.len() != expected {
            return Err(TabulationError::WrongBallotLength {
                ballot: idx,
                expected,
                actual: ballot.rankings.len(),
            });
        }
        let mut seen = vec![false; expected];
        for &rank in ballot.rankings.iter() {
            let pos = match (rank as usize).checked_sub(1) {
                Some(p) if p < expected => p,
                _ => return Err(TabulationError::NotAFullRanking { ballot: idx }),
            };
            if seen[pos] {
                return Err(TabulationError::NotAFullRanking { ballot: idx });
            }
            seen[pos] = true;
        }
        states.push(BallotState {
            prefs: ballot.rankings.iter().map(|&r| CandidateId(r)).collect(),
            cursor: 0,
        });
    }
    debug!("check_ballots: validated {:?} ballots", states.len());
    Ok(states)
}

// Tallies the current front preferences, ranked by count in descending
// order. The underlying counting structure keeps first-encounter order, so
// the stable sort leaves tied candidates ranked by the order in which the
// tally first saw them.
fn ranked_tally(states: &[BallotState]) -> Vec<(CandidateId, VoteCount)> {
    let mut tally: Vec<(CandidateId, VoteCount)> = Vec::new();
    for st in states.iter() {
        let cid = match st.front() {
            Some(cid) => cid,
            None => continue,
        };
        match tally.iter_mut().find(|(c, _)| *c == cid) {
            Some((_, count)) => *count += VoteCount(1),
            None => tally.push((cid, VoteCount(1))),
        }
    }
    tally.sort_by_key(|&(_, count)| Reverse(count));
    tally
}

fn candidate_name(candidates: &[String], cid: CandidateId) -> String {
    // The identifier was range-checked during validation.
    candidates[(cid.0 - 1) as usize].clone()
}

fn named_tally(
    candidates: &[String],
    ranking: &[(CandidateId, VoteCount)],
) -> Vec<(String, u64)> {
    ranking
        .iter()
        .map(|&(cid, count)| (candidate_name(candidates, cid), count.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    fn ballots(raw: &[&[u32]]) -> Vec<Ballot> {
        raw.iter().map(|r| Ballot::new(r)).collect()
    }

    fn registry() -> Vec<String> {
        names(&["Chan", "Valdez", "Ali", "Jones"])
    }

    fn district_one() -> Vec<Ballot> {
        ballots(&[
            &[1, 4, 3, 2],
            &[1, 4, 2, 3],
            &[2, 4, 1, 3],
            &[2, 4, 3, 1],
            &[4, 1, 2, 3],
        ])
    }

    fn district_two() -> Vec<Ballot> {
        ballots(&[
            &[1, 2, 3, 4],
            &[1, 4, 3, 2],
            &[4, 2, 3, 1],
            &[4, 3, 2, 1],
            &[2, 4, 1, 3],
        ])
    }

    #[test]
    fn district_one_winner() {
        let res = tabulate(&district_one(), &registry()).unwrap();
        assert_eq!(res.winner, Winner { name: "Chan".to_string(), votes: 3 });
        // Jones has the fewest round-1 front preferences and goes first.
        assert_eq!(res.round_stats[0].eliminated, Some("Jones".to_string()));
    }

    #[test]
    fn district_two_winner() {
        let res = tabulate(&district_two(), &registry()).unwrap();
        assert_eq!(res.winner, Winner { name: "Jones".to_string(), votes: 3 });
    }

    #[test]
    fn merged_electorates_flip_the_winner() {
        // Jones carries district two on its own, but loses the merged
        // electorate even though no individual ballot changed.
        let mut merged = district_one();
        merged.extend(district_two());
        let res = tabulate(&merged, &registry()).unwrap();
        assert_eq!(res.winner, Winner { name: "Chan".to_string(), votes: 6 });
    }

    #[test]
    fn merged_round_tallies_cover_every_ballot() {
        // Total rankings mean no ballot is exhausted before a winner is
        // found: every round tallies all ten ballots.
        let mut merged = district_one();
        merged.extend(district_two());
        let res = tabulate(&merged, &registry()).unwrap();
        for rs in res.round_stats.iter() {
            let total: u64 = rs.tally.iter().map(|(_, c)| *c).sum();
            assert_eq!(total, 10, "round {}", rs.round);
        }
    }

    #[test]
    fn terminates_within_candidate_count_rounds() {
        let mut merged = district_one();
        merged.extend(district_two());
        for bs in [district_one(), district_two(), merged] {
            let res = tabulate(&bs, &registry()).unwrap();
            let eliminations = res
                .round_stats
                .iter()
                .filter(|rs| rs.eliminated.is_some())
                .count();
            assert!(eliminations <= registry().len() - 1);
        }
    }

    #[test]
    fn single_ballot() {
        let res = tabulate(&ballots(&[&[2, 1, 3]]), &names(&["A", "B", "C"])).unwrap();
        assert_eq!(res.winner, Winner { name: "B".to_string(), votes: 1 });
        assert_eq!(res.round_stats.len(), 1);
    }

    #[test]
    fn first_round_majority_ends_immediately() {
        let bs = ballots(&[&[1, 2], &[1, 2], &[2, 1]]);
        let res = tabulate(&bs, &names(&["A", "B"])).unwrap();
        assert_eq!(res.winner, Winner { name: "A".to_string(), votes: 2 });
        assert_eq!(res.round_stats.len(), 1);
        assert_eq!(res.round_stats[0].eliminated, None);
    }

    #[test]
    fn even_split_is_not_a_majority() {
        // With an even ballot count, exactly half is not enough: the round
        // continues and the lowest-ranked of the tied pair is eliminated.
        let bs = ballots(&[&[1, 2], &[2, 1]]);
        let res = tabulate(&bs, &names(&["A", "B"])).unwrap();
        assert_eq!(res.winner, Winner { name: "A".to_string(), votes: 2 });
        assert_eq!(res.round_stats[0].eliminated, Some("B".to_string()));
        assert_eq!(res.round_stats.len(), 2);
    }

    #[test]
    fn duplicate_rank_is_rejected() {
        let err = tabulate(&ballots(&[&[1, 1, 2, 3]]), &registry()).unwrap_err();
        assert_eq!(err, TabulationError::NotAFullRanking { ballot: 0 });
    }

    #[test]
    fn short_ballot_is_rejected() {
        let err = tabulate(&ballots(&[&[1, 2, 3]]), &registry()).unwrap_err();
        assert_eq!(
            err,
            TabulationError::WrongBallotLength {
                ballot: 0,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn long_ballot_is_rejected() {
        let err = tabulate(&ballots(&[&[1, 2, 3, 4, 5]]), &registry()).unwrap_err();
        assert_eq!(
            err,
            TabulationError::WrongBallotLength {
                ballot: 0,
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn out_of_range_identifier_is_rejected() {
        let err = tabulate(&ballots(&[&[1, 2, 5, 4]]), &registry()).unwrap_err();
        assert_eq!(err, TabulationError::NotAFullRanking { ballot: 0 });
        let err = tabulate(&ballots(&[&[0, 1, 2, 3]]), &registry()).unwrap_err();
        assert_eq!(err, TabulationError::NotAFullRanking { ballot: 0 });
    }

    #[test]
    fn bad_ballot_reported_by_index() {
        let bs = ballots(&[&[1, 2, 3, 4], &[4, 3, 2, 1], &[1, 2, 4, 4]]);
        let err = tabulate(&bs, &registry()).unwrap_err();
        assert_eq!(err, TabulationError::NotAFullRanking { ballot: 2 });
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            tabulate(&[], &registry()).unwrap_err(),
            TabulationError::EmptyElection
        );
        assert_eq!(
            tabulate(&ballots(&[&[1]]), &[]).unwrap_err(),
            TabulationError::EmptyElection
        );
    }

    #[test]
    fn caller_ballots_are_not_mutated() {
        let bs = district_one();
        let copy = bs.clone();
        let _ = tabulate(&bs, &registry()).unwrap();
        assert_eq!(bs, copy);
    }

    #[test]
    fn election_batch_tabulates() {
        let election = Election {
            candidates: registry(),
            ballots: district_two(),
        };
        let res = election.tabulate().unwrap();
        assert_eq!(res.winner.name, "Jones");
        assert_eq!(res.threshold, 3);
    }
}
