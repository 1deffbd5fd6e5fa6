use crate::types::*;
use std::collections::BTreeMap;

/// Result of tallying one full set of ballots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Every target sharing the highest count, in id order
    pub most_voted: Vec<ConnectionId>,
    pub is_tie: bool,
    pub impostor_caught: bool,
}

/// Count ballots received per target
fn tally_votes(votes: &Votes) -> BTreeMap<ConnectionId, u32> {
    let mut tally: BTreeMap<ConnectionId, u32> = BTreeMap::new();
    for target in votes.values() {
        *tally.entry(target.clone()).or_insert(0) += 1;
    }
    tally
}

/// Decide whether the impostor was caught.
///
/// A tie at the top always lets the impostor survive, even when the impostor is
/// one of the tied targets. Only a unique top target equal to the impostor counts
/// as a catch.
pub fn resolve_votes(votes: &Votes, impostor_id: &str) -> VoteOutcome {
    let tally = tally_votes(votes);
    let max = tally.values().copied().max().unwrap_or(0);

    let most_voted: Vec<ConnectionId> = tally
        .iter()
        .filter(|&(_, &count)| count == max && count > 0)
        .map(|(id, _)| id.clone())
        .collect();

    let is_tie = most_voted.len() > 1;
    let impostor_caught = !is_tie && most_voted.first().map(String::as_str) == Some(impostor_id);

    VoteOutcome {
        most_voted,
        is_tie,
        impostor_caught,
    }
}
