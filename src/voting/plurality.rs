use crate::models::{CandidateTally, Vote, CANDIDATES};

/// Count ballots per candidate on the fixed slate.
///
/// Every ballot naming a slate candidate counts, ballots for any other name
/// are dropped. Percentages are against all ballots, including dropped ones.
pub fn tally(votes: &[Vote]) -> Vec<CandidateTally> {
    let total_votes = votes.len();

    let mut tallies: Vec<CandidateTally> = CANDIDATES
        .iter()
        .map(|candidate| {
            let voters: Vec<String> = votes
                .iter()
                .filter(|vote| vote.candidate == candidate.name)
                .map(|vote| vote.voter_id.clone())
                .collect();
            let percentage = if total_votes > 0 {
                voters.len() as f64 / total_votes as f64 * 100.0
            } else {
                0.0
            };
            CandidateTally {
                name: candidate.name.to_string(),
                votes: voters.len(),
                voters,
                percentage,
                rank: 0,
            }
        })
        .collect();

    // Stable: equal counts keep slate order.
    tallies.sort_by(|a, b| b.votes.cmp(&a.votes));
    for (index, entry) in tallies.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    tallies
}

/// Who leads, and by how much over the runner-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing<'a> {
    /// `None` until at least one ballot has been counted.
    pub leader: Option<&'a CandidateTally>,
    pub margin_votes: usize,
    pub margin_percentage: f64,
    pub total_votes: usize,
}

pub fn leader_margin(tallies: &[CandidateTally]) -> Standing<'_> {
    let total_votes = tallies.iter().map(|t| t.votes).sum();
    let leader = tallies.first().filter(|_| total_votes > 0);

    let (margin_votes, margin_percentage) = match (tallies.first(), tallies.get(1)) {
        (Some(first), Some(second)) => (
            first.votes.saturating_sub(second.votes),
            first.percentage - second.percentage,
        ),
        _ => (0, 0.0),
    };

    Standing {
        leader,
        margin_votes,
        margin_percentage,
        total_votes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(candidate: &str, voter_id: &str) -> Vote {
        Vote {
            id: format!("{}-{}", candidate, voter_id),
            candidate: candidate.into(),
            voter_id: voter_id.into(),
            timestamp: None,
        }
    }

    #[test]
    fn empty_tally_has_three_zero_entries() {
        let tallies = tally(&[]);
        assert_eq!(tallies.len(), 3);
        for entry in &tallies {
            assert_eq!(entry.votes, 0);
            assert_eq!(entry.percentage, 0.0);
            assert!(entry.voters.is_empty());
        }
        let names: Vec<_> = tallies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie"]);
        assert_eq!(tallies[2].rank, 3);
    }

    #[test]
    fn single_vote_puts_alice_first() {
        let tallies = tally(&[vote("Alice", "0")]);
        assert_eq!(tallies[0].name, "Alice");
        assert_eq!(tallies[0].votes, 1);
        assert_eq!(tallies[0].percentage, 100.0);
        assert_eq!(tallies[0].voters, ["0"]);
        assert_eq!(tallies[1].name, "Bob");
        assert_eq!(tallies[1].percentage, 0.0);
        assert_eq!(tallies[2].name, "Charlie");
    }

    #[test]
    fn unknown_candidates_are_dropped_from_counts() {
        let votes = vec![
            vote("Charlie", "1"),
            vote("Mallory", "2"),
            vote("charlie", "3"),
            vote("Bob", "4"),
            vote("Charlie", "5"),
        ];
        let tallies = tally(&votes);
        let counted: usize = tallies.iter().map(|t| t.votes).sum();
        assert_eq!(counted, 3);
        assert_eq!(tallies[0].name, "Charlie");
        assert_eq!(tallies[0].percentage, 40.0);
        assert_eq!(tallies[0].rank, 1);
        assert_eq!(tallies[1].name, "Bob");
        assert_eq!(tallies[2].name, "Alice");
    }

    #[test]
    fn ties_keep_slate_order() {
        let tallies = tally(&[vote("Charlie", "1"), vote("Bob", "2")]);
        let names: Vec<_> = tallies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Charlie", "Alice"]);
    }

    #[test]
    fn tally_is_repeatable() {
        let votes = vec![vote("Bob", "1"), vote("Alice", "2"), vote("Bob", "3")];
        assert_eq!(tally(&votes), tally(&votes));
    }

    #[test]
    fn margin_is_rank_one_minus_rank_two() {
        let votes = vec![vote("Bob", "1"), vote("Bob", "2"), vote("Bob", "3"), vote("Alice", "4")];
        let tallies = tally(&votes);
        let standing = leader_margin(&tallies);
        assert_eq!(standing.leader.map(|t| t.name.as_str()), Some("Bob"));
        assert_eq!(standing.margin_votes, 2);
        assert_eq!(standing.margin_percentage, 50.0);
        assert_eq!(standing.total_votes, 4);
    }

    #[test]
    fn no_leader_before_first_vote() {
        let tallies = tally(&[]);
        let standing = leader_margin(&tallies);
        assert!(standing.leader.is_none());
        assert_eq!(standing.margin_votes, 0);
        assert_eq!(standing.margin_percentage, 0.0);
    }
}
