use crate::models::{RosterQuery, Vote, Voter, VoterStatus};
use std::collections::HashMap;

/// Join every voter against the ballot that represents them.
///
/// A voter with several ballots is represented by the one with the latest
/// timestamp; equal (or missing) timestamps go to the ballot seen last.
/// Output order and length follow `voters`.
pub fn status_join(voters: &[Voter], votes: &[Vote]) -> Vec<VoterStatus> {
    let mut latest: HashMap<&str, &Vote> = HashMap::new();
    for vote in votes {
        latest
            .entry(vote.voter_id.as_str())
            .and_modify(|current| {
                if vote.timestamp >= current.timestamp {
                    *current = vote;
                }
            })
            .or_insert(vote);
    }

    voters
        .iter()
        .map(|voter| {
            let ballot = latest.get(voter.id.as_str());
            VoterStatus {
                voter: voter.clone(),
                has_voted: ballot.is_some(),
                voted_at: ballot.and_then(|v| v.timestamp),
                voted_for: ballot.map(|v| v.candidate.clone()),
            }
        })
        .collect()
}

pub fn filter_roster<'a>(statuses: &'a [VoterStatus], query: &RosterQuery) -> Vec<&'a VoterStatus> {
    statuses.iter().filter(|s| query.matches(s)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterCounts {
    pub voted: usize,
    pub not_voted: usize,
    pub total: usize,
}

impl RosterCounts {
    pub fn of(statuses: &[VoterStatus]) -> Self {
        let voted = statuses.iter().filter(|s| s.has_voted).count();
        Self {
            voted,
            not_voted: statuses.len() - voted,
            total: statuses.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RosterFilter;
    use chrono::{TimeZone, Utc};

    fn voter(id: &str, name: &str) -> Voter {
        Voter {
            id: id.into(),
            name: name.into(),
        }
    }

    fn vote(id: &str, candidate: &str, voter_id: &str, millis: Option<i64>) -> Vote {
        Vote {
            id: id.into(),
            candidate: candidate.into(),
            voter_id: voter_id.into(),
            timestamp: millis.and_then(|m| Utc.timestamp_millis_opt(m).single()),
        }
    }

    #[test]
    fn join_marks_voters_who_voted() {
        let voters = vec![voter("0", "A"), voter("1", "B")];
        let votes = vec![vote("v1", "Alice", "0", Some(1000))];

        let statuses = status_join(&voters, &votes);
        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].has_voted);
        assert_eq!(statuses[0].voted_for.as_deref(), Some("Alice"));
        assert_eq!(statuses[0].voted_at.map(|t| t.timestamp_millis()), Some(1000));
        assert!(!statuses[1].has_voted);
        assert!(statuses[1].voted_for.is_none());
        assert!(statuses[1].voted_at.is_none());
    }

    #[test]
    fn join_preserves_voter_order_and_ids() {
        let voters = vec![voter("9", "Z"), voter("2", "Y"), voter("5", "X")];
        let votes = vec![vote("a", "Bob", "5", None), vote("b", "Bob", "ghost", None)];

        let ids: Vec<_> = status_join(&voters, &votes)
            .into_iter()
            .map(|s| s.voter.id)
            .collect();
        assert_eq!(ids, ["9", "2", "5"]);
    }

    #[test]
    fn latest_ballot_represents_a_repeat_voter() {
        let voters = vec![voter("0", "A")];
        let votes = vec![
            vote("v2", "Bob", "0", Some(2000)),
            vote("v1", "Alice", "0", Some(1000)),
            vote("v3", "Charlie", "0", None),
        ];

        let statuses = status_join(&voters, &votes);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].voted_for.as_deref(), Some("Bob"));
    }

    #[test]
    fn equal_timestamps_go_to_the_later_record() {
        let voters = vec![voter("0", "A")];
        let votes = vec![
            vote("v1", "Alice", "0", Some(1000)),
            vote("v2", "Charlie", "0", Some(1000)),
        ];
        assert_eq!(
            status_join(&voters, &votes)[0].voted_for.as_deref(),
            Some("Charlie")
        );
    }

    #[test]
    fn roster_search_and_filter_combine() {
        let voters = vec![voter("10", "Ada"), voter("11", "Brian"), voter("12", "Adele")];
        let votes = vec![vote("v1", "Alice", "12", Some(5))];
        let statuses = status_join(&voters, &votes);

        let query = RosterQuery {
            search: Some("AD".into()),
            filter: RosterFilter::All,
        };
        assert_eq!(filter_roster(&statuses, &query).len(), 2);

        let query = RosterQuery {
            search: Some("ad".into()),
            filter: RosterFilter::NotVoted,
        };
        let hits = filter_roster(&statuses, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].voter.name, "Ada");

        let query = RosterQuery {
            search: Some("11".into()),
            filter: RosterFilter::Voted,
        };
        assert!(filter_roster(&statuses, &query).is_empty());

        let counts = RosterCounts::of(&statuses);
        assert_eq!(
            counts,
            RosterCounts {
                voted: 1,
                not_voted: 2,
                total: 3
            }
        );
    }
}
