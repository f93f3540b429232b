use crate::models::{DashboardStats, Vote, Voter, CANDIDATES};
use std::collections::BTreeMap;

pub fn dashboard_stats(voters: &[Voter], votes: &[Vote]) -> DashboardStats {
    let total_voters = voters.len();
    let total_votes = votes.len();
    let turnout_rate = if total_voters > 0 {
        let raw = total_votes as f64 / total_voters as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    } else {
        0.0
    };

    DashboardStats {
        total_voters,
        total_votes,
        candidate_count: CANDIDATES.len(),
        turnout_rate,
    }
}

/// Voter ids that appear on more than one ballot, with their ballot count.
///
/// Nothing is rejected on this basis; the list only surfaces over-voting.
pub fn repeat_voters(votes: &[Vote]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for vote in votes {
        *counts.entry(vote.voter_id.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, n)| (id.to_string(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voters(n: usize) -> Vec<Voter> {
        (0..n)
            .map(|i| Voter {
                id: i.to_string(),
                name: format!("Voter {}", i),
            })
            .collect()
    }

    fn votes(voter_ids: &[&str]) -> Vec<Vote> {
        voter_ids
            .iter()
            .enumerate()
            .map(|(i, voter_id)| Vote {
                id: format!("v{}", i),
                candidate: "Alice".into(),
                voter_id: voter_id.to_string(),
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn no_voters_means_zero_turnout() {
        let stats = dashboard_stats(&[], &votes(&["0"]));
        assert_eq!(stats.turnout_rate, 0.0);
        assert_eq!(stats.turnout_display(), "0.0");
        assert!(stats.turnout_rate.is_finite());
        assert_eq!(stats.candidate_count, 3);
    }

    #[test]
    fn turnout_rounds_to_one_decimal() {
        let stats = dashboard_stats(&voters(3), &votes(&["0"]));
        assert_eq!(stats.total_voters, 3);
        assert_eq!(stats.total_votes, 1);
        assert_eq!(stats.turnout_display(), "33.3");

        let stats = dashboard_stats(&voters(3), &votes(&["0", "1"]));
        assert_eq!(stats.turnout_display(), "66.7");
    }

    #[test]
    fn stats_are_repeatable() {
        let (v, t) = (voters(4), votes(&["1", "2"]));
        assert_eq!(dashboard_stats(&v, &t), dashboard_stats(&v, &t));
    }

    #[test]
    fn repeat_voters_are_listed_by_id() {
        let repeats = repeat_voters(&votes(&["4", "1", "4", "2", "1", "4"]));
        assert_eq!(repeats, vec![("1".to_string(), 2), ("4".to_string(), 3)]);
        assert!(repeat_voters(&votes(&["1", "2"])).is_empty());
    }
}
