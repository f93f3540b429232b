pub mod candidates;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use candidates::CANDIDATES;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vote {
    pub id: String,
    pub candidate: String,
    pub voter_id: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A voter joined against the ballot that represents them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoterStatus {
    pub voter: Voter,
    pub has_voted: bool,
    pub voted_at: Option<DateTime<Utc>>,
    pub voted_for: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTally {
    pub name: String,
    pub votes: usize,
    pub voters: Vec<String>,
    pub percentage: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_voters: usize,
    pub total_votes: usize,
    pub candidate_count: usize,
    /// Percentage, already rounded to one decimal place.
    pub turnout_rate: f64,
}

impl DashboardStats {
    pub fn turnout_display(&self) -> String {
        format!("{:.1}", self.turnout_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterFilter {
    #[default]
    All,
    Voted,
    NotVoted,
}

impl RosterFilter {
    pub const ALL: [RosterFilter; 3] = [RosterFilter::All, RosterFilter::Voted, RosterFilter::NotVoted];

    pub fn key(&self) -> &'static str {
        match self {
            RosterFilter::All => "all",
            RosterFilter::Voted => "voted",
            RosterFilter::NotVoted => "not-voted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RosterFilter::All => "All",
            RosterFilter::Voted => "Voted",
            RosterFilter::NotVoted => "Not Voted",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn admits(&self, status: &VoterStatus) -> bool {
        match self {
            RosterFilter::All => true,
            RosterFilter::Voted => status.has_voted,
            RosterFilter::NotVoted => !status.has_voted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterQuery {
    pub search: Option<String>,
    pub filter: RosterFilter,
}

impl RosterQuery {
    /// Case-insensitive substring match on name or id; an empty search matches all.
    /// The term is used as typed, surrounding spaces included.
    pub fn matches(&self, status: &VoterStatus) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                status.voter.name.to_lowercase().contains(&term)
                    || status.voter.id.to_lowercase().contains(&term)
            }
        };
        matches_search && self.filter.admits(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str, name: &str, has_voted: bool) -> VoterStatus {
        VoterStatus {
            voter: Voter {
                id: id.into(),
                name: name.into(),
            },
            has_voted,
            voted_at: None,
            voted_for: None,
        }
    }

    fn search(term: &str) -> RosterQuery {
        RosterQuery {
            search: Some(term.into()),
            filter: RosterFilter::All,
        }
    }

    #[test]
    fn search_matches_name_or_id_ignoring_case() {
        let ada = status("V-17", "Ada Lovelace", false);
        assert!(search("LOVE").matches(&ada));
        assert!(search("v-1").matches(&ada));
        assert!(search("").matches(&ada));
        assert!(!search("grace").matches(&ada));
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let ada = status("V-17", "Ada Lovelace", false);
        assert!(search("a l").matches(&ada));
        assert!(!search(" ada").matches(&ada));
        assert!(!search("   ").matches(&status("V-18", "Grace", false)));
    }

    #[test]
    fn filter_applies_after_search() {
        let query = RosterQuery {
            search: Some("ada".into()),
            filter: RosterFilter::Voted,
        };
        assert!(query.matches(&status("1", "Ada", true)));
        assert!(!query.matches(&status("2", "Ada", false)));
        assert_eq!(RosterFilter::from_key("not-voted"), Some(RosterFilter::NotVoted));
    }
}
