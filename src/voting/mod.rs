//! Aggregation over one poll's voters and votes.
//!
//! Everything here is a pure function of the normalized input sequences:
//! nothing is cached between polls and inputs are never mutated.

pub mod plurality;
pub mod stats;
pub mod status;

pub use plurality::{leader_margin, tally};
pub use stats::{dashboard_stats, repeat_voters};
pub use status::{filter_roster, status_join, RosterCounts};
