//! Dashboard views and the transport-neutral panels they render to.

pub mod discord;
pub mod fixtures;
pub mod render;

use crate::models::{RosterFilter, RosterQuery};
use crate::store::{DataSource, Snapshot};
use crate::voting;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

const FAST_REFRESH: Duration = Duration::from_secs(15);
const SLOW_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Overview,
    Roster(RosterQuery),
    Candidates,
    Tally,
    Statistics,
    Voter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    /// Also the state after a failed fetch: failures render as empty data.
    Loaded,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Roster(_) => "voters",
            View::Candidates => "candidates",
            View::Tally => "tally",
            View::Statistics => "statistics",
            View::Voter(_) => "voter",
        }
    }

    /// Poll period for live views; `None` for views rendered once.
    pub fn refresh_every(&self) -> Option<Duration> {
        match self {
            View::Tally => Some(FAST_REFRESH),
            View::Overview | View::Roster(_) | View::Statistics => Some(SLOW_REFRESH),
            View::Candidates | View::Voter(_) => None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.refresh_every().is_some()
    }

    pub fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        if self.is_live() {
            controls.push(Control::Refresh);
            controls.push(Control::Stop);
        }
        if let View::Roster(_) = self {
            controls.extend(RosterFilter::ALL.into_iter().map(Control::Filter));
        }
        controls
    }

    /// Placeholder shown while the first poll is in flight.
    pub fn loading_panel(&self) -> Panel {
        let mut panel = Panel::new(render::title(self), render::GREY);
        panel.description = "Loading...".to_string();
        self.decorate(&mut panel, None);
        panel
    }

    /// Fetch what this view needs and render it.
    pub async fn build(&self, source: &dyn DataSource, now: DateTime<Utc>) -> Panel {
        let mut panel = match self {
            View::Overview => {
                let snapshot = Snapshot::load(source).await;
                render::overview(&voting::dashboard_stats(&snapshot.voters, &snapshot.votes))
            }
            View::Roster(query) => {
                let snapshot = Snapshot::load(source).await;
                render::roster(&voting::status_join(&snapshot.voters, &snapshot.votes), query)
            }
            View::Candidates => render::candidates(),
            View::Tally => {
                let snapshot = Snapshot::load_votes(source).await;
                render::tally(&voting::tally(&snapshot.votes))
            }
            View::Statistics => {
                let snapshot = Snapshot::load(source).await;
                render::statistics(
                    &voting::tally(&snapshot.votes),
                    &voting::dashboard_stats(&snapshot.voters, &snapshot.votes),
                    &voting::repeat_voters(&snapshot.votes),
                )
            }
            View::Voter(id) => {
                let snapshot = Snapshot::load(source).await;
                let statuses = voting::status_join(&snapshot.voters, &snapshot.votes);
                render::voter(id, statuses.iter().find(|s| &s.voter.id == id))
            }
        };
        self.decorate(&mut panel, Some(now));
        panel
    }

    fn decorate(&self, panel: &mut Panel, updated: Option<DateTime<Utc>>) {
        panel.controls = self.controls();
        if let View::Roster(query) = self {
            panel.selected_filter = Some(query.filter);
        }
        panel.footer = match (self.refresh_every(), updated) {
            (Some(every), Some(at)) => Some(format!(
                "Auto-refresh every {}s · updated {} UTC",
                every.as_secs(),
                at.format("%H:%M:%S")
            )),
            (Some(every), None) => Some(format!("Auto-refresh every {}s", every.as_secs())),
            (None, Some(at)) => Some(format!("As of {} UTC", at.format("%H:%M:%S"))),
            (None, None) => None,
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rendered card: what a message embed shows, minus the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub fields: Vec<PanelField>,
    pub footer: Option<String>,
    pub controls: Vec<Control>,
    pub selected_filter: Option<RosterFilter>,
}

impl Panel {
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            colour,
            fields: Vec::new(),
            footer: None,
            controls: Vec::new(),
            selected_filter: None,
        }
    }

    pub fn field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> &mut Self {
        self.fields.push(PanelField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Refresh,
    Stop,
    Filter(RosterFilter),
}

lazy_static! {
    static ref CONTROL_ID: Regex =
        Regex::new(r"^dash_(refresh|stop|filter_(all|voted|not-voted))$").expect("control id pattern");
}

impl Control {
    pub fn custom_id(&self) -> String {
        match self {
            Control::Refresh => "dash_refresh".to_string(),
            Control::Stop => "dash_stop".to_string(),
            Control::Filter(filter) => format!("dash_filter_{}", filter.key()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Refresh => "🔄 Refresh",
            Control::Stop => "⏹ Stop",
            Control::Filter(filter) => filter.label(),
        }
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let caps = CONTROL_ID.captures(custom_id)?;
        if let Some(filter) = caps.get(2) {
            return RosterFilter::from_key(filter.as_str()).map(Control::Filter);
        }
        match caps.get(1)?.as_str() {
            "refresh" => Some(Control::Refresh),
            "stop" => Some(Control::Stop),
            _ => None,
        }
    }
}

/// Where a live view publishes its panels.
#[async_trait]
pub trait PanelSink: Send + Sync {
    async fn publish(&self, panel: &Panel) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Strip the interactive controls once the view stops polling.
    async fn retire(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, StoreError};
    use chrono::TimeZone;
    use serde_json::{json, Value};

    struct Fixed;

    #[async_trait]
    impl DataSource for Fixed {
        async fn fetch_collection(&self, collection: Collection) -> Result<Value, StoreError> {
            Ok(match collection {
                Collection::Voters => json!([{ "name": "A" }, { "name": "B" }]),
                Collection::Votes => json!({
                    "v1": { "candidate": "Alice", "voter_id": "0", "timestamp": 1000 }
                }),
            })
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn refresh_periods_match_views() {
        assert_eq!(View::Tally.refresh_every(), Some(Duration::from_secs(15)));
        assert_eq!(View::Overview.refresh_every(), Some(Duration::from_secs(30)));
        assert_eq!(
            View::Roster(RosterQuery::default()).refresh_every(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(View::Statistics.refresh_every(), Some(Duration::from_secs(30)));
        assert!(!View::Candidates.is_live());
        assert!(!View::Voter("1".into()).is_live());
    }

    #[test]
    fn control_ids_parse_back() {
        for control in View::Roster(RosterQuery::default()).controls() {
            assert_eq!(Control::parse(&control.custom_id()), Some(control));
        }
        assert_eq!(Control::parse("dash_filter_maybe"), None);
        assert_eq!(Control::parse("vote_button"), None);
    }

    #[test]
    fn static_views_have_no_controls() {
        assert!(View::Candidates.controls().is_empty());
        assert_eq!(View::Tally.controls(), vec![Control::Refresh, Control::Stop]);
    }

    #[tokio::test]
    async fn tally_view_renders_live_counts() {
        let panel = View::Tally.build(&Fixed, noon()).await;
        assert!(panel.fields.iter().any(|f| f.value.contains("Alice")));
        assert_eq!(
            panel.footer.as_deref(),
            Some("Auto-refresh every 15s · updated 12:00:00 UTC")
        );
    }

    #[tokio::test]
    async fn voter_lookup_finds_status() {
        let panel = View::Voter("0".into()).build(&Fixed, noon()).await;
        assert!(panel.fields.iter().any(|f| f.value == "Alice"));
        let panel = View::Voter("7".into()).build(&Fixed, noon()).await;
        assert!(panel.description.contains("No registered voter"));
    }
}
