use super::fixtures;
use super::{Panel, View};
use crate::models::candidates::{self, CANDIDATES};
use crate::models::{CandidateTally, DashboardStats, RosterQuery, VoterStatus};
use crate::voting::{filter_roster, leader_margin, RosterCounts};
use chrono::{DateTime, Utc};

pub const GREY: u32 = 0x4b5563;
const BLUE: u32 = 0x2563eb;
const GREEN: u32 = 0x059669;
const PURPLE: u32 = 0x667eea;

const ROSTER_ROWS: usize = 25;
const NAME_WIDTH: usize = 48;
const ID_WIDTH: usize = 64;
// Keeps the field under Discord's 1024 character limit.
const REPEAT_ROWS: usize = 10;
const BAR_WIDTH: usize = 20;

pub fn title(view: &View) -> String {
    match view {
        View::Overview => "📊 Dashboard".to_string(),
        View::Roster(_) => "🗳️ Voter List".to_string(),
        View::Candidates => "🎙️ Candidates".to_string(),
        View::Tally => "🏆 Live Vote Count".to_string(),
        View::Statistics => "📈 Vote Statistics".to_string(),
        View::Voter(id) => format!("🔎 Voter {}", truncate(id, ID_WIDTH)),
    }
}

pub fn overview(stats: &DashboardStats) -> Panel {
    let mut panel = Panel::new(title(&View::Overview), BLUE);
    panel.description = "Overview of voting system statistics".to_string();
    panel
        .field("👥 Total Voters", stats.total_voters.to_string(), true)
        .field("✅ Votes Cast", stats.total_votes.to_string(), true)
        .field("🎯 Candidates", stats.candidate_count.to_string(), true)
        .field("📈 Turnout Rate", format!("{}%", stats.turnout_display()), true);

    let features: Vec<String> = fixtures::FEATURES.iter().map(|f| format!("✔ {}", f)).collect();
    panel.field(
        "🔒 Secure Voting System",
        format!("{}\n\n{}", fixtures::WELCOME, features.join("\n")),
        false,
    );
    panel
}

pub fn roster(statuses: &[VoterStatus], query: &RosterQuery) -> Panel {
    let mut panel = Panel::new(title(&View::Roster(query.clone())), GREEN);
    let counts = RosterCounts::of(statuses);
    panel
        .field("✅ Voted", counts.voted.to_string(), true)
        .field("⏳ Not Voted", counts.not_voted.to_string(), true)
        .field("👥 Total Voters", counts.total.to_string(), true);

    let mut lines = Vec::new();
    let mut heading = format!("Filter: **{}**", query.filter.label());
    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        heading.push_str(&format!(" · Search: `{}`", truncate(term, NAME_WIDTH)));
    }
    lines.push(heading);
    lines.push(String::new());

    let hits = filter_roster(statuses, query);
    if hits.is_empty() {
        lines.push("No voters found".to_string());
    }
    for status in hits.iter().take(ROSTER_ROWS) {
        lines.push(roster_row(status));
    }
    if hits.len() > ROSTER_ROWS {
        lines.push(format!("… and {} more", hits.len() - ROSTER_ROWS));
    }
    panel.description = lines.join("\n");
    panel
}

fn roster_row(status: &VoterStatus) -> String {
    let name = truncate(&status.voter.name, NAME_WIDTH);
    let id = truncate(&status.voter.id, NAME_WIDTH);
    match (status.has_voted, status.voted_at) {
        (true, Some(at)) => format!(
            "✅ **{}** · `{}` · voted {}",
            name,
            id,
            discord_time(at)
        ),
        (true, None) => format!("✅ **{}** · `{}` · voted", name, id),
        (false, _) => format!("⏳ **{}** · `{}` · not voted", name, id),
    }
}

pub fn tally(tallies: &[CandidateTally]) -> Panel {
    let standing = leader_margin(tallies);
    let colour = standing
        .leader
        .map(|t| candidates::metadata(&t.name).colour)
        .unwrap_or(GREY);
    let mut panel = Panel::new(title(&View::Tally), colour);
    panel.description = "Live results from the voting machines".to_string();

    let leader = match standing.leader {
        Some(t) => {
            let meta = candidates::metadata(&t.name);
            format!("{} {}\n{}", meta.symbol, t.name, meta.party)
        }
        None => "No votes yet\n-".to_string(),
    };
    panel
        .field("👑 Current Leader", leader, true)
        .field(
            "📏 Lead Margin",
            format!(
                "{} votes\n{:.1}%",
                standing.margin_votes, standing.margin_percentage
            ),
            true,
        )
        .field("🗳️ Total Votes", standing.total_votes.to_string(), true);

    let max = tallies.iter().map(|t| t.votes).max().unwrap_or(0);
    for entry in tallies {
        let meta = candidates::metadata(&entry.name);
        panel.field(
            format!("#{} {} {} — {}", entry.rank, meta.symbol, entry.name, meta.party),
            format!(
                "`{}` **{}** votes ({:.1}%)",
                bar(entry.votes, max, BAR_WIDTH),
                entry.votes,
                entry.percentage
            ),
            false,
        );
    }
    panel
}

pub fn statistics(
    tallies: &[CandidateTally],
    stats: &DashboardStats,
    repeats: &[(String, usize)],
) -> Panel {
    let standing = leader_margin(tallies);
    let mut panel = Panel::new(title(&View::Statistics), PURPLE);
    panel.description = "Comprehensive analysis and insights".to_string();
    panel
        .field("📈 Turnout Rate", format!("{}%", stats.turnout_display()), true)
        .field("⚡ Total Votes", stats.total_votes.to_string(), true)
        .field(
            "🏅 Leading Candidate",
            standing.leader.map(|t| t.name.as_str()).unwrap_or("None"),
            true,
        )
        .field("🕒 Total Voters", stats.total_voters.to_string(), true);

    let chart = if standing.total_votes == 0 {
        "No votes cast yet".to_string()
    } else {
        let max = tallies.iter().map(|t| t.votes).max().unwrap_or(0);
        let rows: Vec<(String, usize)> = tallies.iter().map(|t| (t.name.clone(), t.votes)).collect();
        bar_chart(&rows, max)
    };
    panel.field("Votes by Candidate (Live Data)", chart, false);

    if !repeats.is_empty() {
        let mut lines: Vec<String> = repeats
            .iter()
            .take(REPEAT_ROWS)
            .map(|(id, n)| format!("voter `{}` cast {} ballots", truncate(id, NAME_WIDTH), n))
            .collect();
        if repeats.len() > REPEAT_ROWS {
            lines.push(format!("… and {} more", repeats.len() - REPEAT_ROWS));
        }
        panel.field("⚠️ Repeat Ballots", lines.join("\n"), false);
    }

    panel.field(
        "── Illustrative figures ──",
        "Static sample data below, not read from the store.",
        false,
    );

    let age_total: u32 = fixtures::AGE_GROUPS.iter().map(|(_, v)| v).sum();
    let ages: Vec<String> = fixtures::AGE_GROUPS
        .iter()
        .map(|(name, value)| {
            format!(
                "{}: {:.0}%",
                name,
                f64::from(*value) / f64::from(age_total) * 100.0
            )
        })
        .collect();
    panel.field("Age Group Distribution", ages.join("\n"), true);

    panel.field("Hourly Voting Trend", fixture_chart(&fixtures::HOURLY_VOTES), false);
    panel.field("Votes by District", fixture_chart(&fixtures::DISTRICT_VOTES), false);

    let insights: Vec<String> = fixtures::INSIGHTS
        .iter()
        .map(|(heading, text)| format!("**{}**: {}", heading, text))
        .collect();
    panel.field("💡 Key Insights", insights.join("\n"), false);
    panel
}

pub fn candidates() -> Panel {
    let mut panel = Panel::new(title(&View::Candidates), BLUE);
    panel.description = "Meet the candidates and their platforms".to_string();
    for candidate in CANDIDATES.iter() {
        let agenda: Vec<String> = candidate.agenda.iter().map(|a| format!("• {}", a)).collect();
        panel.field(
            format!("{} {} — {}", candidate.symbol, candidate.name, candidate.party),
            format!(
                "*\"{}\"*\n**Experience:** {}\n**Key Agenda:**\n{}",
                candidate.slogan,
                candidate.experience,
                agenda.join("\n")
            ),
            false,
        );
    }
    let info: Vec<String> = fixtures::ELECTION_INFO
        .iter()
        .map(|(label, value)| format!("**{}:** {}", label, value))
        .collect();
    panel.field("📅 Election Information", info.join("\n"), false);
    panel
}

pub fn voter(id: &str, status: Option<&VoterStatus>) -> Panel {
    let mut panel = Panel::new(title(&View::Voter(id.to_string())), GREY);
    let Some(status) = status else {
        panel.description = format!("No registered voter with id `{}`", truncate(id, ID_WIDTH));
        return panel;
    };

    panel.colour = if status.has_voted { GREEN } else { GREY };
    panel.description = format!("**{}**", status.voter.name);
    panel.field(
        "Status",
        if status.has_voted { "✅ Voted" } else { "⏳ Not voted" },
        true,
    );
    if let Some(candidate) = &status.voted_for {
        panel.field("Voted For", candidate.clone(), true);
    }
    if let Some(at) = status.voted_at {
        panel.field("Voted At", discord_time(at), true);
    }
    panel
}

/// Rendered by the Discord client in the viewer's own locale.
fn discord_time(at: DateTime<Utc>) -> String {
    format!("<t:{}:T>", at.timestamp())
}

fn bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * width as f64).round() as usize
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn bar_chart(rows: &[(String, usize)], max: usize) -> String {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let lines: Vec<String> = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "{:<width$} {} {}",
                label,
                bar(*value, max, BAR_WIDTH),
                value,
                width = label_width
            )
        })
        .collect();
    format!("```\n{}\n```", lines.join("\n"))
}

fn fixture_chart(data: &[(&str, u32)]) -> String {
    let max = data.iter().map(|(_, v)| *v as usize).max().unwrap_or(0);
    let rows: Vec<(String, usize)> = data.iter().map(|(l, v)| (l.to_string(), *v as usize)).collect();
    bar_chart(&rows, max)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars - 1).collect();
        format!("{}…", cut)
    } else {
        text.to_string()
    }
}
