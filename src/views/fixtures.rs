//! Static illustrative datasets.
//!
//! None of these figures come from the store. The statistics view shows them
//! under a heading that says so.

pub const HOURLY_VOTES: [(&str, u32); 6] = [
    ("8 AM", 45),
    ("9 AM", 89),
    ("10 AM", 156),
    ("11 AM", 234),
    ("12 PM", 198),
    ("1 PM", 170),
];

pub const DISTRICT_VOTES: [(&str, u32); 3] = [
    ("District 1", 387),
    ("District 2", 298),
    ("District 3", 207),
];

pub const AGE_GROUPS: [(&str, u32); 5] = [
    ("18-25", 145),
    ("26-35", 267),
    ("36-45", 223),
    ("46-60", 189),
    ("60+", 68),
];

pub const INSIGHTS: [(&str, &str); 3] = [
    (
        "High Turnout",
        "Voter turnout is 5.2% higher than the previous election, indicating increased civic engagement.",
    ),
    (
        "Youth Participation",
        "The 26-35 age group shows the highest participation rate at 29.9% of total votes.",
    ),
    (
        "District Performance",
        "District 1 leads with 43.4% of total votes, followed by District 2 at 33.4%.",
    ),
];

pub const ELECTION_INFO: [(&str, &str); 4] = [
    ("Election Date", "November 5, 2025"),
    ("Voting Hours", "8:00 AM - 6:00 PM"),
    ("Polling Stations", "Check your district"),
    ("Required Documents", "Valid ID & Voter Card"),
];

pub const WELCOME: &str = "Welcome to the Voting Machine Dashboard. This system provides real-time \
monitoring of the voting process, voter management, and comprehensive statistics analysis.";

pub const FEATURES: [&str; 4] = [
    "Real-time vote tracking",
    "Secure voter authentication",
    "Comprehensive analytics",
    "Transparent counting process",
];
