//! The fixed candidate slate and its display metadata.
//!
//! Order matters: it is the tie-break order for the tally.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub name: &'static str,
    pub party: &'static str,
    pub symbol: &'static str,
    pub colour: u32,
    pub slogan: &'static str,
    pub experience: &'static str,
    pub agenda: &'static [&'static str],
}

pub static CANDIDATES: [Candidate; 3] = [
    Candidate {
        name: "Alice",
        party: "Progressive Party",
        symbol: "🌟",
        colour: 0x3b82f6,
        slogan: "Innovation for Tomorrow",
        experience: "12 years in technology and public service",
        agenda: &[
            "Digital Transformation",
            "Education Reform",
            "Healthcare Innovation",
            "Economic Growth",
        ],
    },
    Candidate {
        name: "Bob",
        party: "Unity Party",
        symbol: "🏛️",
        colour: 0xef4444,
        slogan: "Building Bridges Together",
        experience: "15 years in community development",
        agenda: &[
            "Infrastructure Development",
            "Community Unity",
            "Social Welfare",
            "Job Creation",
        ],
    },
    Candidate {
        name: "Charlie",
        party: "Reform Party",
        symbol: "🚀",
        colour: 0x10b981,
        slogan: "Forward Into the Future",
        experience: "10 years in environmental and social advocacy",
        agenda: &[
            "Environmental Protection",
            "Government Reform",
            "Youth Empowerment",
            "Sustainable Development",
        ],
    },
];

static INDEPENDENT: Candidate = Candidate {
    name: "",
    party: "Independent",
    symbol: "🗳️",
    colour: 0x6b7280,
    slogan: "",
    experience: "",
    agenda: &[],
};

pub fn find(name: &str) -> Option<&'static Candidate> {
    CANDIDATES.iter().find(|c| c.name == name)
}

/// Metadata for display; names outside the slate get the independent fallback.
pub fn metadata(name: &str) -> &'static Candidate {
    find(name).unwrap_or(&INDEPENDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slate_is_in_enumeration_order() {
        let names: Vec<_> = CANDIDATES.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(find("Bob").map(|c| c.party), Some("Unity Party"));
        assert!(find("bob").is_none());
    }

    #[test]
    fn unknown_names_fall_back_to_independent() {
        let meta = metadata("Dave");
        assert_eq!(meta.party, "Independent");
        assert_eq!(meta.colour, 0x6b7280);
    }
}
