//! Job-length text to session and team counts.
//!
//! Every rule is checked in order and a matching rule overwrites what earlier
//! rules set, so "half" wins over "full" and "4 teams" wins over "2 teams".

use crate::domain::model::Requirement;
use once_cell::sync::Lazy;
use regex::Regex;

static TWO_TEAMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b2 teams?\b").expect("Valid regex pattern"));
static THREE_TEAMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b3 teams?\b").expect("Valid regex pattern"));
static FOUR_TEAMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b4 teams?\b").expect("Valid regex pattern"));

struct RequirementRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&mut Requirement),
}

static RULES: &[RequirementRule] = &[
    RequirementRule {
        name: "full day",
        matches: |text| text.contains("full"),
        apply: |req| req.sessions_needed = 2,
    },
    RequirementRule {
        name: "half day",
        matches: |text| text.contains("half"),
        apply: |req| req.sessions_needed = 1,
    },
    RequirementRule {
        name: "two teams",
        matches: |text| TWO_TEAMS.is_match(text),
        apply: |req| req.teams_needed = 2,
    },
    RequirementRule {
        name: "three teams",
        matches: |text| THREE_TEAMS.is_match(text),
        apply: |req| req.teams_needed = 3,
    },
    RequirementRule {
        name: "four teams",
        matches: |text| FOUR_TEAMS.is_match(text),
        apply: |req| req.teams_needed = 4,
    },
];

/// Parses a job-length description. Unrecognized or empty text yields one session, one team.
pub fn parse_requirement(job_length: &str) -> Requirement {
    let text = job_length.to_lowercase();
    let mut requirement = Requirement::default();

    for rule in RULES {
        if (rule.matches)(&text) {
            tracing::trace!(rule = rule.name, "requirement rule matched");
            (rule.apply)(&mut requirement);
        }
    }

    requirement
}
