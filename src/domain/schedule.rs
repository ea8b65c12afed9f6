use crate::domain::model::{Assignment, ClientSummary, Session};
use crate::utils::error::Result;
use crate::utils::validation::validate_team_names;
use serde::Serialize;
use std::collections::BTreeSet;

/// A team can hold each of the six sessions at most once.
pub const MAX_SESSIONS_PER_TEAM: usize = 6;

/// Ordered, duplicate-free list of team names. Order is the load tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    teams: Vec<String>,
}

impl TeamRoster {
    pub fn new<I, S>(teams: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams: Vec<String> = teams
            .into_iter()
            .map(|team| {
                let team: String = team.into();
                team.trim().to_string()
            })
            .collect();
        validate_team_names("teams", &teams)?;
        Ok(Self { teams })
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamLoad {
    pub team: String,
    pub sessions: BTreeSet<Session>,
}

impl TeamLoad {
    pub fn load(&self) -> usize {
        self.sessions.len()
    }

    pub fn has_capacity(&self) -> bool {
        self.sessions.len() < MAX_SESSIONS_PER_TEAM
    }
}

/// Sessions each team holds during one run, in roster order.
///
/// Built fresh for every run and owned by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamLoads {
    teams: Vec<TeamLoad>,
}

impl TeamLoads {
    pub fn new(roster: &TeamRoster) -> Self {
        Self {
            teams: roster
                .teams()
                .iter()
                .map(|team| TeamLoad {
                    team: team.clone(),
                    sessions: BTreeSet::new(),
                })
                .collect(),
        }
    }

    /// Marks `session` as held by the team at `index`.
    ///
    /// Returns false when the team already holds it or is at capacity.
    pub fn hold(&mut self, index: usize, session: Session) -> bool {
        match self.teams.get_mut(index) {
            Some(team) if team.has_capacity() => team.sessions.insert(session),
            _ => false,
        }
    }

    /// Pre-books `session` for the named team before a run starts.
    pub fn seed(&mut self, team: &str, session: Session) -> bool {
        match self.index_of(team) {
            Some(index) => self.hold(index, session),
            None => false,
        }
    }

    pub fn index_of(&self, team: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.team == team)
    }

    pub fn get(&self, index: usize) -> Option<&TeamLoad> {
        self.teams.get(index)
    }

    pub fn load_of(&self, team: &str) -> Option<usize> {
        self.index_of(team).map(|index| self.teams[index].load())
    }

    pub fn holds(&self, team: &str, session: Session) -> bool {
        self.index_of(team)
            .map(|index| self.teams[index].sessions.contains(&session))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamLoad> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Output of one assignment run.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    /// Client order, then session order, then team order.
    pub assignments: Vec<Assignment>,
    pub loads: TeamLoads,
    pub summaries: Vec<ClientSummary>,
}

impl Schedule {
    /// Assignments grouped per team, in roster order.
    pub fn by_team(&self) -> Vec<(&str, Vec<&Assignment>)> {
        self.loads
            .iter()
            .map(|load| {
                let team = load.team.as_str();
                let held = self
                    .assignments
                    .iter()
                    .filter(|assignment| assignment.team == team)
                    .collect();
                (team, held)
            })
            .collect()
    }

    pub fn shortfalls(&self) -> impl Iterator<Item = &ClientSummary> {
        self.summaries
            .iter()
            .filter(|summary| !summary.is_fully_satisfied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_trims_and_rejects_duplicates() {
        let roster = TeamRoster::new([" Red ", "Blue"]).unwrap();
        assert_eq!(roster.teams(), &["Red".to_string(), "Blue".to_string()]);

        assert!(TeamRoster::new(["Red", "Red "]).is_err());
        assert!(TeamRoster::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_hold_rejects_duplicate_session() {
        let roster = TeamRoster::new(["A"]).unwrap();
        let mut loads = TeamLoads::new(&roster);

        assert!(loads.hold(0, Session::MonAm));
        assert!(!loads.hold(0, Session::MonAm));
        assert_eq!(loads.load_of("A"), Some(1));
    }

    #[test]
    fn test_hold_caps_at_six_sessions() {
        let roster = TeamRoster::new(["A"]).unwrap();
        let mut loads = TeamLoads::new(&roster);
        for session in [
            Session::MonAm,
            Session::MonPm,
            Session::TuesAm,
            Session::TuesPm,
            Session::WedAm,
            Session::WedPm,
        ] {
            assert!(loads.hold(0, session));
        }
        assert_eq!(loads.load_of("A"), Some(MAX_SESSIONS_PER_TEAM));
        assert!(!loads.get(0).unwrap().has_capacity());
    }

    #[test]
    fn test_seed_unknown_team() {
        let roster = TeamRoster::new(["A", "B"]).unwrap();
        let mut loads = TeamLoads::new(&roster);

        assert!(loads.seed("B", Session::WedPm));
        assert!(!loads.seed("C", Session::WedPm));
        assert!(loads.holds("B", Session::WedPm));
        assert!(!loads.holds("A", Session::WedPm));
    }
}
