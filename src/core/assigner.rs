use crate::core::catalog::candidate_sessions;
use crate::core::preference::normalize_preference;
use crate::core::requirement::parse_requirement;
use crate::domain::model::{Assignment, ClientRequest, ClientSummary, Session};
use crate::domain::schedule::{Schedule, TeamLoads, TeamRoster};
use std::collections::HashSet;

/// Picks which teams work a session.
///
/// The greedy assigner owns session choice and bookkeeping; swapping this out
/// changes team choice only.
pub trait TeamSelector: Send + Sync {
    /// Roster indices of up to `count` teams to book for `session`.
    fn select(&self, session: Session, loads: &TeamLoads, count: usize) -> Vec<usize>;
}

/// Lowest current load first; equal loads keep roster order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoadedSelector;

impl TeamSelector for LeastLoadedSelector {
    fn select(&self, session: Session, loads: &TeamLoads, count: usize) -> Vec<usize> {
        let mut eligible: Vec<(usize, usize)> = loads
            .iter()
            .enumerate()
            .filter(|(_, team)| !team.sessions.contains(&session) && team.has_capacity())
            .map(|(index, team)| (index, team.load()))
            .collect();

        // stable: ties stay in roster order
        eligible.sort_by_key(|&(_, load)| load);

        eligible
            .into_iter()
            .take(count)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Single-pass greedy assignment of clients to teams and sessions.
///
/// Clients are handled in input order and nothing is revisited, so a complete
/// schedule may be missed even when one exists. Shortfalls show up in the
/// per-client summaries rather than as errors.
#[derive(Debug, Clone)]
pub struct LoadBalancedAssigner<S: TeamSelector = LeastLoadedSelector> {
    roster: TeamRoster,
    selector: S,
}

impl LoadBalancedAssigner<LeastLoadedSelector> {
    pub fn new(roster: TeamRoster) -> Self {
        Self::with_selector(roster, LeastLoadedSelector)
    }
}

impl<S: TeamSelector> LoadBalancedAssigner<S> {
    pub fn with_selector(roster: TeamRoster, selector: S) -> Self {
        Self { roster, selector }
    }

    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    /// Runs against a fresh, empty load map.
    pub fn assign(&self, clients: &[ClientRequest]) -> Schedule {
        self.assign_from(TeamLoads::new(&self.roster), clients)
    }

    /// Runs starting from pre-booked loads.
    pub fn assign_from(&self, mut loads: TeamLoads, clients: &[ClientRequest]) -> Schedule {
        let mut assignments = Vec::new();
        let mut summaries = Vec::with_capacity(clients.len());

        for client in clients {
            let requirement = parse_requirement(client.job_length.as_deref().unwrap_or(""));
            let preference = normalize_preference(client.preferred_day.as_deref());
            let candidates = candidate_sessions(&preference);

            tracing::debug!(
                client = %client.name,
                sessions_needed = requirement.sessions_needed,
                teams_needed = requirement.teams_needed,
                preference = %preference,
                candidates = ?candidates,
                "Assigning client"
            );

            let mut used: HashSet<Session> = HashSet::new();
            let mut sessions = Vec::new();
            let mut teams_per_session = Vec::new();

            for _ in 0..requirement.sessions_needed {
                let Some(session) = candidates
                    .iter()
                    .copied()
                    .find(|session| !used.contains(session))
                else {
                    break;
                };
                used.insert(session);

                let chosen = self
                    .selector
                    .select(session, &loads, requirement.teams_needed);

                let mut booked = 0;
                for index in chosen {
                    if !loads.hold(index, session) {
                        continue;
                    }
                    if let Some(team) = loads.get(index) {
                        assignments.push(Assignment {
                            team: team.team.clone(),
                            client: client.clone(),
                            session,
                        });
                        booked += 1;
                    }
                }

                sessions.push(session);
                teams_per_session.push(booked);
            }

            let summary = ClientSummary {
                name: client.name.clone(),
                requirement,
                preference,
                sessions,
                teams_per_session,
            };
            if !summary.is_fully_satisfied() {
                tracing::warn!(
                    client = %summary.name,
                    sessions = summary.sessions.len(),
                    teams_per_session = ?summary.teams_per_session,
                    "Client only partially scheduled"
                );
            }
            summaries.push(summary);
        }

        tracing::info!(
            clients = clients.len(),
            assignments = assignments.len(),
            "Assignment run finished"
        );

        Schedule {
            assignments,
            loads,
            summaries,
        }
    }
}
