//! The fixed weekly session grid and the lookup from a normalized preference
//! to the sessions a client may be booked into.

use crate::domain::model::{Day, Preference, Session};

/// All six sessions in priority order. Earliest-available selection always walks this order.
pub const CATALOG: [Session; 6] = [
    Session::MonAm,
    Session::MonPm,
    Session::TuesAm,
    Session::TuesPm,
    Session::WedAm,
    Session::WedPm,
];

pub fn sessions_of(day: Day) -> [Session; 2] {
    [day.morning(), day.afternoon()]
}

/// Candidate sessions for a preference, in catalog order.
///
/// Anything the grid does not recognize degrades to the full catalog.
pub fn candidate_sessions(preference: &Preference) -> Vec<Session> {
    match preference {
        Preference::AnyDay | Preference::Fallback(_) => CATALOG.to_vec(),
        Preference::Slot(session) => vec![*session],
        Preference::WholeDay(day) => sessions_of(*day).to_vec(),
    }
}

/// Same as [`candidate_sessions`], starting from a token string.
pub fn resolve_token(token: &str) -> Vec<Session> {
    candidate_sessions(&Preference::from_token(token))
}
