use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Working day of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Mon,
    Tues,
    Wed,
}

impl Day {
    pub const ALL: [Day; 3] = [Day::Mon, Day::Tues, Day::Wed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tues => "Tues",
            Day::Wed => "Wed",
        }
    }

    pub fn morning(&self) -> Session {
        match self {
            Day::Mon => Session::MonAm,
            Day::Tues => Session::TuesAm,
            Day::Wed => Session::WedAm,
        }
    }

    pub fn afternoon(&self) -> Session {
        match self {
            Day::Mon => Session::MonPm,
            Day::Tues => Session::TuesPm,
            Day::Wed => Session::WedPm,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six weekly work sessions.
///
/// Variant order is catalog order, so `Ord` gives the "earliest available" ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Session {
    MonAm,
    MonPm,
    TuesAm,
    TuesPm,
    WedAm,
    WedPm,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::MonAm => "Mon AM",
            Session::MonPm => "Mon PM",
            Session::TuesAm => "Tues AM",
            Session::TuesPm => "Tues PM",
            Session::WedAm => "Wed AM",
            Session::WedPm => "Wed PM",
        }
    }

    pub fn day(&self) -> Day {
        match self {
            Session::MonAm | Session::MonPm => Day::Mon,
            Session::TuesAm | Session::TuesPm => Day::Tues,
            Session::WedAm | Session::WedPm => Day::Wed,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Session {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Mon AM" => Ok(Session::MonAm),
            "Mon PM" => Ok(Session::MonPm),
            "Tues AM" => Ok(Session::TuesAm),
            "Tues PM" => Ok(Session::TuesPm),
            "Wed AM" => Ok(Session::WedAm),
            "Wed PM" => Ok(Session::WedPm),
            other => Err(format!("unknown session token: {}", other)),
        }
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A client's timing preference after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// "Any Day"
    AnyDay,
    /// A single session such as "Tues AM".
    Slot(Session),
    /// Either session of one day, e.g. "Wed Any".
    WholeDay(Day),
    /// Text the normalizer could not map onto the grid, kept verbatim.
    Fallback(String),
}

impl Preference {
    pub fn as_token(&self) -> String {
        match self {
            Preference::AnyDay => "Any Day".to_string(),
            Preference::Slot(session) => session.as_str().to_string(),
            Preference::WholeDay(day) => format!("{} Any", day),
            Preference::Fallback(raw) => raw.clone(),
        }
    }

    /// Maps a token back onto a preference. Blank means any day; unknown text is a fallback.
    pub fn from_token(token: &str) -> Self {
        if token.trim().is_empty() || token == "Any Day" {
            return Preference::AnyDay;
        }
        if let Ok(session) = token.parse::<Session>() {
            return Preference::Slot(session);
        }
        Day::ALL
            .iter()
            .find(|day| token == format!("{} Any", day))
            .map(|day| Preference::WholeDay(*day))
            .unwrap_or_else(|| Preference::Fallback(token.to_string()))
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_token())
    }
}

impl Serialize for Preference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_token())
    }
}

/// Sessions and simultaneous teams a client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub sessions_needed: usize,
    pub teams_needed: usize,
}

impl Default for Requirement {
    fn default() -> Self {
        Self {
            sessions_needed: 1,
            teams_needed: 1,
        }
    }
}

/// One worksite job request as read from the client list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientRequest {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Address", alias = "address", default)]
    pub address: String,
    #[serde(rename = "Travel Time", alias = "travel_time", default)]
    pub travel_time: String,
    #[serde(rename = "Preferred Day", alias = "preferred_day", default)]
    pub preferred_day: Option<String>,
    #[serde(rename = "Job Length", alias = "job_length", default)]
    pub job_length: Option<String>,
}

impl ClientRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_preferred_day(mut self, preferred_day: impl Into<String>) -> Self {
        self.preferred_day = Some(preferred_day.into());
        self
    }

    pub fn with_job_length(mut self, job_length: impl Into<String>) -> Self {
        self.job_length = Some(job_length.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>, travel_time: impl Into<String>) -> Self {
        self.address = address.into();
        self.travel_time = travel_time.into();
        self
    }
}

/// A team booked for a client in one session. Created once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub team: String,
    pub client: ClientRequest,
    pub session: Session,
}

/// Per-client view of what was asked for and what the run could give.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub name: String,
    pub requirement: Requirement,
    pub preference: Preference,
    pub sessions: Vec<Session>,
    pub teams_per_session: Vec<usize>,
}

impl ClientSummary {
    /// False when the run left the client short of sessions or teams.
    pub fn is_fully_satisfied(&self) -> bool {
        self.sessions.len() == self.requirement.sessions_needed
            && self
                .teams_per_session
                .iter()
                .all(|&teams| teams == self.requirement.teams_needed)
    }
}
