use crate::core::catalog::CATALOG;
use crate::domain::model::{ClientSummary, Session};
use crate::domain::schedule::Schedule;
use crate::utils::error::{Result, SchedulerError};
use serde::Serialize;

pub const ASSIGNMENTS_FILE: &str = "assignments.csv";
pub const TEAM_SCHEDULE_FILE: &str = "team_schedule.csv";
pub const CLIENT_SUMMARY_FILE: &str = "client_summary.json";

/// A named output file and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub name: String,
    pub contents: Vec<u8>,
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
    team: &'a str,
    client: &'a str,
    address: &'a str,
    travel_time: &'a str,
    session: Session,
}

/// One row per assignment, in assignment order.
pub fn render_assignments_csv(schedule: &Schedule) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for assignment in &schedule.assignments {
        writer.serialize(AssignmentRow {
            team: &assignment.team,
            client: &assignment.client.name,
            address: &assignment.client.address,
            travel_time: &assignment.client.travel_time,
            session: assignment.session,
        })?;
    }
    into_bytes(writer)
}

/// One row per team with a column per catalog session naming the booked client.
pub fn render_team_schedule_csv(schedule: &Schedule) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["team".to_string()];
    header.extend(CATALOG.iter().map(|session| session.to_string()));
    header.push("load".to_string());
    writer.write_record(&header)?;

    for (team, assignments) in schedule.by_team() {
        let mut row = vec![team.to_string()];
        for session in CATALOG {
            let client = assignments
                .iter()
                .find(|assignment| assignment.session == session)
                .map(|assignment| assignment.client.name.clone())
                .unwrap_or_default();
            row.push(client);
        }
        let load = schedule.loads.load_of(team).unwrap_or(assignments.len());
        row.push(load.to_string());
        writer.write_record(&row)?;
    }

    into_bytes(writer)
}

#[derive(Serialize)]
struct ClientReport<'a> {
    #[serde(flatten)]
    summary: &'a ClientSummary,
    fully_satisfied: bool,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    generated_at: String,
    teams: Vec<&'a str>,
    assignment_count: usize,
    clients: Vec<ClientReport<'a>>,
}

/// Per-client requirement, preference and outcome as pretty JSON.
pub fn render_client_summary_json(schedule: &Schedule) -> Result<Vec<u8>> {
    let document = SummaryDocument {
        generated_at: chrono::Utc::now().to_rfc3339(),
        teams: schedule.loads.iter().map(|load| load.team.as_str()).collect(),
        assignment_count: schedule.assignments.len(),
        clients: schedule
            .summaries
            .iter()
            .map(|summary| ClientReport {
                summary,
                fully_satisfied: summary.is_fully_satisfied(),
            })
            .collect(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Renders every file the requested formats call for.
pub fn render_all(schedule: &Schedule, formats: &[String]) -> Result<Vec<RenderedFile>> {
    let mut files = Vec::new();
    if formats.iter().any(|f| f == "csv") {
        files.push(RenderedFile {
            name: ASSIGNMENTS_FILE.to_string(),
            contents: render_assignments_csv(schedule)?,
        });
        files.push(RenderedFile {
            name: TEAM_SCHEDULE_FILE.to_string(),
            contents: render_team_schedule_csv(schedule)?,
        });
    }
    if formats.iter().any(|f| f == "json") {
        files.push(RenderedFile {
            name: CLIENT_SUMMARY_FILE.to_string(),
            contents: render_client_summary_json(schedule)?,
        });
    }
    Ok(files)
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| SchedulerError::ProcessingError {
            message: format!("failed to flush CSV output: {}", e),
        })
}
