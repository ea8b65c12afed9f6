use crate::core::Pipeline;
use crate::utils::error::Result;

/// What one scheduling run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: String,
    pub clients: usize,
    pub assignments: usize,
    /// Clients left short of sessions or teams.
    pub shortfalls: Vec<String>,
}

pub struct SchedulerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SchedulerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting scheduling run");

        tracing::info!("Reading client records...");
        let clients = self.pipeline.extract().await?;
        let client_count = clients.len();
        tracing::info!("Read {} client records", client_count);

        tracing::info!("Assigning teams...");
        let schedule = self.pipeline.transform(clients).await?;
        let assignments = schedule.assignments.len();
        let shortfalls: Vec<String> = schedule
            .shortfalls()
            .map(|summary| summary.name.clone())
            .collect();
        tracing::info!(
            "Made {} assignments; {} clients not fully scheduled",
            assignments,
            shortfalls.len()
        );

        tracing::info!("Writing schedule...");
        let output_path = self.pipeline.load(schedule).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunReport {
            output_path,
            clients: client_count,
            assignments,
            shortfalls,
        })
    }
}
