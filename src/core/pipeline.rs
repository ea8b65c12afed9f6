use crate::core::assigner::LoadBalancedAssigner;
use crate::core::report::render_all;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::ClientRequest;
use crate::domain::schedule::{Schedule, TeamRoster};
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::is_remote_source;
use reqwest::Client;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Reads client rows from CSV bytes.
///
/// Headers are matched by name (`Name`, `Address`, `Travel Time`,
/// `Preferred Day`, `Job Length`, or their snake_case forms); blank optional
/// cells become `None`. Rows without a name are skipped.
pub fn parse_clients_csv(data: &[u8]) -> Result<Vec<ClientRequest>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let mut clients = Vec::new();
    for (line, row) in reader.deserialize::<ClientRequest>().enumerate() {
        let client = row?;
        if client.name.trim().is_empty() {
            tracing::warn!(row = line + 1, "Skipping client row without a name");
            continue;
        }
        clients.push(client);
    }
    Ok(clients)
}

/// Reads clients, assigns them to the configured roster, writes the schedule.
pub struct SchedulePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> SchedulePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn read_source(&self) -> Result<Vec<u8>> {
        let source = self.config.clients_source().trim();
        if is_remote_source(source) {
            tracing::debug!("Fetching clients from: {}", source);
            let response = self.client.get(source).send().await?.error_for_status()?;
            tracing::debug!("Client source response status: {}", response.status());
            Ok(response.bytes().await?.to_vec())
        } else {
            tracing::debug!("Reading clients from file: {}", source);
            Ok(tokio::fs::read(source).await?)
        }
    }

    fn build_archive(&self, files: &[crate::core::report::RenderedFile]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for file in files {
            zip.start_file::<_, ()>(file.name.as_str(), FileOptions::default())?;
            zip.write_all(&file.contents)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SchedulePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ClientRequest>> {
        let data = self.read_source().await?;
        let clients = parse_clients_csv(&data)?;

        if clients.is_empty() {
            return Err(SchedulerError::ProcessingError {
                message: format!("no client records found in {}", self.config.clients_source()),
            });
        }
        Ok(clients)
    }

    async fn transform(&self, clients: Vec<ClientRequest>) -> Result<Schedule> {
        let roster = TeamRoster::new(self.config.team_names().iter().cloned())?;
        let assigner = LoadBalancedAssigner::new(roster);
        Ok(assigner.assign(&clients))
    }

    async fn load(&self, schedule: Schedule) -> Result<String> {
        let files = render_all(&schedule, self.config.output_formats())?;

        if self.config.zip_output() {
            let archive_name = self.config.archive_name();
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = self.build_archive(&files)?;

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive_name, &zip_data).await?;
            Ok(format!("{}/{}", self.config.output_path(), archive_name))
        } else {
            for file in &files {
                tracing::debug!("Writing {} ({} bytes)", file.name, file.contents.len());
                self.storage.write_file(&file.name, &file.contents).await?;
            }
            Ok(self.config.output_path().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::{ASSIGNMENTS_FILE, CLIENT_SUMMARY_FILE, TEAM_SCHEDULE_FILE};
    use crate::domain::model::Session;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const CLIENTS_CSV: &str = "\
Name,Address,Travel Time,Preferred Day,Job Length
Elm St,1 Elm St,20 min,Monday,Full 2 Teams
Oak Ave,9 Oak Ave,35 min,,Half
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SchedulerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        clients_source: String,
        team_names: Vec<String>,
        output_path: String,
        output_formats: Vec<String>,
        zip_output: bool,
    }

    impl MockConfig {
        fn new(clients_source: String) -> Self {
            Self {
                clients_source,
                team_names: vec!["A".to_string(), "B".to_string()],
                output_path: "test_output".to_string(),
                output_formats: vec!["csv".to_string(), "json".to_string()],
                zip_output: true,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn clients_source(&self) -> &str {
            &self.clients_source
        }

        fn team_names(&self) -> &[String] {
            &self.team_names
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn zip_output(&self) -> bool {
            self.zip_output
        }

        fn archive_name(&self) -> &str {
            "schedule.zip"
        }
    }

    #[test]
    fn test_parse_clients_csv() {
        let clients = parse_clients_csv(CLIENTS_CSV.as_bytes()).unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Elm St");
        assert_eq!(clients[0].travel_time, "20 min");
        assert_eq!(clients[0].preferred_day.as_deref(), Some("Monday"));
        assert_eq!(clients[1].preferred_day, None);
        assert_eq!(clients[1].job_length.as_deref(), Some("Half"));
    }

    #[test]
    fn test_parse_clients_csv_snake_case_headers_and_missing_columns() {
        let data = "name,job_length\nBirch Ln,full\n  ,half\n";
        let clients = parse_clients_csv(data.as_bytes()).unwrap();

        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Birch Ln");
        assert_eq!(clients[0].address, "");
        assert_eq!(clients[0].preferred_day, None);
        assert_eq!(clients[0].job_length.as_deref(), Some("full"));
    }

    #[test]
    fn test_parse_clients_csv_requires_name_column() {
        let data = "Address\n1 Elm St\n";
        assert!(parse_clients_csv(data.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn test_extract_from_url() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/clients.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(CLIENTS_CSV);
        });

        let pipeline = SchedulePipeline::new(
            MockStorage::new(),
            MockConfig::new(server.url("/clients.csv")),
        );

        let clients = pipeline.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[1].name, "Oak Ave");
    }

    #[tokio::test]
    async fn test_extract_url_failure_is_an_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/clients.csv");
            then.status(500);
        });

        let pipeline = SchedulePipeline::new(
            MockStorage::new(),
            MockConfig::new(server.url("/clients.csv")),
        );

        let result = pipeline.extract().await;

        api_mock.assert();
        assert!(matches!(result, Err(SchedulerError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_extract_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clients.csv");
        std::fs::write(&path, CLIENTS_CSV).unwrap();

        let pipeline = SchedulePipeline::new(
            MockStorage::new(),
            MockConfig::new(path.to_str().unwrap().to_string()),
        );

        let clients = pipeline.extract().await.unwrap();
        assert_eq!(clients.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_client_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clients.csv");
        std::fs::write(&path, "Name,Job Length\n").unwrap();

        let pipeline = SchedulePipeline::new(
            MockStorage::new(),
            MockConfig::new(path.to_str().unwrap().to_string()),
        );

        let result = pipeline.extract().await;
        assert!(matches!(
            result,
            Err(SchedulerError::ProcessingError { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_uses_configured_roster() {
        let pipeline = SchedulePipeline::new(
            MockStorage::new(),
            MockConfig::new("unused.csv".to_string()),
        );
        let clients = parse_clients_csv(CLIENTS_CSV.as_bytes()).unwrap();

        let schedule = pipeline.transform(clients).await.unwrap();

        // Elm St takes both teams for Mon AM and Mon PM. Oak Ave's earliest
        // candidate is Mon AM, which no team can still take, and it is not retried.
        assert_eq!(schedule.assignments.len(), 4);
        assert!(schedule.assignments.iter().all(|a| a.client.name == "Elm St"));
        assert_eq!(schedule.summaries[1].sessions, vec![Session::MonAm]);
        assert_eq!(schedule.summaries[1].teams_per_session, vec![0]);
        assert_eq!(schedule.shortfalls().count(), 1);
    }

    #[tokio::test]
    async fn test_transform_rejects_duplicate_roster() {
        let mut config = MockConfig::new("unused.csv".to_string());
        config.team_names = vec!["A".to_string(), "A".to_string()];
        let pipeline = SchedulePipeline::new(MockStorage::new(), config);

        let result = pipeline.transform(vec![ClientRequest::new("x")]).await;
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_writes_zip_archive() {
        let storage = MockStorage::new();
        let pipeline = SchedulePipeline::new(
            storage.clone(),
            MockConfig::new("unused.csv".to_string()),
        );
        let clients = parse_clients_csv(CLIENTS_CSV.as_bytes()).unwrap();
        let schedule = pipeline.transform(clients).await.unwrap();

        let output_path = pipeline.load(schedule).await.unwrap();
        assert_eq!(output_path, "test_output/schedule.zip");

        let zip_bytes = storage.get_file("schedule.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(
            file_names,
            vec![ASSIGNMENTS_FILE, CLIENT_SUMMARY_FILE, TEAM_SCHEDULE_FILE]
        );

        let mut content = String::new();
        let mut csv_file = archive.by_name(ASSIGNMENTS_FILE).unwrap();
        std::io::Read::read_to_string(&mut csv_file, &mut content).unwrap();
        assert!(content.contains("A,Elm St,1 Elm St,20 min,Mon AM"));
    }

    #[tokio::test]
    async fn test_load_writes_loose_files() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("unused.csv".to_string());
        config.zip_output = false;
        config.output_formats = vec!["json".to_string()];
        let pipeline = SchedulePipeline::new(storage.clone(), config);

        let schedule = pipeline
            .transform(vec![ClientRequest::new("Ash")])
            .await
            .unwrap();
        let output_path = pipeline.load(schedule).await.unwrap();

        assert_eq!(output_path, "test_output");
        assert!(storage.get_file(CLIENT_SUMMARY_FILE).await.is_some());
        assert!(storage.get_file(ASSIGNMENTS_FILE).await.is_none());
        assert!(storage.read_file("schedule.zip").await.is_err());
    }
}
