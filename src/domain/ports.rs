use crate::domain::model::ClientRequest;
use crate::domain::schedule::Schedule;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Local CSV path or http(s) URL of the client list.
    fn clients_source(&self) -> &str;
    fn team_names(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn zip_output(&self) -> bool;
    fn archive_name(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ClientRequest>>;
    async fn transform(&self, clients: Vec<ClientRequest>) -> Result<Schedule>;
    async fn load(&self, schedule: Schedule) -> Result<String>;
}
