pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_client_source, validate_non_empty_string, validate_output_formats, validate_path,
    validate_team_names, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARCHIVE_NAME: &str = "schedule.zip";

pub fn default_team_names() -> Vec<String> {
    (1..=4).map(|n| format!("Team {}", n)).collect()
}

pub fn default_output_formats() -> Vec<String> {
    vec!["csv".to_string(), "json".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "team-scheduler"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Assign worksite clients to teams across the weekly session grid")
)]
pub struct CliConfig {
    /// Client CSV file or http(s) URL
    #[cfg_attr(feature = "cli", arg(short, long, default_value = "clients.csv"))]
    pub clients: String,

    /// Team names, in tie-break order
    #[cfg_attr(
        feature = "cli",
        arg(short, long, value_delimiter = ',', default_values_t = default_team_names())
    )]
    pub teams: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Output formats to render (csv, json)
    #[cfg_attr(
        feature = "cli",
        arg(long, value_delimiter = ',', default_values_t = default_output_formats())
    )]
    pub formats: Vec<String>,

    /// Write loose files instead of a single archive
    #[cfg_attr(feature = "cli", arg(long))]
    pub no_zip: bool,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_ARCHIVE_NAME))]
    pub archive_name: String,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn clients_source(&self) -> &str {
        &self.clients
    }

    fn team_names(&self) -> &[String] {
        &self.teams
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn zip_output(&self) -> bool {
        !self.no_zip
    }

    fn archive_name(&self) -> &str {
        &self.archive_name
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_client_source("clients", &self.clients)?;
        validate_team_names("teams", &self.teams)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("formats", &self.formats)?;
        if !self.no_zip {
            validate_non_empty_string("archive_name", &self.archive_name)?;
        }
        Ok(())
    }
}
