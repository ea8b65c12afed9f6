pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    assigner::{LeastLoadedSelector, LoadBalancedAssigner, TeamSelector},
    engine::{RunReport, SchedulerEngine},
    pipeline::SchedulePipeline,
};
pub use crate::domain::model::{
    Assignment, ClientRequest, ClientSummary, Day, Preference, Requirement, Session,
};
pub use crate::domain::schedule::{Schedule, TeamLoads, TeamRoster};
pub use crate::utils::error::{Result, SchedulerError};
