pub mod assigner;
pub mod catalog;
pub mod engine;
pub mod pipeline;
pub mod preference;
pub mod report;
pub mod requirement;

pub use crate::domain::model::{Assignment, ClientRequest, Preference, Requirement, Session};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::schedule::{Schedule, TeamLoads, TeamRoster};
pub use crate::utils::error::Result;
