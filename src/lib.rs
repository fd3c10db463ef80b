pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FixtureCourseSource, HttpCourseSource, LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::{ranking, CoursePipeline, RankingEngine};
pub use domain::services::OrderingPolicy;
pub use utils::error::{RankerError, Result};
