pub mod engine;
pub mod ranking;

pub use crate::app::pipelines::CoursePipeline;
pub use crate::domain::model::{CourseRecord, RankedReport, RawCourse, RawFields};
pub use crate::domain::ports::{ConfigProvider, CourseSource, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use engine::RankingEngine;
