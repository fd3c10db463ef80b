pub mod course_pipeline;

pub use course_pipeline::CoursePipeline;
