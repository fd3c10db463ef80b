pub mod display;
pub mod grade_scale;
pub mod ordering;
pub mod title;
pub mod workload;

pub use ordering::OrderingPolicy;
