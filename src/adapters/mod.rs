// Adapters layer: concrete implementations of the domain ports
// (course sources and storage backends).

pub mod fixture_source;
pub mod http_source;
pub mod local_storage;

pub use fixture_source::FixtureCourseSource;
pub use http_source::HttpCourseSource;
pub use local_storage::LocalStorage;
