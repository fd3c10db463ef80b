use crate::domain::model::{RankedReport, RawCourse, RawFields};
use crate::domain::services::OrderingPolicy;
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

/// Supplies raw fields for one course at a time.
///
/// Implementations absorb per-course problems (missing page, missing field)
/// by reporting absent values. An `Err` means the source itself is unusable
/// and aborts the run.
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<RawFields>;
}

#[async_trait]
impl<T: CourseSource + ?Sized> CourseSource for Box<T> {
    async fn fetch(&self, name: &str) -> Result<RawFields> {
        (**self).fetch(name).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn course_list(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_name(&self) -> Option<&str>;
    fn export_formats(&self) -> &[String];
    fn ordering_policy(&self) -> OrderingPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawCourse>>;
    async fn transform(&self, courses: Vec<RawCourse>) -> Result<RankedReport>;
    async fn load(&self, report: RankedReport) -> Result<String>;
}
