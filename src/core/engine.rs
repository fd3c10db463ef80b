use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's fetch, rank and write phases in order. Nothing is
/// written unless the first two phases succeed.
pub struct RankingEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RankingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        let monitor = SystemMonitor::new(monitor_enabled);
        if monitor.is_enabled() {
            tracing::info!("📊 System monitoring enabled");
        }
        Self { pipeline, monitor }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting course ranking run");
        self.monitor.log_phase("Start");

        let courses = self.pipeline.extract().await?;
        tracing::info!("Fetched {} courses", courses.len());
        self.monitor.log_phase("Fetch");

        let report = self.pipeline.transform(courses).await?;
        tracing::info!(
            "Ranked {} of {} courses ({} duplicates removed)",
            report.records.len(),
            report.fetched,
            report.duplicates_removed
        );
        self.monitor.log_phase("Rank");

        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_final();

        Ok(output_path)
    }
}
