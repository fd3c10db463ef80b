use clap::Parser;
use course_ranker::utils::error::{ErrorSeverity, RankerError};
use course_ranker::utils::{logger, validation::Validate};
use course_ranker::{CliConfig, CoursePipeline, LocalStorage, RankingEngine};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, None);

    tracing::info!("Starting course-ranker");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }
}

async fn run(config: CliConfig) -> Result<(), RankerError> {
    config.validate()?;

    let settings = config.source_settings();
    tracing::info!(
        "🔗 Course source: {}, ordering: {}",
        settings.describe(),
        config.sort
    );
    let source = settings.build()?;

    let monitor_enabled = config.monitor;
    let pipeline = CoursePipeline::new(LocalStorage::default(), source, config);
    let engine = RankingEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    println!("✅ Complete. Output in {}", output_path);
    Ok(())
}

fn exit_code(error: &RankerError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
