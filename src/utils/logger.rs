use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins, then `--verbose`, then a configured level.
fn filter_directive(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "course_ranker=debug,info".to_string(),
        (false, Some(level)) => format!("course_ranker={level}"),
        (false, None) => "course_ranker=info".to_string(),
    }
}

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, level)))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Structured output for runs driven by a scheduler, where logs are shipped
/// to a collector rather than read on a terminal.
pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
