use clap::Parser;
use course_ranker::config::toml_config::TomlConfig;
use course_ranker::core::ConfigProvider;
use course_ranker::utils::{logger, validation::Validate};
use course_ranker::{CoursePipeline, LocalStorage, RankingEngine};

#[derive(Parser)]
#[command(name = "toml-ranker")]
#[command(about = "Course ranking driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "course-ranker.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the ordering from config (name, workload, grade, title, id or 1-5)
    #[arg(short, long, value_parser = course_ranker::OrderingPolicy::parse_arg)]
    sort: Option<course_ranker::OrderingPolicy>,

    /// Show what would be processed without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() && !args.verbose {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting TOML-based course ranking");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(sort) = args.sort {
        config.ranking.sort = sort;
        tracing::info!("🔧 Ordering overridden to: {}", sort);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if args.dry_run {
        println!("🔍 Dry run - nothing will be fetched or written");
        println!("  Course list: {}", config.course_list());
        println!("  Source:      {}", config.source.describe());
        let policy = config.ordering_policy();
        println!("  Ordering:    {} (code {})", policy, policy.code());
        println!("  Output dir:  {}", config.output_path());
        if !config.export_formats().is_empty() {
            println!("  Exports:     {}", config.export_formats().join(", "));
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let source = config.source.build()?;
    let pipeline = CoursePipeline::new(LocalStorage::default(), source, config);
    let engine = RankingEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Complete. Output in {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
