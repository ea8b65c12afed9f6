use clap::Parser;
use team_scheduler::utils::{logger, validation::Validate};
use team_scheduler::{CliConfig, LocalStorage, SchedulePipeline, SchedulerEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting team-scheduler CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SchedulePipeline::new(storage, config);
    let engine = SchedulerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Scheduling completed successfully!");
            println!(
                "✅ Scheduled {} clients with {} assignments",
                report.clients, report.assignments
            );
            if !report.shortfalls.is_empty() {
                println!(
                    "⚠️  Not fully scheduled: {}",
                    report.shortfalls.join(", ")
                );
            }
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scheduling failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
