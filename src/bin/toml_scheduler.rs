use anyhow::Context;
use clap::Parser;
use team_scheduler::core::catalog::candidate_sessions;
use team_scheduler::core::pipeline::parse_clients_csv;
use team_scheduler::core::preference::normalize_preference;
use team_scheduler::core::requirement::parse_requirement;
use team_scheduler::core::ConfigProvider;
use team_scheduler::utils::{logger, validation::Validate};
use team_scheduler::{LocalStorage, SchedulePipeline, SchedulerEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-scheduler")]
#[command(about = "Team scheduler driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "scheduler.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the roster from the config file
    #[arg(long, value_delimiter = ',')]
    teams: Option<Vec<String>>,

    /// Show how each client would be read without assigning or writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(teams) = args.teams {
        tracing::info!("🔧 Roster overridden to: {}", teams.join(", "));
        config.roster.teams = teams;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No assignments will be made");
        return perform_dry_run(&config).await;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SchedulePipeline::new(storage, config);
    let engine = SchedulerEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Scheduling completed successfully!");
            println!(
                "✅ Scheduled {} clients with {} assignments",
                report.clients, report.assignments
            );
            for name in &report.shortfalls {
                println!("⚠️  Not fully scheduled: {}", name);
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

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Clients: {}", config.clients_source());
    tracing::info!("   Teams: {}", config.team_names().join(", "));
    tracing::info!("   Output: {}", config.output_path());
    tracing::info!("   Formats: {}", config.output_formats().join(", "));
    if config.zip_output() {
        tracing::info!("   Archive: {}", config.archive_name());
    }
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let source = config.clients_source();
    if team_scheduler::utils::validation::is_remote_source(source) {
        println!("Would fetch clients from {}", source);
        return Ok(());
    }

    let data = tokio::fs::read(source)
        .await
        .with_context(|| format!("reading client file {}", source))?;
    let clients = parse_clients_csv(&data)?;

    println!("{:<24} {:>8} {:>6}  {:<10} candidates", "client", "sessions", "teams", "preference");
    for client in &clients {
        let requirement = parse_requirement(client.job_length.as_deref().unwrap_or(""));
        let preference = normalize_preference(client.preferred_day.as_deref());
        let candidates: Vec<String> = candidate_sessions(&preference)
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!(
            "{:<24} {:>8} {:>6}  {:<10} {}",
            client.name,
            requirement.sessions_needed,
            requirement.teams_needed,
            preference.as_token(),
            candidates.join(", ")
        );
    }
    println!("{} clients, {} teams", clients.len(), config.team_names().len());
    Ok(())
}
