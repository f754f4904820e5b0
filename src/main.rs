use clap::Parser;
use stars::api::server;
use stars::utils::{error::ErrorCategory, logger, validation::Validate};
use stars::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.verbose || cli.verbose, config.json_logs || cli.json_logs);

    tracing::info!("Starting stars");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let started = async {
        let state = server::build_state(&config).await?;
        server::serve(&config, state).await
    };

    if let Err(e) = started.await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Store => 2,
            _ => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
