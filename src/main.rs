mod cli;

use crate::cli::{Cli, Commands};
use clap::Parser;
use tracing::{error, info};

use buckboost_gateway::application::use_cases::RunApplicationUseCase;
use buckboost_gateway::debug::{DebugConfig, init_logging};
use buckboost_gateway::infrastructure::auth::StaticCredentials;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let debug_config = if cli.verbose {
        DebugConfig::development()
    } else {
        DebugConfig::default().with_log_directory(&cli.log_dir)
    };
    if let Err(e) = init_logging(&debug_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Commands::Run(args) => {
            info!("Starting gateway...");
            let result = match args.into_config() {
                Ok(config) => RunApplicationUseCase::new(config).execute().await,
                Err(e) => Err(e),
            };

            match result {
                Ok(_) => {
                    info!("Gateway terminated normally");
                }
                Err(e) => {
                    error!("Gateway failed: {}", e);
                    eprintln!("❌ Gateway failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::HashPassword { password } => {
            println!("{}", StaticCredentials::hash_password(&password));
        }
    }

    Ok(())
}
