use clap::Parser;
use dotenvy::dotenv;

use classwatch::cli::{Cli, run};
use classwatch::logging::init_console_logging;
use classwatch::state::init_app_state;
use classwatch_config::{ApiConfig, StorageConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    init_console_logging();

    let cli = Cli::parse();

    let result = match init_app_state(ApiConfig::from_env(), StorageConfig::from_env()) {
        Ok(state) => run(cli, &state).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
