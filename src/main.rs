use clap::Parser;
use log::info;
use wanderlust_lib::cli::{self, Cli, Command};
use wanderlust_lib::config::AppConfig;
use wanderlust_lib::storage::FileStorage;
use wanderlust_lib::store::TripStore;
use wanderlust_lib::{logging, web_ui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.config.log_level)?;

    let config = AppConfig::new(cli.config)?;
    info!("{:?}", &config);
    let storage = FileStorage::new(config.db_path.clone())?;
    let mut store = TripStore::load(storage).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => web_ui::serve(config, store).await,
        command => cli::run(command, &mut store).await,
    }
}
