use clap::Parser;
use diabetes_crag::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Scrape(args) => cli::scrape::run(args).await,
        Command::Freshness(args) => cli::freshness::run(args).await,
    }
}
