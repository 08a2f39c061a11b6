use anyhow::Result;
use clap::Parser;

use fxdesk::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    model::init_tracing();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
