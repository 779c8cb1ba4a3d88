use clap::Parser;
use concordances_rw::{cli::Args, server::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Args::parse()).await?;
    Ok(())
}
