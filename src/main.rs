use anyhow::Result;
use vpndeck::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::start().await
}
