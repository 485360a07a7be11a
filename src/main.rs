use clap::Parser;
use little_r_converter::cli::{run, Cli};
use little_r_converter::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
