use clap::Parser;
use photofetch::batch::{BatchFetcher, DEFAULT_OUTPUT_DIR};
use photofetch::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    println!(
        "Downloading {} high-resolution photos to '{}'...",
        cli.count, DEFAULT_OUTPUT_DIR
    );
    let fetcher = BatchFetcher::new(DEFAULT_OUTPUT_DIR);
    let summary = fetcher.fetch(cli.count).await?;
    println!();
    println!("{summary}");
    Ok(())
}
