use clap::Parser;

/// Download random high-resolution test photos over a bounded worker pool.
#[derive(Clone, Debug, Parser)]
#[command(name = "photofetch", version, about, long_about = None)]
pub struct Cli {
    /// Number of photos to download
    #[arg(value_name = "COUNT", default_value_t = 100)]
    pub count: usize,
}
