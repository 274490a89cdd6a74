use std::path::PathBuf;
use clap::Subcommand;
use crate::config::constants;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan source code for security vulnerabilities
    Scan {
        /// Input directory or file to scan
        #[clap(short, long)]
        input: PathBuf,

        /// Output directory for reports
        #[clap(short, long)]
        output: PathBuf,

        /// Application name for the report
        #[clap(short, long, default_value = "Application")]
        name: String,

        /// Maximum file size in bytes
        #[clap(long, default_value_t = constants::DEFAULT_MAX_FILE_SIZE)]
        max_file_size: u64,

        /// Maximum number of concurrent batch analyses
        #[clap(long, default_value_t = constants::DEFAULT_MAX_WORKERS)]
        max_workers: usize,
    },

    /// List supported LLM providers and their environment variables
    Providers,
}
