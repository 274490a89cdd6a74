use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "threatcode")]
#[clap(version = "1.0.0")]
#[clap(about = "AI-powered security code scanner", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
