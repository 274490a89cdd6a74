use clap::Parser;
use env_logger::Env;
use threatcode_cli::structs::cli::Cli;
use threatcode_cli::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();

    if let Err(e) = runner.run_command(cli.command).await {
        log::error!("❌ {}", e.user_message());
        std::process::exit(1);
    }
}
