use std::path::PathBuf;
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::config::constants;
use crate::enums::commands::Commands;
use crate::errors::ScannerResult;
use crate::services::analyzer::CodeAnalyzer;
use crate::services::report_formatter::ReportFormatter;
use crate::structs::config::scan_config::ScanConfig;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> ScannerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Scan {
                input,
                output,
                name,
                max_file_size,
                max_workers,
            } => self.scan_command(input, output, name, max_file_size, max_workers).await,
            Commands::Providers => self.providers_command(),
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    async fn scan_command(
        &self,
        input: PathBuf,
        output: PathBuf,
        name: String,
        max_file_size: u64,
        max_workers: usize,
    ) -> ScannerResult<()> {
        log::info!("🚀 Starting security scan of {}", input.display());

        let mut scan_config = ScanConfig::with_defaults(input, output, name);
        scan_config.max_file_size = max_file_size;
        scan_config.max_workers = max_workers;

        let llm_config = ConfigManager::llm_config_from_env()?;
        ConfigManager::validate(&scan_config, &llm_config)?;
        if llm_config.checker.is_some() {
            log::info!("🔍 Maker-checker validation enabled");
        }

        let analyzer = CodeAnalyzer::new(scan_config.clone(), &llm_config)?;
        let report = analyzer.analyze().await?;

        let formatter = ReportFormatter::new(&scan_config.output_path)?;
        let written = formatter.generate_all_reports(&report)?;
        for path in &written {
            log::info!("📄 Report written: {}", path.display());
        }

        log::info!(
            "✅ Scan complete: {} finding(s) ({} critical, {} high, {} medium, {} low, {} informational)",
            report.findings.len(),
            report.severity_stats.critical,
            report.severity_stats.high,
            report.severity_stats.medium,
            report.severity_stats.low,
            report.severity_stats.info,
        );

        Ok(())
    }

    fn providers_command(&self) -> ScannerResult<()> {
        log::info!("Supported LLM providers:");
        log::info!("  openrouter (default)");
        log::info!("    {}  API key", constants::OPENROUTER_API_KEY_ENV);
        log::info!("    {}  model, default {}", constants::OPENROUTER_MODEL_ENV, constants::DEFAULT_OPENROUTER_MODEL);
        log::info!("  openai");
        log::info!("    {}  API key", constants::OPENAI_API_KEY_ENV);
        log::info!("    {}  model, default {}", constants::OPENAI_MODEL_ENV, constants::DEFAULT_OPENAI_MODEL);
        log::info!("  custom (any OpenAI-compatible endpoint)");
        log::info!("    {}  endpoint base URL", constants::CUSTOM_PROVIDER_URL_ENV);
        log::info!("    {}  API key", constants::CUSTOM_API_KEY_ENV);
        log::info!("    {}  model", constants::CUSTOM_MODEL_ENV);
        log::info!("Select with {}=openrouter|openai|custom", constants::LLM_PROVIDER_ENV);
        log::info!("Optional: {}=true plus {}, {}, {} for maker-checker validation",
            constants::ENABLE_CHECKER_ENV,
            constants::CHECKER_PROVIDER_ENV,
            constants::CHECKER_API_KEY_ENV,
            constants::CHECKER_MODEL_ENV,
        );
        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
