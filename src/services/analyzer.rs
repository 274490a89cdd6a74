use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use uuid::Uuid;
use crate::errors::{ScannerError, ScannerResult};
use crate::services::file_collector::FileCollector;
use crate::services::providers;
use crate::structs::analysis_context::AnalysisContext;
use crate::structs::config::llm_config::LlmConfig;
use crate::structs::config::scan_config::ScanConfig;
use crate::structs::finding::Finding;
use crate::structs::report_data::ReportData;
use crate::traits::llm_provider::LlmProvider;

/// Drives a scan end to end: discovery, batching, concurrent analysis and
/// the optional maker-checker validation pass.
pub struct CodeAnalyzer {
    scan_config: ScanConfig,
    file_collector: FileCollector,
    provider: Box<dyn LlmProvider>,
    checker: Option<Box<dyn LlmProvider>>,
}

impl CodeAnalyzer {
    pub fn new(scan_config: ScanConfig, llm_config: &LlmConfig) -> ScannerResult<Self> {
        let provider = providers::create_provider(llm_config)?;
        let checker = match &llm_config.checker {
            Some(checker_config) => {
                Some(providers::create_checker_provider(checker_config, llm_config)?)
            }
            None => None,
        };
        Ok(Self::with_providers(scan_config, provider, checker))
    }

    /// Construction seam taking ready-made providers.
    pub fn with_providers(
        scan_config: ScanConfig,
        provider: Box<dyn LlmProvider>,
        checker: Option<Box<dyn LlmProvider>>,
    ) -> Self {
        let file_collector = FileCollector::new(scan_config.clone());
        Self {
            scan_config,
            file_collector,
            provider,
            checker,
        }
    }

    pub async fn analyze(&self) -> ScannerResult<ReportData> {
        log::info!("🔍 Scanning {} ...", self.scan_config.input_path.display());
        let files = self.file_collector.collect_files()?;
        log::info!("📁 Found {} files to analyze", files.len());

        if files.is_empty() {
            log::warn!("⚠️ No eligible source files found");
            return Ok(ReportData::new(&self.scan_config.application_name, Vec::new()));
        }

        let batches = self.file_collector.create_batches(&files);
        let total_batches = batches.len();
        log::info!(
            "📦 Created {} batches, analyzing with model {} ({} workers max)",
            total_batches,
            self.provider.model(),
            self.scan_config.max_workers
        );

        let semaphore = Arc::new(Semaphore::new(self.scan_config.max_workers));
        let tasks = batches.into_iter().enumerate().map(|(index, batch)| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore.acquire().await.map_err(|e| {
                    ScannerError::analysis_error("batch scheduling", &e.to_string())
                })?;
                log::info!("📦 Analyzing batch {}/{} ({} files)", index + 1, total_batches, batch.len());
                self.process_batch(&batch).await
            }
        });
        let results = join_all(tasks).await;

        let mut findings: Vec<Finding> = Vec::new();
        let mut batch_codes: HashMap<Uuid, Arc<String>> = HashMap::new();
        let mut failed_batches = 0usize;

        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok((batch_findings, code)) => {
                    if self.checker.is_some() {
                        let code = Arc::new(code);
                        for finding in &batch_findings {
                            batch_codes.insert(finding.id, Arc::clone(&code));
                        }
                    }
                    findings.extend(batch_findings);
                }
                Err(e) => {
                    failed_batches += 1;
                    log::warn!("⚠️ Batch {}/{} failed: {}", index + 1, total_batches, e);
                }
            }
        }

        if failed_batches > 0 {
            log::warn!(
                "⚠️ {} of {} batches failed; the report covers the rest",
                failed_batches, total_batches
            );
        }
        log::info!("✅ Analysis complete: {} finding(s)", findings.len());

        if let Some(checker) = &self.checker {
            self.validate_findings(checker.as_ref(), &mut findings, &batch_codes).await;
        }

        Ok(ReportData::new(&self.scan_config.application_name, findings))
    }

    /// Analyze one batch. Each file is annotated with a path and start-line
    /// marker so the model can report accurate evidence locations.
    async fn process_batch(&self, batch: &[PathBuf]) -> ScannerResult<(Vec<Finding>, String)> {
        let mut combined = String::new();
        let mut file_paths = Vec::new();

        for path in batch {
            let chunks = self.file_collector.read_file_chunked(path);
            if chunks.is_empty() {
                continue;
            }

            let relative = match path.strip_prefix(&self.scan_config.input_path) {
                Ok(stripped) if !stripped.as_os_str().is_empty() => stripped.display().to_string(),
                _ => path.display().to_string(),
            };
            file_paths.push(relative.clone());

            for chunk in chunks {
                combined.push_str(&format!(
                    "\n# File: {} (starting at line {})\n",
                    relative, chunk.start_line
                ));
                combined.push_str(&chunk.content);
            }
        }

        if file_paths.is_empty() {
            return Ok((Vec::new(), combined));
        }

        let context = AnalysisContext {
            file_paths,
            batch_size: batch.len(),
        };
        let findings = self.provider.analyze_code(&combined, &context).await?;
        Ok((findings, combined))
    }

    /// Sequential second pass over every finding. A failed validation call
    /// never discards the finding, it is degraded to Needs Review instead.
    async fn validate_findings(
        &self,
        checker: &dyn LlmProvider,
        findings: &mut [Finding],
        batch_codes: &HashMap<Uuid, Arc<String>>,
    ) {
        if findings.is_empty() {
            return;
        }
        log::info!(
            "🔍 Validating {} finding(s) with checker model {}",
            findings.len(),
            checker.model()
        );

        for finding in findings.iter_mut() {
            let code = match batch_codes.get(&finding.id) {
                Some(code) => Arc::clone(code),
                None => Arc::new(finding.evidence_context()),
            };

            match checker.validate_finding(finding, &code).await {
                Ok(outcome) => finding.apply_validation(outcome, checker.model()),
                Err(e) => {
                    log::warn!("⚠️ Validation failed for '{}': {}", finding.title, e);
                    finding.mark_needs_review(&e.to_string(), checker.model());
                }
            }
        }
        log::info!("✅ Validation pass complete");
    }
}
