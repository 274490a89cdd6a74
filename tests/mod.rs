use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tempfile::TempDir;
use threatcode_cli::enums::confidence::Confidence;
use threatcode_cli::enums::severity::Severity;
use threatcode_cli::enums::verdict::Verdict;
use threatcode_cli::errors::{ScannerError, ScannerResult};
use threatcode_cli::services::analyzer::CodeAnalyzer;
use threatcode_cli::structs::analysis_context::AnalysisContext;
use threatcode_cli::structs::config::scan_config::ScanConfig;
use threatcode_cli::structs::evidence::Evidence;
use threatcode_cli::structs::finding::Finding;
use threatcode_cli::structs::validation_outcome::ValidationOutcome;
use threatcode_cli::traits::llm_provider::LlmProvider;

fn write_source(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn scan_config(dir: &Path, batch_size: u64, max_workers: usize) -> ScanConfig {
    let mut config = ScanConfig::with_defaults(
        dir.to_path_buf(),
        dir.join("out"),
        "integration-test".to_string(),
    );
    config.batch_size = batch_size;
    config.max_workers = max_workers;
    config
}

fn sample_finding(title: &str, severity: Severity) -> Finding {
    Finding::new(
        title.to_string(),
        severity,
        "description".to_string(),
        vec![Evidence {
            file_path: "app.py".to_string(),
            line_number: Some(1),
            code: "eval(user_input)".to_string(),
            description: None,
        }],
        "remediation".to_string(),
    )
}

/// Counts concurrent analyze_code calls so the worker cap can be asserted.
struct TrackingProvider {
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[async_trait]
impl LlmProvider for TrackingProvider {
    async fn analyze_code(&self, _code: &str, _context: &AnalysisContext) -> ScannerResult<Vec<Finding>> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn validate_finding(&self, _finding: &Finding, _code: &str) -> ScannerResult<ValidationOutcome> {
        Err(ScannerError::analysis_error("validation", "not expected in this test"))
    }

    fn model(&self) -> &str {
        "tracking-model"
    }
}

/// Returns scripted findings, failing for batches containing a marker string.
struct ScriptedProvider {
    severities: Vec<Severity>,
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn analyze_code(&self, code: &str, _context: &AnalysisContext) -> ScannerResult<Vec<Finding>> {
        if code.contains("trigger_failure") {
            return Err(ScannerError::transport_error(
                "chat completion",
                Some(400),
                "scripted failure",
                false,
            ));
        }
        Ok(self
            .severities
            .iter()
            .enumerate()
            .map(|(i, severity)| sample_finding(&format!("finding-{}", i), *severity))
            .collect())
    }

    async fn validate_finding(&self, _finding: &Finding, _code: &str) -> ScannerResult<ValidationOutcome> {
        Err(ScannerError::analysis_error("validation", "not expected in this test"))
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

/// Checker that either confirms everything or always fails, per test.
struct ScriptedChecker {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl LlmProvider for ScriptedChecker {
    async fn analyze_code(&self, _code: &str, _context: &AnalysisContext) -> ScannerResult<Vec<Finding>> {
        Err(ScannerError::analysis_error("analysis", "checker does not analyze"))
    }

    async fn validate_finding(&self, _finding: &Finding, code: &str) -> ScannerResult<ValidationOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ScannerError::transport_error(
                "chat completion",
                Some(503),
                "checker unavailable",
                true,
            ));
        }
        Ok(ValidationOutcome {
            verdict: Verdict::Confirmed,
            confidence: Confidence::High,
            rationale: format!("reviewed against {} bytes of context", code.len()),
        })
    }

    fn model(&self) -> &str {
        "checker-model"
    }
}

#[tokio::test]
async fn concurrent_batches_stay_under_the_worker_cap() {
    let dir = TempDir::new().unwrap();
    for i in 0..6 {
        write_source(dir.path(), &format!("file{}.py", i), "print('hello')\n");
    }

    let in_flight = Arc::new(AtomicUsize::new(0));
    let max_in_flight = Arc::new(AtomicUsize::new(0));
    let provider = TrackingProvider {
        in_flight: Arc::clone(&in_flight),
        max_in_flight: Arc::clone(&max_in_flight),
    };

    // batch_size of 1 byte forces one batch per file
    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 1, 2),
        Box::new(provider),
        None,
    );
    let report = analyzer.analyze().await.unwrap();

    assert_eq!(report.findings.len(), 0);
    assert!(
        max_in_flight.load(Ordering::SeqCst) <= 2,
        "observed {} concurrent analyses with a cap of 2",
        max_in_flight.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn failed_batch_does_not_poison_the_run() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "bad.py", "trigger_failure\n");
    write_source(dir.path(), "good.py", "import os\nos.system(cmd)\n");

    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 1, 4),
        Box::new(ScriptedProvider {
            severities: vec![Severity::High],
        }),
        None,
    );
    let report = analyzer.analyze().await.unwrap();

    // One batch failed, the other still contributed its finding
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.severity_stats.high, 1);
}

#[tokio::test]
async fn checker_confirms_findings_with_its_model_name() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "app.py", "eval(user_input)\n");

    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 102_400, 2),
        Box::new(ScriptedProvider {
            severities: vec![Severity::Critical, Severity::High],
        }),
        Some(Box::new(ScriptedChecker {
            fail: false,
            calls: Arc::clone(&calls),
        })),
    );
    let report = analyzer.analyze().await.unwrap();

    assert_eq!(report.findings.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    for finding in &report.findings {
        assert!(finding.validated);
        assert_eq!(finding.validation_verdict, Some(Verdict::Confirmed));
        assert_eq!(finding.validation_confidence, Some(Confidence::High));
        assert_eq!(finding.validated_by_model.as_deref(), Some("checker-model"));
    }
}

#[tokio::test]
async fn checker_failure_degrades_to_needs_review() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "app.py", "eval(user_input)\n");

    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 102_400, 2),
        Box::new(ScriptedProvider {
            severities: vec![Severity::High],
        }),
        Some(Box::new(ScriptedChecker {
            fail: true,
            calls: Arc::clone(&calls),
        })),
    );
    let report = analyzer.analyze().await.unwrap();

    // The finding survives the failed validation call
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert!(finding.validated);
    assert_eq!(finding.validation_verdict, Some(Verdict::NeedsReview));
    assert_eq!(finding.validation_confidence, Some(Confidence::Low));
    assert!(finding
        .validation_rationale
        .as_deref()
        .unwrap()
        .starts_with("Validation error:"));
}

#[tokio::test]
async fn report_aggregates_severity_stats_and_summary() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "app.py", "eval(user_input)\n");

    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 102_400, 2),
        Box::new(ScriptedProvider {
            severities: vec![Severity::Critical, Severity::High],
        }),
        None,
    );
    let report = analyzer.analyze().await.unwrap();

    assert_eq!(report.application_name, "integration-test");
    assert_eq!(report.severity_stats.critical, 1);
    assert_eq!(report.severity_stats.high, 1);
    assert_eq!(report.severity_stats.total(), 2);
    assert!(report.executive_summary.contains("2 security finding(s)"));
    assert!(report.conclusion.contains("immediate attention"));
}

#[tokio::test]
async fn empty_directory_yields_a_clean_report() {
    let dir = TempDir::new().unwrap();

    let analyzer = CodeAnalyzer::with_providers(
        scan_config(dir.path(), 102_400, 2),
        Box::new(ScriptedProvider {
            severities: vec![Severity::High],
        }),
        None,
    );
    let report = analyzer.analyze().await.unwrap();

    assert!(report.findings.is_empty());
    assert!(report.executive_summary.contains("no vulnerabilities"));
}
