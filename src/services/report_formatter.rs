use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::{ScannerError, ScannerResult};
use crate::structs::report_data::ReportData;

/// Writes the finished report to disk in every supported format.
pub struct ReportFormatter {
    output_path: PathBuf,
}

impl ReportFormatter {
    pub fn new(output_path: &Path) -> ScannerResult<Self> {
        fs::create_dir_all(output_path).map_err(|e| {
            ScannerError::file_error(&output_path.display().to_string(), &e.to_string())
        })?;
        Ok(Self {
            output_path: output_path.to_path_buf(),
        })
    }

    pub fn generate_all_reports(&self, report: &ReportData) -> ScannerResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        written.push(self.generate_json_report(report)?);
        written.push(self.generate_csv_report(report)?);
        written.push(self.generate_html_report(report)?);
        written.push(self.generate_text_report(report)?);
        Ok(written)
    }

    pub fn generate_json_report(&self, report: &ReportData) -> ScannerResult<PathBuf> {
        let path = self.output_path.join("report.json");
        let json = serde_json::to_string_pretty(report)?;
        self.write(&path, &json)?;
        Ok(path)
    }

    /// CSV in the column layout vulnerability scanners export, so findings
    /// can be imported into triage tooling alongside network scan results.
    pub fn generate_csv_report(&self, report: &ReportData) -> ScannerResult<PathBuf> {
        let path = self.output_path.join("report.csv");
        let mut csv = String::from("CVE,Risk,Host,Port,Name,Description,Solution,Plugin Output,VPR Score\n");

        for finding in &report.findings {
            let mut plugin_output = Vec::new();
            for evidence in &finding.evidence {
                plugin_output.push(format!("File: {}", evidence.file_path));
                if let Some(line) = evidence.line_number {
                    plugin_output.push(format!("Line: {}", line));
                }
                plugin_output.push(format!("Code:\n{}", evidence.code));
                plugin_output.push("---".to_string());
            }

            let row = [
                String::new(),
                finding.severity.to_string(),
                report.application_name.clone(),
                "0".to_string(),
                finding.title.clone(),
                finding.description.clone(),
                finding.remediation.clone(),
                plugin_output.join("\n"),
                "0".to_string(),
            ];
            let escaped: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
            csv.push_str(&escaped.join(","));
            csv.push('\n');
        }

        self.write(&path, &csv)?;
        Ok(path)
    }

    pub fn generate_html_report(&self, report: &ReportData) -> ScannerResult<PathBuf> {
        let path = self.output_path.join("report.html");

        let mut findings_html = String::new();
        for (index, finding) in report.findings.iter().enumerate() {
            let severity_class = finding.severity.to_string().to_lowercase();
            let mut evidence_html = String::new();
            for evidence in &finding.evidence {
                let line = evidence
                    .line_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                evidence_html.push_str(&format!(
                    "<div class=\"evidence\"><p><strong>{}</strong> (line {})</p><pre><code>{}</code></pre></div>\n",
                    html_escape(&evidence.file_path),
                    line,
                    html_escape(&evidence.code),
                ));
            }

            let validation_html = match (&finding.validation_verdict, &finding.validation_rationale) {
                (Some(verdict), Some(rationale)) => format!(
                    "<p class=\"validation\"><strong>Validation:</strong> {} &mdash; {}</p>\n",
                    html_escape(&verdict.to_string()),
                    html_escape(rationale),
                ),
                _ => String::new(),
            };

            findings_html.push_str(&format!(
                "<section class=\"finding {severity_class}\">\n\
                 <h3>Finding #{num}: {title}</h3>\n\
                 <p class=\"severity\">Severity: {severity}</p>\n\
                 <p>{description}</p>\n\
                 {evidence}\
                 <p><strong>Remediation:</strong> {remediation}</p>\n\
                 {validation}\
                 </section>\n",
                severity_class = severity_class,
                num = index + 1,
                title = html_escape(&finding.title),
                severity = finding.severity,
                description = html_escape(&finding.description),
                evidence = evidence_html,
                remediation = html_escape(&finding.remediation),
                validation = validation_html,
            ));
        }

        if report.findings.is_empty() {
            findings_html.push_str("<p>No security issues found.</p>\n");
        }

        let html = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Security Audit Report - {name}</title>\n\
             <style>\n\
             body {{ font-family: sans-serif; margin: 2rem auto; max-width: 60rem; }}\n\
             .finding {{ border-left: 4px solid #ccc; padding: 0 1rem; margin: 1rem 0; }}\n\
             .finding.critical {{ border-color: #c0392b; }}\n\
             .finding.high {{ border-color: #e67e22; }}\n\
             .finding.medium {{ border-color: #f1c40f; }}\n\
             .finding.low {{ border-color: #3498db; }}\n\
             pre {{ background: #f4f4f4; padding: 0.5rem; overflow-x: auto; }}\n\
             </style>\n</head>\n<body>\n\
             <h1>Security Audit Report</h1>\n\
             <p><strong>Application:</strong> {name}<br>\n\
             <strong>Date:</strong> {date}<br>\n\
             <strong>Auditor:</strong> {auditor}<br>\n\
             <strong>Methodology:</strong> {methodology}</p>\n\
             <h2>Executive Summary</h2>\n{summary}\n\
             <h2>Findings</h2>\n{findings}\
             <h2>Conclusion</h2>\n{conclusion}\n\
             <footer><p>Security Audit Report - ThreatCode. This report is confidential and \
             intended for internal use only.</p></footer>\n\
             </body>\n</html>\n",
            name = html_escape(&report.application_name),
            date = report.audit_date.format("%Y-%m-%d %H:%M:%S"),
            auditor = html_escape(&report.auditor),
            methodology = html_escape(&report.methodology),
            summary = report.executive_summary,
            findings = findings_html,
            conclusion = report.conclusion,
        );

        self.write(&path, &html)?;
        Ok(path)
    }

    pub fn generate_text_report(&self, report: &ReportData) -> ScannerResult<PathBuf> {
        let path = self.output_path.join("report.txt");
        let rule = "=".repeat(80);
        let thin_rule = "-".repeat(80);

        let mut lines = vec![
            rule.clone(),
            format!("SECURITY ANALYSIS REPORT - {}", report.application_name),
            rule.clone(),
            format!("Scan Date: {}", report.audit_date.format("%Y-%m-%d %H:%M:%S")),
            String::new(),
            "SUMMARY".to_string(),
            thin_rule.clone(),
            format!("Total Findings: {}", report.findings.len()),
            format!("  Critical: {}", report.severity_stats.critical),
            format!("  High: {}", report.severity_stats.high),
            format!("  Medium: {}", report.severity_stats.medium),
            format!("  Low: {}", report.severity_stats.low),
            format!("  Informational: {}", report.severity_stats.info),
            String::new(),
        ];

        if report.findings.is_empty() {
            lines.push("No security issues found.".to_string());
            lines.push(String::new());
        } else {
            lines.push("DETAILED FINDINGS".to_string());
            lines.push(rule.clone());
            lines.push(String::new());

            for (index, finding) in report.findings.iter().enumerate() {
                lines.push(format!("Finding #{}: {}", index + 1, finding.title));
                lines.push(format!("Severity: {}", finding.severity));
                lines.push(thin_rule.clone());
                lines.push(format!("Description: {}", finding.description));
                lines.push(String::new());

                if !finding.evidence.is_empty() {
                    lines.push("Evidence:".to_string());
                    for evidence in &finding.evidence {
                        lines.push(format!("  File: {}", evidence.file_path));
                        if let Some(line) = evidence.line_number {
                            lines.push(format!("  Line: {}", line));
                        }
                        lines.push(format!("  Code: {}", evidence.code));
                        lines.push(String::new());
                    }
                }

                lines.push(format!("Remediation: {}", finding.remediation));
                lines.push(String::new());
                lines.push(rule.clone());
                lines.push(String::new());
            }
        }

        lines.push(rule.clone());
        lines.push("Generated by ThreatCode Security Scanner".to_string());
        lines.push(rule);

        self.write(&path, &lines.join("\n"))?;
        Ok(path)
    }

    fn write(&self, path: &Path, content: &str) -> ScannerResult<()> {
        fs::write(path, content)
            .map_err(|e| ScannerError::file_error(&path.display().to_string(), &e.to_string()))
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
