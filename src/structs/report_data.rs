use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::structs::finding::Finding;
use crate::structs::severity_stats::SeverityStats;

/// Finalized report for one scan. Severity stats, executive summary, and
/// conclusion are pure functions of the finding list, computed once at
/// construction and never hand-edited.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub application_name: String,
    pub audit_date: DateTime<Utc>,
    pub auditor: String,
    pub methodology: String,
    pub findings: Vec<Finding>,
    pub severity_stats: SeverityStats,
    pub executive_summary: String,
    pub conclusion: String,
}

impl ReportData {
    pub fn new(application_name: &str, findings: Vec<Finding>) -> Self {
        let severity_stats = severity_stats_for(&findings);
        let executive_summary = executive_summary_for(application_name, &findings, &severity_stats);
        let conclusion = conclusion_for(&findings, &severity_stats);

        Self {
            application_name: application_name.to_string(),
            audit_date: Utc::now(),
            auditor: "ThreatCode AI Scanner".to_string(),
            methodology: "Automated AI-powered source code security analysis using LLM".to_string(),
            findings,
            severity_stats,
            executive_summary,
            conclusion,
        }
    }
}

fn severity_stats_for(findings: &[Finding]) -> SeverityStats {
    let mut stats = SeverityStats::default();
    for finding in findings {
        stats.record(finding.severity);
    }
    stats
}

fn executive_summary_for(application_name: &str, findings: &[Finding], stats: &SeverityStats) -> String {
    if findings.is_empty() {
        return "<p>The automated security scan completed successfully with <strong>no vulnerabilities \
                detected</strong> in the analyzed codebase.</p>"
            .to_string();
    }

    format!(
        "<p>The automated security analysis identified <strong>{total} security finding(s)</strong> \
         in the {application_name} codebase:</p>\n\
         <ul>\n\
         <li><strong>Critical:</strong> {critical} issue(s) requiring immediate attention</li>\n\
         <li><strong>High:</strong> {high} issue(s) that should be addressed soon</li>\n\
         <li><strong>Medium:</strong> {medium} issue(s) requiring review</li>\n\
         <li><strong>Low:</strong> {low} minor issue(s)</li>\n\
         <li><strong>Informational:</strong> {info} best practice recommendation(s)</li>\n\
         </ul>\n\
         <p>This report provides detailed findings with remediation guidance for each identified \
         vulnerability.</p>",
        total = findings.len(),
        application_name = application_name,
        critical = stats.critical,
        high = stats.high,
        medium = stats.medium,
        low = stats.low,
        info = stats.info,
    )
}

fn conclusion_for(findings: &[Finding], stats: &SeverityStats) -> String {
    if findings.is_empty() {
        return "<p>The codebase demonstrates good security practices with no vulnerabilities identified \
                during this automated scan. Continue following secure coding practices and perform \
                regular security assessments.</p>"
            .to_string();
    }

    if stats.critical > 0 || stats.high > 0 {
        format!(
            "<p>The analysis identified <strong>{} critical/high severity</strong> issue(s) that require \
             immediate attention. It is strongly recommended to:</p>\n\
             <ul>\n\
             <li>Prioritize remediation of Critical and High severity findings</li>\n\
             <li>Implement the suggested fixes as outlined in each finding</li>\n\
             <li>Conduct code review of the remediated sections</li>\n\
             <li>Re-scan the codebase after implementing fixes</li>\n\
             <li>Consider implementing automated security scanning in your CI/CD pipeline</li>\n\
             </ul>",
            stats.critical + stats.high
        )
    } else {
        "<p>The codebase shows generally good security practices with primarily medium/low severity \
         findings. Recommendations:</p>\n\
         <ul>\n\
         <li>Address the identified Medium and Low severity issues during regular maintenance cycles</li>\n\
         <li>Review and implement the informational best practice recommendations</li>\n\
         <li>Continue regular security assessments</li>\n\
         <li>Consider security training for the development team</li>\n\
         </ul>"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::severity::Severity;

    fn finding(title: &str, severity: Severity) -> Finding {
        Finding::new(
            title.to_string(),
            severity,
            "description".to_string(),
            Vec::new(),
            "remediation".to_string(),
        )
    }

    #[test]
    fn severity_stats_cover_all_five_keys() {
        let report = ReportData::new(
            "demo",
            vec![finding("a", Severity::High), finding("b", Severity::Critical)],
        );

        assert_eq!(report.severity_stats.critical, 1);
        assert_eq!(report.severity_stats.high, 1);
        assert_eq!(report.severity_stats.medium, 0);
        assert_eq!(report.severity_stats.low, 0);
        assert_eq!(report.severity_stats.info, 0);
        assert!(report.executive_summary.contains("2 security finding(s)"));
    }

    #[test]
    fn empty_scan_produces_clean_summary() {
        let report = ReportData::new("demo", Vec::new());
        assert_eq!(report.severity_stats.total(), 0);
        assert!(report.executive_summary.contains("no vulnerabilities"));
        assert!(report.conclusion.contains("good security practices"));
    }

    #[test]
    fn conclusion_branches_on_critical_and_high() {
        let urgent = ReportData::new("demo", vec![finding("a", Severity::Critical)]);
        assert!(urgent.conclusion.contains("immediate attention"));

        let mild = ReportData::new("demo", vec![finding("a", Severity::Low)]);
        assert!(mild.conclusion.contains("maintenance cycles"));
    }

    #[test]
    fn informational_maps_to_info_counter() {
        let report = ReportData::new("demo", vec![finding("a", Severity::Informational)]);
        assert_eq!(report.severity_stats.info, 1);
    }
}
