use crate::structs::finding::Finding;

pub const VALIDATION_SYSTEM_PROMPT: &str =
    "You are a senior security auditor specializing in validating security findings and eliminating false positives. Always respond with valid JSON only.";

pub fn build_validation_prompt(finding: &Finding, original_code: &str) -> String {
    let evidence_text = finding
        .evidence
        .iter()
        .map(|ev| {
            let line = ev
                .line_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!("- File: {}, Line: {}\n  Code: {}", ev.file_path, line, ev.code)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Act as a senior security auditor performing a second-level review of a security finding. Your task is to validate whether this finding is a TRUE POSITIVE or a FALSE POSITIVE.

**Finding to Validate:**
Title: {title}
Severity: {severity}
Description: {description}

Evidence:
{evidence_text}

Remediation Suggested: {remediation}

**Original Code Context:**
```
{original_code}
```

**Your Task:**
Carefully review the finding and the code context. Determine whether this is:
1. **Confirmed**: A legitimate security vulnerability that should be addressed
2. **Likely False Positive**: The finding appears to be incorrect or the code is actually safe
3. **Needs Review**: Uncertain - requires human expert review

Consider the following in your analysis:
- Is the vulnerability actually exploitable in this context?
- Are there mitigating controls or security measures in place?
- Is the code snippet taken out of context?
- Does the finding accurately describe the security risk?
- Is the severity assessment appropriate?

**IMPORTANT**: Return your validation in JSON format ONLY. Do not include any additional text, explanations, or markdown formatting outside the JSON structure.

Required JSON format:
{{
    "verdict": "Confirmed|Likely False Positive|Needs Review",
    "confidence": "High|Medium|Low",
    "rationale": "Detailed explanation of why you reached this verdict, including specific code references and reasoning"
}}

Return ONLY the JSON response. No additional text, no markdown code blocks, just pure JSON."#,
        title = finding.title,
        severity = finding.severity,
        description = finding.description,
        remediation = finding.remediation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::severity::Severity;
    use crate::structs::evidence::Evidence;

    #[test]
    fn prompt_lists_each_evidence_entry() {
        let finding = Finding::new(
            "SQL injection".to_string(),
            Severity::High,
            "Unsanitized input reaches a query".to_string(),
            vec![
                Evidence {
                    file_path: "db.py".to_string(),
                    line_number: Some(12),
                    code: "cursor.execute(q)".to_string(),
                    description: None,
                },
                Evidence {
                    file_path: "api.py".to_string(),
                    line_number: None,
                    code: "q = request.args['q']".to_string(),
                    description: None,
                },
            ],
            "Use parameterized queries".to_string(),
        );

        let prompt = build_validation_prompt(&finding, "def handler(): ...");
        assert!(prompt.contains("Title: SQL injection"));
        assert!(prompt.contains("- File: db.py, Line: 12"));
        assert!(prompt.contains("- File: api.py, Line: unknown"));
        assert!(prompt.contains("def handler(): ..."));
    }
}
