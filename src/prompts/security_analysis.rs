use crate::structs::analysis_context::AnalysisContext;

pub const SECURITY_SYSTEM_PROMPT: &str =
    "You are a security expert specializing in code review and vulnerability assessment. Always respond with valid JSON only.";

pub fn build_security_prompt(code_chunk: &str, context: &AnalysisContext) -> String {
    let file_info = if context.file_paths.is_empty() {
        "unknown".to_string()
    } else {
        context.file_paths.join(", ")
    };

    format!(
        r#"Act as a seasoned security researcher with expertise in application security and vulnerability assessment. Conduct a comprehensive source code review of the provided codebase to identify security vulnerabilities, weaknesses, and coding best practices violations.

Files being analyzed: {file_info}

Code to analyze:
```
{code_chunk}
```

For your analysis, you must:

1. Perform a thorough examination of the entire codebase, looking for:
   - OWASP Top 10 vulnerabilities (injection, broken authentication, sensitive data exposure, etc.)
   - Common security misconfigurations
   - Insecure coding practices
   - Potential business logic flaws
   - Dependencies with known vulnerabilities
   - Information disclosure issues
   - Insecure error handling
   - Insufficient input validation and output encoding
   - Insecure direct object references
   - Security misconfigurations
   - Any other security-relevant issues

2. For each identified vulnerability, you must document:
   - Finding Name: Clear, concise title for the vulnerability
   - Severity: Critical, High, Medium, Low, or Informational (based on CVSS scoring guidelines)
     * Critical: Easily exploitable, high impact, allows complete system compromise
     * High: Exploitable with moderate effort, significant impact
     * Medium: Requires specific conditions, moderate impact
     * Low: Difficult to exploit or minimal impact
     * Informational: Best practices, no direct security impact
   - Description: Detailed explanation of the vulnerability and its potential impact
   - Evidence: Specific file path, line number(s), and the relevant code snippet
   - Suggested Remediation: Step-by-step instructions to fix the vulnerability

3. Prioritize findings based on potential business impact and exploitability.

**IMPORTANT**: Return your findings in JSON format ONLY. Do not include any additional text, explanations, or markdown formatting outside the JSON structure.

Required JSON format:
{{
    "findings": [
        {{
            "title": "Clear, concise vulnerability title",
            "severity": "Critical|High|Medium|Low|Informational",
            "description": "Detailed explanation of the vulnerability and its potential impact",
            "evidence": [
                {{
                    "file_path": "path/to/file.ext",
                    "line_number": 42,
                    "code": "actual vulnerable code from the file",
                    "description": "Optional explanation of this specific evidence"
                }}
            ],
            "remediation": "Step-by-step instructions to fix the vulnerability with code examples if applicable",
            "cvss_score": "Optional: CVSS score (e.g., '9.8' or 'CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H')",
            "impact": "Optional: Description of business/security impact if exploited",
            "attack_scenario": "Optional: Detailed scenario describing how an attacker could exploit this vulnerability",
            "references": ["Optional: Array of URLs or references to CWE, OWASP, CVE, etc."]
        }}
    ]
}}

Note: The optional fields (cvss_score, impact, attack_scenario, references) should be included when applicable to provide comprehensive security analysis.

Return ONLY the JSON response. No additional text, no markdown code blocks, just pure JSON."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_code_and_file_list() {
        let context = AnalysisContext {
            file_paths: vec!["app.py".to_string(), "db.py".to_string()],
            batch_size: 2,
        };
        let prompt = build_security_prompt("import os", &context);
        assert!(prompt.contains("Files being analyzed: app.py, db.py"));
        assert!(prompt.contains("import os"));
        assert!(prompt.contains("\"findings\""));
    }

    #[test]
    fn empty_file_list_falls_back_to_unknown() {
        let context = AnalysisContext {
            file_paths: Vec::new(),
            batch_size: 0,
        };
        let prompt = build_security_prompt("x = 1", &context);
        assert!(prompt.contains("Files being analyzed: unknown"));
    }
}
