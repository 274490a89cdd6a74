use serde_json::Value;
use crate::enums::confidence::Confidence;
use crate::enums::severity::Severity;
use crate::enums::verdict::Verdict;
use crate::errors::{ScannerError, ScannerResult};
use crate::structs::evidence::Evidence;
use crate::structs::finding::Finding;
use crate::structs::validation_outcome::ValidationOutcome;

const REQUIRED_FINDING_FIELDS: &[&str] = &["title", "severity", "description", "remediation"];

/// Parse the analysis model's response into findings.
///
/// Tolerates markdown fences, leading prose around the JSON object, and
/// truncated output. A finding missing a required field is dropped with a
/// warning while its siblings survive; a malformed evidence entry is dropped
/// without invalidating its parent finding. Unrecoverable parse failures are
/// retryable, the same envelope as transient network errors.
pub fn parse_findings(content: &str) -> ScannerResult<Vec<Finding>> {
    let text = locate_object(content, "findings")?;
    let data = decode_with_repair(&text, "findings response")?;

    let items = data
        .get("findings")
        .and_then(Value::as_array)
        .ok_or_else(|| ScannerError::parse_error("findings response", "'findings' is missing or not a list"))?;

    let mut findings = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if let Some(finding) = parse_finding(idx, item) {
            findings.push(finding);
        }
    }

    Ok(findings)
}

/// Parse the checker model's verdict. Missing fields fall back to
/// Needs Review / Low rather than failing the call.
pub fn parse_validation(content: &str) -> ScannerResult<ValidationOutcome> {
    let text = locate_object(content, "verdict")?;
    let data = decode_with_repair(&text, "validation response")?;

    let verdict = data
        .get("verdict")
        .and_then(|v| serde_json::from_value::<Verdict>(v.clone()).ok())
        .unwrap_or(Verdict::NeedsReview);
    let confidence = data
        .get("confidence")
        .and_then(|v| serde_json::from_value::<Confidence>(v.clone()).ok())
        .unwrap_or(Confidence::Low);
    let rationale = data
        .get("rationale")
        .and_then(Value::as_str)
        .unwrap_or("No rationale provided")
        .to_string();

    Ok(ValidationOutcome {
        verdict,
        confidence,
        rationale,
    })
}

/// Strip code fences and, when prose surrounds the payload, cut out the
/// outermost object containing the expected root key.
fn locate_object(content: &str, root_key: &str) -> ScannerResult<String> {
    let text = strip_code_fences(content);
    if text.starts_with('{') {
        return Ok(text.to_string());
    }

    match extract_object(text, root_key) {
        Some(object) => Ok(object.to_string()),
        None => Err(ScannerError::parse_error(
            "model response",
            &format!("could not find a JSON object with key '{}'", root_key),
        )),
    }
}

fn strip_code_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn extract_object<'a>(content: &'a str, root_key: &str) -> Option<&'a str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    let candidate = &content[start..=end];
    let needle = format!("\"{}\"", root_key);
    candidate.contains(&needle).then_some(candidate)
}

fn decode_with_repair(text: &str, content_type: &str) -> ScannerResult<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(first_error) if first_error.is_eof() || first_error.is_syntax() => {
            log::warn!("⚠️ Response appears truncated, attempting recovery: {}", first_error);
            let repaired = repair_truncated_json(text);
            match serde_json::from_str::<Value>(&repaired) {
                Ok(value) => {
                    log::info!("✅ Recovered truncated JSON response");
                    Ok(value)
                }
                Err(repair_error) => Err(ScannerError::parse_error(
                    content_type,
                    &format!("could not repair truncated JSON: {}", repair_error),
                )),
            }
        }
        Err(error) => Err(ScannerError::parse_error(content_type, &error.to_string())),
    }
}

/// Close whatever the truncation left open: scan outside string literals
/// tracking the delimiter stack, then append a closing quote if a string is
/// dangling, drop a trailing comma, and unwind the stack in nesting order.
fn repair_truncated_json(content: &str) -> String {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in content.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => stack.push(c),
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                }
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    let mut repaired = content.trim_end().to_string();
    if in_string {
        repaired.push('"');
    }
    if repaired.ends_with(',') {
        repaired.pop();
    }
    for open in stack.iter().rev() {
        repaired.push(if *open == '{' { '}' } else { ']' });
    }
    repaired
}

fn parse_finding(idx: usize, item: &Value) -> Option<Finding> {
    let obj = match item.as_object() {
        Some(obj) => obj,
        None => {
            log::warn!("⚠️ Finding {} is not an object, skipping", idx);
            return None;
        }
    };

    let missing: Vec<&str> = REQUIRED_FINDING_FIELDS
        .iter()
        .filter(|field| !obj.contains_key(**field))
        .copied()
        .collect();
    if !missing.is_empty() {
        log::warn!("⚠️ Finding {} missing required fields: {:?}, skipping", idx, missing);
        return None;
    }

    let severity = match serde_json::from_value::<Severity>(obj["severity"].clone()) {
        Ok(severity) => severity,
        Err(e) => {
            log::warn!("⚠️ Finding {} has invalid severity: {}, skipping", idx, e);
            return None;
        }
    };

    let title = obj.get("title").and_then(Value::as_str)?.to_string();
    let description = obj.get("description").and_then(Value::as_str)?.to_string();
    let remediation = obj.get("remediation").and_then(Value::as_str)?.to_string();

    let mut evidence = Vec::new();
    if let Some(entries) = obj.get("evidence").and_then(Value::as_array) {
        for entry in entries {
            match serde_json::from_value::<Evidence>(entry.clone()) {
                Ok(ev) => evidence.push(ev),
                Err(e) => log::warn!("⚠️ Skipping invalid evidence in finding {}: {}", idx, e),
            }
        }
    }

    let mut finding = Finding::new(title, severity, description, evidence, remediation);
    finding.cvss_score = opt_string(obj.get("cvss_score"));
    finding.impact = opt_string(obj.get("impact"));
    finding.attack_scenario = opt_string(obj.get("attack_scenario"));
    finding.references = obj.get("references").and_then(Value::as_array).map(|refs| {
        refs.iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_string())
            .collect()
    });

    Some(finding)
}

/// Models occasionally return numbers where strings are expected (notably
/// cvss_score); accept both.
fn opt_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
