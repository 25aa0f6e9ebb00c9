//! Markdown reporter for the consolidated report
//!
//! Produces a short summary suitable for pull request comments.

use crate::aggregator::SecurityReport;
use crate::reporter::Reporter;

const TOP_RECOMMENDATIONS: usize = 5;

pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for MarkdownReporter {
    fn report(&self, report: &SecurityReport) -> String {
        let summary = &report.summary;

        let mut output = format!(
            "# \u{1F512} Security Scan Results

## Overall Security Score: {score}/100

### Vulnerability Summary
| Severity | Count |
|----------|-------|
| Critical | {critical} |
| High     | {high} |
| Medium   | {medium} |
| Low      | {low} |

### Other Findings
- **Secrets Detected:** {secrets}
- **License Issues:** {licenses}

### Top Recommendations
",
            score = report.security_score,
            critical = summary.critical_vulnerabilities,
            high = summary.high_vulnerabilities,
            medium = summary.medium_vulnerabilities,
            low = summary.low_vulnerabilities,
            secrets = summary.secrets_found,
            licenses = summary.license_issues,
        );

        for (i, rec) in report
            .recommendations
            .iter()
            .take(TOP_RECOMMENDATIONS)
            .enumerate()
        {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }

        output
    }
}
