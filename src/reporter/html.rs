use crate::aggregator::{
    LicenseScanSummary, NpmAuditSummary, SecurityReport, SnykSummary, ToolOutcome,
};
use crate::reporter::Reporter;

pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for HtmlReporter {
    fn report(&self, report: &SecurityReport) -> String {
        let summary = &report.summary;
        let score_class = report.score_class();

        let recommendations_html: String = report
            .recommendations
            .iter()
            .map(|rec| format!("\n                    <li>{}</li>", html_escape(rec)))
            .collect();

        let scan_results = &report.scan_results;
        let mut rows = String::new();
        for outcome in &scan_results.dependency_scan.npm_audit {
            if let ToolOutcome::Parsed(npm) = outcome {
                rows.push_str(&npm_rows(npm));
            }
        }
        for outcome in &scan_results.dependency_scan.snyk {
            if let ToolOutcome::Parsed(snyk) = outcome {
                rows.push_str(&snyk_rows(snyk));
            }
        }

        let vulnerabilities_html = if rows.is_empty() {
            "<p>No dependency vulnerabilities reported.</p>".to_string()
        } else {
            format!(
                r#"<table>
                <thead>
                    <tr><th>Severity</th><th>Package</th><th>Title</th><th>Tool</th><th>Source</th></tr>
                </thead>
                <tbody>{rows}
                </tbody>
            </table>"#
            )
        };

        let license_rows: String = scan_results
            .license_scan
            .iter()
            .filter_map(|outcome| match outcome {
                ToolOutcome::Parsed(licenses) => Some(license_rows(licenses)),
                ToolOutcome::Failed(_) => None,
            })
            .collect();

        let licenses_html = if license_rows.is_empty() {
            "<p>No non-compliant licenses reported.</p>".to_string()
        } else {
            format!(
                r#"<table>
                <thead>
                    <tr><th>Package</th><th>License</th><th>Version</th><th>Repository</th></tr>
                </thead>
                <tbody>{license_rows}
                </tbody>
            </table>"#
            )
        };

        let failures_html = failures_html(report);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Security Report</title>
    <style>
        body {{ font-family: 'Segoe UI', Arial, sans-serif; margin: 0; padding: 20px; background: #f5f7fa; }}
        .container {{ max-width: 1200px; margin: 0 auto; background: white; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px 10px 0 0; }}
        .score {{ font-size: 3em; font-weight: bold; text-align: center; margin: 20px 0; }}
        .score.excellent {{ color: #10B981; }}
        .score.good {{ color: #F59E0B; }}
        .score.poor {{ color: #EF4444; }}
        .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; padding: 30px; }}
        .metric {{ background: #f8fafc; padding: 20px; border-radius: 8px; text-align: center; border-left: 4px solid #3B82F6; }}
        .metric.critical {{ border-left-color: #EF4444; }}
        .metric.high {{ border-left-color: #F59E0B; }}
        .metric.medium {{ border-left-color: #8B5CF6; }}
        .metric.low {{ border-left-color: #10B981; }}
        .metric .value {{ font-size: 2em; font-weight: bold; }}
        .section {{ padding: 30px; border-top: 1px solid #e5e7eb; }}
        .recommendations {{ background: #fef3c7; padding: 20px; border-radius: 8px; border-left: 4px solid #F59E0B; }}
        .failures {{ background: #fef2f2; padding: 20px; border-radius: 8px; border-left: 4px solid #EF4444; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        th, td {{ padding: 12px; text-align: left; border-bottom: 1px solid #e5e7eb; }}
        th {{ background: #f9fafb; font-weight: 600; }}
        td.severity-critical {{ color: #EF4444; font-weight: 600; }}
        td.severity-high {{ color: #F59E0B; font-weight: 600; }}
        td.severity-medium, td.severity-moderate {{ color: #8B5CF6; }}
        td.severity-low {{ color: #10B981; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Security Report</h1>
            <p>Generated on {generated_at} by {generator} {version}</p>
            <div class="score {score_class}">{score}/100</div>
        </div>

        <div class="summary">
            <div class="metric critical">
                <h3>Critical</h3>
                <div class="value">{critical}</div>
            </div>
            <div class="metric high">
                <h3>High</h3>
                <div class="value">{high}</div>
            </div>
            <div class="metric medium">
                <h3>Medium</h3>
                <div class="value">{medium}</div>
            </div>
            <div class="metric low">
                <h3>Low</h3>
                <div class="value">{low}</div>
            </div>
            <div class="metric">
                <h3>Secrets Found</h3>
                <div class="value">{secrets}</div>
            </div>
            <div class="metric">
                <h3>License Issues</h3>
                <div class="value">{license_issues}</div>
            </div>
        </div>

        <div class="section">
            <h2>Recommendations</h2>
            <div class="recommendations">
                <ul>{recommendations_html}
                </ul>
            </div>
        </div>

        <div class="section">
            <h2>Dependency Vulnerabilities</h2>
            {vulnerabilities_html}
        </div>

        <div class="section">
            <h2>Non-Compliant Licenses</h2>
            {licenses_html}
        </div>
{failures_html}
        <div class="section">
            <h2>Scan Tools</h2>
            <p>This report aggregates results from the following scanners:</p>
            <ul>
                <li><strong>npm audit:</strong> Dependency vulnerability scanning</li>
                <li><strong>Snyk:</strong> Advanced vulnerability detection</li>
                <li><strong>detect-secrets:</strong> Baseline secret detection</li>
                <li><strong>license-checker:</strong> Open source license compliance</li>
            </ul>
        </div>
    </div>
</body>
</html>
"#,
            generated_at = html_escape(&report.metadata.generated_at),
            generator = html_escape(&report.metadata.generator),
            version = html_escape(&report.metadata.version),
            score = report.security_score,
            critical = summary.critical_vulnerabilities,
            high = summary.high_vulnerabilities,
            medium = summary.medium_vulnerabilities,
            low = summary.low_vulnerabilities,
            secrets = summary.secrets_found,
            license_issues = summary.license_issues,
        )
    }
}

fn npm_rows(npm: &NpmAuditSummary) -> String {
    npm.vulnerabilities
        .iter()
        .map(|v| {
            vulnerability_row(&v.severity, &v.package, &v.title, &npm.tool, &npm.source)
        })
        .collect()
}

fn snyk_rows(snyk: &SnykSummary) -> String {
    snyk.vulnerabilities
        .iter()
        .map(|v| {
            vulnerability_row(
                &v.severity,
                v.package.as_deref().unwrap_or("unknown"),
                v.title.as_deref().unwrap_or("Unknown"),
                &snyk.tool,
                &snyk.source,
            )
        })
        .collect()
}

fn vulnerability_row(severity: &str, package: &str, title: &str, tool: &str, source: &str) -> String {
    let severity = html_escape(severity);
    format!(
        r#"
                    <tr><td class="severity-{severity}">{severity}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        html_escape(package),
        html_escape(title),
        html_escape(tool),
        html_escape(source),
    )
}

fn license_rows(licenses: &LicenseScanSummary) -> String {
    licenses
        .non_compliant_packages
        .iter()
        .map(|p| {
            format!(
                r#"
                    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                html_escape(&p.name),
                html_escape(&p.license),
                html_escape(&p.version),
                html_escape(&p.repository),
            )
        })
        .collect()
}

/// Section listing artifacts that could not be parsed; empty when none.
fn failures_html(report: &SecurityReport) -> String {
    let scan_results = &report.scan_results;
    let failures: Vec<_> = scan_results
        .dependency_scan
        .npm_audit
        .iter()
        .filter_map(failure_of)
        .chain(scan_results.dependency_scan.snyk.iter().filter_map(failure_of))
        .chain(scan_results.secret_scan.iter().filter_map(failure_of))
        .chain(scan_results.license_scan.iter().filter_map(failure_of))
        .collect();

    if failures.is_empty() {
        return String::new();
    }

    let items: String = failures
        .iter()
        .map(|f| {
            format!(
                "\n                    <li><strong>{} ({}):</strong> {}</li>",
                html_escape(&f.tool),
                html_escape(&f.source),
                html_escape(&f.error),
            )
        })
        .collect();

    format!(
        r#"
        <div class="section">
            <h2>Unreadable Artifacts</h2>
            <div class="failures">
                <ul>{items}
                </ul>
            </div>
        </div>
"#
    )
}

fn failure_of<T>(outcome: &ToolOutcome<T>) -> Option<&crate::aggregator::ToolFailure> {
    match outcome {
        ToolOutcome::Failed(failure) => Some(failure),
        ToolOutcome::Parsed(_) => None,
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ReportBuilder;
    use crate::artifacts::{LICENSES_FILE, SNYK_TEST_FILE, discover};
    use crate::test_utils::fixtures::{LICENSES_JSON, SNYK_TEST_JSON, fixed_time, write_artifact};
    use tempfile::TempDir;

    fn report_for(root: &TempDir) -> SecurityReport {
        let dirs = discover(root.path()).unwrap();
        ReportBuilder::new()
            .with_generated_at(fixed_time())
            .with_dirs(&dirs)
            .build()
    }

    #[test]
    fn test_html_output_structure() {
        let root = TempDir::new().unwrap();
        let output = HtmlReporter::new().report(&report_for(&root));

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<div class=\"score excellent\">100/100</div>"));
        assert!(output.contains("Generated on 2026-01-25T12:00:00Z"));
        assert!(output.contains("No dependency vulnerabilities reported."));
        assert!(!output.contains("Unreadable Artifacts"));
        assert!(output.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_lists_vulnerabilities_and_licenses() {
        let root = TempDir::new().unwrap();
        write_artifact(&root, "snyk", SNYK_TEST_FILE, SNYK_TEST_JSON);
        write_artifact(&root, "licenses", LICENSES_FILE, LICENSES_JSON);
        let output = HtmlReporter::new().report(&report_for(&root));

        assert!(output.contains("<td class=\"severity-high\">high</td><td>lodash</td>"));
        assert!(output.contains("<td>readline-sync@1.4.10</td><td>GPL-3.0</td>"));
        assert!(output.contains("score good"));
    }

    #[test]
    fn test_html_reports_unreadable_artifacts() {
        let root = TempDir::new().unwrap();
        write_artifact(&root, "snyk", SNYK_TEST_FILE, "<not json>");
        let output = HtmlReporter::new().report(&report_for(&root));

        assert!(output.contains("Unreadable Artifacts"));
        assert!(output.contains("<strong>snyk (snyk):</strong>"));
    }

    #[test]
    fn test_html_escapes_special_chars() {
        let root = TempDir::new().unwrap();
        write_artifact(
            &root,
            "snyk",
            SNYK_TEST_FILE,
            r#"{"vulnerabilities": [{"severity": "low", "title": "<script>alert('x')</script>", "packageName": "a&b"}]}"#,
        );
        let output = HtmlReporter::new().report(&report_for(&root));

        assert!(output.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(output.contains("<td>a&amp;b</td>"));
        assert!(!output.contains("<script>"));
    }

    #[test]
    #[allow(clippy::default_constructed_unit_structs)]
    fn test_html_default_trait() {
        let root = TempDir::new().unwrap();
        let output = HtmlReporter::default().report(&report_for(&root));
        assert!(output.contains("Security Report"));
    }
}
