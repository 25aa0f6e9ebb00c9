#[cfg(test)]
pub mod fixtures {
    use std::fs;

    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    use crate::evaluator::{Findings, Tally};

    /// npm audit with 1 critical, 1 high and 2 moderate findings.
    pub const NPM_AUDIT_JSON: &str = r#"{
        "auditReportVersion": 2,
        "vulnerabilities": {
            "minimist": {
                "name": "minimist",
                "severity": "critical",
                "via": [{
                    "source": 1179,
                    "title": "Prototype Pollution in minimist",
                    "severity": "critical",
                    "cwe": ["CWE-1321"],
                    "cvss": {"score": 9.8, "vectorString": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"},
                    "url": "https://github.com/advisories/GHSA-xvch-5gv4-984h",
                    "range": "<0.2.4"
                }]
            },
            "mkdirp": {
                "name": "mkdirp",
                "severity": "critical",
                "via": ["minimist"]
            }
        },
        "metadata": {
            "vulnerabilities": {"info": 0, "low": 0, "moderate": 2, "high": 1, "critical": 1, "total": 4}
        }
    }"#;

    /// Snyk test with one high, one medium and one low finding.
    pub const SNYK_TEST_JSON: &str = r#"{
        "ok": false,
        "vulnerabilities": [
            {
                "id": "SNYK-JS-LODASH-567746",
                "title": "Prototype Pollution",
                "severity": "high",
                "packageName": "lodash",
                "version": "4.17.15",
                "identifiers": {"CVE": ["CVE-2020-8203"], "CWE": ["CWE-400"]},
                "cvssScore": 7.4,
                "exploitMaturity": "proof-of-concept",
                "description": "Affected versions of lodash are vulnerable to prototype pollution."
            },
            {"id": "SNYK-JS-AXIOS-1038255", "severity": "medium", "packageName": "axios"},
            {"id": "SNYK-JS-DEBUG-10762", "severity": "low", "packageName": "debug"}
        ]
    }"#;

    /// detect-secrets baseline with two findings in one file.
    pub const SECRETS_AUDIT_JSON: &str = r#"{
        "version": "1.4.0",
        "results": {
            "config/.env": [
                {"type": "AWS Access Key", "line_number": 3, "is_verified": false},
                {"type": "Secret Keyword", "line_number": 7, "is_verified": true}
            ]
        }
    }"#;

    /// license-checker output with one GPL package.
    pub const LICENSES_JSON: &str = r#"{
        "express@4.18.2": {"licenses": "MIT", "repository": "https://github.com/expressjs/express"},
        "readline-sync@1.4.10": {"licenses": "GPL-3.0", "repository": "https://github.com/anseki/readline-sync"}
    }"#;

    pub fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 25, 12, 0, 0)
            .single()
            .unwrap()
    }

    pub fn tally_with(set: impl FnOnce(&mut Findings)) -> Tally {
        let mut tally = Tally::default();
        set(&mut tally.findings);
        tally
    }

    /// Write `content` to `<root>/<dir>/<file>`, creating `dir` if needed.
    pub fn write_artifact(root: &TempDir, dir: &str, file: &str, content: &str) {
        let path = root.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(file), content).unwrap();
    }
}
