use crate::aggregator::ReportSummary;
use serde::{Deserialize, Serialize};

/// Security score configuration: points deducted per finding
const CRITICAL_WEIGHT: u64 = 25;
const HIGH_WEIGHT: u64 = 10;
const MEDIUM_WEIGHT: u64 = 5;
const LOW_WEIGHT: u64 = 1;
const SECRET_WEIGHT: u64 = 15;
const LICENSE_WEIGHT: u64 = 5;
const MAX_SCORE: u64 = 100;

/// Presentation band for a security score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreClass {
    Excellent,
    Good,
    Poor,
}

impl ScoreClass {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => ScoreClass::Excellent,
            70..=89 => ScoreClass::Good,
            _ => ScoreClass::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "excellent",
            ScoreClass::Good => "good",
            ScoreClass::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ScoreClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linear 0-100 heuristic: start at 100, subtract a fixed weight per
/// finding, floor at 0.
pub fn security_score(summary: &ReportSummary) -> u32 {
    let penalty = [
        (summary.critical_vulnerabilities, CRITICAL_WEIGHT),
        (summary.high_vulnerabilities, HIGH_WEIGHT),
        (summary.medium_vulnerabilities, MEDIUM_WEIGHT),
        (summary.low_vulnerabilities, LOW_WEIGHT),
        (summary.secrets_found, SECRET_WEIGHT),
        (summary.license_issues, LICENSE_WEIGHT),
    ]
    .iter()
    .fold(0u64, |acc, (count, weight)| {
        acc.saturating_add(count.saturating_mul(*weight))
    });

    MAX_SCORE.saturating_sub(penalty) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(c: u64, h: u64, m: u64, l: u64, s: u64, lic: u64) -> ReportSummary {
        ReportSummary {
            total_vulnerabilities: c + h + m + l,
            critical_vulnerabilities: c,
            high_vulnerabilities: h,
            medium_vulnerabilities: m,
            low_vulnerabilities: l,
            secrets_found: s,
            license_issues: lic,
        }
    }

    #[test]
    fn test_clean_summary_scores_100() {
        assert_eq!(security_score(&ReportSummary::default()), 100);
    }

    #[test]
    fn test_weights() {
        assert_eq!(security_score(&summary(1, 0, 0, 0, 0, 0)), 75);
        assert_eq!(security_score(&summary(0, 1, 0, 0, 0, 0)), 90);
        assert_eq!(security_score(&summary(0, 0, 1, 0, 0, 0)), 95);
        assert_eq!(security_score(&summary(0, 0, 0, 1, 0, 0)), 99);
        assert_eq!(security_score(&summary(0, 0, 0, 0, 1, 0)), 85);
        assert_eq!(security_score(&summary(0, 0, 0, 0, 0, 1)), 95);
        assert_eq!(security_score(&summary(1, 2, 1, 3, 0, 1)), 100 - 25 - 20 - 5 - 3 - 5);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(security_score(&summary(5, 0, 0, 0, 0, 0)), 0);
        assert_eq!(security_score(&summary(u64::MAX, u64::MAX, 0, 0, u64::MAX, 0)), 0);
    }

    #[test]
    fn test_score_is_monotonically_non_increasing() {
        let bumps: [fn(&mut ReportSummary); 6] = [
            |s| s.critical_vulnerabilities += 1,
            |s| s.high_vulnerabilities += 1,
            |s| s.medium_vulnerabilities += 1,
            |s| s.low_vulnerabilities += 1,
            |s| s.secrets_found += 1,
            |s| s.license_issues += 1,
        ];
        for bump in bumps {
            let mut current = ReportSummary::default();
            let mut previous = security_score(&current);
            for _ in 0..120 {
                bump(&mut current);
                let next = security_score(&current);
                assert!(next <= previous);
                previous = next;
            }
            assert_eq!(previous, 0);
        }
    }

    #[test]
    fn test_score_class_bands() {
        assert_eq!(ScoreClass::from_score(100), ScoreClass::Excellent);
        assert_eq!(ScoreClass::from_score(90), ScoreClass::Excellent);
        assert_eq!(ScoreClass::from_score(89), ScoreClass::Good);
        assert_eq!(ScoreClass::from_score(70), ScoreClass::Good);
        assert_eq!(ScoreClass::from_score(69), ScoreClass::Poor);
        assert_eq!(ScoreClass::from_score(0), ScoreClass::Poor);
    }
}
