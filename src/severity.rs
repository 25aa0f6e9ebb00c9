use serde::{Deserialize, Serialize};

/// Severity tier used to bucket vulnerability counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Tiers in evaluation order, most severe first.
    pub const TIERS: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Match an already-lowercased severity string against the four tiers.
    pub fn from_tier(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tier_accepts_only_the_four_tiers() {
        assert_eq!(Severity::from_tier("critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_tier("low"), Some(Severity::Low));
        assert_eq!(Severity::from_tier("moderate"), None);
        assert_eq!(Severity::from_tier("unknown"), None);
        assert_eq!(Severity::from_tier("HIGH"), None);
    }

    #[test]
    fn test_tiers_are_most_severe_first() {
        assert!(Severity::TIERS.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(Severity::High.to_string(), "HIGH");
        assert_eq!(Severity::Medium.title(), "Medium");
    }
}
