use serde::{Deserialize, Serialize};

/// Table rules used by the final-score transform.
///
/// Every field is optional in YAML; omitted fields fall back to the standard
/// 25000-start / 30000-return table with a 10-30 uma.
///
/// Example YAML:
/// ```yaml
/// rules:
///   starting_points: 25000
///   return_points: 30000
///   uma: [30, 10, -10, -30]
///   oka: 20
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Points each seat holds at the start of a game
    pub starting_points: i64,

    /// Reference point the final score is normalised around
    pub return_points: i64,

    /// Sum the four raw scores must reach before the transform runs
    pub total_points: i64,

    /// Rank bonus for 1st..4th, in thousands of points
    pub uma: [f64; 4],

    /// Pool bonus for the top score, split among tied leaders
    pub oka: f64,

    /// Bonus per busted player, paid to players whose danger flag is set
    pub tobi_bonus: f64,

    /// Penalty for finishing below zero
    pub bust_penalty: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            starting_points: 25_000,
            return_points: 30_000,
            total_points: 100_000,
            uma: [30.0, 10.0, -10.0, -30.0],
            oka: 20.0,
            tobi_bonus: 10.0,
            bust_penalty: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RuleConfig::default();

        assert_eq!(rules.starting_points, 25_000);
        assert_eq!(rules.return_points, 30_000);
        assert_eq!(rules.total_points, 100_000);
        assert_eq!(rules.uma, [30.0, 10.0, -10.0, -30.0]);
        assert_eq!(rules.oka, 20.0);
    }

    #[test]
    fn test_rules_serde_roundtrip() {
        let rules = RuleConfig::default();
        let yaml = serde_saphyr::to_string(&rules).unwrap();
        let parsed: RuleConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(rules, parsed);
    }

    #[test]
    fn test_partial_rules_parse() {
        let yaml = r#"
uma: [20, 10, -10, -20]
oka: 0
"#;
        let rules: RuleConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(rules.uma, [20.0, 10.0, -10.0, -20.0]);
        assert_eq!(rules.oka, 0.0);
        // Untouched fields keep their defaults
        assert_eq!(rules.return_points, 30_000);
        assert_eq!(rules.tobi_bonus, 10.0);
    }

    #[test]
    fn test_empty_rules_parse() {
        let rules: RuleConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(rules, RuleConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<RuleConfig, _> = serde_saphyr::from_str("kiriage: true");
        assert!(result.is_err());
    }
}
