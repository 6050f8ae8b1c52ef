use super::config::RuleConfig;

/// Slack for float rounding when checking that uma balances
const UMA_SUM_TOLERANCE: f64 = 1e-9;

/// Validate table rules at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(rules: &RuleConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if rules.starting_points <= 0 {
        errors.push("rules.starting_points: must be positive".to_string());
    }

    if rules.total_points != rules.starting_points * 4 {
        errors.push(format!(
            "rules.total_points: must be 4 x starting_points ({}), got {}",
            rules.starting_points * 4,
            rules.total_points
        ));
    }

    if rules.return_points < rules.starting_points {
        errors.push(format!(
            "rules.return_points: must be at least starting_points ({}), got {}",
            rules.starting_points, rules.return_points
        ));
    }

    let uma_sum: f64 = rules.uma.iter().sum();
    if uma_sum.abs() > UMA_SUM_TOLERANCE {
        errors.push(format!("rules.uma: must sum to 0, sums to {}", uma_sum));
    }

    if rules.uma.windows(2).any(|pair| pair[0] < pair[1]) {
        errors.push("rules.uma: must not increase from 1st to 4th".to_string());
    }

    for (field, value) in [
        ("oka", rules.oka),
        ("tobi_bonus", rules.tobi_bonus),
        ("bust_penalty", rules.bust_penalty),
    ] {
        if value < 0.0 {
            errors.push(format!("rules.{}: must be non-negative", field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
