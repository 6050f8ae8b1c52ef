use super::config::RuleConfig;
use super::error::ValidationError;

/// A seat at the table with its raw point total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u8, // 1..=4, stable for one session only
    pub name: String,
    pub points: i64,
}

impl Player {
    pub fn new(id: u8, name: impl Into<String>, points: i64) -> Self {
        Self {
            id,
            name: name.into(),
            points,
        }
    }
}

/// The terms that add up to a final score, in thousands of points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub base: f64, // (raw - return_points) / 1000
    pub uma: f64,
    pub oka: f64,
    pub tobi: f64,
    pub bust: f64, // zero or negative
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.base + self.uma + self.oka + self.tobi + self.bust
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalScore {
    pub id: u8,
    pub name: String,
    pub score: f64,
    /// 1-based placing; tied players share the best rank of their run
    pub rank: usize,
    pub breakdown: ScoreBreakdown,
}

/// Apply the end-of-game transform to four raw scores.
///
/// Fails without touching anything when the raw scores don't add up to
/// `rules.total_points`. Output is in the same seat order as `players`.
pub fn transform(
    players: &[Player; 4],
    danger: &[bool; 4],
    rules: &RuleConfig,
) -> Result<[FinalScore; 4], ValidationError> {
    // Summed wide so that no four i64 inputs can wrap into a valid total
    let total: i128 = players.iter().map(|p| i128::from(p.points)).sum();
    if total != i128::from(rules.total_points) {
        return Err(ValidationError::ScoreSumMismatch {
            actual: total,
            expected: rules.total_points,
        });
    }

    // Seat indices by raw score, highest first. Stable, so equal scores stay
    // contiguous in seat order.
    let mut order = [0usize, 1, 2, 3];
    order.sort_by(|&a, &b| players[b].points.cmp(&players[a].points));

    let (uma_share, rank) = allocate_uma(players, &order, &rules.uma);

    let top = players[order[0]].points;
    let leaders = players.iter().filter(|p| p.points == top).count();
    let oka_share = rules.oka / leaders as f64;

    // Busts are counted on raw scores, before any adjustment
    let busted = players.iter().filter(|p| p.points < 0).count();

    Ok(std::array::from_fn(|seat| {
        let player = &players[seat];
        let breakdown = ScoreBreakdown {
            base: (i128::from(player.points) - i128::from(rules.return_points)) as f64 / 1000.0,
            uma: uma_share[seat],
            oka: if player.points == top { oka_share } else { 0.0 },
            tobi: if danger[seat] {
                rules.tobi_bonus * busted as f64
            } else {
                0.0
            },
            bust: if player.points < 0 {
                -rules.bust_penalty
            } else {
                0.0
            },
        };

        FinalScore {
            id: player.id,
            name: player.name.clone(),
            score: breakdown.total(),
            rank: rank[seat],
            breakdown,
        }
    }))
}

/// Hand out the rank bonus. A run of equal scores starting at sorted index
/// `i` with length `k` shares the mean of `uma[i..i + k]`.
fn allocate_uma(players: &[Player; 4], order: &[usize; 4], uma: &[f64; 4]) -> ([f64; 4], [usize; 4]) {
    let mut share = [0.0; 4];
    let mut rank = [0usize; 4];

    let mut i = 0;
    while i < order.len() {
        let points = players[order[i]].points;
        let mut j = i;
        while j < order.len() && players[order[j]].points == points {
            j += 1;
        }

        let run = &uma[i..j];
        let mean = run.iter().sum::<f64>() / run.len() as f64;
        for &seat in &order[i..j] {
            share[seat] = mean;
            rank[seat] = i + 1;
        }
        i = j;
    }

    (share, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(points: [i64; 4]) -> [Player; 4] {
        std::array::from_fn(|i| Player::new(i as u8 + 1, format!("Player {}", i + 1), points[i]))
    }

    fn scores(result: &[FinalScore; 4]) -> [f64; 4] {
        std::array::from_fn(|i| result[i].score)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_distinct_scores() {
        let result = transform(
            &table([45_000, 30_000, 20_000, 5_000]),
            &[false; 4],
            &RuleConfig::default(),
        )
        .unwrap();

        // 15+30+20, 0+10, -10-10, -25-30
        assert_eq!(scores(&result), [65.0, 10.0, -20.0, -55.0]);
        assert_eq!(
            result.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_tied_middle_ranks_share_uma() {
        let result = transform(
            &table([40_000, 30_000, 30_000, 0]),
            &[false; 4],
            &RuleConfig::default(),
        )
        .unwrap();

        assert_eq!(scores(&result), [60.0, 0.0, 0.0, -60.0]);
        assert_eq!(result[1].breakdown.uma, 0.0);
        assert_eq!(result[1].rank, 2);
        assert_eq!(result[2].rank, 2);
    }

    #[test]
    fn test_all_tied_split_pool() {
        let result = transform(
            &table([25_000; 4]),
            &[false; 4],
            &RuleConfig::default(),
        )
        .unwrap();

        for r in &result {
            assert_eq!(r.breakdown.uma, 0.0);
            assert_eq!(r.breakdown.oka, 5.0);
            assert_eq!(r.score, 0.0); // -5 + 0 + 5
            assert_eq!(r.rank, 1);
        }
    }

    #[test]
    fn test_two_tied_for_top() {
        let result = transform(
            &table([35_000, 35_000, 20_000, 10_000]),
            &[false; 4],
            &RuleConfig::default(),
        )
        .unwrap();

        // 5 + (30+10)/2 + 20/2
        assert_eq!(result[0].score, 35.0);
        assert_eq!(result[1].score, 35.0);
        assert_eq!(result[2].score, -20.0);
        assert_eq!(result[3].score, -50.0);
    }

    #[test]
    fn test_three_tied_for_top_fractional_oka() {
        let result = transform(
            &table([31_000, 31_000, 31_000, 7_000]),
            &[false; 4],
            &RuleConfig::default(),
        )
        .unwrap();

        for r in &result[..3] {
            assert_close(r.breakdown.uma, 10.0);
            assert_close(r.breakdown.oka, 20.0 / 3.0);
        }
        assert_eq!(result[3].breakdown.oka, 0.0);
        assert_eq!(result[3].score, -53.0);
    }

    #[test]
    fn test_order_follows_seats_not_ranks() {
        let players = table([5_000, 20_000, 45_000, 30_000]);
        let result = transform(&players, &[false; 4], &RuleConfig::default()).unwrap();

        assert_eq!(scores(&result), [-55.0, -20.0, 65.0, 10.0]);
        for (input, output) in players.iter().zip(result.iter()) {
            assert_eq!(input.id, output.id);
            assert_eq!(input.name, output.name);
        }
    }

    #[test]
    fn test_bust_penalty_and_danger_bonus() {
        // Seat 1 busted seat 4
        let result = transform(
            &table([60_000, 25_000, 16_000, -1_000]),
            &[true, false, false, false],
            &RuleConfig::default(),
        )
        .unwrap();

        // 30 + 30 + 20 + 10 * 1
        assert_eq!(result[0].score, 90.0);
        assert_eq!(result[0].breakdown.tobi, 10.0);
        // -31 - 30 - 10
        assert_eq!(result[3].score, -71.0);
        assert_eq!(result[3].breakdown.bust, -10.0);
        // Bonus and penalty cancel out across the table
        let sum: f64 = scores(&result).iter().sum();
        assert_eq!(sum, 0.0);
    }

    #[test]
    fn test_danger_bonus_counts_every_busted_player() {
        let result = transform(
            &table([110_000, 2_000, -5_000, -7_000]),
            &[true, false, false, false],
            &RuleConfig::default(),
        )
        .unwrap();

        assert_eq!(result[0].breakdown.tobi, 20.0);
        assert_eq!(result[2].breakdown.bust, -10.0);
        assert_eq!(result[3].breakdown.bust, -10.0);
    }

    #[test]
    fn test_danger_flag_without_busts_adds_nothing() {
        let result = transform(
            &table([40_000, 30_000, 30_000, 0]),
            &[false, true, false, false],
            &RuleConfig::default(),
        )
        .unwrap();

        // Zero is not negative
        assert_eq!(result[1].breakdown.tobi, 0.0);
        assert_eq!(result[3].breakdown.bust, 0.0);
    }

    #[test]
    fn test_sum_is_zero_without_busts() {
        let cases = [
            [25_000, 25_000, 25_000, 25_000],
            [48_100, 27_300, 15_600, 9_000],
            [33_300, 33_300, 33_400, 0],
            [100_000, 0, 0, 0],
        ];
        for points in cases {
            let result = transform(&table(points), &[false; 4], &RuleConfig::default()).unwrap();
            let sum: f64 = scores(&result).iter().sum();
            assert_close(sum, 0.0);
        }
    }

    #[test]
    fn test_huge_points_cannot_wrap_into_valid_total() {
        let points = [i64::MAX, i64::MAX, 100_002, 0];
        let err = transform(&table(points), &[false; 4], &RuleConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ScoreSumMismatch {
                actual: 2 * i128::from(i64::MAX) + 100_002,
                expected: 100_000
            }
        );
    }

    #[test]
    fn test_extreme_points_that_balance_are_scored() {
        // Sums to 100000 without any intermediate i64 overflow in the base term
        let points = [i64::MAX, i64::MIN + 1, 100_000, 0];
        let result = transform(&table(points), &[false; 4], &RuleConfig::default()).unwrap();
        assert_eq!(result[0].rank, 1);
        assert_eq!(result[1].rank, 4);
        assert!(result[1].breakdown.base < 0.0);
    }

    #[test]
    fn test_sum_mismatch_rejected() {
        for points in [[25_000, 25_000, 25_000, 24_999], [25_000, 25_000, 25_000, 25_001]] {
            let players = table(points);
            let before = players.clone();
            let err = transform(&players, &[false; 4], &RuleConfig::default()).unwrap_err();
            let expected: i128 = points.iter().map(|&p| i128::from(p)).sum();
            assert_eq!(
                err,
                ValidationError::ScoreSumMismatch {
                    actual: expected,
                    expected: 100_000
                }
            );
            assert_eq!(players, before);
        }
    }

    #[test]
    fn test_deterministic() {
        let players = table([32_100, 32_100, 18_800, 17_000]);
        let danger = [false, false, true, false];
        let rules = RuleConfig::default();
        assert_eq!(
            transform(&players, &danger, &rules).unwrap(),
            transform(&players, &danger, &rules).unwrap()
        );
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleConfig {
            uma: [20.0, 10.0, -10.0, -20.0],
            oka: 0.0,
            return_points: 25_000,
            ..RuleConfig::default()
        };
        let result = transform(&table([40_000, 30_000, 20_000, 10_000]), &[false; 4], &rules).unwrap();
        assert_eq!(scores(&result), [35.0, 15.0, -15.0, -35.0]);
    }
}
