//! Score calculation.
//!
//! `score = foundation_cards * 10 + max(0, 500 - elapsed / 10) - moves / 2`,
//! floored at zero (integer division throughout).

/// Points per card on a foundation.
pub const FOUNDATION_CARD_POINTS: u32 = 10;

/// Time bonus at zero elapsed seconds; one point is lost every ten seconds.
pub const MAX_TIME_BONUS: u32 = 500;

/// Stateless score formula.
pub struct ScoreCalculator;

impl ScoreCalculator {
    #[must_use]
    pub fn calculate(move_count: u32, elapsed_secs: u64, foundation_cards: u32) -> u32 {
        let time_bonus = u64::from(MAX_TIME_BONUS).saturating_sub(elapsed_secs / 10);
        let gross = u64::from(foundation_cards) * u64::from(FOUNDATION_CARD_POINTS) + time_bonus;
        let penalty = u64::from(move_count / 2);
        // gross <= 52 * 10 + 500, so the result always fits.
        gross.saturating_sub(penalty) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_game() {
        assert_eq!(ScoreCalculator::calculate(0, 0, 0), 500);
    }

    #[test]
    fn test_time_bonus_decays_and_floors() {
        assert_eq!(ScoreCalculator::calculate(0, 9, 0), 500);
        assert_eq!(ScoreCalculator::calculate(0, 10, 0), 499);
        assert_eq!(ScoreCalculator::calculate(0, 5_000, 0), 0);
        assert_eq!(ScoreCalculator::calculate(0, 1_000_000, 3), 30);
    }

    #[test]
    fn test_move_penalty() {
        assert_eq!(ScoreCalculator::calculate(1, 0, 0), 500);
        assert_eq!(ScoreCalculator::calculate(3, 0, 0), 499);
        assert_eq!(ScoreCalculator::calculate(100, 0, 52), 520 + 500 - 50);
    }

    #[test]
    fn test_floored_at_zero() {
        assert_eq!(ScoreCalculator::calculate(10_000, 100_000, 1), 0);
    }
}
