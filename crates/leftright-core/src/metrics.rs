//! Speed and accuracy figures for a finished (or in-progress) run.
//!
//! All times are milliseconds on the same wall clock as the recorded
//! keystroke timestamps.

use crate::layouts::{Hand, KeyboardLayout};
use serde::Serialize;

/// Standard typing-test convention.
pub const CHARS_PER_WORD: f64 = 5.0;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Balanced ratios fall within this many percent of the reference.
pub const BALANCE_TOLERANCE_PERCENT: f64 = 10.0;

/// Per-hand keystroke counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HandStats {
    pub correct: u32,
    pub total: u32,
}

impl HandStats {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (100.0 * self.correct as f64 / self.total as f64).round() as u32
    }
}

/// Words per minute for one hand.
///
/// Each keystroke of `hand` is charged the time since the previous keystroke
/// of *any* hand (or since `start_ms` for index 0). Only indices that were
/// actually typed (`timestamps.len()`) are considered.
pub fn hand_wpm(
    target: &[char],
    timestamps: &[u64],
    start_ms: u64,
    layout: &KeyboardLayout,
    hand: Hand,
) -> u32 {
    let typed = timestamps.len().min(target.len());

    let mut selected = 0usize;
    let mut total_ms = 0u64;
    for (i, &c) in target[..typed].iter().enumerate() {
        if layout.classify(c) != hand {
            continue;
        }
        let prev = if i == 0 { start_ms } else { timestamps[i - 1] };
        total_ms += timestamps[i].saturating_sub(prev);
        selected += 1;
    }

    if selected == 0 || total_ms == 0 {
        return 0;
    }

    let words = selected as f64 / CHARS_PER_WORD;
    let minutes = total_ms as f64 / MS_PER_MINUTE;
    (words / minutes).round() as u32
}

/// Whole-run WPM, counting whitespace-separated words of the final input.
pub fn overall_wpm(input: &str, start_ms: u64, end_ms: u64) -> u32 {
    let elapsed = end_ms.saturating_sub(start_ms);
    if elapsed == 0 {
        return 0;
    }
    let words = input.split_whitespace().count() as f64;
    (words / (elapsed as f64 / MS_PER_MINUTE)).round() as u32
}

/// Percentage of typed characters matching the target at the same position.
pub fn accuracy(input: &[char], target: &[char]) -> u32 {
    if input.is_empty() {
        return 100;
    }
    let correct = input
        .iter()
        .zip(target.iter())
        .filter(|(a, b)| a == b)
        .count();
    (100.0 * correct as f64 / input.len() as f64).round() as u32
}

/// `right / left`, or `None` when either hand has no measurable speed.
pub fn hand_ratio(left_wpm: u32, right_wpm: u32) -> Option<f64> {
    if left_wpm == 0 || right_wpm == 0 {
        return None;
    }
    Some(right_wpm as f64 / left_wpm as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    Community,
    Research,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRatio {
    pub value: f64,
    pub source: ReferenceSource,
}

impl ReferenceRatio {
    pub fn research() -> Self {
        Self {
            value: leftright_protocol::DEFAULT_RATIO,
            source: ReferenceSource::Research,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceVerdict {
    Typical,
    RightFaster,
    LeftFaster,
}

/// Compares a user's ratio with a reference ratio.
pub fn assess_balance(user_ratio: f64, reference: ReferenceRatio) -> BalanceVerdict {
    let percent_of_average = user_ratio / reference.value * 100.0;

    if (percent_of_average - 100.0).abs() < BALANCE_TOLERANCE_PERCENT {
        BalanceVerdict::Typical
    } else if user_ratio > reference.value {
        BalanceVerdict::RightFaster
    } else {
        BalanceVerdict::LeftFaster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_cd() -> (KeyboardLayout, Vec<char>) {
        (
            KeyboardLayout::new("t", "T", "ab", "cd"),
            "ab cd".chars().collect(),
        )
    }

    #[test]
    fn test_reference_example() {
        let (layout, text) = ab_cd();
        let ts = [100, 250, 400, 700, 900];
        assert_eq!(hand_wpm(&text, &ts, 0, &layout, Hand::Left), 96);
        assert_eq!(hand_wpm(&text, &ts, 0, &layout, Hand::Right), 48);
    }

    #[test]
    fn test_dwell_counts_from_any_hand() {
        // 'c' at index 3 is charged from the space at index 2, not from 'b'.
        let (layout, text) = ab_cd();
        let ts = [100, 200, 10_000, 10_100, 10_200];
        assert_eq!(hand_wpm(&text, &ts, 0, &layout, Hand::Right), 120);
    }

    #[test]
    fn test_only_typed_prefix_counts() {
        let (layout, text) = ab_cd();
        assert_eq!(hand_wpm(&text, &[100, 250], 0, &layout, Hand::Right), 0);
        assert_eq!(hand_wpm(&text, &[100, 250], 0, &layout, Hand::Left), 96);
    }

    #[test]
    fn test_zero_elapsed_is_zero_wpm() {
        let (layout, text) = ab_cd();
        assert_eq!(hand_wpm(&text, &[0, 0], 0, &layout, Hand::Left), 0);
    }

    #[test]
    fn test_accuracy_helo_help() {
        let input: Vec<char> = "helo".chars().collect();
        let target: Vec<char> = "help".chars().collect();
        assert_eq!(accuracy(&input, &target), 75);
        assert_eq!(accuracy(&[], &target), 100);
    }

    #[test]
    fn test_hand_accuracy_defaults_to_100() {
        assert_eq!(HandStats::default().accuracy(), 100);
        let s = HandStats {
            correct: 2,
            total: 3,
        };
        assert_eq!(s.accuracy(), 67);
    }

    #[test]
    fn test_overall_wpm_counts_words() {
        // 3 words in 30 seconds.
        assert_eq!(overall_wpm("  one two  three ", 1_000, 31_000), 6);
        assert_eq!(overall_wpm("one", 5, 5), 0);
    }

    #[test]
    fn test_ratio_requires_both_hands() {
        assert_eq!(hand_ratio(0, 40), None);
        assert_eq!(hand_ratio(40, 0), None);
        assert_eq!(hand_ratio(40, 50), Some(1.25));
    }

    #[test]
    fn test_balance_verdicts() {
        let r = ReferenceRatio::research();
        assert_eq!(assess_balance(1.05, r), BalanceVerdict::Typical);
        assert_eq!(assess_balance(1.10, r), BalanceVerdict::Typical);
        assert_eq!(assess_balance(1.30, r), BalanceVerdict::RightFaster);
        assert_eq!(assess_balance(0.80, r), BalanceVerdict::LeftFaster);
    }
}
