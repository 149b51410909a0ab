//! The hand-timing analyzer: one typing run against a fixed target text.
//!
//! A session is driven synchronously, one keystroke at a time, with the
//! caller supplying the wall-clock timestamp of each event. The timestamp log
//! is an append-only vector indexed by text position.

use crate::community::{CommunityStat, CommunityView, SubmissionTicket};
use crate::config::SessionConfig;
use crate::layouts::{Hand, KeyboardLayout, TextDistribution};
use crate::metrics::{self, HandStats};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// Too many wrong characters in a row at the tail of the input.
    ErrorStreak,
    /// The run is over (text complete or deadline passed).
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keystroke {
    pub index: usize,
    pub hand: Hand,
    pub correct: bool,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeystrokeOutcome {
    Accepted(Keystroke),
    Rejected(RejectReason),
}

impl KeystrokeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandReport {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub layout: String,
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_ms: u64,
    pub left: HandReport,
    pub right: HandReport,
    /// `right.wpm / left.wpm`, absent when either hand measured zero.
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct TypingSession {
    layout: KeyboardLayout,
    config: SessionConfig,
    target: Vec<char>,
    input: Vec<char>,
    timestamps: Vec<u64>,
    left: HandStats,
    right: HandStats,
    start_ms: Option<u64>,
    end_ms: Option<u64>,
    community: CommunityView,
}

impl TypingSession {
    pub fn new(layout: KeyboardLayout, text: &str, config: SessionConfig) -> Self {
        Self {
            layout,
            config,
            target: text.chars().collect(),
            input: Vec::new(),
            timestamps: Vec::new(),
            left: HandStats::default(),
            right: HandStats::default(),
            start_ms: None,
            end_ms: None,
            community: CommunityView::default(),
        }
    }

    /// Pins the start time. Without it the first keystroke starts the clock.
    pub fn start_at(&mut self, ms: u64) {
        if self.start_ms.is_none() {
            self.start_ms = Some(ms);
        }
    }

    pub fn type_char(&mut self, ch: char, at_ms: u64) -> KeystrokeOutcome {
        if self.tick(at_ms) {
            return KeystrokeOutcome::Rejected(RejectReason::Finished);
        }

        let index = self.input.len();
        let Some(&expected) = self.target.get(index) else {
            return KeystrokeOutcome::Rejected(RejectReason::Finished);
        };

        let correct = ch == expected;
        if !correct && self.error_streak() >= self.config.max_consecutive_errors {
            debug!("Dropped {:?} at {}: error streak", ch, index);
            return KeystrokeOutcome::Rejected(RejectReason::ErrorStreak);
        }

        let start = *self.start_ms.get_or_insert(at_ms);
        let floor = self.timestamps.last().copied().unwrap_or(start);
        let at_ms = at_ms.max(floor);

        let hand = self.layout.classify(expected);
        self.timestamps.push(at_ms);
        match hand {
            Hand::Left => self.left.record(correct),
            Hand::Right => self.right.record(correct),
            Hand::Neutral => {}
        }
        self.input.push(ch);

        let finished = self.input.len() == self.target.len();
        if finished {
            self.finish(at_ms);
        }

        KeystrokeOutcome::Accepted(Keystroke {
            index,
            hand,
            correct,
            finished,
        })
    }

    /// Removes the last typed character and its timestamp.
    /// Hand statistics count keystrokes and are left as they are.
    pub fn backspace(&mut self) -> bool {
        if self.is_finished() || self.input.pop().is_none() {
            return false;
        }
        self.timestamps.truncate(self.input.len());
        true
    }

    /// Checks the timed-mode deadline. Returns whether the run is finished.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.is_finished() {
            return true;
        }
        if let (Some(duration), Some(start)) = (self.config.duration(), self.start_ms) {
            let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
            let deadline = start.saturating_add(millis);
            if now_ms >= deadline {
                self.finish(deadline);
            }
        }
        self.is_finished()
    }

    fn finish(&mut self, end_ms: u64) {
        self.end_ms = Some(end_ms);
        info!(
            "Run finished on {} after {} characters",
            self.layout.id,
            self.input.len()
        );
    }

    /// Wrong characters at the tail of the input.
    fn error_streak(&self) -> usize {
        self.input
            .iter()
            .zip(self.target.iter())
            .rev()
            .take_while(|(typed, expected)| typed != expected)
            .count()
    }

    pub fn hand_wpm(&self, hand: Hand) -> u32 {
        match (self.start_ms, self.end_ms) {
            (Some(start), Some(_)) if !self.timestamps.is_empty() => {
                metrics::hand_wpm(&self.target, &self.timestamps, start, &self.layout, hand)
            }
            _ => 0,
        }
    }

    pub fn report(&self) -> Option<SessionReport> {
        let start = self.start_ms?;
        let end = self.end_ms?;
        if self.timestamps.is_empty() {
            return None;
        }

        let left_wpm = self.hand_wpm(Hand::Left);
        let right_wpm = self.hand_wpm(Hand::Right);
        let input: String = self.input.iter().collect();

        Some(SessionReport {
            layout: self.layout.id.clone(),
            wpm: metrics::overall_wpm(&input, start, end),
            accuracy: metrics::accuracy(&self.input, &self.target),
            elapsed_ms: end.saturating_sub(start),
            left: HandReport {
                wpm: left_wpm,
                accuracy: self.left.accuracy(),
                correct: self.left.correct,
                total: self.left.total,
            },
            right: HandReport {
                wpm: right_wpm,
                accuracy: self.right.accuracy(),
                correct: self.right.correct,
                total: self.right.total,
            },
            ratio: metrics::hand_ratio(left_wpm, right_wpm),
        })
    }

    /// A ticket for submitting this run's ratio, if it has one worth sending.
    pub fn submission_ticket(&mut self) -> Option<SubmissionTicket> {
        if !self.config.focus.tracks_community() {
            return None;
        }
        let ratio = self.report()?.ratio?;
        Some(self.community.begin(&self.layout.id, ratio))
    }

    /// Applies the hive's answer unless the run has been reset since.
    pub fn apply_community(
        &mut self,
        ticket: &SubmissionTicket,
        stat: Option<CommunityStat>,
    ) -> bool {
        let applied = self.community.resolve(ticket, stat);
        if !applied {
            debug!(
                "Ignoring stale community response (generation {} != {})",
                ticket.generation,
                self.community.generation()
            );
        }
        applied
    }

    /// Discards the run, keeping layout, text and configuration.
    pub fn reset(&mut self) {
        self.input.clear();
        self.timestamps.clear();
        self.left = HandStats::default();
        self.right = HandStats::default();
        self.start_ms = None;
        self.end_ms = None;
        self.community.reset();
    }

    pub fn replace_text(&mut self, text: &str) {
        self.reset();
        self.target = text.chars().collect();
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.end_ms.is_some()
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    pub fn hand_stats(&self, hand: Hand) -> HandStats {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
            Hand::Neutral => HandStats::default(),
        }
    }

    pub fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }

    pub fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn community(&self) -> &CommunityView {
        &self.community
    }

    pub fn distribution(&self) -> TextDistribution {
        self.layout.distribution(&self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str) -> TypingSession {
        let layout = KeyboardLayout::new("t", "T", "ab", "cd");
        TypingSession::new(layout, text, SessionConfig::default())
    }

    #[test]
    fn test_first_keystroke_starts_clock() {
        let mut s = session("ab");
        assert!(!s.is_started());
        s.type_char('a', 500);
        assert_eq!(s.start_ms(), Some(500));
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut s = session("abc");
        s.type_char('a', 500);
        s.type_char('b', 400);
        assert_eq!(s.timestamps(), &[500, 500]);
    }

    #[test]
    fn test_backspace_truncates_timestamps_only() {
        let mut s = session("abc");
        s.type_char('a', 100);
        s.type_char('x', 200);
        assert!(s.backspace());
        assert_eq!(s.input(), "a");
        assert_eq!(s.timestamps(), &[100]);
        assert_eq!(s.hand_stats(Hand::Left).total, 2);
        assert_eq!(s.hand_stats(Hand::Left).correct, 1);
    }

    #[test]
    fn test_neutral_consumes_slot_without_stats() {
        let mut s = session("a c");
        s.type_char('a', 100);
        s.type_char(' ', 200);
        assert_eq!(s.timestamps().len(), 2);
        assert_eq!(s.hand_stats(Hand::Left).total, 1);
        assert_eq!(s.hand_stats(Hand::Right).total, 0);
    }

    #[test]
    fn test_no_typing_after_finish() {
        let mut s = session("a");
        assert!(s.type_char('a', 10).is_accepted());
        assert!(s.is_finished());
        assert_eq!(
            s.type_char('a', 20),
            KeystrokeOutcome::Rejected(RejectReason::Finished)
        );
        assert!(!s.backspace());
    }
}
