#![allow(dead_code)]

use leftright_core::config::SessionConfig;
use leftright_core::layouts::KeyboardLayout;
use leftright_core::session::{KeystrokeOutcome, TypingSession};

/// `a`,`b` on the left hand, `c`,`d` on the right.
pub fn abcd_layout() -> KeyboardLayout {
    KeyboardLayout::new("abcd", "ABCD", "ab", "cd")
}

pub fn session(text: &str) -> TypingSession {
    TypingSession::new(abcd_layout(), text, SessionConfig::default())
}

/// Types `keys` with one timestamp per key.
pub fn type_all(s: &mut TypingSession, keys: &str, times: &[u64]) -> Vec<KeystrokeOutcome> {
    assert_eq!(keys.chars().count(), times.len(), "one timestamp per key");
    keys.chars()
        .zip(times.iter())
        .map(|(c, &t)| s.type_char(c, t))
        .collect()
}
