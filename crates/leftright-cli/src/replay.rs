//! Recorded keystroke logs and how they are fed back through a session.

use leftright_core::error::{LeftRightError, LrResult};
use leftright_core::session::{KeystrokeOutcome, RejectReason, TypingSession};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const BACKSPACE: &str = "Backspace";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    /// A single printable character, or `Backspace`.
    pub key: String,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Type(char),
    Backspace,
    Ignore,
}

impl KeyRecord {
    pub fn action(&self) -> KeyAction {
        if self.key == BACKSPACE {
            return KeyAction::Backspace;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyAction::Type(c),
            _ => KeyAction::Ignore,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystrokeLog {
    pub layout: String,
    pub text: String,
    /// When the run was started; defaults to the first keystroke.
    #[serde(default)]
    pub start_ms: Option<u64>,
    /// Last observed time, used to close timed runs.
    #[serde(default)]
    pub end_ms: Option<u64>,
    pub keystrokes: Vec<KeyRecord>,
}

impl KeystrokeLog {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LrResult<Self> {
        let content = fs::read_to_string(&path)?;
        let log: Self = serde_json::from_str(&content)?;
        if log.text.is_empty() {
            return Err(LeftRightError::Validation(format!(
                "{:?} has an empty target text",
                path.as_ref()
            )));
        }
        info!(
            "Loaded {} keystrokes for '{}' from {:?}",
            log.keystrokes.len(),
            log.layout,
            path.as_ref()
        );
        Ok(log)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub accepted: usize,
    pub dropped_errors: usize,
    pub after_finish: usize,
    pub ignored: usize,
    pub backspaces: usize,
}

pub fn replay(log: &KeystrokeLog, session: &mut TypingSession) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    if let Some(start) = log.start_ms {
        session.start_at(start);
    }

    for record in &log.keystrokes {
        match record.action() {
            KeyAction::Type(c) => match session.type_char(c, record.at_ms) {
                KeystrokeOutcome::Accepted(_) => summary.accepted += 1,
                KeystrokeOutcome::Rejected(RejectReason::ErrorStreak) => {
                    summary.dropped_errors += 1
                }
                KeystrokeOutcome::Rejected(RejectReason::Finished) => summary.after_finish += 1,
            },
            KeyAction::Backspace => {
                if session.backspace() {
                    summary.backspaces += 1;
                }
            }
            KeyAction::Ignore => {
                debug!("Ignoring non-printable key {:?}", record.key);
                summary.ignored += 1;
            }
        }
    }

    if let Some(end) = log.end_ms {
        session.tick(end);
    }
    summary
}
