use crate::error::{LeftRightError, LrResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionMode {
    /// Finishes when the whole text has been typed.
    Words,
    /// Finishes when the deadline passes (or the text runs out).
    Timed,
}

/// Which kind of text the run uses. Only mixed text says anything about
/// the community-wide hand ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextFocus {
    Mixed,
    LeftHand,
    RightHand,
}

impl TextFocus {
    pub fn tracks_community(&self) -> bool {
        matches!(self, Self::Mixed)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    #[arg(long, default_value_t = SessionMode::Words)]
    pub mode: SessionMode,

    /// Only used in timed mode.
    #[arg(long, default_value_t = 30)]
    pub duration_secs: u64,

    /// Wrong characters accepted in a row before further wrong ones are dropped.
    #[arg(long, default_value_t = 5)]
    pub max_consecutive_errors: usize,

    #[arg(long, default_value_t = TextFocus::Mixed)]
    pub focus: TextFocus,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::Words,
            duration_secs: 30,
            max_consecutive_errors: 5,
            focus: TextFocus::Mixed,
        }
    }
}

impl SessionConfig {
    pub fn timed(duration_secs: u64) -> Self {
        Self {
            mode: SessionMode::Timed,
            duration_secs,
            ..Default::default()
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self.mode {
            SessionMode::Timed => Some(Duration::from_secs(self.duration_secs)),
            SessionMode::Words => None,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LrResult<Self> {
        let content = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> LrResult<()> {
        if self.mode == SessionMode::Timed && self.duration_secs == 0 {
            return Err(LeftRightError::Config(
                "timed mode needs a non-zero duration".into(),
            ));
        }
        if self.max_consecutive_errors == 0 {
            return Err(LeftRightError::Config(
                "max_consecutive_errors must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
