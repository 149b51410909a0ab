use crate::metrics::{ReferenceRatio, ReferenceSource};
use leftright_protocol::RatioResponse;
use serde::Serialize;

/// Community aggregate for one layout as last reported by the hive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommunityStat {
    pub count: u64,
    pub average: f64,
}

impl From<RatioResponse> for CommunityStat {
    fn from(r: RatioResponse) -> Self {
        Self {
            count: r.count,
            average: r.average,
        }
    }
}

/// Issued when a finished run has a ratio worth submitting.
/// The generation ties the eventual response to the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTicket {
    pub generation: u64,
    pub layout: String,
    pub ratio: f64,
}

/// What the caller currently displays as the community comparison.
#[derive(Debug, Clone, Default)]
pub struct CommunityView {
    generation: u64,
    stat: Option<CommunityStat>,
    pending: bool,
}

impl CommunityView {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stat(&self) -> Option<CommunityStat> {
        self.stat
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drops displayed state and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.stat = None;
        self.pending = false;
    }

    pub fn begin(&mut self, layout: &str, ratio: f64) -> SubmissionTicket {
        self.pending = true;
        SubmissionTicket {
            generation: self.generation,
            layout: layout.to_string(),
            ratio,
        }
    }

    /// Applies a response. Stale tickets are ignored and leave the view untouched.
    pub fn resolve(&mut self, ticket: &SubmissionTicket, stat: Option<CommunityStat>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.pending = false;
        self.stat = stat;
        true
    }

    pub fn reference(&self) -> ReferenceRatio {
        match self.stat {
            Some(s) if s.average.is_finite() && s.average > 0.0 => ReferenceRatio {
                value: s.average,
                source: ReferenceSource::Community,
            },
            _ => ReferenceRatio::research(),
        }
    }
}
