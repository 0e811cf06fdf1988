#![cfg(feature = "std")]
//! Short-lived user-facing messages.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::NOTICE_LIFETIME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message that disappears after a fixed lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
    lifetime: Duration,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>, posted_at: Instant) -> Self {
        Self {
            kind,
            text: text.into(),
            posted_at,
            lifetime: NOTICE_LIFETIME,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text, Instant::now())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text, Instant::now())
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.lifetime
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.text)
    }
}
