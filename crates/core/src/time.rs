use chrono::{DateTime, Utc};

/// Source of the start/completion stamps on a session summary.
///
/// The per-question countdown runs on the async timer, not on this clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Always reports the same instant, so summaries are reproducible.
    Pinned(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self::Pinned(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Pinned(at) => *at,
        }
    }
}

/// Seconds since the epoch used by [`pinned_now`] (2023-11-14T22:13:20Z).
pub const PINNED_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if [`PINNED_TIMESTAMP`] is out of chrono's range.
#[must_use]
pub fn pinned_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(PINNED_TIMESTAMP, 0).expect("pinned timestamp is in range")
}

#[must_use]
pub fn pinned_clock() -> Clock {
    Clock::pinned(pinned_now())
}
