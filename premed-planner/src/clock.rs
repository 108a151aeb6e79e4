//! Wall clock and record id generation.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Unique identifier shared by tasks and feedback entries.
pub type RecordId = u64;

/// Source of the current instant and calendar date.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// The calendar date used to decide whether a task is overdue.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Issues strictly increasing ids derived from creation timestamps.
///
/// An id is the creation time in milliseconds unless that value was already
/// issued (or is behind the last issued id), in which case it is bumped to
/// one past the last id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    last: RecordId,
}

impl IdGenerator {
    /// Creates a generator that will never issue an id at or below `last`.
    pub fn starting_after(last: RecordId) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = RecordId::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn last(&self) -> RecordId {
        self.last
    }
}
