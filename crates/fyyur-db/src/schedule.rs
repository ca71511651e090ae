//! Splitting shows into past and upcoming.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::entities::show;

/// Anything with a start time that can be placed on the schedule.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<FixedOffset>;
}

impl Scheduled for show::Model {
    fn start_time(&self) -> DateTime<FixedOffset> {
        self.start_time
    }
}

/// Shows on either side of a reference instant, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowBuckets<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> ShowBuckets<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

impl<T> Default for ShowBuckets<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// Partition `items` around `now`.
///
/// Strictly earlier is past, strictly later is upcoming. An item starting
/// exactly at `now` lands in neither bucket.
pub fn classify<T, I>(items: I, now: DateTime<FixedOffset>) -> ShowBuckets<T>
where
    T: Scheduled,
    I: IntoIterator<Item = T>,
{
    let mut buckets = ShowBuckets::default();
    for item in items {
        let start = item.start_time();
        if start < now {
            buckets.past.push(item);
        } else if start > now {
            buckets.upcoming.push(item);
        }
    }
    buckets
}

/// The reference instant used by the directory queries.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
