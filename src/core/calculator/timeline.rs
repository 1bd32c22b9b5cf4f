//! Builds the effective working spans of a day from its raw stamps.
//!
//! Travel offsets are always derived from the full, untouched stamp list:
//! the first arrival is moved earlier and the last departure later by the
//! configured offset. Opening a new block therefore silently removes the
//! offset the previous departure carried, without any bookkeeping.

use crate::models::stamp::StampSequence;
use chrono::{NaiveTime, Timelike};

/// Working span in minutes since midnight. `start` can be negative when the
/// travel offset reaches back before 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i64,
    pub end: i64,
    /// End is the provisional "now", not a real clock-out.
    pub provisional: bool,
}

impl Span {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).max(0)
    }
}

/// Break between two consecutive blocks (raw times, no offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

#[derive(Debug, Default, Clone)]
pub struct Timeline {
    pub spans: Vec<Span>,
    pub gaps: Vec<Gap>,
    pub raw_minutes: i64,
    pub provisional: bool,
}

pub(crate) fn minute_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Effective spans of `stamps`.
///
/// - `offset_minutes` is 0 for days without travel (home office).
/// - `now`: when given, an open last block is closed provisionally at this
///   time and receives no departure offset. A block whose arrival is still
///   ahead of `now` contributes nothing.
///   Without it, an open block contributes nothing.
pub fn build_timeline(
    stamps: &StampSequence,
    offset_minutes: i64,
    now: Option<NaiveTime>,
) -> Timeline {
    let blocks = stamps.blocks();
    if blocks.is_empty() {
        return Timeline::default();
    }

    let last_idx = blocks.len() - 1;
    let mut spans = Vec::with_capacity(blocks.len());
    let mut provisional = false;

    for (idx, block) in blocks.iter().enumerate() {
        let mut start = minute_of_day(block.arrival);
        if idx == 0 {
            start -= offset_minutes;
        }

        let end = match (block.departure, now) {
            (Some(dep), _) => {
                let mut end = minute_of_day(dep);
                if idx == last_idx {
                    end += offset_minutes;
                }
                end
            }
            (None, Some(now)) => {
                provisional = true;
                // not started yet: no span, and no offset either
                if now <= block.arrival {
                    continue;
                }
                minute_of_day(now)
            }
            (None, None) => continue,
        };

        spans.push(Span {
            start,
            end,
            provisional: block.departure.is_none(),
        });
    }

    // -----------------------------
    // Gaps between blocks
    // -----------------------------
    let mut gaps = Vec::new();
    for w in blocks.windows(2) {
        if let Some(out1) = w[0].departure {
            let in2 = w[1].arrival;
            if in2 > out1 {
                gaps.push(Gap {
                    start: out1,
                    end: in2,
                    duration_minutes: minute_of_day(in2) - minute_of_day(out1),
                });
            }
        }
    }

    let raw_minutes = spans.iter().map(Span::minutes).sum();

    Timeline {
        spans,
        gaps,
        raw_minutes,
        provisional,
    }
}
