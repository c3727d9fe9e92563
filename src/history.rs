//! Bounded undo/redo history over board snapshots.
//!
//! `commit` is the only sanctioned way to advance the persisted board. The
//! one exception is [`History::present_mut`], used by the gesture engine for
//! per-frame drag updates that are folded into a single commit on release.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::HISTORY_LIMIT;
use crate::doc::{RetiredGroup, Snapshot};

/// Undo/redo stacks around the current board.
///
/// `past` is ordered oldest first; `future` is ordered next-to-redo first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    past: VecDeque<Snapshot>,
    present: Snapshot,
    future: VecDeque<Snapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history retaining at most `limit` past snapshots (at least one).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: Snapshot::default(),
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Rebuild a history from raw parts, truncating `past` to its newest `limit` entries.
    #[must_use]
    pub fn from_parts(past: Vec<Snapshot>, present: Snapshot, future: Vec<Snapshot>, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        history.past = past.into();
        history.trim_past();
        history.present = present;
        history.future = future.into();
        history
    }

    /// A history holding only `present`, as written by degraded persistence.
    #[must_use]
    pub fn present_only(&self) -> Self {
        Self {
            past: VecDeque::new(),
            present: self.present.clone(),
            future: VecDeque::new(),
            limit: self.limit,
        }
    }

    /// Record `next` as the new present. Clears the redo stack.
    pub fn commit(&mut self, next: Snapshot) {
        let prev = std::mem::replace(&mut self.present, next);
        self.past.push_back(prev);
        self.trim_past();
        self.future.clear();
    }

    /// Step back one snapshot. Returns false (and does nothing) when `past` is empty.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, prev);
        self.future.push_front(current);
        true
    }

    /// Step forward one snapshot. Returns false (and does nothing) when `future` is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        self.trim_past();
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    /// Uncommitted access to the present snapshot. Changes made here are not
    /// recorded as a history step until the next `commit`.
    pub fn present_mut(&mut self) -> &mut Snapshot {
        &mut self.present
    }

    pub fn past(&self) -> impl ExactSizeIterator<Item = &Snapshot> {
        self.past.iter()
    }

    pub fn future(&self) -> impl ExactSizeIterator<Item = &Snapshot> {
        self.future.iter()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Every snapshot held, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter().chain(std::iter::once(&self.present)).chain(self.future.iter())
    }

    /// Every snapshot held, oldest first, for whole-history maintenance passes.
    pub fn snapshots_mut(&mut self) -> impl Iterator<Item = &mut Snapshot> {
        self.past
            .iter_mut()
            .chain(std::iter::once(&mut self.present))
            .chain(self.future.iter_mut())
    }

    fn trim_past(&mut self) {
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

/// Borrowed `{past, present, future, retired}` view used when encoding.
#[derive(Serialize)]
pub(crate) struct HistoryRecordRef<'a> {
    past: &'a VecDeque<Snapshot>,
    present: &'a Snapshot,
    future: &'a VecDeque<Snapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    retired: Vec<RetiredRef<'a>>,
}

/// Retired-group marker of the snapshot at position `at`, counting
/// `past`, then `present`, then `future`.
#[derive(Serialize)]
struct RetiredRef<'a> {
    at: usize,
    #[serde(flatten)]
    marker: &'a RetiredGroup,
}

/// Owned `{past, present, future, retired}` record used when decoding.
/// Records written without `retired` load with no markers.
#[derive(Deserialize)]
pub(crate) struct HistoryRecord {
    #[serde(default)]
    past: Vec<Snapshot>,
    #[serde(default)]
    present: Snapshot,
    #[serde(default)]
    future: Vec<Snapshot>,
    #[serde(default)]
    retired: Vec<RetiredEntry>,
}

#[derive(Deserialize)]
struct RetiredEntry {
    at: usize,
    #[serde(flatten)]
    marker: RetiredGroup,
}

impl History {
    pub(crate) fn record(&self) -> HistoryRecordRef<'_> {
        let retired = self
            .snapshots()
            .enumerate()
            .filter_map(|(at, s)| s.retired().map(|marker| RetiredRef { at, marker }))
            .collect();
        HistoryRecordRef { past: &self.past, present: &self.present, future: &self.future, retired }
    }

    pub(crate) fn from_record(record: HistoryRecord, limit: usize) -> Self {
        let HistoryRecord { mut past, mut present, mut future, retired } = record;
        let past_len = past.len();
        for RetiredEntry { at, marker } in retired {
            let slot = match at.checked_sub(past_len) {
                None => past.get_mut(at),
                Some(0) => Some(&mut present),
                Some(n) => future.get_mut(n - 1),
            };
            match slot {
                Some(snapshot) => *snapshot = std::mem::take(snapshot).retiring(marker),
                None => warn!(at, "retired-group marker points past the end of history, dropped"),
            }
        }
        Self::from_parts(past, present, future, limit)
    }
}
