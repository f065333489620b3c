//! Fixed-length value history used for the trend lines on the display.

use heapless::Deque;

use crate::reading::{VARIABLE_COUNT, Variable};

/// Value every history slot starts out with.
pub const HISTORY_FILL_VALUE: f64 = 1.0;

/// Sliding window of the last `N` values of one variable, oldest first.
///
/// The buffer always holds exactly `N` entries: it starts filled with
/// [`HISTORY_FILL_VALUE`] and each push drops the oldest value.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<const N: usize> {
    values: Deque<f64, N>,
}

impl<const N: usize> Default for HistoryBuffer<N> {
    fn default() -> Self {
        Self::filled(HISTORY_FILL_VALUE)
    }
}

impl<const N: usize> HistoryBuffer<N> {
    pub fn filled(value: f64) -> Self {
        let mut values = Deque::new();
        while !values.is_full() {
            values.push_back(value).ok();
        }
        Self { values }
    }

    /// Append the newest value, dropping the oldest.
    pub fn push(&mut self, value: f64) {
        if self.values.is_full() {
            self.values.pop_front();
        }
        self.values.push_back(value).ok();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Values from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        self.values.iter().copied()
    }

    /// The newest `count` values, oldest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = f64> + '_ {
        let skip = self.values.len().saturating_sub(count);
        self.values.iter().skip(skip).copied()
    }

    /// Smallest and largest value currently held
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut iter = self.iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// One history buffer per displayed variable.
#[derive(Debug, Clone)]
pub struct Histories<const N: usize> {
    buffers: [HistoryBuffer<N>; VARIABLE_COUNT],
}

impl<const N: usize> Default for Histories<N> {
    fn default() -> Self {
        Self {
            buffers: core::array::from_fn(|_| HistoryBuffer::default()),
        }
    }
}

impl<const N: usize> Histories<N> {
    pub fn get(&self, variable: Variable) -> &HistoryBuffer<N> {
        &self.buffers[variable.index()]
    }

    pub fn push(&mut self, variable: Variable, value: f64) {
        self.buffers[variable.index()].push(value);
    }
}
