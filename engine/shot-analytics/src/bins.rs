//! # Rink Binning
//!
//! Fixed-width partition of the attacking half of the rink.
//!
//! Edges are built as `start, start + size, ...` up to the first edge at or past
//! the axis end, so x starts at 0 and y at -45 for every bin size. Bins are
//! left-closed and right-open, except the last bin of an axis which is closed on
//! both ends. A coordinate beyond the outer edges gets no bin.

use crate::coords::NormalizedEvent;
use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const X_START: i64 = 0;
pub const X_END: i64 = 100;
pub const Y_START: i64 = -45;
pub const Y_END: i64 = 45;

/// One interval of an axis partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bin {
    pub lower: i64,
    pub upper: i64,
    /// Last bin of its axis: the upper edge is included
    pub closed_upper: bool,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) as f64 / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lower, upper) = (self.lower as f64, self.upper as f64);
        value >= lower && (value < upper || (self.closed_upper && value == upper))
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.closed_upper { ']' } else { ')' };
        write!(f, "[{}, {}{}", self.lower, self.upper, close)
    }
}

/// Partition of a single axis
#[derive(Debug, Clone, PartialEq, Eq)]
struct Axis {
    start: i64,
    size: i64,
    bins: usize,
}

impl Axis {
    fn new(start: i64, end: i64, size: i64) -> Self {
        // last edge is the first multiple of `size` at or past `end`
        let span = end - start;
        let bins = ((span + size - 1) / size).max(1) as usize;
        Self { start, size, bins }
    }

    fn last_edge(&self) -> i64 {
        self.start + self.size * self.bins as i64
    }

    fn bin(&self, index: usize) -> Bin {
        let lower = self.start + self.size * index as i64;
        Bin { lower, upper: lower + self.size, closed_upper: index + 1 == self.bins }
    }

    fn locate(&self, value: f64) -> Option<Bin> {
        if !value.is_finite() || value < self.start as f64 || value > self.last_edge() as f64 {
            return None;
        }

        let mut index = ((value - self.start as f64) / self.size as f64).floor() as usize;
        index = index.min(self.bins - 1);

        // division can round across an edge; the integer edges decide
        if value < self.bin(index).lower as f64 {
            index -= 1;
        } else if !self.bin(index).contains(value) && index + 1 < self.bins {
            index += 1;
        }
        Some(self.bin(index))
    }

    fn all(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.bins).map(|index| self.bin(index))
    }
}

/// x and y partitions sharing one bin size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinGrid {
    bin_size: u32,
    x: Axis,
    y: Axis,
}

impl BinGrid {
    pub fn new(bin_size: u32) -> Result<Self> {
        if bin_size == 0 {
            return Err(AnalyticsError::InvalidBinSize(bin_size));
        }

        let size = i64::from(bin_size);
        Ok(Self {
            bin_size,
            x: Axis::new(X_START, X_END, size),
            y: Axis::new(Y_START, Y_END, size),
        })
    }

    pub fn bin_size(&self) -> u32 {
        self.bin_size
    }

    pub fn x_bin(&self, x: f64) -> Option<Bin> {
        self.x.locate(x)
    }

    pub fn y_bin(&self, y: f64) -> Option<Bin> {
        self.y.locate(y)
    }

    pub fn x_bins(&self) -> Vec<Bin> {
        self.x.all().collect()
    }

    pub fn y_bins(&self) -> Vec<Bin> {
        self.y.all().collect()
    }

    /// Attach bins to one event; missing or off-grid coordinates get `None`
    pub fn assign(&self, event: NormalizedEvent) -> BinnedEvent {
        let x_bin = event.x_coordinate.and_then(|x| self.x_bin(x));
        let y_bin = event.y_coordinate.and_then(|y| self.y_bin(y));
        BinnedEvent { event, x_bin, y_bin }
    }
}

/// A normalized event with its grid cell, if it has one
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedEvent {
    pub event: NormalizedEvent,
    pub x_bin: Option<Bin>,
    pub y_bin: Option<Bin>,
}

impl BinnedEvent {
    pub fn cell(&self) -> Option<(Bin, Bin)> {
        Some((self.x_bin?, self.y_bin?))
    }

    pub fn is_binned(&self) -> bool {
        self.cell().is_some()
    }
}

pub fn assign_bins<I>(events: I, bin_size: u32) -> Result<Vec<BinnedEvent>>
where
    I: IntoIterator<Item = NormalizedEvent>,
{
    let grid = BinGrid::new(bin_size)?;
    Ok(events.into_iter().map(|event| grid.assign(event)).collect())
}

/// Events that fall outside the grid on at least one axis
pub fn unbinned_count(events: &[BinnedEvent]) -> usize {
    events.iter().filter(|event| !event.is_binned()).count()
}
