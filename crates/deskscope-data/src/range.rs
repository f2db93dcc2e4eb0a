//! Inclusive date ranges and the selectable date window.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// First selectable date of the default window.
pub const DEFAULT_WINDOW_START: NaiveDate = ymd(2020, 1, 1);

/// Last selectable date of the default window.
pub const DEFAULT_WINDOW_END: NaiveDate = ymd(2020, 2, 1);

/// An inclusive `[start, end]` date range.
///
/// Both endpoints are part of the range, so a single-day range has
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RangeBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = DataError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DataError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Build a range from what a date-range picker yields.
    ///
    /// One date collapses both endpoints onto it, two dates are taken as
    /// `[first, second]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use deskscope_data::DateRange;
    ///
    /// let day = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
    /// let range = DateRange::from_picked(&[day]).unwrap();
    /// assert_eq!((range.start(), range.end()), (day, day));
    /// ```
    pub fn from_picked(dates: &[NaiveDate]) -> Result<Self> {
        match *dates {
            [date] => Ok(Self::single(date)),
            [start, end] => Self::new(start, end),
            _ => Err(DataError::DateCount(dates.len())),
        }
    }

    /// First day of the range.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range, endpoints included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The window a date picker is bounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct DateWindow {
    min: NaiveDate,
    max: NaiveDate,
}

#[derive(Deserialize)]
struct WindowBounds {
    min: NaiveDate,
    max: NaiveDate,
}

impl TryFrom<WindowBounds> for DateWindow {
    type Error = DataError;

    fn try_from(bounds: WindowBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl DateWindow {
    /// Create a window, rejecting `min > max`.
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self> {
        if min > max {
            return Err(DataError::InvalidDateRange {
                start: min,
                end: max,
            });
        }
        Ok(Self { min, max })
    }

    /// First selectable date.
    pub const fn min(&self) -> NaiveDate {
        self.min
    }

    /// Last selectable date.
    pub const fn max(&self) -> NaiveDate {
        self.max
    }

    /// The whole window as a range, which is also the picker's initial value.
    pub const fn full_range(&self) -> DateRange {
        DateRange {
            start: self.min,
            end: self.max,
        }
    }

    /// Validate picked dates against the window and build the range.
    pub fn pick(&self, dates: &[NaiveDate]) -> Result<DateRange> {
        if let Some(&date) = dates.iter().find(|d| **d < self.min || **d > self.max) {
            return Err(DataError::OutsideWindow {
                date,
                min: self.min,
                max: self.max,
            });
        }
        DateRange::from_picked(dates)
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            min: DEFAULT_WINDOW_START,
            max: DEFAULT_WINDOW_END,
        }
    }
}
