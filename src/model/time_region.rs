use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CampError, CampResult};

/// A closed date interval. `start <= end` always holds, including after
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegionBounds")]
pub struct TimeRegion {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RegionBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RegionBounds> for TimeRegion {
    type Error = CampError;

    fn try_from(bounds: RegionBounds) -> CampResult<Self> {
        Self::new(bounds.start, bounds.end)
    }
}

impl TimeRegion {
    pub fn new(start: NaiveDate, end: NaiveDate) -> CampResult<Self> {
        check_order(start, end)?;
        Ok(Self { start, end })
    }

    /// Single-day region.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn adjust_start(&mut self, start: NaiveDate) -> CampResult<()> {
        check_order(start, self.end)?;
        self.start = start;
        Ok(())
    }

    pub fn adjust_end(&mut self, end: NaiveDate) -> CampResult<()> {
        check_order(self.start, end)?;
        self.end = end;
        Ok(())
    }

    /// True if the two regions share at least one day. Touching endpoints count.
    pub fn conflicts_with(&self, other: &TimeRegion) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// True if `other` lies entirely inside this region, endpoints inclusive.
    pub fn fully_covers(&self, other: &TimeRegion) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn check_order(start: NaiveDate, end: NaiveDate) -> CampResult<()> {
    if start > end {
        return Err(CampError::InvalidRegion {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for TimeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[From: {}, End: {}]", self.start, self.end)
    }
}
