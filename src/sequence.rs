use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use time::{Date, Month};

/// A calendar month of a particular year
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthYear {
    pub year: i32,
    pub month: Month,
}

impl MonthYear {
    /// Construct from a month number (1 = January) and year
    pub fn new(month: u8, year: i32) -> Result<MonthYear> {
        let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;
        Ok(MonthYear { year, month })
    }

    pub fn of(date: Date) -> MonthYear {
        MonthYear {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month_number(&self) -> u8 {
        self.month.into()
    }

    /// Returns the following month, or `None` if the year would overflow
    pub fn next(self) -> Option<MonthYear> {
        let year = if self.month == Month::December {
            self.year.checked_add(1)?
        } else {
            self.year
        };
        Some(MonthYear {
            year,
            month: self.month.next(),
        })
    }

    /// Returns the preceding month, or `None` if the year would overflow
    pub fn previous(self) -> Option<MonthYear> {
        let year = if self.month == Month::January {
            self.year.checked_sub(1)?
        } else {
            self.year
        };
        Some(MonthYear {
            year,
            month: self.month.previous(),
        })
    }
}

impl Ord for MonthYear {
    fn cmp(&self, other: &MonthYear) -> Ordering {
        let key = |my: &MonthYear| (my.year, my.month_number());
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for MonthYear {
    fn partial_cmp(&self, other: &MonthYear) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    Forward,
    #[default]
    Backward,
}

/// Iterator over consecutive months starting at a given month and walking
/// in one direction, crossing year boundaries as needed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthSequence {
    next: Option<MonthYear>,
    remaining: usize,
    direction: Direction,
}

impl MonthSequence {
    /// Yields `start` followed by `steps` further months, `steps + 1` items
    /// in all
    pub fn new(start: MonthYear, steps: usize, direction: Direction) -> MonthSequence {
        MonthSequence {
            next: Some(start),
            remaining: steps.saturating_add(1),
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Iterator for MonthSequence {
    type Item = MonthYear;

    fn next(&mut self) -> Option<MonthYear> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = match self.direction {
            Direction::Forward => current.next(),
            Direction::Backward => current.previous(),
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_some() {
            (0, Some(self.remaining))
        } else {
            (0, Some(0))
        }
    }
}

impl FusedIterator for MonthSequence {}

/// `start` and the `steps` months after it, oldest first
pub fn sequence_forward(start: MonthYear, steps: usize) -> MonthSequence {
    MonthSequence::new(start, steps, Direction::Forward)
}

/// `start` and the `steps` months before it, newest first
pub fn sequence_backward(start: MonthYear, steps: usize) -> MonthSequence {
    MonthSequence::new(start, steps, Direction::Backward)
}
