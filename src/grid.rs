use crate::error::{Error, Result};
use std::iter::{successors, FusedIterator};
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Which weekday begins each row of a month table
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Monday,
            WeekStart::Sunday => Weekday::Sunday,
        }
    }

    pub fn last_weekday(self) -> Weekday {
        self.first_weekday().previous()
    }

    /// Returns the zero-based table column in which `wd` is displayed
    pub fn column(self, wd: Weekday) -> u8 {
        match self {
            WeekStart::Monday => wd.number_days_from_monday(),
            WeekStart::Sunday => wd.number_days_from_sunday(),
        }
    }

    /// Returns the seven weekdays in display order
    pub fn weekdays(self) -> [Weekday; DAYS_IN_WEEK] {
        let mut wd = self.first_weekday();
        std::array::from_fn(|_| {
            let this = wd;
            wd = wd.next();
            this
        })
    }
}

/// A single cell of a month grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridDay {
    pub date: Date,
    /// Zero-based column relative to the grid's [`WeekStart`]
    pub column: u8,
    /// `false` for the leading and trailing days borrowed from the adjacent
    /// months
    pub in_month: bool,
}

/// The whole weeks needed to display one month.
///
/// The grid starts on the configured week start on or before the first of
/// the month and ends on the last weekday on or after the last of the month.
/// Only weeks containing at least one day of the month are included, so a
/// grid is four, five, or six weeks long.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    week_start: WeekStart,
    first: Date,
    last: Date,
}

impl MonthGrid {
    pub fn new(year: i32, month: Month, week_start: WeekStart) -> Result<MonthGrid> {
        let out_of_range = || Error::DateOutOfRange { month, year };
        let month_start = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;
        let month_end = successors(Some(month_start), |&d| d.next_day())
            .take_while(|d| d.month() == month)
            .last()
            .unwrap_or(month_start);
        let lead = week_start.column(month_start.weekday());
        let trail = 6 - week_start.column(month_end.weekday());
        let first = month_start
            .checked_sub(Duration::days(lead.into()))
            .ok_or_else(out_of_range)?;
        let last = month_end
            .checked_add(Duration::days(trail.into()))
            .ok_or_else(out_of_range)?;
        Ok(MonthGrid {
            year,
            month,
            week_start,
            first,
            last,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn first_date(&self) -> Date {
        self.first
    }

    pub fn last_date(&self) -> Date {
        self.last
    }

    /// Iterate over every date in the grid, including the overflow days from
    /// the neighboring months
    pub fn days(&self) -> GridDays {
        GridDays {
            grid: *self,
            next: Some(self.first),
        }
    }

    /// Iterate over the grid one week (table row) at a time
    pub fn weeks(&self) -> GridWeeks {
        GridWeeks { days: self.days() }
    }

    pub fn week_count(&self) -> usize {
        self.weeks().count()
    }

    fn cell(&self, date: Date) -> GridDay {
        GridDay {
            date,
            column: self.week_start.column(date.weekday()),
            in_month: date.year() == self.year && date.month() == self.month,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridDays {
    grid: MonthGrid,
    next: Option<Date>,
}

impl Iterator for GridDays {
    type Item = GridDay;

    fn next(&mut self) -> Option<GridDay> {
        let date = self.next?;
        self.next = if date < self.grid.last {
            date.next_day()
        } else {
            None
        };
        Some(self.grid.cell(date))
    }
}

impl FusedIterator for GridDays {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridWeeks {
    days: GridDays,
}

impl Iterator for GridWeeks {
    type Item = [GridDay; DAYS_IN_WEEK];

    fn next(&mut self) -> Option<[GridDay; DAYS_IN_WEEK]> {
        // Invariant: the grid's length is a multiple of seven
        let first = self.days.next()?;
        let mut week = [first; DAYS_IN_WEEK];
        for slot in week.iter_mut().skip(1) {
            *slot = self.days.next()?;
        }
        Some(week)
    }
}

impl FusedIterator for GridWeeks {}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_weekdays_monday() {
        let days = WeekStart::Monday.weekdays();
        assert_eq!(days[0], Monday);
        assert_eq!(days[6], Sunday);
        assert!(days.windows(2).all(|w| w[0].next() == w[1]));
    }

    #[test]
    fn test_weekdays_sunday() {
        let days = WeekStart::Sunday.weekdays();
        assert_eq!(days[0], Sunday);
        assert_eq!(days[6], Saturday);
        assert!(days.windows(2).all(|w| w[0].next() == w[1]));
    }

    #[test]
    fn test_grid_starting_on_week_start() {
        let grid = MonthGrid::new(2025, Month::September, WeekStart::Monday).unwrap();
        assert_eq!(grid.first_date(), date!(2025 - 09 - 01));
        assert_eq!(grid.last_date(), date!(2025 - 10 - 05));
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn test_grid_sunday_start() {
        let grid = MonthGrid::new(2025, Month::September, WeekStart::Sunday).unwrap();
        assert_eq!(grid.first_date(), date!(2025 - 08 - 31));
        assert_eq!(grid.last_date(), date!(2025 - 10 - 04));
        assert_eq!(grid.week_count(), 5);
    }

    #[test]
    fn test_four_week_grid() {
        let grid = MonthGrid::new(2021, Month::February, WeekStart::Monday).unwrap();
        assert_eq!(grid.first_date(), date!(2021 - 02 - 01));
        assert_eq!(grid.last_date(), date!(2021 - 02 - 28));
        assert_eq!(grid.week_count(), 4);
        assert!(grid.days().all(|gd| gd.in_month));
    }

    #[test]
    fn test_six_week_grid_across_year() {
        let grid = MonthGrid::new(2035, Month::December, WeekStart::Sunday).unwrap();
        assert_eq!(grid.first_date(), date!(2035 - 11 - 25));
        assert_eq!(grid.last_date(), date!(2036 - 01 - 05));
        assert_eq!(grid.week_count(), 6);
    }

    #[test]
    fn test_days_overflow_flags() {
        let grid = MonthGrid::new(2012, Month::May, WeekStart::Monday).unwrap();
        let days = grid.days().collect::<Vec<_>>();
        assert_eq!(days.len(), 35);
        assert_eq!(
            days[0],
            GridDay {
                date: date!(2012 - 04 - 30),
                column: 0,
                in_month: false
            }
        );
        assert_eq!(
            days[1],
            GridDay {
                date: date!(2012 - 05 - 01),
                column: 1,
                in_month: true
            }
        );
        assert_eq!(days.iter().filter(|gd| gd.in_month).count(), 31);
        assert!(!days[34].in_month);
    }

    #[test]
    fn test_weeks_start_on_week_start() {
        for week_start in [WeekStart::Monday, WeekStart::Sunday] {
            let grid = MonthGrid::new(2023, Month::November, week_start).unwrap();
            for week in grid.weeks() {
                assert_eq!(week[0].date.weekday(), week_start.first_weekday());
                assert_eq!(week[6].date.weekday(), week_start.last_weekday());
                let columns = week.map(|gd| gd.column);
                assert_eq!(columns, [0, 1, 2, 3, 4, 5, 6]);
            }
        }
    }

    #[test]
    fn test_restartable() {
        let grid = MonthGrid::new(2024, Month::December, WeekStart::Monday).unwrap();
        assert!(grid.days().eq(grid.days()));
    }

    #[test]
    fn test_end_of_time() {
        let r = MonthGrid::new(9999, Month::December, WeekStart::Monday);
        assert!(matches!(r, Err(Error::DateOutOfRange { year: 9999, .. })));
    }
}
