use crate::decorate::DayDecorator;
use crate::error::Result;
use crate::locale::{process_locale, set_process_locale, LocaleContext};
use crate::render::{render_month, MonthOptions};
use crate::sequence::{Direction, MonthSequence, MonthYear};
use std::num::NonZeroUsize;
use time::Date;

const DEFAULT_MONTHS: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

/// Options for [`build_calendar()`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarConfig {
    /// Number of months to render, including the month of the start date
    pub months: NonZeroUsize,
    /// Whether to render the months leading up to the start date rather
    /// than those following it
    pub backward: bool,
    /// Locale to install as the process-wide locale before rendering.  When
    /// `None`, the current process-wide locale is used.
    pub locale: Option<String>,
    pub month: MonthOptions,
}

impl CalendarConfig {
    pub fn new() -> CalendarConfig {
        CalendarConfig::default()
    }

    pub fn with_months(mut self, months: NonZeroUsize) -> CalendarConfig {
        self.months = months;
        self
    }

    pub fn with_backward(mut self, backward: bool) -> CalendarConfig {
        self.backward = backward;
        self
    }

    pub fn with_locale<S: Into<String>>(mut self, locale: S) -> CalendarConfig {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_month_options(mut self, month: MonthOptions) -> CalendarConfig {
        self.month = month;
        self
    }

    pub fn direction(&self) -> Direction {
        if self.backward {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// The months to render, in the order they are generated
    pub fn sequence(&self, start: Date) -> MonthSequence {
        let steps = self.months.get() - 1;
        MonthSequence::new(MonthYear::of(start), steps, self.direction())
    }
}

impl Default for CalendarConfig {
    fn default() -> CalendarConfig {
        CalendarConfig {
            months: DEFAULT_MONTHS,
            backward: true,
            locale: None,
            month: MonthOptions::default(),
        }
    }
}

/// Render `config.months` consecutive months starting from the month of
/// `start`.
///
/// The returned tables are always in chronological order: when walking
/// backward, the last table is the month of `start`.  Any error, including
/// a failing decoration callback, aborts the whole calendar.
pub fn build_calendar<D: DayDecorator + ?Sized>(
    start: Date,
    config: &CalendarConfig,
    decorator: &D,
) -> Result<Vec<String>> {
    let locale = config
        .locale
        .as_deref()
        .map_or_else(|| Ok(process_locale()), set_process_locale)?;
    build_calendar_with_locale(start, config, decorator, &locale)
}

/// Like [`build_calendar()`], but takes the month and weekday names from
/// `locale`, ignoring both `config.locale` and the process-wide locale
pub fn build_calendar_with_locale<D: DayDecorator + ?Sized>(
    start: Date,
    config: &CalendarConfig,
    decorator: &D,
    locale: &LocaleContext,
) -> Result<Vec<String>> {
    config.month.validate()?;
    log::debug!(
        "Rendering {} month(s) {:?} from {} in locale {:?}",
        config.months,
        config.direction(),
        MonthYear::of(start),
        locale.locale()
    );
    let mut tables = config
        .sequence(start)
        .map(|month| {
            log::trace!("Rendering {month}");
            render_month(month, decorator, &config.month, locale)
        })
        .collect::<Result<Vec<_>>>()?;
    if config.backward {
        tables.reverse();
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::NoDecoration;
    use crate::error::Error;
    use time::macros::date;

    fn heading(table: &str) -> &str {
        let start = table.find('>').map_or(0, |i| i + 1);
        let end = table.find("</").unwrap_or(table.len());
        &table[start..end]
    }

    #[test]
    fn test_default_config() {
        let config = CalendarConfig::default();
        assert_eq!(config.months.get(), 3);
        assert!(config.backward);
        assert_eq!(config.locale, None);
        assert_eq!(config.month.header_tag, "h3");
    }

    #[test]
    fn test_backward_is_chronological() {
        let five = NonZeroUsize::new(5).unwrap();
        let config = CalendarConfig::new().with_months(five);
        let tables = build_calendar_with_locale(
            date!(2025 - 09 - 01),
            &config,
            &NoDecoration,
            &LocaleContext::posix(),
        )
        .unwrap();
        let headings = tables.iter().map(|t| heading(t)).collect::<Vec<_>>();
        assert_eq!(
            headings,
            [
                "May 2025",
                "June 2025",
                "July 2025",
                "August 2025",
                "September 2025",
            ]
        );
    }

    #[test]
    fn test_forward() {
        let config = CalendarConfig::new()
            .with_months(NonZeroUsize::new(3).unwrap())
            .with_backward(false);
        let tables = build_calendar_with_locale(
            date!(2024 - 11 - 20),
            &config,
            &NoDecoration,
            &LocaleContext::posix(),
        )
        .unwrap();
        let headings = tables.iter().map(|t| heading(t)).collect::<Vec<_>>();
        assert_eq!(headings, ["November 2024", "December 2024", "January 2025"]);
    }

    #[test]
    fn test_single_month() {
        let config = CalendarConfig::new().with_months(NonZeroUsize::MIN);
        let tables = build_calendar_with_locale(
            date!(2024 - 02 - 29),
            &config,
            &NoDecoration,
            &LocaleContext::posix(),
        )
        .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(heading(&tables[0]), "February 2024");
    }

    #[test]
    fn test_out_of_range_aborts() {
        let config = CalendarConfig::new().with_backward(false);
        let r = build_calendar_with_locale(
            date!(9999 - 11 - 01),
            &config,
            &NoDecoration,
            &LocaleContext::posix(),
        );
        assert!(matches!(r, Err(Error::DateOutOfRange { year: 9999, .. })));
    }

    #[test]
    fn test_unknown_locale_aborts() {
        let config = CalendarConfig::new().with_locale("tlh_KLINGON");
        let r = build_calendar(date!(2025 - 09 - 01), &config, &NoDecoration);
        assert!(matches!(r, Err(Error::UnknownLocale(_))));
    }
}
