//! Month and weekday names.
//!
//! Names come from the glibc locale tables bundled by [`pure_rust_locales`].
//! A [`LocaleContext`] is an explicit value that is passed to the renderers;
//! the process-wide locale ([`set_process_locale()`] and [`process_locale()`])
//! only decides which context [`build_calendar()`](crate::build_calendar)
//! starts from.
//!
//! The process-wide locale is shared by all threads.  Callers that need a
//! different locale per call on several threads must serialize the
//! set-then-render sequence themselves, or pass a [`LocaleContext`] to
//! [`render_month()`](crate::render_month) directly.
use crate::error::{Error, Result};
use crate::grid::{WeekStart, DAYS_IN_WEEK};
use pure_rust_locales::{locale_match, Locale};
use std::sync::{PoisonError, RwLock};
use time::{Month, Weekday};

static PROCESS_LOCALE: RwLock<Option<Locale>> = RwLock::new(None);

#[derive(Clone, Copy, Debug)]
pub struct LocaleContext {
    locale: Locale,
}

impl LocaleContext {
    /// The POSIX ("C") locale, with English names
    pub fn posix() -> LocaleContext {
        LocaleContext {
            locale: Locale::POSIX,
        }
    }

    pub fn new(locale: Locale) -> LocaleContext {
        LocaleContext { locale }
    }

    /// Look up a locale by its POSIX-style identifier, such as `es_ES`,
    /// `de_DE.UTF-8`, or `ca_ES@valencia`.  `C` is accepted as an alias for
    /// `POSIX`.
    pub fn from_name(name: &str) -> Result<LocaleContext> {
        let (base, modifier) = name
            .split_once('@')
            .map_or((name, None), |(base, modifier)| (base, Some(modifier)));
        let base = base.split_once('.').map_or(base, |(lang, _)| lang);
        let ident = match (base, modifier) {
            ("C", None) => String::from("POSIX"),
            (base, Some(modifier)) => format!("{base}@{modifier}"),
            (base, None) => String::from(base),
        };
        Locale::try_from(ident.as_str())
            .map(LocaleContext::new)
            .map_err(|_| Error::UnknownLocale(name.to_owned()))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Full name of `month`, as used in month headings
    pub fn month_name(&self, month: Month) -> &'static str {
        let names: &[&str] = locale_match!(self.locale => LC_TIME::MON);
        names
            .get(usize::from(u8::from(month)) - 1)
            .copied()
            .unwrap_or_default()
    }

    /// Abbreviated name of `wd`, as used in the weekday label row
    pub fn weekday_abbr(&self, wd: Weekday) -> &'static str {
        // The tables start on Sunday
        let names: &[&str] = locale_match!(self.locale => LC_TIME::ABDAY);
        names
            .get(usize::from(wd.number_days_from_sunday()))
            .copied()
            .unwrap_or_default()
    }

    /// Weekday abbreviations in the display order for `week_start`
    pub fn weekday_header(&self, week_start: WeekStart) -> [&'static str; DAYS_IN_WEEK] {
        week_start.weekdays().map(|wd| self.weekday_abbr(wd))
    }
}

impl Default for LocaleContext {
    fn default() -> LocaleContext {
        LocaleContext::posix()
    }
}

/// Make the named locale the process-wide default and return its context
pub fn set_process_locale(name: &str) -> Result<LocaleContext> {
    let ctx = LocaleContext::from_name(name)?;
    *PROCESS_LOCALE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(ctx.locale);
    log::debug!("Process locale set to {name:?}");
    Ok(ctx)
}

/// Return the context for the process-wide locale, which is POSIX until
/// [`set_process_locale()`] is first called
pub fn process_locale() -> LocaleContext {
    let locked = PROCESS_LOCALE.read();
    locked
        .unwrap_or_else(PoisonError::into_inner)
        .map_or_else(LocaleContext::posix, LocaleContext::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_names() {
        let ctx = LocaleContext::posix();
        assert_eq!(ctx.month_name(Month::January), "January");
        assert_eq!(ctx.month_name(Month::September), "September");
        assert_eq!(ctx.month_name(Month::December), "December");
        assert_eq!(ctx.weekday_abbr(Weekday::Monday), "Mon");
        assert_eq!(ctx.weekday_abbr(Weekday::Sunday), "Sun");
    }

    #[test]
    fn test_header_monday() {
        assert_eq!(
            LocaleContext::posix().weekday_header(WeekStart::Monday),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_header_sunday() {
        assert_eq!(
            LocaleContext::posix().weekday_header(WeekStart::Sunday),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
    }

    #[test]
    fn test_from_name() {
        let ctx = LocaleContext::from_name("de_DE.UTF-8").unwrap();
        assert_eq!(ctx.month_name(Month::March), "März");
        let ctx = LocaleContext::from_name("C").unwrap();
        assert_eq!(ctx.month_name(Month::March), "March");
    }

    #[test]
    fn test_from_name_spanish() {
        let ctx = LocaleContext::from_name("es_ES").unwrap();
        assert_eq!(ctx.month_name(Month::September), "septiembre");
    }

    #[test]
    fn test_unknown_locale() {
        let name = "xx_NOWHERE";
        let r = LocaleContext::from_name(name);
        assert!(matches!(r, Err(Error::UnknownLocale(ref n)) if n == name));
    }
}
