//! Render month calendars as HTML tables.
//!
//! Each month is rendered as a heading holding the month's name followed by
//! a `<table>` with one row of weekday labels and six rows of days.  Callers
//! decorate individual days with CSS classes, links, and arbitrary
//! attributes by implementing [`DayDecorator`] (or by handing closures to
//! [`Decorations`]).
//!
//! ```
//! use htmlcal::{build_calendar, CalendarConfig, Decorations};
//! use time::macros::date;
//!
//! let deco = Decorations::new()
//!     .classes_fn(|d| if d.day() == 15 { vec!["payday".into()] } else { Vec::new() });
//! let months = build_calendar(date!(2025 - 09 - 01), &CalendarConfig::default(), &deco)?;
//! assert_eq!(months.len(), 3);
//! assert!(months[2].starts_with("<h3>September 2025</h3>"));
//! # Ok::<(), htmlcal::Error>(())
//! ```
mod calendar;
mod decorate;
mod error;
mod escape;
mod grid;
mod locale;
mod render;
mod sequence;
pub use crate::calendar::{build_calendar, build_calendar_with_locale, CalendarConfig};
pub use crate::decorate::{Attributes, DayDecorator, Decoration, Decorations, NoDecoration};
pub use crate::error::{DecorationError, Error, Result};
pub use crate::escape::{escape_html, is_attribute_name, Escape};
pub use crate::grid::{GridDay, GridDays, GridWeeks, MonthGrid, WeekStart};
pub use crate::locale::{process_locale, set_process_locale, LocaleContext};
pub use crate::render::{render_date, render_day, render_month, MonthOptions, MONTH_ROWS};
pub use crate::sequence::{sequence_backward, sequence_forward, Direction, MonthSequence, MonthYear};
pub use pure_rust_locales::Locale;
