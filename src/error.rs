use thiserror::Error;
use time::{Date, Month};

/// Error type returned by a [`DayDecorator`](crate::DayDecorator) callback
pub type DecorationError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort rendering
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid month number {0}; expected 1 through 12")]
    InvalidMonth(u8),

    #[error("{month} {year} cannot be laid out within the supported date range")]
    DateOutOfRange { month: Month, year: i32 },

    #[error("unknown locale {0:?}")]
    UnknownLocale(String),

    #[error("invalid heading tag {0:?}; expected a non-empty ASCII alphanumeric tag name")]
    InvalidHeaderTag(String),

    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),

    #[error("decoration callback failed for {date}")]
    Decoration {
        date: Date,
        #[source]
        source: DecorationError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
