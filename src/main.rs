use anyhow::Context;
use flexi_logger::Logger;
use htmlcal::{
    build_calendar, CalendarConfig, DayDecorator, DecorationError, Escape, MonthOptions, WeekStart,
};
use lexopt::{Arg, Parser, ValueExt};
use std::num::NonZeroUsize;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: CalendarConfig,
        links: LinkOptions,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = CalendarConfig::new();
        let mut month = MonthOptions::new();
        let mut links = LinkOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('n') | Arg::Long("months") => {
                    config.months = parser.value()?.parse::<NonZeroUsize>()?;
                }
                Arg::Long("forward") => config.backward = false,
                Arg::Long("sunday") => month.week_start = WeekStart::Sunday,
                Arg::Long("header") => month.header_tag = parser.value()?.string()?,
                Arg::Long("locale") => config.locale = Some(parser.value()?.string()?),
                Arg::Long("raw") => month.escape = Escape::Raw,
                Arg::Long("table-class") => month.table_classes.push(parser.value()?.string()?),
                Arg::Long("header-class") => month.header_classes.push(parser.value()?.string()?),
                Arg::Long("no-year") => month.show_year = false,
                Arg::Long("link-template") => {
                    links.link_template = Some(parser.value()?.string()?);
                }
                Arg::Long("today-class") => links.today_class = Some(parser.value()?.string()?),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        config.month = month;
        Ok(Command::Run {
            date,
            config,
            links,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                links,
            } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let decorator = CliDecorator { today, links };
                let months = build_calendar(date.unwrap_or(today), &config, &decorator)
                    .context("failed to render calendar")?;
                println!("{}", months.join("\n"));
                Ok(())
            }
            Command::Help => {
                println!("Usage: htmlcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Print a run of month calendars as HTML tables");
                println!();
                println!("Options:");
                println!("  -n, --months N          Number of months to render [default: 3]");
                println!("      --forward           Render the months after the date");
                println!("      --sunday            Start weeks on Sunday instead of Monday");
                println!("      --header TAG        Tag for month headings [default: h3]");
                println!("      --locale NAME       Locale for month and weekday names");
                println!("      --raw               Do not HTML-escape links and classes");
                println!("      --table-class C     Add a class to each <table> (repeatable)");
                println!("      --header-class C    Add a class to each weekday <th> (repeatable)");
                println!("      --no-year           Omit the year from month headings");
                println!("      --link-template T   Link each day to T, filling in {{year}},");
                println!("                          {{month}}, and {{day}}");
                println!("      --today-class C     Add class C to today's date");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct LinkOptions {
    link_template: Option<String>,
    today_class: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct CliDecorator {
    today: Date,
    links: LinkOptions,
}

impl DayDecorator for CliDecorator {
    fn classes(&self, date: Date) -> Result<Vec<String>, DecorationError> {
        Ok(self
            .links
            .today_class
            .iter()
            .filter(|_| date == self.today)
            .cloned()
            .collect())
    }

    fn link(&self, date: Date) -> Result<Option<String>, DecorationError> {
        Ok(self.links.link_template.as_ref().map(|template| {
            template
                .replace("{year}", &date.year().to_string())
                .replace("{month}", &u8::from(date.month()).to_string())
                .replace("{day}", &date.day().to_string())
        }))
    }
}

fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("warn")
        .and_then(Logger::start)
        .context("failed to initialize logging")?;
    Command::from_parser(Parser::from_env())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    fn parse_run(args: &[&str]) -> (Option<Date>, CalendarConfig, LinkOptions) {
        match parse(args).unwrap() {
            Command::Run {
                date,
                config,
                links,
            } => (date, config, links),
            cmd => panic!("expected Run, got {cmd:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let (date, config, links) = parse_run(&[]);
        assert_eq!(date, None);
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(links, LinkOptions::default());
    }

    #[test]
    fn test_options() {
        let (date, config, links) = parse_run(&[
            "-n",
            "5",
            "--forward",
            "--sunday",
            "--header",
            "h2",
            "--locale",
            "es_ES",
            "--raw",
            "--table-class",
            "cal",
            "--table-class",
            "wide",
            "--header-class",
            "wd",
            "--no-year",
            "--today-class",
            "today",
            "2011-06-12",
        ]);
        assert_eq!(date, Some(date!(2011 - 06 - 12)));
        assert_eq!(config.months.get(), 5);
        assert!(!config.backward);
        assert_eq!(config.locale.as_deref(), Some("es_ES"));
        assert_eq!(config.month.week_start, WeekStart::Sunday);
        assert_eq!(config.month.header_tag, "h2");
        assert_eq!(config.month.escape, Escape::Raw);
        assert_eq!(config.month.table_classes, ["cal", "wide"]);
        assert_eq!(config.month.header_classes, ["wd"]);
        assert!(!config.month.show_year);
        assert_eq!(links.today_class.as_deref(), Some("today"));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["--forward", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2023-13-01"]).is_err());
    }

    #[test]
    fn test_zero_months() {
        assert!(parse(&["--months", "0"]).is_err());
    }

    #[test]
    fn test_two_dates() {
        assert!(parse(&["2023-01-01", "2023-02-01"]).is_err());
    }

    #[test]
    fn test_decorator() {
        let deco = CliDecorator {
            today: date!(2025 - 09 - 17),
            links: LinkOptions {
                link_template: Some(String::from("/diary/{year}/{month}/{day}")),
                today_class: Some(String::from("today")),
            },
        };
        assert_eq!(deco.classes(date!(2025 - 09 - 17)).unwrap(), ["today"]);
        assert!(deco.classes(date!(2025 - 09 - 16)).unwrap().is_empty());
        assert_eq!(
            deco.link(date!(2025 - 09 - 01)).unwrap().as_deref(),
            Some("/diary/2025/9/1")
        );
    }
}
