use crate::decorate::{join_classes, Attributes, DayDecorator};
use crate::error::{Error, Result};
use crate::escape::{escape_html, is_attribute_name, Escape};
use crate::grid::{GridDay, MonthGrid, WeekStart};
use crate::locale::LocaleContext;
use crate::sequence::MonthYear;
use time::Date;

/// Number of body rows in every rendered month
pub const MONTH_ROWS: usize = 6;

static PADDING_ROW: &str = concat!(
    "<tr>",
    "<td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td>",
    "<td>&nbsp;</td><td>&nbsp;</td><td>&nbsp;</td>",
    "</tr>\n",
);

static EMPTY_CELL: &str = "<td></td>";

/// Layout options for a single month table
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthOptions {
    pub week_start: WeekStart,
    pub escape: Escape,
    /// Tag name of the element holding the month name
    pub header_tag: String,
    /// Classes for the `<table>` tag
    pub table_classes: Vec<String>,
    /// Classes for each weekday `<th>` tag
    pub header_classes: Vec<String>,
    /// Whether to follow the month name in the heading with the year
    pub show_year: bool,
}

impl MonthOptions {
    pub fn new() -> MonthOptions {
        MonthOptions::default()
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> MonthOptions {
        self.week_start = week_start;
        self
    }

    pub fn with_escape(mut self, escape: Escape) -> MonthOptions {
        self.escape = escape;
        self
    }

    pub fn with_header_tag<S: Into<String>>(mut self, tag: S) -> MonthOptions {
        self.header_tag = tag.into();
        self
    }

    pub fn with_table_classes<I, S>(mut self, classes: I) -> MonthOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_header_classes<I, S>(mut self, classes: I) -> MonthOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_show_year(mut self, show_year: bool) -> MonthOptions {
        self.show_year = show_year;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let tag = &self.header_tag;
        if !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(())
        } else {
            Err(Error::InvalidHeaderTag(tag.clone()))
        }
    }
}

impl Default for MonthOptions {
    fn default() -> MonthOptions {
        MonthOptions {
            week_start: WeekStart::default(),
            escape: Escape::default(),
            header_tag: String::from("h3"),
            table_classes: Vec::new(),
            header_classes: Vec::new(),
            show_year: true,
        }
    }
}

/// Render one cell of a month grid as a `<td>` element.
///
/// Overflow days from the adjacent months are rendered as a bare
/// `<td></td>` without consulting `decorator`.  For in-month days, the
/// classes returned by [`DayDecorator::classes()`], when non-empty, replace
/// any `class` attribute returned by [`DayDecorator::attributes()`].
///
/// With [`Escape::Escaped`], an attribute name that cannot appear in a start
/// tag fails with [`Error::InvalidAttributeName`].
pub fn render_day<D: DayDecorator + ?Sized>(
    day: GridDay,
    decorator: &D,
    escape: Escape,
) -> Result<String> {
    let mut out = String::new();
    write_day(&mut out, day, decorator, escape)?;
    Ok(out)
}

/// Render the cell of `date` as an in-month day of a grid laid out from
/// `week_start`
pub fn render_date<D: DayDecorator + ?Sized>(
    date: Date,
    week_start: WeekStart,
    decorator: &D,
    escape: Escape,
) -> Result<String> {
    let day = GridDay {
        date,
        column: week_start.column(date.weekday()),
        in_month: true,
    };
    render_day(day, decorator, escape)
}

fn write_day<D: DayDecorator + ?Sized>(
    out: &mut String,
    day: GridDay,
    decorator: &D,
    escape: Escape,
) -> Result<()> {
    if !day.in_month {
        out.push_str(EMPTY_CELL);
        return Ok(());
    }
    let date = day.date;
    let decoration = decorator
        .decorate(date)
        .map_err(|source| Error::Decoration { date, source })?;
    out.push_str("<td");
    write_attributes(out, &decoration.cell_attributes(), escape)?;
    out.push('>');
    let href = decoration.link();
    if let Some(href) = href {
        out.push_str("<a href=\"");
        out.push_str(&escape.apply(href));
        out.push_str("\">");
    }
    out.push_str(&date.day().to_string());
    if href.is_some() {
        out.push_str("</a>");
    }
    out.push_str("</td>");
    Ok(())
}

fn write_attributes(out: &mut String, attrs: &Attributes, escape: Escape) -> Result<()> {
    for (key, value) in attrs {
        if escape == Escape::Escaped && !is_attribute_name(key) {
            return Err(Error::InvalidAttributeName(key.clone()));
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape.apply(value));
        out.push('"');
    }
    Ok(())
}

/// Render one month as a heading followed by a `<table>`.
///
/// The table holds a row of weekday labels followed by exactly
/// [`MONTH_ROWS`] rows of days; months spanning fewer weeks are padded with
/// rows of non-breaking spaces.  Names are taken from `locale`; the
/// process-wide locale is not consulted.
pub fn render_month<D: DayDecorator + ?Sized>(
    month: MonthYear,
    decorator: &D,
    options: &MonthOptions,
    locale: &LocaleContext,
) -> Result<String> {
    options.validate()?;
    let grid = MonthGrid::new(month.year, month.month, options.week_start)?;
    let mut out = String::new();
    let tag = &options.header_tag;
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_html(locale.month_name(month.month)));
    if options.show_year {
        out.push(' ');
        out.push_str(&month.year.to_string());
    }
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
    out.push_str("<table");
    write_class_attribute(&mut out, &options.table_classes);
    out.push_str(">\n<tr>");
    for name in locale.weekday_header(options.week_start) {
        out.push_str("<th");
        write_class_attribute(&mut out, &options.header_classes);
        out.push('>');
        out.push_str(&escape_html(name));
        out.push_str("</th>");
    }
    out.push_str("</tr>\n");
    let mut rows = 0;
    for week in grid.weeks() {
        out.push_str("<tr>");
        for day in week {
            write_day(&mut out, day, decorator, options.escape)?;
        }
        out.push_str("</tr>\n");
        rows += 1;
    }
    for _ in rows..MONTH_ROWS {
        out.push_str(PADDING_ROW);
    }
    out.push_str("</table>\n");
    Ok(out)
}

fn write_class_attribute(out: &mut String, classes: &[String]) {
    if let Some(class) = join_classes(classes) {
        out.push_str(" class=\"");
        out.push_str(&escape_html(&class));
        out.push('"');
    }
}
