use crate::error::DecorationError;
use std::collections::BTreeMap;
use std::fmt;
use time::Date;

/// Extra HTML attributes for a day cell, keyed by attribute name
pub type Attributes = BTreeMap<String, String>;

/// Everything a [`DayDecorator`] supplies for one day cell
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Decoration {
    pub classes: Vec<String>,
    pub href: Option<String>,
    pub attributes: Attributes,
}

impl Decoration {
    /// The attributes of the cell's `<td>` tag.
    ///
    /// When `classes` holds at least one non-empty class, the space-joined
    /// classes replace any `class` entry in `attributes`.
    pub fn cell_attributes(&self) -> Attributes {
        let mut attrs = self.attributes.clone();
        if let Some(class) = join_classes(&self.classes) {
            attrs.insert(String::from("class"), class);
        }
        attrs
    }

    /// The link target, unless it is absent or empty
    pub fn link(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }
}

// Space-joins the non-empty classes, dropping duplicates but otherwise
// keeping the caller's order
pub(crate) fn join_classes(classes: &[String]) -> Option<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(classes.len());
    for cls in classes {
        if !cls.is_empty() && !seen.contains(&cls.as_str()) {
            seen.push(cls);
        }
    }
    (!seen.is_empty()).then(|| seen.join(" "))
}

/// Caller-supplied callbacks that decorate the in-month day cells of a
/// calendar.
///
/// Every method has a default implementation that applies no decoration.
/// The callbacks are never invoked for the overflow days borrowed from the
/// adjacent months.  An error returned by any callback aborts rendering.
pub trait DayDecorator {
    /// CSS classes for the cell of `date`
    fn classes(&self, _date: Date) -> Result<Vec<String>, DecorationError> {
        Ok(Vec::new())
    }

    /// Destination of a link wrapped around the day number
    fn link(&self, _date: Date) -> Result<Option<String>, DecorationError> {
        Ok(None)
    }

    /// Arbitrary extra attributes for the cell's `<td>` tag
    fn attributes(&self, _date: Date) -> Result<Attributes, DecorationError> {
        Ok(Attributes::new())
    }

    /// Collect the whole decoration of `date`.  The default implementation
    /// calls [`attributes()`](Self::attributes), [`classes()`](Self::classes),
    /// and [`link()`](Self::link), in that order.
    fn decorate(&self, date: Date) -> Result<Decoration, DecorationError> {
        let attributes = self.attributes(date)?;
        let classes = self.classes(date)?;
        let href = self.link(date)?;
        Ok(Decoration {
            classes,
            href,
            attributes,
        })
    }
}

impl<D: DayDecorator + ?Sized> DayDecorator for &D {
    fn classes(&self, date: Date) -> Result<Vec<String>, DecorationError> {
        (**self).classes(date)
    }

    fn link(&self, date: Date) -> Result<Option<String>, DecorationError> {
        (**self).link(date)
    }

    fn attributes(&self, date: Date) -> Result<Attributes, DecorationError> {
        (**self).attributes(date)
    }

    fn decorate(&self, date: Date) -> Result<Decoration, DecorationError> {
        (**self).decorate(date)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoDecoration;

impl DayDecorator for NoDecoration {}

type ClassesFn<'a> = Box<dyn Fn(Date) -> Vec<String> + 'a>;
type LinkFn<'a> = Box<dyn Fn(Date) -> Option<String> + 'a>;
type AttrsFn<'a> = Box<dyn Fn(Date) -> Attributes + 'a>;

/// A [`DayDecorator`] assembled from infallible closures.  The closures may
/// borrow from their environment.
///
/// ```
/// use htmlcal::Decorations;
/// use std::collections::BTreeSet;
/// use time::macros::date;
///
/// let busy = BTreeSet::from([date!(2025 - 09 - 03), date!(2025 - 09 - 17)]);
/// let deco = Decorations::new()
///     .classes_fn(|d| if busy.contains(&d) { vec!["busy".into()] } else { Vec::new() })
///     .link_fn(|d| Some(format!("/diary/{d}")));
/// ```
#[derive(Default)]
pub struct Decorations<'a> {
    classes: Option<ClassesFn<'a>>,
    link: Option<LinkFn<'a>>,
    attrs: Option<AttrsFn<'a>>,
}

impl<'a> Decorations<'a> {
    pub fn new() -> Decorations<'a> {
        Decorations::default()
    }

    pub fn classes_fn<F>(mut self, func: F) -> Decorations<'a>
    where
        F: Fn(Date) -> Vec<String> + 'a,
    {
        self.classes = Some(Box::new(func));
        self
    }

    pub fn link_fn<F>(mut self, func: F) -> Decorations<'a>
    where
        F: Fn(Date) -> Option<String> + 'a,
    {
        self.link = Some(Box::new(func));
        self
    }

    pub fn attrs_fn<F>(mut self, func: F) -> Decorations<'a>
    where
        F: Fn(Date) -> Attributes + 'a,
    {
        self.attrs = Some(Box::new(func));
        self
    }
}

impl DayDecorator for Decorations<'_> {
    fn classes(&self, date: Date) -> Result<Vec<String>, DecorationError> {
        Ok(self.classes.as_ref().map(|f| f(date)).unwrap_or_default())
    }

    fn link(&self, date: Date) -> Result<Option<String>, DecorationError> {
        Ok(self.link.as_ref().and_then(|f| f(date)))
    }

    fn attributes(&self, date: Date) -> Result<Attributes, DecorationError> {
        Ok(self.attrs.as_ref().map(|f| f(date)).unwrap_or_default())
    }
}

impl fmt::Debug for Decorations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorations")
            .field("classes", &self.classes.is_some())
            .field("link", &self.link.is_some())
            .field("attrs", &self.attrs.is_some())
            .finish()
    }
}
