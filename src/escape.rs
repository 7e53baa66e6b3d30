use std::borrow::Cow;

/// Policy for inserting caller-supplied decoration text into markup
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Escape {
    /// HTML-escape every attribute value, class, and link, and reject
    /// attribute names that are not valid HTML attribute names
    #[default]
    Escaped,
    /// Insert decoration values verbatim.  The caller is responsible for
    /// producing well-formed markup.
    Raw,
}

impl Escape {
    pub(crate) fn apply(self, s: &str) -> Cow<'_, str> {
        match self {
            Escape::Escaped => escape_html(s),
            Escape::Raw => Cow::Borrowed(s),
        }
    }
}

/// Replace the characters that are significant in HTML text and
/// double-quoted attribute values with character references
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Test whether `name` can appear as an attribute name in a start tag.
///
/// Attribute names cannot be escaped, so anything containing whitespace,
/// control characters, quotes, `<`, `>`, `/`, or `=` is refused.
pub fn is_attribute_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(is_forbidden_in_name)
}

fn is_forbidden_in_name(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
}
