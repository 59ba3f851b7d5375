//! CSS selector subset used by the in-memory document
//!
//! Supports type (`div`, `*`), `.class`, `#id`, `[attr]` and
//! `[attr="value"]` compounds joined by the descendant combinator.

use std::iter::Peekable;
use std::str::Chars;

/// Read access to an element for matching
pub(crate) trait ElementView {
    fn tag(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector, e.g. `select[name="subject"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    pub(crate) fn matches(&self, element: &dyn ElementView) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && !tag.eq_ignore_ascii_case(element.tag()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (&attr.value, element.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// Parsed selector: compounds from outermost ancestor to subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut chars = input.chars().peekable();
        let mut compounds = Vec::new();
        let mut current = Compound::default();

        while let Some(&c) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                    if !current.is_empty() {
                        compounds.push(std::mem::take(&mut current));
                    }
                }
                '.' => {
                    chars.next();
                    current.classes.push(read_ident(&mut chars, input)?);
                }
                '#' => {
                    chars.next();
                    current.id = Some(read_ident(&mut chars, input)?);
                }
                '[' => {
                    chars.next();
                    current.attrs.push(read_attr(&mut chars, input)?);
                }
                '*' => {
                    chars.next();
                    current.tag = Some("*".to_string());
                }
                c if is_ident_char(c) => {
                    current.tag = Some(read_ident(&mut chars, input)?);
                }
                other => return Err(format!("unexpected '{}' in selector '{}'", other, input)),
            }
        }

        if !current.is_empty() {
            compounds.push(current);
        }
        if compounds.is_empty() {
            return Err(format!("empty selector '{}'", input));
        }

        Ok(Self { compounds })
    }

    /// Compounds, subject last
    pub(crate) fn compounds(&self) -> &[Compound] {
        &self.compounds
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<String, String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        return Err(format!("expected identifier in selector '{}'", input));
    }
    Ok(ident)
}

fn read_attr(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<AttrMatch, String> {
    let name = read_ident(chars, input)?;
    match chars.next() {
        Some(']') => Ok(AttrMatch { name, value: None }),
        Some('=') => {
            let value = match chars.peek() {
                Some(&quote) if quote == '"' || quote == '\'' => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some(c) if c == quote => break,
                            Some(c) => value.push(c),
                            None => return Err(format!("unterminated string in selector '{}'", input)),
                        }
                    }
                    value
                }
                _ => read_ident(chars, input)?,
            };
            match chars.next() {
                Some(']') => Ok(AttrMatch { name, value: Some(value) }),
                _ => Err(format!("expected ']' in selector '{}'", input)),
            }
        }
        _ => Err(format!("malformed attribute selector '{}'", input)),
    }
}
