//! Typed reads of element attributes.
//!
//! Every widget constructor reads its attributes through [`Attrs`], so a
//! malformed value always surfaces as [`BuildError::InvalidAttribute`]
//! naming the element, the attribute and the offending text.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{BuildError, Result};
use crate::markup::Element;
use crate::toolkit::options::parse_bool;

/// Tag of the data-only children that carry list values.
pub const VALUE_TAG: &str = "value";

/// Attribute accessor for one element.
#[derive(Clone, Copy)]
pub struct Attrs<'a> {
    element: &'a Element,
}

impl<'a> Attrs<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    pub fn tag(&self) -> &'a str {
        &self.element.tag
    }

    /// Raw attribute text.
    pub fn raw(&self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.element.has_attr(name)
    }

    /// Attribute text as an owned string.
    pub fn string(&self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_owned)
    }

    /// Parse an attribute with its type's `FromStr`.
    pub fn parse<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_with(name, |raw| raw.trim().parse::<T>().map_err(|e| e.to_string()))
    }

    /// Parse a cell count.
    pub fn cells(&self, name: &str) -> Result<Option<u16>> {
        self.parse_with(name, |raw| {
            raw.trim()
                .parse::<u16>()
                .map_err(|_| "expected a non-negative integer".to_owned())
        })
    }

    /// Parse a grid span, which must be at least 1.
    pub fn span(&self, name: &str) -> Result<Option<u16>> {
        self.parse_with(name, |raw| match raw.trim().parse::<u16>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err("expected a positive integer".to_owned()),
        })
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>> {
        self.parse_with(name, |raw| match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err("expected a number".to_owned()),
        })
    }

    pub fn boolean(&self, name: &str) -> Result<Option<bool>> {
        self.parse_with(name, |raw| parse_bool(raw).map_err(|e| e.to_string()))
    }

    fn parse_with<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<Option<T>> {
        let Some(raw) = self.raw(name) else {
            return Ok(None);
        };
        parse(raw).map(Some).map_err(|message| BuildError::InvalidAttribute {
            tag: self.element.tag.clone(),
            attribute: name.to_owned(),
            value: raw.to_owned(),
            message,
        })
    }

    /// Fail when the element carries a `text` attribute: its text must come
    /// from element content instead.
    pub fn reject_text_attribute(&self) -> Result<()> {
        if self.has("text") {
            let tag = self.tag();
            return Err(BuildError::ConflictingAttributes {
                tag: tag.to_owned(),
                message: format!(
                    "text attribute found; correct usage is <{tag}>content</{tag}>"
                ),
            });
        }
        Ok(())
    }

    /// Element content (trimmed), if any.
    pub fn content(&self) -> Option<&'a str> {
        self.element.content()
    }

    /// Texts of the `<value>` children, in order. An empty `<value/>`
    /// contributes an empty string.
    pub fn values(&self) -> Vec<String> {
        self.element
            .children_named(VALUE_TAG)
            .map(|v| v.content().unwrap_or_default().to_owned())
            .collect()
    }
}
