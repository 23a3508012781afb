//! Minimal element model for click interception.
//!
//! A [`ClickEvent`] carries the clicked element followed by its ancestors, so
//! [`ClickEvent::closest`] can find the nearest anchor flagged for in-app routing
//! even when the click landed on an icon inside it.

use std::collections::HashMap;

/// A document element: tag name plus attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: HashMap::new(),
        }
    }

    /// `<a href="...">`.
    pub fn anchor(href: impl Into<String>) -> Self {
        Self::new("a").with_attr("href", href)
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }
}

/// A click: target element first, then its ancestors up to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    path: Vec<Element>,
}

impl ClickEvent {
    pub fn new(target: Element) -> Self {
        Self { path: vec![target] }
    }

    /// Appends the next ancestor.
    #[must_use]
    pub fn within(mut self, ancestor: Element) -> Self {
        self.path.push(ancestor);
        self
    }

    pub fn target(&self) -> &Element {
        &self.path[0]
    }

    /// Nearest element (target included) satisfying `pred`.
    pub fn closest(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.path.iter().find(|el| pred(el))
    }
}
