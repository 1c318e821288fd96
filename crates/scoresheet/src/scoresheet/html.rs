//! Minimal HTML element tree.
//!
//! Just enough structure to build the score sheet without string
//! concatenation scattered over every card: elements carry classes,
//! attributes and children, and serialize deterministically.

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["br", "img", "meta"];

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Escaped text content.
    Text(String),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for an empty `div` with one class.
    #[must_use]
    pub fn div(class: &str) -> Self {
        Self::new("div").class(class)
    }

    /// Add a CSS class. Duplicates are ignored.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Add a CSS class in place.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    /// Set an attribute, replacing a previous value with the same name.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Append several child elements.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Append text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Serialize into `out`.
    pub fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Element(element) => element.render_into(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    /// Serialize to a new string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

/// Escape text content.
#[must_use]
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value.
#[must_use]
pub fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_rendering() {
        let html = Element::div("div-card")
            .attr("id", "div-set-1")
            .child(Element::new("span").class("cell").text("25"))
            .to_html();
        assert_eq!(
            html,
            r#"<div class="div-card" id="div-set-1"><span class="cell">25</span></div>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Element::new("span").text("A & B <C>").to_html();
        assert_eq!(html, "<span>A &amp; B &lt;C&gt;</span>");
    }

    #[test]
    fn test_attr_is_escaped_and_replaced() {
        let html = Element::new("a")
            .attr("href", "#x")
            .attr("href", "\"quoted\"")
            .to_html();
        assert_eq!(html, r#"<a href="&quot;quoted&quot;"></a>"#);
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let html = Element::new("img").attr("src", "data:x").to_html();
        assert_eq!(html, r#"<img src="data:x">"#);
        assert_eq!(Element::new("br").to_html(), "<br>");
    }

    #[test]
    fn test_duplicate_classes_are_ignored() {
        let element = Element::div("a").class("b").class("a").class("");
        assert_eq!(element.to_html(), r#"<div class="a b"></div>"#);
    }
}
