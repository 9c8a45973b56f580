//! Template Bridge - Pure fragment templates to engine markup strings.
//!
//! Hosts author node and tooltip content as pure functions from a payload to
//! a list of [`Fragment`]s. The engine contract only understands
//! `(payload) -> String`, so [`bridge_template`] wraps a [`TemplateFn`] into
//! a [`RenderFn`] that instantiates the template fresh on every call and
//! serializes the result: a frozen snapshot with no live bindings.
//!
//! # Example
//!
//! ```ignore
//! use spark_treegraph::template::{bridge_template, Element, Fragment, TemplateFn};
//! use std::rc::Rc;
//!
//! let template: TemplateFn = Rc::new(|payload| {
//!     let name = payload["name"].as_str().unwrap_or("?").to_string();
//!     vec![Element::new("div")
//!         .attr("class", "card")
//!         .child(Element::new("strong").text(name))
//!         .into()]
//! });
//!
//! let render = bridge_template(template);
//! // render(&payload) -> "<div class=\"card\"><strong>Ada</strong></div>"
//! ```

use std::rc::Rc;

use serde_json::Value;

use crate::options::RenderFn;

// =============================================================================
// Fragments
// =============================================================================

/// Template output: a pure function from payload to fragments.
pub type TemplateFn = Rc<dyn Fn(&Value) -> Vec<Fragment>>;

/// One top-level piece of template output.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// An element, serialized with its full markup.
    Element(Element),
    /// Bare text. At top level it is emitted exactly as produced; inside an
    /// element it is escaped during serialization.
    Text(String),
    /// A comment. Contributes nothing to the output.
    Comment(String),
}

impl Fragment {
    /// Create a text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a comment fragment.
    pub fn comment(comment: impl Into<String>) -> Self {
        Self::Comment(comment.into())
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Fragment>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child fragment.
    pub fn child(mut self, child: impl Into<Fragment>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Fragment::Text(text.into()));
        self
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Wrap a fragment template into the engine's markup callback.
///
/// The returned callback instantiates the template fresh per invocation and
/// walks the top-level fragments in order: elements contribute their full
/// serialized markup, text contributes its content as produced, comments
/// contribute nothing. A template yielding no usable output produces `""`.
/// Panics inside the template propagate to the engine's call site.
pub fn bridge_template(template: TemplateFn) -> RenderFn {
    Rc::new(move |payload: &Value| render_fragments(&template(payload)))
}

fn render_fragments(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Element(element) => serialize_element(element, &mut out),
            Fragment::Text(text) => out.push_str(text),
            Fragment::Comment(_) => {}
        }
    }
    out
}

fn serialize_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }

    for child in &element.children {
        match child {
            Fragment::Element(nested) => serialize_element(nested, out),
            Fragment::Text(text) => out.push_str(&escape_html(text)),
            Fragment::Comment(_) => {}
        }
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_element_markup() {
        let template: TemplateFn = Rc::new(|payload| {
            let name = payload["name"].as_str().unwrap_or("").to_string();
            vec![Element::new("div")
                .attr("class", "node-card")
                .attr("data-role", "label")
                .text(name)
                .into()]
        });
        let render = bridge_template(template);

        let html = render(&json!({ "name": "Ada" }));
        assert_eq!(html, "<div class=\"node-card\" data-role=\"label\">Ada</div>");
    }

    #[test]
    fn test_nested_elements() {
        let template: TemplateFn = Rc::new(|_payload| {
            vec![Element::new("div")
                .child(Element::new("strong").text("Title"))
                .child(Element::new("span").attr("class", "sub").text("detail"))
                .into()]
        });
        let render = bridge_template(template);

        assert_eq!(
            render(&Value::Null),
            "<div><strong>Title</strong><span class=\"sub\">detail</span></div>"
        );
    }

    #[test]
    fn test_top_level_text_is_raw_nested_text_is_escaped() {
        let template: TemplateFn = Rc::new(|_payload| {
            vec![
                Fragment::text("a < b & "),
                Element::new("em").text("c < d").into(),
            ]
        });
        let render = bridge_template(template);

        assert_eq!(render(&Value::Null), "a < b & <em>c &lt; d</em>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let template: TemplateFn = Rc::new(|_payload| {
            vec![Element::new("div").attr("title", "say \"hi\" & <go>").into()]
        });
        let render = bridge_template(template);

        assert_eq!(
            render(&Value::Null),
            "<div title=\"say &quot;hi&quot; &amp; &lt;go&gt;\"></div>"
        );
    }

    #[test]
    fn test_comments_contribute_nothing() {
        let template: TemplateFn = Rc::new(|_payload| {
            vec![
                Fragment::comment("top level"),
                Element::new("p")
                    .child(Fragment::comment("nested"))
                    .text("body")
                    .into(),
            ]
        });
        let render = bridge_template(template);

        assert_eq!(render(&Value::Null), "<p>body</p>");
    }

    #[test]
    fn test_empty_template_yields_empty_string() {
        let template: TemplateFn = Rc::new(|_payload| vec![Fragment::comment("nothing here")]);
        let render = bridge_template(template);

        assert_eq!(render(&Value::Null), "");

        let empty: TemplateFn = Rc::new(|_payload| Vec::new());
        assert_eq!(bridge_template(empty)(&Value::Null), "");
    }

    #[test]
    fn test_void_elements() {
        let template: TemplateFn = Rc::new(|_payload| {
            vec![Element::new("div")
                .text("a")
                .child(Element::new("br"))
                .text("b")
                .into()]
        });
        let render = bridge_template(template);

        assert_eq!(render(&Value::Null), "<div>a<br>b</div>");
    }

    #[test]
    fn test_fresh_instantiation_per_call() {
        thread_local! {
            static CALLS: Cell<u32> = const { Cell::new(0) };
        }
        let template: TemplateFn = Rc::new(|payload| {
            CALLS.with(|c| c.set(c.get() + 1));
            vec![Fragment::text(payload["n"].to_string())]
        });
        let render = bridge_template(template);

        assert_eq!(render(&json!({ "n": 1 })), "1");
        assert_eq!(render(&json!({ "n": 2 })), "2");
        assert_eq!(CALLS.with(|c| c.get()), 2);
    }

    #[test]
    #[should_panic(expected = "template blew up")]
    fn test_template_panic_propagates() {
        let template: TemplateFn = Rc::new(|_payload| panic!("template blew up"));
        let render = bridge_template(template);
        let _ = render(&Value::Null);
    }
}
