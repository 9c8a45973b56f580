//! Markup Engine - Reference implementation of the engine contract.
//!
//! Renders the tree as nested markup into its container. There is no layout
//! math and no drawing; the point is a realistic engine for demos and tests
//! that exercises every contract method, including the options callbacks.
//!
//! Template callbacks receive the node as a JSON payload of the shape
//! `{"id": ..., "name": ..., "data": ...}`. Without a node template the
//! display text comes from the payload field named by `content_key`
//! (default `"name"`), falling back to the node's name and then its id.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde_json::{Value, json};
use tracing::trace;

use super::container::Container;
use super::{EngineInstance, TreeEngine, TreeGraph};
use crate::error::EngineError;
use crate::options::TreeOptions;
use crate::template::escape_html;
use crate::types::{Direction, InputEvent, TreeNode};

// =============================================================================
// Engine
// =============================================================================

/// Reference engine. Keeps a handle to the most recently rendered graph so
/// demos and tests can reach the concrete [`MarkupGraph`] behind the
/// `dyn TreeGraph` the adapter exposes.
pub struct MarkupEngine {
    graph_slot: Rc<RefCell<Option<Rc<MarkupGraph>>>>,
}

impl MarkupEngine {
    pub fn new() -> Self {
        Self {
            graph_slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Graph handle from the most recent render. Stale after the adapter
    /// tears its instance down.
    pub fn graph(&self) -> Option<Rc<MarkupGraph>> {
        self.graph_slot.borrow().clone()
    }
}

impl Default for MarkupEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeEngine for MarkupEngine {
    fn construct(
        &self,
        container: &Container,
        options: TreeOptions,
    ) -> Result<Box<dyn EngineInstance>, EngineError> {
        if !container.is_live() {
            return Err(EngineError::Construct("container is not live".into()));
        }
        Ok(Box::new(MarkupInstance {
            container: container.clone(),
            options,
            graph_slot: self.graph_slot.clone(),
        }))
    }
}

struct MarkupInstance {
    container: Container,
    options: TreeOptions,
    graph_slot: Rc<RefCell<Option<Rc<MarkupGraph>>>>,
}

impl EngineInstance for MarkupInstance {
    fn render(&mut self, root: &TreeNode) -> Result<Rc<dyn TreeGraph>, EngineError> {
        if root.id.is_empty() {
            return Err(EngineError::Render("root node id is empty".into()));
        }

        let direction = self.options.direction.unwrap_or_default();
        let graph = Rc::new(MarkupGraph {
            container: self.container.clone(),
            options: self.options.clone(),
            root: root.clone(),
            state: RefCell::new(GraphState {
                direction,
                hidden: HashSet::new(),
                fitted: false,
            }),
        });
        graph.redraw();

        *self.graph_slot.borrow_mut() = Some(graph.clone());
        Ok(graph)
    }
}

// =============================================================================
// Graph Handle
// =============================================================================

struct GraphState {
    direction: Direction,
    /// Nodes whose children are currently collapsed away.
    hidden: HashSet<String>,
    fitted: bool,
}

/// Live control surface for a rendered markup tree.
pub struct MarkupGraph {
    container: Container,
    options: TreeOptions,
    root: TreeNode,
    state: RefCell<GraphState>,
}

impl MarkupGraph {
    /// Simulate a user click on a node. Invokes the `on_node_click` callback
    /// from the options this graph was rendered with. Returns whether a
    /// callback fired.
    pub fn click(&self, node_id: &str, event: InputEvent) -> bool {
        let Some(on_click) = &self.options.on_node_click else {
            trace!(node_id, "click ignored: no callback configured");
            return false;
        };
        let Some(node) = self.root.find(node_id) else {
            trace!(node_id, "click ignored: unknown node");
            return false;
        };
        on_click(node, &event);
        true
    }

    fn redraw(&self) {
        let markup = {
            let state = self.state.borrow();
            self.render_markup(&state)
        };
        self.container.set_content(markup);
    }

    fn render_markup(&self, state: &GraphState) -> String {
        let mut out = String::new();

        out.push_str("<div class=\"treegraph");
        if let Some(class) = &self.options.container_class_name {
            out.push(' ');
            out.push_str(&escape_html(class));
        }
        out.push_str("\" data-direction=\"");
        out.push_str(state.direction.as_str());
        out.push('"');
        if state.fitted {
            out.push_str(" data-fitted=\"true\"");
        }
        if let Some(style) = &self.options.canvas_style {
            out.push_str(" style=\"");
            out.push_str(&escape_html(style));
            out.push('"');
        }
        out.push('>');

        self.push_node(&self.root, state, &mut out);

        out.push_str("</div>");
        out
    }

    fn push_node(&self, node: &TreeNode, state: &GraphState, out: &mut String) {
        let collapsed = state.hidden.contains(&node.id);

        out.push_str("<div class=\"treegraph-node");
        if let Some(class) = &self.options.node_class_name {
            out.push(' ');
            out.push_str(&escape_html(class));
        }
        out.push_str("\" data-id=\"");
        out.push_str(&escape_html(&node.id));
        out.push('"');
        if collapsed {
            out.push_str(" data-collapsed=\"true\"");
        }
        if let Some(style) = node_style_attr(node) {
            out.push_str(" style=\"");
            out.push_str(&escape_html(&style));
            out.push('"');
        }
        if self.options.enable_tooltip == Some(true)
            && let Some(template) = &self.options.tooltip_template
        {
            let tooltip = template(&node_payload(node));
            out.push_str(" data-tooltip=\"");
            out.push_str(&escape_html(&tooltip));
            out.push('"');
        }
        out.push('>');

        out.push_str("<span class=\"treegraph-label\">");
        match &self.options.node_template {
            // Template output is markup and lands in the container as-is
            Some(template) => out.push_str(&template(&node_payload(node))),
            None => out.push_str(&escape_html(&self.node_text(node))),
        }
        out.push_str("</span>");

        if !collapsed {
            for child in &node.children {
                self.push_node(child, state, out);
            }
        }

        out.push_str("</div>");
    }

    fn node_text(&self, node: &TreeNode) -> String {
        let content_key = self.options.content_key.as_deref().unwrap_or("name");
        if content_key != "name"
            && let Some(data) = &node.data
            && let Some(value) = data.get(content_key)
        {
            return match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
        }
        node.name.clone().unwrap_or_else(|| node.id.clone())
    }
}

fn node_payload(node: &TreeNode) -> Value {
    json!({
        "id": node.id,
        "name": node.name,
        "data": node.data,
    })
}

fn node_style_attr(node: &TreeNode) -> Option<String> {
    let style = node.style.as_ref()?;
    let mut css = String::new();
    if let Some(bg) = &style.bg_color {
        css.push_str("background:");
        css.push_str(bg);
        css.push(';');
    }
    if let Some(color) = &style.font_color {
        css.push_str("color:");
        css.push_str(color);
        css.push(';');
    }
    if let Some(border) = &style.border_color {
        css.push_str("border-color:");
        css.push_str(border);
        css.push(';');
    }
    if css.is_empty() { None } else { Some(css) }
}

impl TreeGraph for MarkupGraph {
    fn change_layout(&self, direction: Direction) {
        self.state.borrow_mut().direction = direction;
        self.redraw();
    }

    fn collapse(&self, node_id: &str) {
        // Unknown ids are tolerated: the marker simply never matches a node
        self.state.borrow_mut().hidden.insert(node_id.to_string());
        self.redraw();
    }

    fn expand(&self, node_id: &str) {
        self.state.borrow_mut().hidden.remove(node_id);
        self.redraw();
    }

    fn fit_screen(&self) {
        self.state.borrow_mut().fitted = true;
        self.redraw();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn render(
        options: TreeOptions,
        root: &TreeNode,
    ) -> (Container, Rc<dyn TreeGraph>, MarkupEngine) {
        let engine = MarkupEngine::new();
        let container = Container::new();
        let mut instance = engine.construct(&container, options).unwrap();
        let graph = instance.render(root).unwrap();
        (container, graph, engine)
    }

    fn sample_tree() -> TreeNode {
        TreeNode::named("root", "Root")
            .with_children(vec![TreeNode::named("a", "Alpha"), TreeNode::new("b")])
    }

    #[test]
    fn test_renders_nested_markup() {
        let (container, _graph, _engine) = render(TreeOptions::default(), &sample_tree());
        let content = container.content();

        assert!(content.contains("data-direction=\"top\""));
        assert!(content.contains("data-id=\"root\""));
        assert!(content.contains("data-id=\"a\""));
        assert!(content.contains(">Alpha</span>"));
        // No name, so the id is the label
        assert!(content.contains(">b</span>"));
    }

    #[test]
    fn test_content_key_lookup() {
        let options = TreeOptions {
            content_key: Some("title".into()),
            ..Default::default()
        };
        let root = TreeNode::named("n1", "ignored").with_data(json!({ "title": "From Data" }));
        let (container, _graph, _engine) = render(options, &root);

        assert!(container.content().contains(">From Data</span>"));
    }

    #[test]
    fn test_node_template_overrides_text() {
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let options = TreeOptions {
            node_template: Some(Rc::new(move |payload: &Value| {
                calls_clone.set(calls_clone.get() + 1);
                format!("<b>{}</b>", payload["id"].as_str().unwrap_or(""))
            })),
            ..Default::default()
        };
        let (container, _graph, _engine) = render(options, &sample_tree());

        assert!(container.content().contains("<b>root</b>"));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_collapse_and_expand() {
        let (container, graph, _engine) = render(TreeOptions::default(), &sample_tree());

        graph.collapse("root");
        let collapsed = container.content();
        assert!(collapsed.contains("data-collapsed=\"true\""));
        assert!(!collapsed.contains("data-id=\"a\""));

        graph.expand("root");
        assert!(container.content().contains("data-id=\"a\""));
    }

    #[test]
    fn test_change_layout_and_fit() {
        let (container, graph, _engine) = render(TreeOptions::default(), &sample_tree());

        graph.change_layout(Direction::Left);
        assert!(container.content().contains("data-direction=\"left\""));

        graph.fit_screen();
        assert!(container.content().contains("data-fitted=\"true\""));
    }

    #[test]
    fn test_click_dispatches_configured_callback() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let clicked_clone = clicked.clone();
        let options = TreeOptions {
            on_node_click: Some(Rc::new(move |node: &TreeNode, event: &InputEvent| {
                clicked_clone.borrow_mut().push((node.id.clone(), event.x));
            })),
            ..Default::default()
        };
        let (_container, _graph, engine) = render(options, &sample_tree());
        let graph = engine.graph().unwrap();

        assert!(graph.click("a", InputEvent::pointer(7, 3)));
        assert!(!graph.click("missing", InputEvent::synthetic()));
        assert_eq!(clicked.borrow().as_slice(), &[("a".to_string(), 7)]);
    }

    #[test]
    fn test_click_without_callback_is_ignored() {
        let (_container, _graph, engine) = render(TreeOptions::default(), &sample_tree());
        assert!(!engine.graph().unwrap().click("a", InputEvent::synthetic()));
    }

    #[test]
    fn test_tooltip_attribute() {
        let options = TreeOptions {
            enable_tooltip: Some(true),
            tooltip_template: Some(Rc::new(|payload: &Value| {
                format!("<i>{}</i>", payload["name"].as_str().unwrap_or(""))
            })),
            ..Default::default()
        };
        let (container, _graph, _engine) = render(options, &sample_tree());

        assert!(container.content().contains("data-tooltip=\"&lt;i&gt;Root&lt;/i&gt;\""));
    }

    #[test]
    fn test_construct_rejects_inert_container() {
        let engine = MarkupEngine::new();
        let result = engine.construct(&Container::inert(), TreeOptions::default());
        assert!(matches!(result, Err(EngineError::Construct(_))));
    }

    #[test]
    fn test_render_rejects_empty_root_id() {
        let engine = MarkupEngine::new();
        let mut instance = engine
            .construct(&Container::new(), TreeOptions::default())
            .unwrap();
        assert!(matches!(
            instance.render(&TreeNode::new("")),
            Err(EngineError::Render(_))
        ));
    }
}
