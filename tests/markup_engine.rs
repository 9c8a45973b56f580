//! End-to-end test through the markup reference engine.
//!
//! Mounts real views and drives them the way a host would:
//! - Declarative node templates rendered per node with the JSON payload
//! - Tooltip markup attached when enabled
//! - Graph operations reflected in the rendered markup
//!
//! Run with: cargo test --test markup_engine

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{Value, json};
use spark_treegraph::{
    Container, Direction, Element, Fragment, MarkupEngine, TreeNode, TreeOptions, TreeView,
    TreeViewProps, ViewState,
};

#[test]
fn default_options_render_small_tree() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let container = Container::new();

    let ready = Rc::new(Cell::new(0));
    let ready_clone = ready.clone();
    let _c = view.on_graph_ready(move |_| ready_clone.set(ready_clone.get() + 1));

    let data = TreeNode::new("1").with_children(vec![TreeNode::new("2"), TreeNode::new("3")]);
    view.mount(
        container.clone(),
        TreeViewProps {
            data: data.into(),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(ready.get(), 1);
    assert!(view.graph().is_some());

    let content = container.content();
    assert!(content.contains("data-id=\"1\""));
    assert!(content.contains("data-id=\"2\""));
    assert!(content.contains("data-id=\"3\""));
}

#[test]
fn node_template_renders_payload_markup() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let container = Container::new();

    view.mount(
        container.clone(),
        TreeViewProps {
            data: TreeNode::named("ceo", "Ada")
                .with_data(json!({ "title": "CEO" }))
                .into(),
            node_template: Some(Rc::new(|payload: &Value| {
                vec![
                    Element::new("div")
                        .attr("class", "card")
                        .child(Element::new("strong").text(payload["name"].as_str().unwrap_or("")))
                        .child(Fragment::text(
                            payload["data"]["title"].as_str().unwrap_or(""),
                        ))
                        .into(),
                ]
            })),
            ..Default::default()
        },
    )
    .unwrap();

    let content = container.content();
    assert!(content.contains("<div class=\"card\"><strong>Ada</strong>CEO</div>"));
}

#[test]
fn tooltip_template_attaches_when_enabled() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let container = Container::new();

    view.mount(
        container.clone(),
        TreeViewProps {
            data: TreeNode::named("a", "Alpha").into(),
            options: TreeOptions {
                enable_tooltip: Some(true),
                ..Default::default()
            }
            .into(),
            tooltip_template: Some(Rc::new(|payload: &Value| {
                vec![
                    Element::new("em")
                        .text(payload["name"].as_str().unwrap_or(""))
                        .into(),
                ]
            })),
            ..Default::default()
        },
    )
    .unwrap();

    // Tooltip markup is stored escaped inside the attribute
    assert!(container
        .content()
        .contains("data-tooltip=\"&lt;em&gt;Alpha&lt;/em&gt;\""));
}

#[test]
fn view_ops_update_rendered_markup() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let container = Container::new();

    let data = TreeNode::named("root", "Root")
        .with_children(vec![TreeNode::named("a", "Alpha"), TreeNode::named("b", "Beta")]);
    view.mount(
        container.clone(),
        TreeViewProps {
            data: data.into(),
            ..Default::default()
        },
    )
    .unwrap();

    view.collapse("root");
    let collapsed = container.content();
    assert!(collapsed.contains("data-collapsed=\"true\""));
    assert!(!collapsed.contains("data-id=\"a\""));

    view.expand("root");
    assert!(container.content().contains("data-id=\"a\""));

    view.change_layout(Direction::Right);
    assert!(container.content().contains("data-direction=\"right\""));

    view.fit_screen();
    assert!(container.content().contains("data-fitted=\"true\""));
}

#[test]
fn null_data_clears_markup_but_view_stays_usable() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let container = Container::new();

    view.mount(
        container.clone(),
        TreeViewProps {
            data: TreeNode::named("root", "Root").into(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!container.is_empty());

    view.set_data(None).unwrap();
    assert!(container.is_empty());
    assert!(view.graph().is_none());
    assert_eq!(view.state(), ViewState::Ready);

    view.set_data(Some(Rc::new(TreeNode::named("root", "Back")))).unwrap();
    assert!(container.content().contains(">Back</span>"));
}
