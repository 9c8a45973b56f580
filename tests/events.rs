//! Event test for the engine-to-host notification path.
//!
//! Drives real click callbacks through the markup reference engine:
//! - Observers receive the clicked node and the native event unchanged
//! - Click injection follows observer registration across rebuilds
//! - last_click and generation signals feed ordinary effects
//!
//! Run with: cargo test --test events

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{effect, flush_sync};
use spark_treegraph::{
    Container, InputEvent, MarkupEngine, Modifiers, TreeNode, TreeView, TreeViewProps,
};

// =============================================================================
// HELPERS
// =============================================================================

fn sample_tree() -> TreeNode {
    TreeNode::named("1", "Root").with_children(vec![
        TreeNode::named("2", "Left"),
        TreeNode::named("9", "Right"),
    ])
}

fn mount(view: &TreeView, container: Container) {
    view.mount(
        container,
        TreeViewProps {
            data: sample_tree().into(),
            ..Default::default()
        },
    )
    .unwrap();
}

// =============================================================================
// CLICK DELIVERY
// =============================================================================

#[test]
fn click_reaches_observer_with_node_and_event() {
    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine.clone());

    let clicks = Rc::new(RefCell::new(Vec::new()));
    let clicks_clone = clicks.clone();
    let _cleanup = view.on_node_click(move |click| {
        clicks_clone
            .borrow_mut()
            .push((click.node.id.clone(), click.node.name.clone(), click.event));
    });

    mount(&view, Container::new());

    let event = InputEvent::pointer(12, 34).with_modifiers(Modifiers::ctrl());
    assert!(engine.graph().unwrap().click("9", event));

    let clicks = clicks.borrow();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].0, "9");
    assert_eq!(clicks[0].1.as_deref(), Some("Right"));
    // The native event passes through untouched
    assert_eq!(clicks[0].2, event);
}

#[test]
fn engine_has_no_click_callback_without_observers() {
    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine.clone());
    mount(&view, Container::new());

    assert!(!engine.graph().unwrap().click("9", InputEvent::synthetic()));
}

#[test]
fn cleanup_detaches_observer_and_next_rebuild_drops_injection() {
    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine.clone());

    let clicks = Rc::new(RefCell::new(0u32));
    let clicks_clone = clicks.clone();
    let cleanup = view.on_node_click(move |_| *clicks_clone.borrow_mut() += 1);

    mount(&view, Container::new());
    assert!(engine.graph().unwrap().click("9", InputEvent::synthetic()));
    assert_eq!(*clicks.borrow(), 1);

    cleanup();

    // The already-rendered graph still carries the injected dispatcher, but
    // it finds no handlers behind it
    assert!(engine.graph().unwrap().click("9", InputEvent::synthetic()));
    assert_eq!(*clicks.borrow(), 1);

    // The next rebuild recomputes the injection and leaves it out
    view.render().unwrap();
    assert!(!engine.graph().unwrap().click("9", InputEvent::synthetic()));
}

// =============================================================================
// SIGNALS
// =============================================================================

#[test]
fn last_click_signal_feeds_effects() {
    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine.clone());
    let _cleanup = view.on_node_click(|_| {});
    mount(&view, Container::new());

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let last_click = view.last_click();
    let _stop = effect(move || {
        if let Some(click) = last_click.get() {
            seen_clone.borrow_mut().push(click.node.id);
        }
    });
    flush_sync();
    assert!(seen.borrow().is_empty());

    engine.graph().unwrap().click("2", InputEvent::pointer(0, 0));
    flush_sync();
    engine.graph().unwrap().click("9", InputEvent::pointer(5, 5));
    flush_sync();

    assert_eq!(seen.borrow().as_slice(), &["2".to_string(), "9".to_string()]);
}

#[test]
fn generation_signal_counts_successful_renders() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));
    let generation = view.graph_generation();
    assert_eq!(generation.get(), 0);

    mount(&view, Container::new());
    assert_eq!(generation.get(), 1);

    view.set_data(Some(Rc::new(sample_tree()))).unwrap();
    assert_eq!(generation.get(), 2);

    // A null-data teardown is not a render
    view.set_data(None).unwrap();
    assert_eq!(generation.get(), 2);

    view.set_data(Some(Rc::new(sample_tree()))).unwrap();
    assert_eq!(generation.get(), 3);
}

#[test]
fn ready_fires_once_then_updates_follow() {
    let view = TreeView::new(Rc::new(MarkupEngine::new()));

    let log = Rc::new(RefCell::new(Vec::new()));
    let log_clone = log.clone();
    let _c1 = view.on_graph_ready(move |e| log_clone.borrow_mut().push(("ready", e.generation)));
    let log_clone = log.clone();
    let _c2 =
        view.on_graph_updated(move |e| log_clone.borrow_mut().push(("updated", e.generation)));

    mount(&view, Container::new());
    view.set_data(Some(Rc::new(sample_tree()))).unwrap();
    view.set_data(Some(Rc::new(sample_tree()))).unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        &[("ready", 1), ("updated", 2), ("updated", 3)]
    );
}
