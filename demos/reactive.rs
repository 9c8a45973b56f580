//! Reactive Example - Signals and automatic rebuilds
//!
//! This example demonstrates the reactive side of spark-treegraph:
//! - Mounting with signal-bound data and options props
//! - Replacing a prop value and flushing to trigger a rebuild
//! - Observing clicks and render generations
//!
//! Run with: cargo run --example reactive

use std::rc::Rc;

use spark_signals::{flush_sync, signal};
use spark_treegraph::{
    Container, Direction, InputEvent, MarkupEngine, TreeNode, TreeOptions, TreeView,
    TreeViewProps,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== spark-treegraph Reactive Example ===\n");

    // Reactive props: the view subscribes to both signals on mount
    let data = signal(Some(Rc::new(
        TreeNode::named("root", "Mission Control").with_children(vec![
            TreeNode::named("nav", "Navigation"),
            TreeNode::named("com", "Communications"),
        ]),
    )));
    let options = signal(Rc::new(TreeOptions {
        direction: Some(Direction::Top),
        ..Default::default()
    }));

    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine.clone());
    let container = Container::new();

    let _on_updated = view.on_graph_updated(|event| {
        println!("graph updated (generation {})", event.generation);
    });
    let _on_click = view.on_node_click(|click| {
        println!(
            "clicked node {} at ({}, {})",
            click.node.id, click.event.x, click.event.y
        );
    });

    view.mount(
        container.clone(),
        TreeViewProps {
            data: data.clone().into(),
            options: options.clone().into(),
            ..Default::default()
        },
    )?;
    println!("Mounted, generation {}", view.graph_generation().get());

    // Replacing the data Rc rebuilds the graph on the next flush
    println!("\n--- Swapping data ---\n");
    data.set(Some(Rc::new(
        TreeNode::named("root", "Mission Control").with_children(vec![
            TreeNode::named("nav", "Navigation"),
            TreeNode::named("com", "Communications"),
            TreeNode::named("sci", "Science"),
        ]),
    )));
    flush_sync();
    println!("{}", container.content());

    // Options swaps rebuild too
    println!("\n--- Switching layout through options ---\n");
    options.set(Rc::new(TreeOptions {
        direction: Some(Direction::Left),
        ..Default::default()
    }));
    flush_sync();
    println!("{}", container.content());

    // Simulate a pointer click inside the engine
    println!("\n--- Simulating a click ---\n");
    if let Some(graph) = engine.graph() {
        graph.click("sci", InputEvent::pointer(18, 4));
    }

    view.unmount();

    println!("\n=== Reactive updates work! ===");
    Ok(())
}
