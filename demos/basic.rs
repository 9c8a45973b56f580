//! Basic Example - Mount, operate, rebuild
//!
//! This example demonstrates basic usage of the spark-treegraph adapter:
//! - Building a TreeNode hierarchy (here parsed from JSON)
//! - Mounting a TreeView on the markup reference engine
//! - Driving the rendered graph (collapse, layout, fit)
//!
//! Run with: cargo run --example basic

use std::rc::Rc;

use spark_treegraph::{Container, Direction, MarkupEngine, TreeNode, TreeView, TreeViewProps};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== spark-treegraph Basic Example ===\n");

    // Trees deserialize straight from JSON
    let data: TreeNode = serde_json::from_str(
        r#"{
            "id": "ceo",
            "name": "Ada",
            "children": [
                { "id": "eng", "name": "Grace", "children": [
                    { "id": "eng-1", "name": "Edsger" },
                    { "id": "eng-2", "name": "Barbara" }
                ]},
                { "id": "ops", "name": "Margaret" }
            ]
        }"#,
    )?;
    println!("Loaded {} nodes, depth {}", data.node_count(), data.depth());

    let engine = Rc::new(MarkupEngine::new());
    let view = TreeView::new(engine);
    let container = Container::new();

    let _on_ready = view.on_graph_ready(|event| {
        println!("graph ready (generation {})", event.generation);
    });

    view.mount(
        container.clone(),
        TreeViewProps {
            data: data.into(),
            ..Default::default()
        },
    )?;

    println!("\nRendered markup:\n{}", container.content());

    // Drive the live graph through the view
    println!("\n--- Collapsing engineering ---\n");
    view.collapse("eng");
    println!("{}", container.content());

    println!("\n--- Switching layout, fitting to container ---\n");
    view.change_layout(Direction::Left);
    view.fit_screen();
    println!("{}", container.content());

    view.unmount();
    assert!(container.is_empty());

    println!("\n=== Example Complete ===");
    Ok(())
}
