//! # spark-treegraph
//!
//! Reactive tree-graph adapter for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! spark-treegraph sits between declarative host code and an imperative
//! tree-rendering engine that only knows construct/render/destroy. The host
//! hands over data and options (static or reactive); the adapter owns the
//! engine's lifecycle and rebuilds it from scratch on every change:
//!
//! ```text
//! data/options props → TreeView → teardown + construct + render → notifications
//! ```
//!
//! Templates are bridged as pure `(payload) -> markup` functions, and engine
//! callbacks are forwarded through an event bridge with both handler and
//! signal APIs. [`MarkupEngine`] ships as the reference engine; real
//! integrations implement [`TreeEngine`] over whatever actually draws.
//!
//! ## Modules
//!
//! - [`types`] - Tree data model (TreeNode, Direction, input events)
//! - [`options`] - Engine options bag and the merge step
//! - [`template`] - Declarative fragments bridged to markup strings
//! - [`engine`] - The engine contract and the markup reference engine
//! - [`view`] - TreeView lifecycle, props, event bridge

pub mod engine;
pub mod error;
pub mod options;
pub mod template;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use error::{EngineError, TreeError, TreeResult};

pub use options::{merge_options, ClickFn, MergeContext, RenderFn, TreeOptions};

pub use template::{bridge_template, Element, Fragment, TemplateFn};

pub use engine::{
    Container, EngineInstance, MarkupEngine, MarkupGraph, TreeEngine, TreeGraph,
};

pub use view::{
    Cleanup, EventBridge, GraphEvent, PropValue, TreeView, TreeViewProps, ViewState,
};
