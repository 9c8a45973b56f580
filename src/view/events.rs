//! Event Bridge - Outbound notifications from the rendered graph.
//!
//! Per-view handler registry plus reactive signals for the latest values.
//! The bridge carries three streams:
//!
//! - `click` - A node was clicked inside the engine
//! - `ready` - The first render since mount completed
//! - `updated` - A later rebuild completed
//!
//! Handlers run synchronously on dispatch. Signals (`last_click`,
//! `generation`) update before handlers run, so a handler reading them sees
//! the value for the event it is handling.
//!
//! # Example
//!
//! ```ignore
//! let cleanup = view.on_node_click(|click| {
//!     println!("clicked {}", click.node.id);
//! });
//!
//! // Later: detach
//! cleanup();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::debug;

use super::props::Cleanup;
use crate::types::NodeClickEvent;

// =============================================================================
// TYPES
// =============================================================================

/// Payload for `ready` and `updated` notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEvent {
    /// Render generation, counted from 1 for the first successful render.
    pub generation: u64,
}

type ClickHandler = Rc<dyn Fn(&NodeClickEvent)>;
type GraphHandler = Rc<dyn Fn(&GraphEvent)>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct Handlers {
    click: Vec<(usize, ClickHandler)>,
    ready: Vec<(usize, GraphHandler)>,
    updated: Vec<(usize, GraphHandler)>,
    next_id: usize,
}

impl Handlers {
    fn new() -> Self {
        Self {
            click: Vec::new(),
            ready: Vec::new(),
            updated: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

// =============================================================================
// EVENT BRIDGE
// =============================================================================

/// Handler registry and reactive state for one view's outbound events.
///
/// Cloning shares the registry, so the view and the closures it injects into
/// the engine all dispatch into the same handlers.
#[derive(Clone)]
pub struct EventBridge {
    inner: Rc<RefCell<Handlers>>,
    last_click: Signal<Option<NodeClickEvent>>,
    generation: Signal<u64>,
    // Non-reactive render counter. Dispatch happens inside the view's prop
    // effects, so the notification path must only write signals, never read
    // them, or the effect would pick up a dependency on its own output.
    render_count: Rc<Cell<u64>>,
}

impl EventBridge {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Handlers::new())),
            last_click: signal(None),
            generation: signal(0),
            render_count: Rc::new(Cell::new(0)),
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Subscribe to node clicks. Returns cleanup function.
    pub fn on_click<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&NodeClickEvent) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.click.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        Box::new(move || {
            inner
                .borrow_mut()
                .click
                .retain(|(handler_id, _)| *handler_id != id);
        })
    }

    /// Subscribe to the first-render notification. Returns cleanup function.
    pub fn on_ready<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&GraphEvent) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.ready.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        Box::new(move || {
            inner
                .borrow_mut()
                .ready
                .retain(|(handler_id, _)| *handler_id != id);
        })
    }

    /// Subscribe to rebuild notifications. Returns cleanup function.
    pub fn on_updated<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&GraphEvent) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.updated.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        Box::new(move || {
            inner
                .borrow_mut()
                .updated
                .retain(|(handler_id, _)| *handler_id != id);
        })
    }

    /// Whether anyone is listening for clicks. The view only injects a click
    /// callback into the engine options when this is true.
    pub fn has_click_observers(&self) -> bool {
        !self.inner.borrow().click.is_empty()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatch a node click to all click handlers.
    ///
    /// Updates `last_click` first so handlers reading the signal see this
    /// click. Handlers are snapshotted before invocation; one of them
    /// subscribing or unsubscribing mid-dispatch is fine and takes effect
    /// from the next dispatch.
    pub fn dispatch_click(&self, event: NodeClickEvent) {
        self.last_click.set(Some(event.clone()));

        let handlers: Vec<ClickHandler> = {
            let inner = self.inner.borrow();
            inner.click.iter().map(|(_, h)| h.clone()).collect()
        };
        for handler in handlers {
            handler(&event);
        }
    }

    /// Announce a completed render. `first` selects the `ready` stream,
    /// otherwise `updated`. Bumps the generation signal before dispatch.
    pub fn notify_render(&self, first: bool) {
        let generation = self.render_count.get() + 1;
        self.render_count.set(generation);
        self.generation.set(generation);
        let event = GraphEvent { generation };

        debug!(generation, first, "graph render complete");

        let handlers: Vec<GraphHandler> = {
            let inner = self.inner.borrow();
            let list = if first { &inner.ready } else { &inner.updated };
            list.iter().map(|(_, h)| h.clone()).collect()
        };
        for handler in handlers {
            handler(&event);
        }
    }

    /// Drop all handlers. Called on view destroy.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.click.clear();
        inner.ready.clear();
        inner.updated.clear();
    }

    // =========================================================================
    // Reactive State
    // =========================================================================

    /// Signal holding the most recent click, `None` before the first.
    pub fn last_click(&self) -> Signal<Option<NodeClickEvent>> {
        self.last_click.clone()
    }

    /// Signal counting successful renders since mount.
    pub fn generation(&self) -> Signal<u64> {
        self.generation.clone()
    }
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
