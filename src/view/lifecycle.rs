//! Tree View - Declarative lifecycle over an imperative tree engine.
//!
//! [`TreeView`] owns the engine instance and decides when it is built and
//! torn down. The engine has no update primitive, so every data or options
//! change is a full teardown-then-recreate:
//!
//! 1. Drop the old engine instance and clear the container
//! 2. If data is present, construct a new instance and render
//! 3. Notify subscribers of the completed render
//!
//! Change detection is identity-level: replacing the `Rc` triggers a
//! rebuild, mutating behind it does not. Missing data is not an error, the
//! view just stays torn down until data arrives.
//!
//! # Example
//!
//! ```ignore
//! use spark_treegraph::{Container, MarkupEngine, TreeNode, TreeView, TreeViewProps};
//! use std::rc::Rc;
//!
//! let view = TreeView::new(Rc::new(MarkupEngine::new()));
//! let container = Container::new();
//!
//! let _on_ready = view.on_graph_ready(|event| {
//!     println!("rendered generation {}", event.generation);
//! });
//!
//! view.mount(container.clone(), TreeViewProps {
//!     data: TreeNode::named("root", "Root").into(),
//!     ..Default::default()
//! })?;
//!
//! // Full teardown-then-recreate on every change
//! view.set_data(Some(Rc::new(TreeNode::named("root", "Renamed"))))?;
//!
//! view.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, effect};
use tracing::{debug, error, trace, warn};

use super::events::{EventBridge, GraphEvent};
use super::props::{Cleanup, TreeViewProps};
use crate::engine::{Container, EngineInstance, TreeEngine, TreeGraph};
use crate::error::{TreeError, TreeResult};
use crate::options::{ClickFn, MergeContext, TreeOptions, merge_options};
use crate::template::{TemplateFn, bridge_template};
use crate::types::{Direction, InputEvent, NodeClickEvent, TreeNode};

// =============================================================================
// View State
// =============================================================================

/// Lifecycle state of a [`TreeView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// No successful render yet. Covers both "not mounted" and "mounted but
    /// waiting for data".
    Uninitialized,
    /// At least one render succeeded since mount. Stays `Ready` even while
    /// torn down by a null-data change, so the next change rebuilds.
    Ready,
    /// Destroyed. Terminal, the view ignores further changes.
    Destroyed,
}

// =============================================================================
// Shared Inner State
// =============================================================================

struct ViewInner {
    state: ViewState,
    container: Option<Container>,
    data: Option<Rc<TreeNode>>,
    options: Rc<TreeOptions>,
    node_template: Option<TemplateFn>,
    tooltip_template: Option<TemplateFn>,
    instance: Option<Box<dyn EngineInstance>>,
    graph: Option<Rc<dyn TreeGraph>>,
    last_error: Option<TreeError>,
}

/// Tear down the rendered graph. Dropping the instance is the engine's
/// teardown signal; the container is cleared afterwards, unconditionally.
fn teardown_locked(inner: &mut ViewInner) {
    inner.graph = None;
    inner.instance = None;
    if let Some(container) = &inner.container {
        container.clear();
    }
}

fn same_data(a: &Option<Rc<TreeNode>>, b: &Option<Rc<TreeNode>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Cloneable core shared between the view and its reactive prop effects.
#[derive(Clone)]
struct ViewCore {
    engine: Rc<dyn TreeEngine>,
    inner: Rc<RefCell<ViewInner>>,
    events: EventBridge,
}

impl ViewCore {
    /// Replace the tree data. Identity-level comparison: a change is
    /// recorded only when the `Rc` itself differs.
    fn set_data(&self, data: Option<Rc<TreeNode>>) -> TreeResult<()> {
        let (changed, mounted) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == ViewState::Destroyed {
                trace!("data change ignored: view destroyed");
                return Ok(());
            }
            let changed = !same_data(&inner.data, &data);
            if changed {
                inner.data = data;
            }
            (changed, inner.container.is_some())
        };

        if !changed {
            trace!("data change skipped: same tree reference");
            Ok(())
        } else if mounted {
            self.rebuild()
        } else {
            debug!("data recorded: view not mounted yet");
            Ok(())
        }
    }

    /// Replace the options. Same identity rules as [`ViewCore::set_data`].
    fn set_options(&self, options: Rc<TreeOptions>) -> TreeResult<()> {
        let (changed, mounted) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == ViewState::Destroyed {
                trace!("options change ignored: view destroyed");
                return Ok(());
            }
            let changed = !Rc::ptr_eq(&inner.options, &options);
            if changed {
                inner.options = options;
            }
            (changed, inner.container.is_some())
        };

        if !changed {
            trace!("options change skipped: same options reference");
            Ok(())
        } else if mounted {
            self.rebuild()
        } else {
            debug!("options recorded: view not mounted yet");
            Ok(())
        }
    }

    /// Run the full teardown-then-recreate cycle, then notify.
    ///
    /// The inner borrow is released before notification so handlers can call
    /// back into the view.
    fn rebuild(&self) -> TreeResult<()> {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            let result = self.rebuild_locked(&mut inner);
            if let Err(err) = &result {
                inner.last_error = Some(err.clone());
            }
            result
        };

        match outcome? {
            Some(first) => {
                self.events.notify_render(first);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// The rebuild itself. Returns `Ok(Some(first))` when a render
    /// completed, `Ok(None)` when there was nothing to render.
    fn rebuild_locked(&self, inner: &mut ViewInner) -> TreeResult<Option<bool>> {
        let Some(container) = inner.container.clone() else {
            return Err(TreeError::NotMounted);
        };
        // Inert containers (headless environments) are checked before any
        // teardown so existing output survives until a real rebuild can run
        if !container.is_live() {
            debug!("rebuild skipped: container is not live");
            return Ok(None);
        }

        teardown_locked(inner);

        let Some(data) = inner.data.clone() else {
            trace!("rebuild complete: no data, graph stays torn down");
            return Ok(None);
        };

        let duplicates = data.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "tree contains duplicate node ids, engine behavior is undefined");
        }

        let merged = self.build_options(inner);
        let mut instance = self.engine.construct(&container, merged)?;
        let graph = instance.render(&data)?;

        let first = inner.state == ViewState::Uninitialized;
        inner.instance = Some(instance);
        inner.graph = Some(graph);
        inner.state = ViewState::Ready;
        inner.last_error = None;
        Ok(Some(first))
    }

    /// Compose the options snapshot for the next engine constructor call.
    fn build_options(&self, inner: &ViewInner) -> TreeOptions {
        let ctx = MergeContext {
            node_template: inner.node_template.clone().map(bridge_template),
            tooltip_template: inner.tooltip_template.clone().map(bridge_template),
            // Only pay for the engine-side click plumbing when someone is
            // actually listening
            on_node_click: self.events.has_click_observers().then(|| {
                let events = self.events.clone();
                Rc::new(move |node: &TreeNode, event: &InputEvent| {
                    events.dispatch_click(NodeClickEvent {
                        node: node.clone(),
                        event: *event,
                    });
                }) as ClickFn
            }),
        };
        merge_options(&inner.options, &ctx)
    }

    fn destroy(&self) {
        let already_destroyed = {
            let mut inner = self.inner.borrow_mut();
            let already = inner.state == ViewState::Destroyed;
            teardown_locked(&mut inner);
            inner.state = ViewState::Destroyed;
            inner.data = None;
            inner.node_template = None;
            inner.tooltip_template = None;
            already
        };

        self.events.clear();
        if !already_destroyed {
            debug!("view destroyed");
        }
    }
}

// =============================================================================
// Tree View
// =============================================================================

/// The adapter: declarative data and options in, imperative engine calls out.
///
/// Holds:
/// - The engine, treated as a black box behind [`TreeEngine`]
/// - The current data/options snapshot and the live engine instance
/// - Stop functions for the reactive prop effects
pub struct TreeView {
    core: ViewCore,
    effect_stops: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl TreeView {
    pub fn new(engine: Rc<dyn TreeEngine>) -> Self {
        Self {
            core: ViewCore {
                engine,
                inner: Rc::new(RefCell::new(ViewInner {
                    state: ViewState::Uninitialized,
                    container: None,
                    data: None,
                    options: Rc::new(TreeOptions::default()),
                    node_template: None,
                    tooltip_template: None,
                    instance: None,
                    graph: None,
                    last_error: None,
                })),
                events: EventBridge::new(),
            },
            effect_stops: RefCell::new(Vec::new()),
        }
    }

    // =========================================================================
    // Mount / Unmount
    // =========================================================================

    /// Bind the view to a container and start tracking its props.
    ///
    /// This will:
    /// 1. Record the container and resolve templates
    /// 2. Snapshot the initial data/options values
    /// 3. Build immediately when data is present (missing data is fine, the
    ///    first build then waits for it)
    /// 4. Wire effects for signal/getter props so later changes rebuild
    ///
    /// An engine failure during the first build propagates, but the prop
    /// effects are wired regardless: the next change is a fresh attempt.
    ///
    /// Errors with [`TreeError::AlreadyMounted`] on a second mount and
    /// [`TreeError::Destroyed`] after [`TreeView::destroy`].
    pub fn mount(&self, container: Container, props: TreeViewProps) -> TreeResult<()> {
        {
            let mut inner = self.core.inner.borrow_mut();
            if inner.state == ViewState::Destroyed {
                return Err(TreeError::Destroyed);
            }
            if inner.container.is_some() {
                return Err(TreeError::AlreadyMounted);
            }
            inner.container = Some(container);
            inner.node_template = props.node_template.clone();
            inner.tooltip_template = props.tooltip_template.clone();
            inner.data = props.data.get();
            inner.options = props.options.get();
        }

        let built = self.core.rebuild();

        if props.data.is_reactive() {
            let core = self.core.clone();
            let prop = props.data.clone();
            let mut first_run = true;
            let stop = effect(move || {
                let data = prop.get();
                // First run only establishes the dependency, mount already
                // applied this value
                if std::mem::take(&mut first_run) {
                    return;
                }
                if let Err(err) = core.set_data(data) {
                    error!(error = %err, "reactive data update failed");
                }
            });
            self.effect_stops.borrow_mut().push(Box::new(stop));
        }

        if props.options.is_reactive() {
            let core = self.core.clone();
            let prop = props.options.clone();
            let mut first_run = true;
            let stop = effect(move || {
                let options = prop.get();
                if std::mem::take(&mut first_run) {
                    return;
                }
                if let Err(err) = core.set_options(options) {
                    error!(error = %err, "reactive options update failed");
                }
            });
            self.effect_stops.borrow_mut().push(Box::new(stop));
        }

        built
    }

    /// Destroy the view and consume it.
    pub fn unmount(self) {
        self.destroy();
    }

    /// Destroy the view in place.
    ///
    /// This will:
    /// 1. Stop the reactive prop effects
    /// 2. Tear down the engine instance
    /// 3. Clear the container
    /// 4. Drop all event handlers
    ///
    /// Idempotent: a second call tears down and clears again, harmlessly.
    pub fn destroy(&self) {
        let stops: Vec<_> = self.effect_stops.borrow_mut().drain(..).collect();
        for stop in stops {
            stop();
        }
        self.core.destroy();
    }

    // =========================================================================
    // Imperative Updates
    // =========================================================================

    /// Replace the tree data and rebuild.
    ///
    /// Identity-level change detection: passing the same `Rc` again is a
    /// no-op. `None` tears the graph down without a notification. Ignored
    /// after destroy; recorded but not built before mount.
    pub fn set_data(&self, data: Option<Rc<TreeNode>>) -> TreeResult<()> {
        self.core.set_data(data)
    }

    /// Replace the options and rebuild. Same rules as [`TreeView::set_data`].
    pub fn set_options(&self, options: Rc<TreeOptions>) -> TreeResult<()> {
        self.core.set_options(options)
    }

    /// Force a full rebuild from the current data and options.
    ///
    /// Works from `Uninitialized` too: when data arrived while the container
    /// was inert, or a previous build failed, this retries. Without data it
    /// is a silent skip. Errors with [`TreeError::NotMounted`] before mount;
    /// does nothing after destroy.
    pub fn render(&self) -> TreeResult<()> {
        {
            let inner = self.core.inner.borrow();
            if inner.state == ViewState::Destroyed {
                trace!("render skipped: view destroyed");
                return Ok(());
            }
            if inner.container.is_none() {
                return Err(TreeError::NotMounted);
            }
        }
        self.core.rebuild()
    }

    // =========================================================================
    // Graph Operations
    // =========================================================================

    // All of these are silent no-ops without a live graph, by contract.

    /// Change the layout direction of the rendered graph.
    pub fn change_layout(&self, direction: Direction) {
        match self.graph() {
            Some(graph) => graph.change_layout(direction),
            None => debug!("change_layout skipped: no live graph"),
        }
    }

    /// Collapse the subtree under a node.
    pub fn collapse(&self, node_id: &str) {
        match self.graph() {
            Some(graph) => graph.collapse(node_id),
            None => debug!(node_id, "collapse skipped: no live graph"),
        }
    }

    /// Expand a previously collapsed node.
    pub fn expand(&self, node_id: &str) {
        match self.graph() {
            Some(graph) => graph.expand(node_id),
            None => debug!(node_id, "expand skipped: no live graph"),
        }
    }

    /// Fit the rendered graph to its container.
    pub fn fit_screen(&self) {
        match self.graph() {
            Some(graph) => graph.fit_screen(),
            None => debug!("fit_screen skipped: no live graph"),
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Current lifecycle state.
    pub fn state(&self) -> ViewState {
        self.core.inner.borrow().state
    }

    /// Handle to the currently rendered graph, `None` while torn down.
    pub fn graph(&self) -> Option<Rc<dyn TreeGraph>> {
        self.core.inner.borrow().graph.clone()
    }

    /// The error from the most recent failed rebuild, cleared by the next
    /// successful one. Kept because rebuilds triggered from prop effects
    /// have no caller to propagate to.
    pub fn last_error(&self) -> Option<TreeError> {
        self.core.inner.borrow().last_error.clone()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to node clicks. Returns cleanup function.
    ///
    /// The engine-side click callback is only injected while at least one
    /// subscriber exists, and the injection is refreshed on the next rebuild.
    pub fn on_node_click<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&NodeClickEvent) + 'static,
    {
        self.core.events.on_click(handler)
    }

    /// Subscribe to the one-time first-render notification. Returns cleanup
    /// function.
    pub fn on_graph_ready<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&GraphEvent) + 'static,
    {
        self.core.events.on_ready(handler)
    }

    /// Subscribe to rebuild notifications. Returns cleanup function.
    pub fn on_graph_updated<F>(&self, handler: F) -> Cleanup
    where
        F: Fn(&GraphEvent) + 'static,
    {
        self.core.events.on_updated(handler)
    }

    /// Signal holding the most recent click.
    pub fn last_click(&self) -> Signal<Option<NodeClickEvent>> {
        self.core.events.last_click()
    }

    /// Signal counting successful renders since mount.
    pub fn graph_generation(&self) -> Signal<u64> {
        self.core.events.generation()
    }
}

impl Drop for TreeView {
    fn drop(&mut self) {
        self.destroy();
    }
}

// =============================================================================
// Tests
// =============================================================================
