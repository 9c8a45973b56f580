//! View props - Reactive property wrappers.
//!
//! These types define the declarative interface of a [`TreeView`].
//! Props support static values, signals, and getters for reactivity.
//!
//! [`TreeView`]: crate::view::TreeView

use std::rc::Rc;

use spark_signals::Signal;

use crate::options::TreeOptions;
use crate::template::TemplateFn;
use crate::types::TreeNode;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by event subscriptions.
///
/// Call this to detach the handler it belongs to.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// This enables reactive props while maintaining type safety. Signal and
/// getter props are tracked: the view re-reads them inside an effect and
/// rebuilds when they change.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Whether reading this prop inside an effect establishes a dependency.
    pub fn is_reactive(&self) -> bool {
        !matches!(self, PropValue::Static(_))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// TreeNode and TreeOptions are PartialEq so these work
impl From<TreeNode> for PropValue<Option<Rc<TreeNode>>> {
    fn from(node: TreeNode) -> Self {
        PropValue::Static(Some(Rc::new(node)))
    }
}

impl From<TreeOptions> for PropValue<Rc<TreeOptions>> {
    fn from(options: TreeOptions) -> Self {
        PropValue::Static(Rc::new(options))
    }
}

// =============================================================================
// Tree View Props
// =============================================================================

/// Properties for mounting a [`TreeView`].
///
/// Data and options can be static or reactive; templates are plain
/// functions resolved once at mount.
///
/// # Example
///
/// ```ignore
/// use spark_treegraph::{TreeNode, TreeView, TreeViewProps, MarkupEngine, Container};
/// use spark_signals::{signal, flush_sync};
/// use std::rc::Rc;
///
/// let data = signal(Some(Rc::new(TreeNode::named("root", "Root"))));
///
/// let view = TreeView::new(Rc::new(MarkupEngine::new()));
/// view.mount(Container::new(), TreeViewProps {
///     data: data.clone().into(),
///     ..Default::default()
/// })?;
///
/// // Later: swap the tree reactively
/// data.set(Some(Rc::new(TreeNode::named("root", "Renamed"))));
/// flush_sync();
/// ```
///
/// [`TreeView`]: crate::view::TreeView
#[derive(Default)]
pub struct TreeViewProps {
    // =========================================================================
    // Data
    // =========================================================================

    /// The tree to render. `None` tears the rendered graph down.
    pub data: PropValue<Option<Rc<TreeNode>>>,

    // =========================================================================
    // Options
    // =========================================================================

    /// Engine presentation options. Merged with template and click
    /// injections on every build.
    pub options: PropValue<Rc<TreeOptions>>,

    // =========================================================================
    // Templates
    // =========================================================================

    /// Per-node markup template. Overrides any `node_template` already in
    /// the options.
    pub node_template: Option<TemplateFn>,

    /// Tooltip markup template. Overrides any `tooltip_template` already in
    /// the options.
    pub tooltip_template: Option<TemplateFn>,
}

// =============================================================================
// Tests
// =============================================================================
