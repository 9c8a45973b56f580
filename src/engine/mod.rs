//! Engine Contract - The imperative side of the adapter.
//!
//! The view layer owns *when* to build and destroy; an engine owns *how* a
//! tree becomes pixels, markup, or scene nodes. The split is three traits
//! along the natural lifecycle seams:
//!
//! - [`TreeEngine`]: factory, binds a [`Container`] and merged options
//! - [`EngineInstance`]: renders tree data, yielding a graph handle
//! - [`TreeGraph`]: live handle for layout and visibility operations
//!
//! Template callbacks are part of drawing and run during `render`. The click
//! callback must only fire from later user interaction, never from inside
//! `construct` or `render`.
//!
//! [`MarkupEngine`] is the reference implementation shipped with the crate.

use std::rc::Rc;

use crate::error::EngineError;
use crate::options::TreeOptions;
use crate::types::{Direction, TreeNode};

mod container;
mod markup;

pub use container::Container;
pub use markup::{MarkupEngine, MarkupGraph};

/// Factory for engine instances. One engine can serve many views.
pub trait TreeEngine {
    /// Bind a container and an options snapshot. Fails when the engine
    /// cannot work in this environment, inert containers typically.
    fn construct(
        &self,
        container: &Container,
        options: TreeOptions,
    ) -> Result<Box<dyn EngineInstance>, EngineError>;
}

/// A constructed engine bound to one container. Dropping the instance is the
/// teardown signal; implementations release their resources in `Drop`.
pub trait EngineInstance {
    /// Render the tree rooted at `root`, replacing any prior content, and
    /// hand back a live graph handle.
    fn render(&mut self, root: &TreeNode) -> Result<Rc<dyn TreeGraph>, EngineError>;
}

/// Operations on a rendered graph. All of these are fire-and-forget from the
/// view's perspective: they mutate the rendered output and never report back.
pub trait TreeGraph {
    fn change_layout(&self, direction: Direction);
    fn collapse(&self, node_id: &str);
    fn expand(&self, node_id: &str);
    fn fit_screen(&self);
}
