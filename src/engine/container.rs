//! Container - The host-owned mount point an engine draws into.
//!
//! A container models the element the host hands to the adapter at mount
//! time. It is Rc-shared: clones observe the same content, so hosts and
//! tests can watch what the engine wrote. A container is either live or
//! inert; in an inert environment (e.g. server-side prerendering) the
//! adapter records its inputs but never constructs an engine.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared mount point with interior content.
#[derive(Debug, Clone)]
pub struct Container {
    content: Rc<RefCell<String>>,
    live: bool,
}

impl Container {
    /// Create a live container.
    pub fn new() -> Self {
        Self {
            content: Rc::new(RefCell::new(String::new())),
            live: true,
        }
    }

    /// Create an inert container. Mounting into one is not an error; the
    /// adapter simply never builds.
    pub fn inert() -> Self {
        Self {
            content: Rc::new(RefCell::new(String::new())),
            live: false,
        }
    }

    /// Whether an engine may draw into this container.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Current rendered content.
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// Replace the rendered content.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.borrow_mut() = content.into();
    }

    /// Empty the container.
    pub fn clear(&self) {
        self.content.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.content.borrow().is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
