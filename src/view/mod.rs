//! View Module - The declarative adapter surface.
//!
//! This module contains the host-facing side of the crate:
//!
//! - **Lifecycle** - [`TreeView`], the mount/rebuild/destroy state machine
//! - **Props** - [`TreeViewProps`] and the [`PropValue`] reactivity wrapper
//! - **Events** - Click and render notifications with cleanup functions
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `data: tree.into()`
//! - Signals: `data: data_signal.into()` (stays connected!)
//! - Getters: `data: PropValue::Getter(Rc::new(|| compute_tree()))`
//!
//! Signal and getter props are read inside effects; replacing the `Rc` they
//! carry triggers a full engine rebuild after the next flush.

mod events;
mod lifecycle;
mod props;

pub use events::{EventBridge, GraphEvent};
pub use lifecycle::{TreeView, ViewState};
pub use props::{Cleanup, PropValue, TreeViewProps};
