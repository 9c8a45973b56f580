//! Core types - Tree data, directions, input events.
//!
//! The data model is host-owned: a [`TreeNode`] tree is passed by reference
//! into the adapter on every render cycle and never mutated by it. Node
//! payloads are arbitrary JSON values so template functions can consume
//! consumer-defined shapes without the adapter knowing them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Tree Data
// =============================================================================

/// A node in the tree diagram.
///
/// Identifiers are engine-facing and expected to be unique across the whole
/// tree. The adapter does not reject duplicates (engine behavior on duplicate
/// ids is undefined); use [`TreeNode::duplicate_ids`] to validate host-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier, used by expand/collapse and click events.
    pub id: String,

    /// Display name (the default node text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Arbitrary payload, handed to template functions as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Per-node style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,

    /// Ordered children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a childless node with just an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            data: None,
            style: None,
            children: Vec::new(),
        }
    }

    /// Create a node with an id and display name.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id)
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a payload value.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach per-node style overrides.
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth of the tree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Find a node by id (depth-first).
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Iterate the subtree depth-first, self first.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// Ids that appear more than once in this subtree, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for node in self.iter() {
            if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id) {
                duplicates.push(node.id.clone());
            }
        }
        duplicates
    }
}

/// Depth-first iterator over a [`TreeNode`] subtree.
pub struct NodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so children come back out left-to-right
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Per-node overrides of the global node appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color_hover: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

// =============================================================================
// Direction
// =============================================================================

/// Layout orientation of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    #[default]
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Check if this direction lays the tree out sideways (Left or Right).
    pub const fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Top,
            1 => Self::Bottom,
            2 => Self::Left,
            3 => Self::Right,
            _ => Self::Top,
        }
    }
}

// =============================================================================
// Input Events
// =============================================================================

/// Modifier key state carried on an input event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// What kind of interaction produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InputKind {
    Pointer = 0,
    Key = 1,
    #[default]
    Synthetic = 2,
}

/// The interaction that triggered an engine callback.
///
/// Engines pass the triggering event through unchanged; the adapter forwards
/// it to click listeners exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvent {
    pub kind: InputKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl InputEvent {
    /// Create a pointer event at the given position.
    pub fn pointer(x: u16, y: u16) -> Self {
        Self {
            kind: InputKind::Pointer,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a synthetic event (tests, programmatic dispatch).
    pub fn synthetic() -> Self {
        Self::default()
    }

    /// Set the modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Payload delivered to node-click listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeClickEvent {
    /// The clicked node, as provided by the engine.
    pub node: TreeNode,
    /// The native input event that triggered the click.
    pub event: InputEvent,
}

// =============================================================================
// Tests
// =============================================================================
