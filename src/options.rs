//! Options - Engine configuration and the merge step.
//!
//! [`TreeOptions`] is a flat configuration bag passed to the engine
//! constructor. Every field is optional; `None` means "engine default".
//! The adapter never validates value ranges, that is the engine's concern.
//!
//! [`merge_options`] composes host-declared options with adapter-injected
//! callbacks (template renderers, click handler) into the final options the
//! engine receives. The host's options object is never mutated.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Direction, InputEvent, TreeNode};

// =============================================================================
// Callback Types
// =============================================================================

/// Markup callback handed to the engine for node or tooltip content.
///
/// Receives the node payload, returns the markup string the engine will
/// inject. Rc so callbacks clone cheaply into the merged options copy.
pub type RenderFn = Rc<dyn Fn(&Value) -> String>;

/// Node click callback handed to the engine.
///
/// Receives the clicked node and the native input event that triggered it.
pub type ClickFn = Rc<dyn Fn(&TreeNode, &InputEvent)>;

// =============================================================================
// Options Bag
// =============================================================================

/// Engine configuration.
///
/// Recomputed on every (re)build from host-declared options plus
/// adapter-injected callbacks; the merged copy is owned by the adapter and
/// discarded after the engine constructor consumes it.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeOptions {
    // =========================================================================
    // Canvas
    // =========================================================================

    /// Canvas width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Canvas height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Visible viewport width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_port_width: Option<u32>,

    /// Visible viewport height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_port_height: Option<u32>,

    /// Inline style applied to the canvas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_style: Option<String>,

    /// Class name applied to the container element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_class_name: Option<String>,

    // =========================================================================
    // Layout
    // =========================================================================

    /// Layout orientation (default: top).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    /// Spacing between sibling nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_spacing: Option<u32>,

    /// Spacing between a node and its children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_spacing: Option<u32>,

    /// Group leaf nodes together instead of spreading them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_leaf_nodes: Option<bool>,

    /// Spacing between grouped leaf nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_leaf_nodes_spacing: Option<u32>,

    // =========================================================================
    // Content
    // =========================================================================

    /// Which payload field supplies a node's display text (default: "name").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_key: Option<String>,

    // =========================================================================
    // Node Appearance
    // =========================================================================

    /// Node box width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_width: Option<u32>,

    /// Node box height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_height: Option<u32>,

    /// Node background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_bg_color: Option<String>,

    /// Node background color on hover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_bg_color_hover: Option<String>,

    /// Node border width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,

    /// Node border style (e.g. "solid", "dashed").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,

    /// Node border radius (CSS value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,

    /// Node border color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    /// Node border color on hover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color_hover: Option<String>,

    /// Inline style applied to every node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_style: Option<String>,

    /// Class name applied to every node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_class_name: Option<String>,

    // =========================================================================
    // Font
    // =========================================================================

    /// Node font size (CSS value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    /// Node font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Node font weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    /// Node font color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,

    // =========================================================================
    // Edges
    // =========================================================================

    /// Connecting edge width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_width: Option<u32>,

    /// Connecting edge color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,

    /// Connecting edge color on hover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_color_hover: Option<String>,

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Highlight the hovered node and its path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_on_hover: Option<bool>,

    /// Show the engine's built-in toolbar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_toolbar: Option<bool>,

    /// Show per-node expand/collapse buttons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_expand_collapse: Option<bool>,

    /// Expand/collapse button background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_collapse_button_bg_color: Option<String>,

    /// Expand/collapse button border color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_collapse_button_border_color: Option<String>,

    // =========================================================================
    // Tooltips
    // =========================================================================

    /// Show tooltips on hover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_tooltip: Option<bool>,

    /// Id of the tooltip element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_id: Option<String>,

    /// Tooltip maximum width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_max_width: Option<u32>,

    /// Tooltip minimum width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_min_width: Option<u32>,

    /// Tooltip border color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_border_color: Option<String>,

    /// Tooltip background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_bg_color: Option<String>,

    /// Tooltip font color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_font_color: Option<String>,

    /// Tooltip font size (CSS value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_font_size: Option<String>,

    /// Tooltip padding (CSS value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_padding: Option<String>,

    /// Tooltip offset from the node, may be negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_offset: Option<i32>,

    // =========================================================================
    // Engine Callbacks
    // =========================================================================

    /// Node markup callback. Overridden by the adapter when a node template
    /// is supplied through the view props.
    #[serde(skip)]
    pub node_template: Option<RenderFn>,

    /// Tooltip markup callback. Overridden the same way as `node_template`.
    #[serde(skip)]
    pub tooltip_template: Option<RenderFn>,

    /// Node click callback. Injected by the adapter when click listeners are
    /// registered; a host-declared callback survives otherwise.
    #[serde(skip)]
    pub on_node_click: Option<ClickFn>,
}

/// Callback fields compare by identity: two options objects are equal only if
/// they share the same callback instances. This matches the adapter's
/// identity-level change detection.
impl PartialEq for TreeOptions {
    fn eq(&self, other: &Self) -> bool {
        fn callback_eq<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
        }

        self.width == other.width
            && self.height == other.height
            && self.view_port_width == other.view_port_width
            && self.view_port_height == other.view_port_height
            && self.canvas_style == other.canvas_style
            && self.container_class_name == other.container_class_name
            && self.direction == other.direction
            && self.sibling_spacing == other.sibling_spacing
            && self.children_spacing == other.children_spacing
            && self.group_leaf_nodes == other.group_leaf_nodes
            && self.group_leaf_nodes_spacing == other.group_leaf_nodes_spacing
            && self.content_key == other.content_key
            && self.node_width == other.node_width
            && self.node_height == other.node_height
            && self.node_bg_color == other.node_bg_color
            && self.node_bg_color_hover == other.node_bg_color_hover
            && self.border_width == other.border_width
            && self.border_style == other.border_style
            && self.border_radius == other.border_radius
            && self.border_color == other.border_color
            && self.border_color_hover == other.border_color_hover
            && self.node_style == other.node_style
            && self.node_class_name == other.node_class_name
            && self.font_size == other.font_size
            && self.font_family == other.font_family
            && self.font_weight == other.font_weight
            && self.font_color == other.font_color
            && self.edge_width == other.edge_width
            && self.edge_color == other.edge_color
            && self.edge_color_hover == other.edge_color_hover
            && self.highlight_on_hover == other.highlight_on_hover
            && self.enable_toolbar == other.enable_toolbar
            && self.enable_expand_collapse == other.enable_expand_collapse
            && self.expand_collapse_button_bg_color == other.expand_collapse_button_bg_color
            && self.expand_collapse_button_border_color == other.expand_collapse_button_border_color
            && self.enable_tooltip == other.enable_tooltip
            && self.tooltip_id == other.tooltip_id
            && self.tooltip_max_width == other.tooltip_max_width
            && self.tooltip_min_width == other.tooltip_min_width
            && self.tooltip_border_color == other.tooltip_border_color
            && self.tooltip_bg_color == other.tooltip_bg_color
            && self.tooltip_font_color == other.tooltip_font_color
            && self.tooltip_font_size == other.tooltip_font_size
            && self.tooltip_padding == other.tooltip_padding
            && self.tooltip_offset == other.tooltip_offset
            && callback_eq(&self.node_template, &other.node_template)
            && callback_eq(&self.tooltip_template, &other.tooltip_template)
            && callback_eq(&self.on_node_click, &other.on_node_click)
    }
}

/// Plain fields render by value, callback fields as presence flags.
impl fmt::Debug for TreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOptions")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("view_port_width", &self.view_port_width)
            .field("view_port_height", &self.view_port_height)
            .field("canvas_style", &self.canvas_style)
            .field("container_class_name", &self.container_class_name)
            .field("direction", &self.direction)
            .field("sibling_spacing", &self.sibling_spacing)
            .field("children_spacing", &self.children_spacing)
            .field("group_leaf_nodes", &self.group_leaf_nodes)
            .field("group_leaf_nodes_spacing", &self.group_leaf_nodes_spacing)
            .field("content_key", &self.content_key)
            .field("node_width", &self.node_width)
            .field("node_height", &self.node_height)
            .field("node_bg_color", &self.node_bg_color)
            .field("node_bg_color_hover", &self.node_bg_color_hover)
            .field("border_width", &self.border_width)
            .field("border_style", &self.border_style)
            .field("border_radius", &self.border_radius)
            .field("border_color", &self.border_color)
            .field("border_color_hover", &self.border_color_hover)
            .field("node_style", &self.node_style)
            .field("node_class_name", &self.node_class_name)
            .field("font_size", &self.font_size)
            .field("font_family", &self.font_family)
            .field("font_weight", &self.font_weight)
            .field("font_color", &self.font_color)
            .field("edge_width", &self.edge_width)
            .field("edge_color", &self.edge_color)
            .field("edge_color_hover", &self.edge_color_hover)
            .field("highlight_on_hover", &self.highlight_on_hover)
            .field("enable_toolbar", &self.enable_toolbar)
            .field("enable_expand_collapse", &self.enable_expand_collapse)
            .field(
                "expand_collapse_button_bg_color",
                &self.expand_collapse_button_bg_color,
            )
            .field(
                "expand_collapse_button_border_color",
                &self.expand_collapse_button_border_color,
            )
            .field("enable_tooltip", &self.enable_tooltip)
            .field("tooltip_id", &self.tooltip_id)
            .field("tooltip_max_width", &self.tooltip_max_width)
            .field("tooltip_min_width", &self.tooltip_min_width)
            .field("tooltip_border_color", &self.tooltip_border_color)
            .field("tooltip_bg_color", &self.tooltip_bg_color)
            .field("tooltip_font_color", &self.tooltip_font_color)
            .field("tooltip_font_size", &self.tooltip_font_size)
            .field("tooltip_padding", &self.tooltip_padding)
            .field("tooltip_offset", &self.tooltip_offset)
            .field("node_template", &self.node_template.is_some())
            .field("tooltip_template", &self.tooltip_template.is_some())
            .field("on_node_click", &self.on_node_click.is_some())
            .finish()
    }
}

// =============================================================================
// Merge
// =============================================================================

/// Adapter-side injections composed into the final options.
#[derive(Clone, Default)]
pub struct MergeContext {
    /// Bridged node template, beats any host-declared `node_template`.
    pub node_template: Option<RenderFn>,
    /// Bridged tooltip template, beats any host-declared `tooltip_template`.
    pub tooltip_template: Option<RenderFn>,
    /// Click dispatcher, present only when click listeners are registered.
    pub on_node_click: Option<ClickFn>,
}

/// Compose host options with adapter injections.
///
/// Starts from a shallow copy of `base` (plain fields copied, callback Rcs
/// cloned) and overwrites callback slots for which the context carries an
/// injection. Absent injections leave the host's own callbacks untouched, so
/// a host can still talk to the engine directly when the adapter has nothing
/// to bridge.
pub fn merge_options(base: &TreeOptions, ctx: &MergeContext) -> TreeOptions {
    let mut merged = base.clone();

    if let Some(template) = &ctx.node_template {
        merged.node_template = Some(template.clone());
    }
    if let Some(template) = &ctx.tooltip_template {
        merged.tooltip_template = Some(template.clone());
    }
    if let Some(on_click) = &ctx.on_node_click {
        merged.on_node_click = Some(on_click.clone());
    }

    merged
}

// =============================================================================
// Tests
// =============================================================================
