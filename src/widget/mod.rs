//! The widget contract: the interface every node in a widget tree
//! implements, independent of any concrete widget catalog.

use crate::buffer::Buffer;
use crate::event::Event;
use crate::geometry::{Position, Rect};

/// Terminal width class used to key responsive visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenSize {
    /// Narrow terminal.
    Small,
    /// Typical terminal width.
    Medium,
    /// Wide terminal.
    Large,
}

/// Terminal height class used to key responsive visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenHeight {
    /// Short terminal.
    Small,
    /// Typical terminal height.
    Medium,
    /// Tall terminal.
    Large,
}

const SIZES: [ScreenSize; 3] = [ScreenSize::Small, ScreenSize::Medium, ScreenSize::Large];
const HEIGHTS: [ScreenHeight; 3] = [ScreenHeight::Small, ScreenHeight::Medium, ScreenHeight::Large];

/// Visibility keyed by every `ScreenSize x ScreenHeight` combination.
/// Defaults to visible in every class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponsiveVisibility {
    flags: [[bool; 3]; 3],
}

impl Default for ResponsiveVisibility {
    fn default() -> Self {
        Self {
            flags: [[true; 3]; 3],
        }
    }
}

impl ResponsiveVisibility {
    /// Set visibility for one `(width, height)` class.
    pub fn set(&mut self, width: ScreenSize, height: ScreenHeight, visible: bool) {
        self.flags[Self::width_index(width)][Self::height_index(height)] = visible;
    }

    /// Query visibility for one `(width, height)` class.
    pub fn is_visible(&self, width: ScreenSize, height: ScreenHeight) -> bool {
        self.flags[Self::width_index(width)][Self::height_index(height)]
    }

    fn width_index(s: ScreenSize) -> usize {
        SIZES.iter().position(|&w| w == s).unwrap_or(1)
    }

    fn height_index(h: ScreenHeight) -> usize {
        HEIGHTS.iter().position(|&x| x == h).unwrap_or(1)
    }
}

/// A widget's sizing request to its parent's layout. `0` on either axis
/// means flexible (the layout assigns remaining space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeRequest {
    /// Fixed width, or 0 for flexible.
    pub fixed_w: u16,
    /// Fixed height, or 0 for flexible.
    pub fixed_h: u16,
}

/// Every node in a widget tree implements this contract. The root is owned
/// by the application; every other widget is owned by its parent container.
pub trait Widget {
    /// Paint within the buffer's current clip, using this widget's own
    /// geometry.
    fn render(&mut self, buf: &mut Buffer);

    /// Handle an event. Returns `true` iff the event was consumed and
    /// should not propagate further.
    fn on_event(&mut self, event: &Event) -> bool;

    /// Set this widget's own focus state (not its children's).
    fn set_focus(&mut self, focused: bool);

    /// True when this widget itself holds focus.
    fn has_focus(&self) -> bool;

    /// This widget's current geometry, assigned by its parent's layout.
    fn geometry(&self) -> Rect;

    /// Spatial hit-test. Overridable for hit-transparent overlays; the
    /// default is the widget's bounding box.
    fn hit_test(&self, x: u16, y: u16) -> bool {
        self.geometry().contains(Position::new(x, y))
    }

    /// Whether this widget can ever receive focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Whether Tab cycling should stop on this widget (implies focusable).
    fn is_tab_stop(&self) -> bool {
        self.is_focusable()
    }

    /// Current visibility, after the last [`update_responsive`](Widget::update_responsive) call.
    fn is_visible(&self) -> bool {
        true
    }

    /// Recompute visibility from the current screen-size classes.
    fn update_responsive(&mut self, width: ScreenSize, height: ScreenHeight) {
        let _ = (width, height);
    }

    /// Widgets that own children return themselves here so tree walks
    /// (tab cycle, hit-test) can recurse without knowing the concrete type.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    /// Mutable counterpart of [`as_container`](Widget::as_container).
    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }

    /// Called when the mouse enters (`true`) or leaves (`false`) this
    /// widget's hit area. Default no-op.
    fn set_hovered(&mut self, hovered: bool) {
        let _ = hovered;
    }

    /// A fresh tooltip widget to show while this widget is hovered, built
    /// on demand since only one tooltip is ever showing at a time. Default
    /// is no tooltip.
    fn tooltip(&self) -> Option<Box<dyn Widget>> {
        None
    }
}

/// A widget that owns children and arranges their geometry.
pub trait Container: Widget {
    /// This container's children, in paint/traversal order.
    fn children(&self) -> Vec<&dyn Widget>;

    /// This container's children, mutably, in paint/traversal order.
    fn children_mut(&mut self) -> Vec<&mut dyn Widget>;

    /// Assign geometry to every child according to this container's
    /// layout policy, within `area`. Must tolerate zero or negative
    /// available space by clamping to zero rather than panicking or
    /// producing NaN.
    fn layout(&mut self, area: Rect);

    /// True if this widget or any descendant currently holds focus.
    fn has_focus_within(&self) -> bool {
        self.has_focus() || self.children().iter().any(|c| c.has_focus())
    }
}
