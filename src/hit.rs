//! Clip-aware hit-testing: locate the widget under a point, recursing
//! through a container tree with each level's search region intersected
//! against its parent's.

use crate::geometry::{Position, Rect};
use crate::widget::Widget;

/// Find the deepest widget under `(x, y)` in `root`'s subtree. Children
/// are tested in reverse draw order (last-drawn wins); a child is only
/// considered if the point falls within its bounds intersected with
/// `clip`. If no child hits but `root` itself reports `hit_test`, `root`
/// wins. `only_focusable` restricts results to focusable widgets.
pub fn find_at<'a>(root: &'a dyn Widget, clip: Rect, x: u16, y: u16, only_focusable: bool) -> Option<&'a dyn Widget> {
    if !root.is_visible() {
        return None;
    }
    let bounds = root.geometry().intersect(clip);
    if bounds.is_empty() || !bounds.contains(Position::new(x, y)) {
        return None;
    }
    if let Some(container) = root.as_container() {
        for child in container.children().into_iter().rev() {
            if let Some(hit) = find_at(child, bounds, x, y, only_focusable) {
                return Some(hit);
            }
        }
    }
    if root.hit_test(x, y) && (!only_focusable || root.is_focusable()) {
        return Some(root);
    }
    None
}

/// Mutable counterpart of [`find_at`].
pub fn find_at_mut<'a>(
    root: &'a mut dyn Widget,
    clip: Rect,
    x: u16,
    y: u16,
    only_focusable: bool,
) -> Option<&'a mut dyn Widget> {
    if !root.is_visible() {
        return None;
    }
    let bounds = root.geometry().intersect(clip);
    if bounds.is_empty() || !bounds.contains(Position::new(x, y)) {
        return None;
    }
    let self_hits = root.hit_test(x, y) && (!only_focusable || root.is_focusable());

    if let Some(container) = root.as_container_mut() {
        for child in container.children_mut().into_iter().rev() {
            if let Some(hit) = find_at_mut(child, bounds, x, y, only_focusable) {
                return Some(hit);
            }
        }
    }
    if self_hits {
        return Some(root);
    }
    None
}
