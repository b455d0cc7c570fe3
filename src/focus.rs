//! Tab-cycle focus: preorder traversal of the visible, positive-sized
//! widget subtree, with the currently focused widget located by identity
//! rather than by any registered id.

use crate::widget::Widget;

/// A non-owning identity handle for a widget, used to remember "the widget
/// that was focused before a dialog opened" without borrowing it. Never
/// dereferenced — only ever compared for identity against a live tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusToken(*const ());

impl FocusToken {
    /// Capture a token identifying `widget`.
    pub fn of(widget: &dyn Widget) -> Self {
        Self(widget as *const dyn Widget as *const ())
    }
}

/// Re-locate the widget identified by `token` within `root`, mutably.
/// Returns `None` if no widget in the tree currently matches (it may have
/// been removed since the token was captured).
pub fn find_mut<'a>(root: &'a mut dyn Widget, token: FocusToken) -> Option<&'a mut dyn Widget> {
    if FocusToken::of(&*root) == token {
        return Some(root);
    }
    let container = root.as_container_mut()?;
    for child in container.children_mut() {
        if let Some(found) = find_mut(child, token) {
            return Some(found);
        }
    }
    None
}

/// Collect focusable tab stops from `root` in preorder. A widget
/// participates iff it is focusable, a tab stop, visible, and has
/// positive width and height.
pub fn collect_focusable<'a>(root: &'a dyn Widget) -> Vec<&'a dyn Widget> {
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn walk<'a>(widget: &'a dyn Widget, out: &mut Vec<&'a dyn Widget>) {
    if !widget.is_visible() {
        return;
    }
    let geo = widget.geometry();
    if geo.size.width == 0 || geo.size.height == 0 {
        return;
    }
    if widget.is_focusable() && widget.is_tab_stop() {
        out.push(widget);
    }
    if let Some(container) = widget.as_container() {
        for child in container.children() {
            walk(child, out);
        }
    }
}

/// Locate `current`'s position in `stops` by pointer identity. Absence
/// (nothing focused, or the focused widget fell out of the tree) yields 0.
fn index_of(stops: &[&dyn Widget], current: Option<&dyn Widget>) -> usize {
    match current {
        Some(w) => stops
            .iter()
            .position(|&c| std::ptr::eq(c, w))
            .unwrap_or(0),
        None => 0,
    }
}

/// The tab stop that should receive focus after a Tab key, given the
/// currently focused widget (if any). Wraps around at the end.
pub fn next<'a>(stops: &[&'a dyn Widget], current: Option<&dyn Widget>) -> Option<&'a dyn Widget> {
    if stops.is_empty() {
        return None;
    }
    let idx = match current {
        Some(_) => (index_of(stops, current) + 1) % stops.len(),
        None => 0,
    };
    Some(stops[idx])
}

/// The tab stop that should receive focus after a Shift-Tab key. Wraps
/// around at the start.
pub fn previous<'a>(stops: &[&'a dyn Widget], current: Option<&dyn Widget>) -> Option<&'a dyn Widget> {
    if stops.is_empty() {
        return None;
    }
    let idx = match current {
        Some(_) => {
            let i = index_of(stops, current);
            if i == 0 {
                stops.len() - 1
            } else {
                i - 1
            }
        }
        None => stops.len() - 1,
    };
    Some(stops[idx])
}

/// Find the widget that currently reports `has_focus() == true` in
/// `root`'s subtree, by preorder search.
pub fn find_focused(root: &dyn Widget) -> Option<&dyn Widget> {
    if root.has_focus() {
        return Some(root);
    }
    let container = root.as_container()?;
    for child in container.children() {
        if let Some(found) = find_focused(child) {
            return Some(found);
        }
    }
    None
}

/// The first tab stop in preorder within `root`'s subtree, mutably. Used to
/// focus a freshly opened dialog's first focusable widget.
pub fn first_focusable_mut(root: &mut dyn Widget) -> Option<&mut dyn Widget> {
    if !root.is_visible() {
        return None;
    }
    let geo = root.geometry();
    let is_stop = geo.size.width > 0 && geo.size.height > 0 && root.is_focusable() && root.is_tab_stop();
    if is_stop {
        return Some(root);
    }
    let container = root.as_container_mut()?;
    for child in container.children_mut() {
        if let Some(found) = first_focusable_mut(child) {
            return Some(found);
        }
    }
    None
}
