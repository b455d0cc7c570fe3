//! Dialog stack, tooltip slot, and hover tracking.
//!
//! The stack is FIFO of push order and LIFO of event-routing order: the
//! last dialog pushed is the first to see input and the first painted on
//! top. Focus save/restore uses non-owning [`FocusToken`]s rather than
//! shared ownership of widgets, matching the "parent owns children" rule
//! for the rest of the widget tree.

use crate::buffer::Buffer;
use crate::color::Color;
use crate::focus::{self, FocusToken};
use crate::geometry::Rect;
use crate::widget::Widget;

/// A single entry on the dialog stack.
pub struct Dialog {
    /// The dialog's own widget subtree.
    pub content: Box<dyn Widget>,
    /// The dialog's bounding rect, in terminal coordinates.
    pub rect: Rect,
    /// When true, unconsumed mouse events within this dialog's bounds are
    /// absorbed rather than falling through to dialogs below or the root.
    pub modal: bool,
    /// When true, opening the dialog saves current focus and moves it to
    /// the first focusable widget inside; closing restores it.
    pub steal_focus: bool,
    /// When true, the renderer darkens the strip below and to the right
    /// of the dialog's box.
    pub shadow: bool,
    saved_focus: Option<FocusToken>,
}

impl Dialog {
    /// Build a dialog opened centered within `screen`, sized to `rect`'s
    /// width/height (its position is recomputed from the current terminal
    /// size).
    pub fn centered(content: Box<dyn Widget>, size: crate::geometry::Size, screen: Rect) -> Self {
        Self {
            content,
            rect: screen.centered(size),
            modal: false,
            steal_focus: false,
            shadow: false,
            saved_focus: None,
        }
    }

    /// Build a dialog at an explicit rect.
    pub fn at(content: Box<dyn Widget>, rect: Rect) -> Self {
        Self {
            content,
            rect,
            modal: false,
            steal_focus: false,
            shadow: false,
            saved_focus: None,
        }
    }

    /// Builder: mark this dialog modal.
    #[must_use]
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Builder: mark this dialog as stealing focus on open.
    #[must_use]
    pub fn steal_focus(mut self, steal: bool) -> Self {
        self.steal_focus = steal;
        self
    }

    /// Builder: enable the shadow strip.
    #[must_use]
    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Paint the dialog's drop shadow: a one-cell strip below and to the
    /// right of its box, darkening whatever content is already there.
    pub fn render_shadow(&self, buf: &mut Buffer) {
        if !self.shadow {
            return;
        }
        let bottom = self.rect.bottom();
        let right = self.rect.right();
        for x in (self.rect.position.x + 1)..=right {
            darken_cell(buf, x, bottom);
        }
        for y in (self.rect.position.y + 1)..=bottom {
            darken_cell(buf, right, y);
        }
    }
}

fn darken_cell(buf: &mut Buffer, x: u16, y: u16) {
    if x >= buf.width() || y >= buf.height() {
        return;
    }
    let mut cell = buf.get(x, y).clone();
    cell.bg = shadow_color(cell.bg);
    cell.fg = shadow_color(cell.fg);
    buf.set(x, y, cell);
}

fn shadow_color(c: Color) -> Color {
    c.shade(0.4)
}

/// The dialog stack plus the single active-tooltip slot and the focus
/// save stack used by `steal_focus` dialogs.
#[derive(Default)]
pub struct DialogStack {
    stack: Vec<Dialog>,
    active_tooltip: Option<Box<dyn Widget>>,
    hovered: Option<FocusToken>,
}

impl DialogStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open dialogs.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// True if no dialogs are open.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The topmost dialog, if any (event-routing order starts here).
    pub fn top(&self) -> Option<&Dialog> {
        self.stack.last()
    }

    /// The topmost dialog, mutably.
    pub fn top_mut(&mut self) -> Option<&mut Dialog> {
        self.stack.last_mut()
    }

    /// The dialog at `index` (0 = bottom of stack), immutably.
    pub fn get(&self, index: usize) -> Option<&Dialog> {
        self.stack.get(index)
    }

    /// The dialog at `index` (0 = bottom of stack), mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Dialog> {
        self.stack.get_mut(index)
    }

    /// Every open dialog, in paint order (bottom of stack first).
    pub fn in_paint_order(&self) -> impl Iterator<Item = &Dialog> {
        self.stack.iter()
    }

    /// Push a dialog. If it steals focus, `currently_focused` is recorded
    /// so it can be restored on pop; the caller is responsible for moving
    /// focus to the first focusable widget inside the new dialog.
    pub fn push(&mut self, mut dialog: Dialog, currently_focused: Option<&dyn Widget>) {
        if dialog.steal_focus {
            dialog.saved_focus = currently_focused.map(FocusToken::of);
        }
        tracing::debug!(modal = dialog.modal, steal_focus = dialog.steal_focus, depth = self.stack.len() + 1, "dialog pushed");
        self.stack.push(dialog);
    }

    /// Pop the topmost dialog. Returns the token of the widget that should
    /// regain focus, if the popped dialog stole focus on open. A pop on an
    /// empty stack is a no-op.
    pub fn pop(&mut self) -> Option<FocusToken> {
        let popped = self.stack.pop();
        if popped.is_some() {
            tracing::debug!(depth = self.stack.len(), "dialog popped");
        }
        popped.and_then(|d| d.saved_focus)
    }

    /// Remove every dialog. Equivalent to calling [`pop`](DialogStack::pop) until empty,
    /// discarding intermediate focus tokens — callers that need to restore
    /// focus layer-by-layer should pop instead.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Replace the active tooltip. Passing `None` hides whatever tooltip
    /// was showing.
    pub fn set_tooltip(&mut self, tooltip: Option<Box<dyn Widget>>) {
        self.active_tooltip = tooltip;
    }

    /// The active tooltip, if any.
    pub fn tooltip(&self) -> Option<&dyn Widget> {
        self.active_tooltip.as_deref()
    }

    /// Paint the active tooltip last, under a full clip so it escapes any
    /// enclosing clip rect.
    pub fn render_tooltip(&mut self, buf: &mut Buffer) {
        if let Some(tooltip) = self.active_tooltip.as_mut() {
            buf.push_full_clip();
            tooltip.render(buf);
            buf.pop_clip();
        }
    }

    /// Record the currently hovered widget's identity, returning the
    /// previous one so the caller can fire hover-out/hover-in callbacks.
    pub fn set_hovered(&mut self, hovered: Option<FocusToken>) -> Option<FocusToken> {
        let previous = self.hovered;
        self.hovered = hovered;
        previous
    }

    /// The identity of the currently hovered widget.
    pub fn hovered(&self) -> Option<FocusToken> {
        self.hovered
    }
}

/// Restore focus from a saved token by locating the matching widget in
/// `root` and focusing it. No-op if the token no longer resolves to any
/// widget in the tree.
pub fn restore_focus(root: &mut dyn Widget, token: FocusToken) {
    if let Some(widget) = focus::find_mut(root, token) {
        widget.set_focus(true);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::geometry::Size;

    struct Leaf {
        rect: Rect,
        focused: bool,
    }

    impl Widget for Leaf {
        fn render(&mut self, _buf: &mut Buffer) {}
        fn on_event(&mut self, _event: &Event) -> bool {
            false
        }
        fn set_focus(&mut self, focused: bool) {
            self.focused = focused;
        }
        fn has_focus(&self) -> bool {
            self.focused
        }
        fn geometry(&self) -> Rect {
            self.rect
        }
        fn is_focusable(&self) -> bool {
            true
        }
    }

    fn leaf() -> Box<Leaf> {
        Box::new(Leaf {
            rect: Rect::new(0, 0, 1, 1),
            focused: false,
        })
    }

    #[test]
    fn push_pop_order() {
        let mut stack = DialogStack::new();
        stack.push(Dialog::at(leaf(), Rect::new(0, 0, 5, 5)), None);
        stack.push(Dialog::at(leaf(), Rect::new(1, 1, 5, 5)), None);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().unwrap().rect, Rect::new(1, 1, 5, 5));
        stack.pop();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.top().unwrap().rect, Rect::new(0, 0, 5, 5));
    }

    #[test]
    fn pop_on_empty_is_noop() {
        let mut stack = DialogStack::new();
        assert!(stack.pop().is_none());
    }

    #[test]
    fn steal_focus_saves_and_restores() {
        let mut outer = Leaf {
            rect: Rect::new(0, 0, 1, 1),
            focused: true,
        };
        let mut stack = DialogStack::new();
        let dialog = Dialog::at(leaf(), Rect::new(0, 0, 5, 5)).steal_focus(true);
        stack.push(dialog, Some(&outer));
        outer.set_focus(false);

        let token = stack.pop().unwrap();
        restore_focus(&mut outer, token);
        assert!(outer.has_focus());
    }

    #[test]
    fn non_stealing_dialog_saves_nothing() {
        let outer = Leaf {
            rect: Rect::new(0, 0, 1, 1),
            focused: true,
        };
        let mut stack = DialogStack::new();
        stack.push(Dialog::at(leaf(), Rect::new(0, 0, 5, 5)), Some(&outer));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn centered_dialog_positions_against_screen() {
        let screen = Rect::new(0, 0, 80, 24);
        let dialog = Dialog::centered(leaf(), Size::new(20, 10), screen);
        assert_eq!(dialog.rect, Rect::new(30, 7, 20, 10));
    }

    #[test]
    fn tooltip_set_and_clear() {
        let mut stack = DialogStack::new();
        assert!(stack.tooltip().is_none());
        stack.set_tooltip(Some(leaf()));
        assert!(stack.tooltip().is_some());
        stack.set_tooltip(None);
        assert!(stack.tooltip().is_none());
    }

    #[test]
    fn hovered_tracks_previous() {
        let mut stack = DialogStack::new();
        let a = leaf();
        let b = leaf();
        let token_a = FocusToken::of(a.as_ref());
        let token_b = FocusToken::of(b.as_ref());
        let previous = stack.set_hovered(Some(token_a));
        assert!(previous.is_none());
        let previous = stack.set_hovered(Some(token_b));
        assert_eq!(previous, Some(token_a));
    }

    #[test]
    fn shadow_darkens_strip() {
        let mut buf = Buffer::new(10, 10);
        let original = buf.get(5, 4).clone();
        let dialog = Dialog::at(leaf(), Rect::new(1, 1, 3, 3)).shadow(true);
        dialog.render_shadow(&mut buf);
        let shadowed = buf.get(4, 4).clone();
        assert_ne!(shadowed, original);
    }
}
