//! The single-threaded cooperative event loop.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::buffer::Buffer;
use crate::cell::Cell;
use crate::color::Theme;
use crate::dialog::{restore_focus, Dialog, DialogStack};
use crate::error::Result;
use crate::event::{key, Event, KeyEvent, MouseEvent};
use crate::focus::{self, FocusToken};
use crate::geometry::{Position, Rect};
use crate::hit;
use crate::term::{flush_frame, Terminal};
use crate::timer::{TimerId, Timers};
use crate::widget::Widget;

const RESIZE_DEBOUNCE: Duration = Duration::from_millis(25);
const INPUT_BATCH_CAP: usize = 50;

/// Owns the terminal session, the widget tree, and the overlay/timer
/// state, and runs the main loop.
pub struct App {
    root: Box<dyn Widget>,
    terminal: Terminal,
    current: Buffer,
    previous: Buffer,
    theme: Theme,
    dialogs: DialogStack,
    timers: Timers,
    callbacks: HashMap<TimerId, Box<dyn FnMut(&mut dyn Widget)>>,
    exit_keys: Vec<i32>,
    needs_render: bool,
    pending_resize: Option<(Instant, u16, u16)>,
    running: bool,
}

impl App {
    /// Acquire the terminal and build an app around `root`.
    pub fn new(root: Box<dyn Widget>) -> Result<Self> {
        let terminal = Terminal::acquire()?;
        let size = terminal.size()?;
        Ok(Self {
            root,
            terminal,
            current: Buffer::new(size.width, size.height),
            previous: Buffer::new(size.width, size.height),
            theme: Theme::default(),
            dialogs: DialogStack::new(),
            timers: Timers::new(),
            callbacks: HashMap::new(),
            exit_keys: Vec::new(),
            needs_render: true,
            pending_resize: None,
            running: true,
        })
    }

    /// Replace the active theme. Takes effect on the next render.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.needs_render = true;
    }

    /// Register a key code (see [`key`]) that terminates the loop when
    /// pressed with no modifiers.
    pub fn register_exit_key(&mut self, code: i32) {
        self.exit_keys.push(code);
    }

    /// Register a timer firing every `interval`. `callback` runs on the
    /// event-loop thread between input drain and render; it must not
    /// block.
    pub fn add_timer(
        &mut self,
        interval: Duration,
        callback: impl FnMut(&mut dyn Widget) + 'static,
    ) -> TimerId {
        let id = self.timers.add(interval, Instant::now());
        self.callbacks.insert(id, Box::new(callback));
        id
    }

    /// Remove a previously registered timer.
    pub fn remove_timer(&mut self, id: TimerId) {
        self.timers.remove(id);
        self.callbacks.remove(&id);
    }

    /// Open a dialog. If it steals focus, the currently focused widget in
    /// whatever subtree currently owns input (the topmost existing dialog,
    /// or the root) is blurred and saved, and focus moves to the new
    /// dialog's first focusable widget.
    pub fn open_dialog(&mut self, dialog: Dialog) {
        let steal = dialog.steal_focus;
        let currently_focused = match self.dialogs.top() {
            Some(top) => focus::find_focused(top.content.as_ref()),
            None => focus::find_focused(self.root.as_ref()),
        };
        let currently_focused_token = currently_focused.map(FocusToken::of);

        if steal {
            if let Some(token) = currently_focused_token {
                let active_root = self.active_root_mut_above_new();
                if let Some(widget) = focus::find_mut(active_root, token) {
                    widget.set_focus(false);
                }
            }
        }

        self.dialogs.push(dialog, currently_focused);

        if steal {
            if let Some(top) = self.dialogs.top_mut() {
                if let Some(first) = focus::first_focusable_mut(top.content.as_mut()) {
                    first.set_focus(true);
                }
            }
        }
        self.needs_render = true;
    }

    /// Close the topmost dialog, restoring focus if it had stolen it.
    pub fn close_top_dialog(&mut self) {
        if let Some(token) = self.dialogs.pop() {
            let active_root = self.active_root_mut();
            restore_focus(active_root, token);
        }
        self.needs_render = true;
    }

    /// Run until a quit condition is reached.
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.tick()?;
        }
        Ok(())
    }

    /// The widget subtree currently owning input: the topmost dialog, or
    /// the root if none are open.
    fn active_root(&self) -> &dyn Widget {
        match self.dialogs.top() {
            Some(top) => top.content.as_ref(),
            None => self.root.as_ref(),
        }
    }

    fn active_root_mut(&mut self) -> &mut dyn Widget {
        match self.dialogs.top_mut() {
            Some(top) => top.content.as_mut(),
            None => self.root.as_mut(),
        }
    }

    /// Like [`active_root_mut`](App::active_root_mut), but used right before a new
    /// dialog is pushed, so it still resolves to whatever was active
    /// *before* the push.
    fn active_root_mut_above_new(&mut self) -> &mut dyn Widget {
        self.active_root_mut()
    }

    /// One iteration of the loop: render, wait for input, dispatch, and
    /// apply any debounced resize or fired timers.
    fn tick(&mut self) -> Result<()> {
        if self.needs_render {
            self.render();
        }

        let now = Instant::now();
        let timer_wait = self.timers.min_wait_ms(now);
        let resize_wait = self.pending_resize.map(|(started, _, _)| {
            let elapsed = now.saturating_duration_since(started);
            RESIZE_DEBOUNCE.saturating_sub(elapsed).as_millis() as u64
        });
        let min_wait_ms = match (timer_wait, resize_wait) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };

        if let Some(event) = self.terminal.read_event(min_wait_ms)? {
            self.handle_event(event);
            let mut drained = 1;
            while drained < INPUT_BATCH_CAP {
                match self.terminal.read_event(Some(0))? {
                    Some(event) => {
                        self.handle_event(event);
                        drained += 1;
                    }
                    None => break,
                }
            }
        }

        if let Some((started, w, h)) = self.pending_resize {
            if Instant::now().saturating_duration_since(started) >= RESIZE_DEBOUNCE {
                self.current.resize(w, h);
                self.previous.resize(w, h);
                self.previous.clear(Cell::blank());
                self.pending_resize = None;
                self.needs_render = true;
            }
        }

        self.fire_timers(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Quit => self.running = false,
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize detected, debouncing");
                self.pending_resize = Some((Instant::now(), w, h));
            }
            Event::Key(key_event) => self.handle_key(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
        }
    }

    fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.ctrl && key_event.key == i32::from(b'c') {
            self.running = false;
            return;
        }
        if self.exit_keys.contains(&key_event.key) && !key_event.shift && !key_event.ctrl && !key_event.alt {
            self.running = false;
            return;
        }
        if key_event.key == key::TAB && !key_event.ctrl && !key_event.alt {
            self.advance_tab(!key_event.shift);
            self.needs_render = true;
            return;
        }

        let focused_token = focus::find_focused(self.active_root()).map(FocusToken::of);
        let root = self.active_root_mut();
        let consumed = focused_token
            .and_then(|token| focus::find_mut(root, token))
            .map(|w| w.on_event(&Event::Key(key_event)))
            .unwrap_or(false);
        if !consumed {
            self.active_root_mut().on_event(&Event::Key(key_event));
        }
        self.needs_render = true;
    }

    fn advance_tab(&mut self, forward: bool) {
        let root = self.active_root();
        let stops = focus::collect_focusable(root);
        let current = focus::find_focused(root);
        let target_token = if forward {
            focus::next(&stops, current).map(FocusToken::of)
        } else {
            focus::previous(&stops, current).map(FocusToken::of)
        };
        let current_token = current.map(FocusToken::of);

        let root_mut = self.active_root_mut();
        if let Some(token) = current_token {
            if let Some(widget) = focus::find_mut(root_mut, token) {
                widget.set_focus(false);
            }
        }
        if let Some(token) = target_token {
            let root_mut = self.active_root_mut();
            if let Some(widget) = focus::find_mut(root_mut, token) {
                widget.set_focus(true);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.x;
        let y = mouse.y;

        self.update_hover(x, y);

        if mouse.mouse_left() && !mouse.mouse_release() {
            self.click_to_focus(x, y);
        }

        for i in (0..self.dialogs.len()).rev() {
            let Some(dialog) = self.dialogs.get_mut(i) else {
                continue;
            };
            let rect = dialog.rect;
            let modal = dialog.modal;
            let consumed = hit::find_at_mut(dialog.content.as_mut(), rect, x, y, false)
                .map(|w| w.on_event(&Event::Mouse(mouse)))
                .unwrap_or(false);

            if consumed {
                self.needs_render = true;
                return;
            }
            if modal && rect.contains(Position::new(x, y)) {
                self.needs_render = true;
                return;
            }
        }

        let area = self.current.bounds();
        if hit::find_at_mut(self.root.as_mut(), area, x, y, false)
            .map(|w| w.on_event(&Event::Mouse(mouse)))
            .unwrap_or(false)
        {
            self.needs_render = true;
        }
    }

    fn click_to_focus(&mut self, x: u16, y: u16) {
        let area = self.current.bounds();
        let target = hit::find_at(self.active_root(), area, x, y, true).map(FocusToken::of);
        // Distinguish empty space (blur) from a hit on a non-focusable widget
        // (leave focus alone), both of which leave `target` as `None`.
        let hit_anything = target.is_some() || hit::find_at(self.active_root(), area, x, y, false).is_some();
        let previous = focus::find_focused(self.active_root()).map(FocusToken::of);

        if previous != target && (target.is_some() || !hit_anything) {
            if let Some(token) = previous {
                let root_mut = self.active_root_mut();
                if let Some(widget) = focus::find_mut(root_mut, token) {
                    widget.set_focus(false);
                }
            }
        }
        if let Some(token) = target {
            let root_mut = self.active_root_mut();
            if let Some(widget) = focus::find_mut(root_mut, token) {
                widget.set_focus(true);
            }
        }
    }

    fn update_hover(&mut self, x: u16, y: u16) {
        let area = self.current.bounds();
        let new_token = hit::find_at(self.active_root(), area, x, y, false).map(FocusToken::of);
        let previous_token = self.dialogs.hovered();

        if previous_token == new_token {
            return;
        }

        if let Some(token) = previous_token {
            let root_mut = self.active_root_mut();
            if let Some(widget) = focus::find_mut(root_mut, token) {
                widget.set_hovered(false);
            }
        }

        let tooltip = if let Some(token) = new_token {
            let root_mut = self.active_root_mut();
            if let Some(widget) = focus::find_mut(root_mut, token) {
                widget.set_hovered(true);
                widget.tooltip()
            } else {
                None
            }
        } else {
            None
        };

        self.dialogs.set_hovered(new_token);
        self.dialogs.set_tooltip(tooltip);
        self.needs_render = true;
    }

    fn fire_timers(&mut self, now: Instant) {
        let fired = self.timers.poll(now);
        for id in fired {
            if let Some(cb) = self.callbacks.get_mut(&id) {
                cb(self.root.as_mut());
                self.needs_render = true;
            }
        }
    }

    fn render(&mut self) {
        let area = self.current.bounds();
        if let Some(container) = self.root.as_container_mut() {
            container.layout(area);
        }
        self.current.clear(Cell::new(
            " ",
            self.theme.foreground,
            self.theme.background,
            false,
            false,
            false,
        ));
        self.root.render(&mut self.current);

        for i in 0..self.dialogs.len() {
            if let Some(dialog) = self.dialogs.get_mut(i) {
                dialog.render_shadow(&mut self.current);
                self.current.push_clip(dialog.rect);
                dialog.content.render(&mut self.current);
                self.current.pop_clip();
            }
        }

        self.dialogs.render_tooltip(&mut self.current);

        let mut stdout = std::io::stdout();
        if flush_frame(&mut stdout, &self.current, &self.previous).is_ok() {
            self.previous = self.current.clone();
        }
        self.needs_render = false;
    }
}
