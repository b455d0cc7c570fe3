//! A core for building immediate-mode-styled, retained-widget terminal
//! user interfaces: the cell/buffer grid, the VT/ANSI input decoder, raw
//! terminal handling, a minimal flex layout, the widget contract, and the
//! event loop that ties them together. No concrete widget catalog or
//! theming engine beyond the widget contract and a theme record ships
//! here; those are built on top.

mod app;
mod buffer;
mod cell;
mod color;
mod dialog;
mod error;
mod event;
mod focus;
mod geometry;
mod hit;
mod layout;
mod style;
mod term;
mod text;
mod timer;
mod vt;
mod widget;
mod width;

pub use app::App;
pub use buffer::Buffer;
pub use cell::Cell;
pub use color::{Color, Theme};
pub use dialog::{restore_focus, Dialog, DialogStack};
pub use error::{Error, Result};
pub use event::{key, Event, KeyEvent, MouseEvent};
pub use focus::{collect_focusable, find_focused, find_mut, first_focusable_mut, next, previous, FocusToken};
pub use geometry::{Position, Rect, Size};
pub use hit::{find_at, find_at_mut};
pub use layout::{split, Constraint, Direction};
pub use style::Style;
pub use term::{flush_frame, Terminal};
pub use text::{expand_tabs, filter_control_chars, string_display_width, truncate_to_display_width};
pub use timer::{TimerId, Timers};
pub use vt::VTParser;
pub use widget::{Container, ResponsiveVisibility, ScreenHeight, ScreenSize, SizeRequest, Widget};
pub use width::{char_display_width, utf8_display_width};
