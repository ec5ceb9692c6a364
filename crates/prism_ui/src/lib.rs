//! # PRISM UI
//!
//! Retained-mode widgets drawn entirely onto a pixel canvas. There are no
//! platform widgets and no per-control event targets: the toolkit does its
//! own hit testing, focus, z-ordering and orientation transforms.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PRISM UI FRAME                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Raw event → pick surface pixel → (control, part) → behavior │
//! │                                                      ↓       │
//! │                                      state change, mark dirty │
//! │                                                      ↓       │
//! │  draw(): timers → rebuild dirty buffers → composite z-order  │
//! │          (display + pick)     (display + pick)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each control owns two offscreen buffers. The display buffer is what the
//! user sees. The pick buffer is the same silhouette filled with one flat
//! color derived from the control's pick key. Compositing the pick buffers
//! in z-order yields a canvas-sized surface where one pixel read answers
//! "what is under the pointer", occlusion included.
//!
//! ## Usage
//!
//! ```
//! use prism_ui::{ControlKind, Gui, PointerEvent};
//!
//! let mut gui = Gui::with_size(320, 200);
//! let ok = gui.create(ControlKind::Button, "ok", 10.0, 10.0, 100.0, 30.0).unwrap();
//! gui.control(ok).text("OK").corners(&[4.0]);
//!
//! gui.draw(0);
//! gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
//! assert_eq!(gui.active(), Some(ok));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod action;
pub mod config;
pub mod control;
pub mod error;
pub mod face;
mod gui;
mod handle;
pub mod input;
pub mod render;
mod router;
pub mod scheme;
pub mod timer;
pub mod tree;

pub use action::{ActionEvent, ActionHandler, ActionValue};
pub use config::GuiConfig;
pub use control::{
    Align, Axis, Behavior, Capabilities, Capability, Control, ControlFlags, ControlId, ControlKind, Side, Ticks,
    VisualState, PART_THUMB, PART_THUMB_HIGH, PART_TRACK,
};
pub use error::{GuiError, GuiResult};
pub use face::{BlockGlyphs, GlyphSource};
pub use gui::Gui;
pub use handle::ControlMut;
pub use input::{Key, KeyEvent, KeyInput, Modifiers, MouseButton, PointerEvent, PointerKind, RawEvent};
pub use render::FrameStats;
pub use scheme::{ColorRole, Palette, Scheme, SchemeId};
pub use tree::ControlTree;
