//! # PRISM
//!
//! Canvas widget toolkit. Everything is drawn into pixel surfaces and the
//! toolkit resolves pointer hits itself through a color-coded pick surface.
//!
//! ## Crates
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          PRISM                            │
//! ├──────────────────────────────────────────────────────────┤
//! │  prism       modes (closed state machine), host demo      │
//! │     │                                                    │
//! │  prism_ui    controls, renderer, router, panes, tooltips  │
//! │     │                                                    │
//! │  prism_core  surfaces, orientation, pick keys             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `modes`: switches whole GUI subtrees in and out on intents posted from
//!   action handlers

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod modes;

pub use prism_core as core;
pub use prism_ui as ui;

pub use modes::{Intent, IntentQueue, IntentReceiver, IntentSender, Mode, ModeError, ModeKind, ModeMachine, Subtree};
pub use prism_core::{Orientation, Rect, Rgba, Surface};
pub use prism_ui::{
    ActionEvent, ActionValue, Axis, ControlId, ControlKind, FrameStats, Gui, GuiConfig, GuiError, GuiResult,
    KeyEvent, PointerEvent, Side,
};
