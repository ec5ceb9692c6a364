//! # GUI Error Types
//!
//! Nothing in a frame is fatal. Every error here is either returned to the
//! caller or, on the fluent [`crate::ControlMut`] path, logged through
//! `tracing` and turned into a no-op.

use prism_core::PickError;
use thiserror::Error;

use crate::control::{Capability, ControlId};

/// Errors that can occur in the control framework.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuiError {
    /// An argument had the wrong shape or range.
    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument {
        /// Operation that rejected the argument.
        operation: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A raw event name that the router does not understand.
    #[error("unknown event kind: {0:?}")]
    UnknownEventKind(String),

    /// The control kind does not have the capability an operation needs.
    #[error("control {control:?} does not support {capability:?}")]
    Unsupported {
        /// Target control.
        control: ControlId,
        /// Missing capability.
        capability: Capability,
    },

    /// No live control with this id.
    #[error("no such control: {0:?}")]
    NoSuchControl(ControlId),

    /// A control with this name already exists.
    #[error("duplicate control name: {0:?}")]
    DuplicateName(String),

    /// Making the requested parent would create a cycle.
    #[error("control {child:?} cannot be placed inside {parent:?}")]
    InvalidParent {
        /// Would-be parent.
        parent: ControlId,
        /// Would-be child.
        child: ControlId,
    },

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Pick-key allocation failed.
    #[error(transparent)]
    Pick(#[from] PickError),
}

impl GuiError {
    /// Shorthand for [`GuiError::InvalidArgument`].
    #[must_use]
    pub fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { operation, reason: reason.into() }
    }
}

/// Result type for GUI operations.
pub type GuiResult<T> = Result<T, GuiError>;
