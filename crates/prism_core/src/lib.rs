//! # PRISM Core
//!
//! The raster layer underneath the PRISM control framework:
//! - RGBA pixels and CPU [`Surface`]s (display and pick buffers)
//! - The four cardinal [`Orientation`]s and their exact inverse mappings
//! - The [`PickAllocator`] handing out flat pick colors
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       PRISM CORE                           │
//! ├───────────────────────────────────────────────────────────┤
//! │  Rect / Rgba  →  Surface (fill, stroke, blit)              │
//! │                      ↑                                     │
//! │  Orientation ────────┘  (blit samples through xy())        │
//! │  PickAllocator → PickKey → Rgba key colors (+ part index)  │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod geom;
pub mod orientation;
pub mod pick;
pub mod pixel;
pub mod surface;

pub use geom::Rect;
pub use orientation::{Orientation, ParseOrientationError, Transform};
pub use pick::{PickAllocator, PickError, PickKey, MAX_PARTS, PART_BITS};
pub use pixel::Rgba;
pub use surface::{BlendMode, Surface, SurfaceError};
