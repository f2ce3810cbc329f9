//! Geometry and interaction engine for a ring-shaped progress slider.
//!
//! The crate never draws anything. A host reports the widget size and
//! pointer events to a [`Slider`], and reads back a [`RenderParams`]
//! snapshot describing the arcs and thumb to paint.

mod macros;

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod mapper;
pub mod slider;
pub mod touch;

pub use color::Color;
pub use config::{Property, SliderConfig, ThumbSize};
pub use error::SliderError;
pub use geometry::{ArcGeometry, Geometry, Point, ProgressGeometry, Rect, Size, TouchRing};
pub use host::{NoopHost, ResourceId, SliderHost, ThumbSource};
pub use slider::{RenderParams, Slider};
pub use touch::{TouchKind, TouchPhase};
