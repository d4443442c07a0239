//! Retained-mode 2D drawing scene for Gantt-style charts.
//!
//! A [`Canvas`] stores abstract primitives (rectangles, lines, polygons,
//! rhombi, texts and multi-line text groups) without knowing how they are
//! drawn. It supports:
//!
//! - layered composition through child canvases,
//! - hit-testing by pixel coordinate,
//! - binding primitives to model objects without keeping them alive,
//! - deferred text labels chosen once a [`TextMetrics`] service exists,
//! - fitting text groups into a height budget via a [`FontChooser`].
//!
//! Rendering is done by a [`Painter`] implementation supplied by the caller.

pub mod canvas;
pub mod errors;
pub mod log;
pub mod types;

pub use canvas::Canvas;
pub use canvas::index::SpatialIndex;
pub use canvas::paint::{Painter, TextPaint};
pub use canvas::shapes::{
    Arrow, Geometry, Line, Polygon, Rectangle, Rhombus, Shape, ShapeId, ShapeKind,
};
pub use canvas::style::{Color, Font, FontChooser, FontStyle, HAlign, StyleTags, VAlign};
pub use canvas::text::{GroupText, Label, LabelSelector, Text, TextGroup, TextMetrics};
pub use errors::{CanvasError, Result};
pub use types::{Bounds, Point, px};
