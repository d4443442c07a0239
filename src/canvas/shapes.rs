//! Drawing primitives stored on a canvas
//!
//! Every primitive is a [`Shape`]: a common record (style tags, visibility,
//! bound model object) wrapping a kind-specific payload in [`ShapeKind`].

use std::any::Any;
use std::rc::{Rc, Weak};

use enum_dispatch::enum_dispatch;

use crate::types::{Bounds, Point, px};

use super::defaults;
use super::style::{Color, StyleTags};
use super::text::Text;

slotmap::new_key_type! {
    /// Handle to a primitive owned by a [`Canvas`](super::Canvas).
    ///
    /// Handles are generation-checked: once the canvas is cleared, old
    /// handles resolve to nothing instead of to a newer primitive.
    pub struct ShapeId;
}

/// Geometry shared by every primitive payload
#[enum_dispatch]
pub trait Geometry {
    /// Axis-aligned bounds in canvas pixels
    fn bounds(&self) -> Bounds;
}

/// Kind-specific payload of a [`Shape`]
#[enum_dispatch(Geometry)]
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Rectangle,
    Line,
    Polygon,
    Rhombus,
    Text,
}

/// A primitive on the canvas
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    styles: StyleTags,
    visible: bool,
    model: Option<Weak<dyn Any>>,
    kind: ShapeKind,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            styles: StyleTags::new(),
            visible: true,
            model: None,
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn styles(&self) -> &StyleTags {
        &self.styles
    }

    pub fn add_style(&mut self, style: impl Into<String>) {
        self.styles.push(style);
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles.contains(style)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.kind.bounds()
    }

    /// The model object this shape was bound to, if it is still alive and
    /// is a `T`
    pub fn model<T: Any>(&self) -> Option<Rc<T>> {
        self.model.as_ref()?.upgrade()?.downcast::<T>().ok()
    }

    pub(crate) fn parts_mut(&mut self) -> (&StyleTags, &mut ShapeKind) {
        (&self.styles, &mut self.kind)
    }

    pub(crate) fn stamp_model(&mut self, model: Weak<dyn Any>) {
        self.model = Some(model);
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match &self.kind {
            ShapeKind::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rectangle_mut(&mut self) -> Option<&mut Rectangle> {
        match &mut self.kind {
            ShapeKind::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match &self.kind {
            ShapeKind::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut Line> {
        match &mut self.kind {
            ShapeKind::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ShapeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.kind {
            ShapeKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

// ============================================================================
// Shape Types
// ============================================================================

/// An axis-aligned rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    left_x: i32,
    top_y: i32,
    width: i32,
    height: i32,
    background: Option<Color>,
}

impl Rectangle {
    /// A negative `width` extends the rectangle to the left of `left_x`:
    /// the origin is moved and the stored width is made positive.
    pub fn new(left_x: i32, top_y: i32, width: i32, height: i32) -> Self {
        let (left_x, width) = if width < 0 {
            (left_x + width, -width)
        } else {
            (left_x, width)
        };
        Self {
            left_x,
            top_y,
            width,
            height,
            background: None,
        }
    }

    pub fn left_x(&self) -> i32 {
        self.left_x
    }

    pub fn top_y(&self) -> i32 {
        self.top_y
    }

    pub fn right_x(&self) -> i32 {
        self.left_x + self.width
    }

    pub fn bottom_y(&self) -> i32 {
        self.top_y + self.height
    }

    pub fn middle_x(&self) -> i32 {
        self.left_x + self.width / 2
    }

    pub fn middle_y(&self) -> i32 {
        self.top_y + self.height / 2
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Whether `(x, y)` falls inside the rectangle grown by the thresholds
    pub fn contains(&self, x: i32, x_threshold: i32, y: i32, y_threshold: i32) -> bool {
        self.bounds().contains_within(x, x_threshold, y, y_threshold)
    }
}

impl Geometry for Rectangle {
    fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(px(self.left_x, self.top_y), self.width, self.height)
    }
}

/// Arrowhead drawn at the finish end of a [`Line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub length: i32,
    pub width: i32,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            length: defaults::ARROW_LENGTH,
            width: defaults::ARROW_WIDTH,
        }
    }
}

/// A straight segment, optionally ending in an arrowhead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    start: Point,
    finish: Point,
    arrow: Option<Arrow>,
}

impl Line {
    pub fn new(start: Point, finish: Point) -> Self {
        Self {
            start,
            finish,
            arrow: None,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn finish(&self) -> Point {
        self.finish
    }

    pub fn arrow(&self) -> Option<Arrow> {
        self.arrow
    }

    pub fn set_arrow(&mut self, arrow: Option<Arrow>) {
        self.arrow = arrow;
    }
}

impl Geometry for Line {
    fn bounds(&self) -> Bounds {
        Bounds {
            min: self.start.min(self.finish),
            max: self.start.max(self.finish),
        }
    }
}

/// A closed polygon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Geometry for Polygon {
    fn bounds(&self) -> Bounds {
        Bounds::enclosing(&self.points).unwrap_or_default()
    }
}

/// A diamond inscribed in the box at `(left_x, top_y)` with the given
/// diagonals; used for milestones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rhombus {
    left_x: i32,
    top_y: i32,
    diag_width: i32,
    diag_height: i32,
}

impl Rhombus {
    pub fn new(left_x: i32, top_y: i32, diag_width: i32, diag_height: i32) -> Self {
        Self {
            left_x,
            top_y,
            diag_width,
            diag_height,
        }
    }

    pub fn left_x(&self) -> i32 {
        self.left_x
    }

    pub fn top_y(&self) -> i32 {
        self.top_y
    }

    pub fn diag_width(&self) -> i32 {
        self.diag_width
    }

    pub fn diag_height(&self) -> i32 {
        self.diag_height
    }

    /// Vertices clockwise from the top
    pub fn points(&self) -> [Point; 4] {
        let mid_x = self.left_x + self.diag_width / 2;
        let mid_y = self.top_y + self.diag_height / 2;
        [
            px(mid_x, self.top_y),
            px(self.left_x + self.diag_width, mid_y),
            px(mid_x, self.top_y + self.diag_height),
            px(self.left_x, mid_y),
        ]
    }
}

impl Geometry for Rhombus {
    fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(
            px(self.left_x, self.top_y),
            self.diag_width,
            self.diag_height,
        )
    }
}
