//! Painter interface driven by [`Canvas::paint`](super::Canvas::paint)

use crate::errors::Result;

use super::index::SpatialIndex;
use super::shapes::{Line, Polygon, Rectangle, Rhombus, Shape, ShapeId};
use super::style::StyleTags;
use super::text::{Label, Text, TextGroup, TextMetrics};

/// A rendering backend.
///
/// The canvas calls [`pre_paint`](Self::pre_paint) once, then one `paint_*`
/// method per visible primitive. Painters only read the primitives; the
/// exceptions are choosing which text label to show and fitting text group
/// fonts, both of which go through the handles passed in.
pub trait Painter {
    fn pre_paint(&mut self) {}

    fn paint_rectangle(&mut self, shape: &Shape, rectangle: &Rectangle);

    fn paint_line(&mut self, shape: &Shape, line: &Line);

    fn paint_polygon(&mut self, shape: &Shape, polygon: &Polygon);

    /// Defaults to painting the rhombus as a four-point polygon
    fn paint_rhombus(&mut self, shape: &Shape, rhombus: &Rhombus) {
        self.paint_polygon(shape, &Polygon::new(rhombus.points().to_vec()));
    }

    fn paint_text(&mut self, text: TextPaint<'_>);

    fn paint_text_group(&mut self, group: &mut TextGroup);
}

/// A text primitive handed to [`Painter::paint_text`], together with the
/// canvas text index so shown labels become hit-testable
pub struct TextPaint<'a> {
    pub(crate) id: ShapeId,
    pub(crate) styles: &'a StyleTags,
    pub(crate) text: &'a mut Text,
    pub(crate) index: &'a mut SpatialIndex<ShapeId>,
}

impl TextPaint<'_> {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn styles(&self) -> &StyleTags {
        self.styles
    }

    pub fn text(&self) -> &Text {
        self.text
    }

    /// Candidate labels, best first
    pub fn labels(&mut self, metrics: &dyn TextMetrics) -> &[Label] {
        self.text.labels(metrics)
    }

    /// Mark label `index` visible, registering it for hit-testing
    pub fn show_label(&mut self, index: usize) -> Result<()> {
        self.text.set_label_visible(self.id, index, true, self.index)
    }

    /// Mark label `index` hidden. Its hit-test entry, if any, is kept.
    pub fn hide_label(&mut self, index: usize) -> Result<()> {
        self.text.set_label_visible(self.id, index, false, self.index)
    }
}
