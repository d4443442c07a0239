//! The drawing scene
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `style`: Style tags, fonts, colors and the font chooser service
//! - `shapes`: Primitive types and the `Geometry` trait
//! - `text`: Texts, labels, text groups and font fitting
//! - `index`: Spatial index used for hit-testing
//! - `paint`: The painter interface

pub mod defaults;
pub mod index;
pub mod paint;
pub mod shapes;
pub mod style;
pub mod text;

use std::any::Any;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use slotmap::SlotMap;

use crate::errors::{CanvasError, Result};
use crate::log::{debug, trace};
use crate::types::{Point, px};

use index::SpatialIndex;
use paint::{Painter, TextPaint};
use shapes::{Geometry, Line, Polygon, Rectangle, Rhombus, Shape, ShapeId, ShapeKind};
use text::{Label, LabelSelector, Text, TextGroup, TextMetrics, plain_selector};

/// Model object association. Holds the model weakly so the canvas never
/// keeps it alive.
#[derive(Debug)]
struct Binding {
    model: Weak<dyn Any>,
    shape: ShapeId,
}

/// Bindings are keyed by the model's allocation address. The `Weak` in the
/// entry keeps that allocation reserved, so the address can't be reused by
/// another object while the entry exists.
fn model_key<T: Any>(model: &Rc<T>) -> usize {
    Rc::as_ptr(model) as *const () as usize
}

/// A retained drawing scene: primitives, hit-test indices, model bindings
/// and child layers.
///
/// Coordinates passed to the `create_*` methods are shifted by the offset
/// current at call time. Changing the offset later doesn't move existing
/// primitives, and layers have their own offset.
#[derive(Debug, Default)]
pub struct Canvas {
    shapes: SlotMap<ShapeId, Shape>,
    rectangles: Vec<ShapeId>,
    lines: Vec<ShapeId>,
    texts: Vec<ShapeId>,
    text_groups: Vec<TextGroup>,
    /// Rhombi and polygons
    polygon_index: SpatialIndex<ShapeId>,
    /// Boxes of shown text labels
    text_index: SpatialIndex<ShapeId>,
    bindings: HashMap<usize, Binding>,
    layers: Vec<Canvas>,
    offset: Point,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Shift applied to primitives created from now on
    pub fn set_offset(&mut self, dx: i32, dy: i32) {
        self.offset = px(dx, dy);
    }

    fn insert(&mut self, kind: ShapeKind) -> ShapeId {
        self.shapes.insert_with_key(|id| Shape::new(id, kind))
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    pub fn create_rectangle(&mut self, left_x: i32, top_y: i32, width: i32, height: i32) -> ShapeId {
        let origin = self.offset + px(left_x, top_y);
        let id = self.insert(Rectangle::new(origin.x, origin.y, width, height).into());
        self.rectangles.push(id);
        id
    }

    pub fn create_line(&mut self, start_x: i32, start_y: i32, finish_x: i32, finish_y: i32) -> ShapeId {
        let line = Line::new(
            self.offset + px(start_x, start_y),
            self.offset + px(finish_x, finish_y),
        );
        let id = self.insert(line.into());
        self.lines.push(id);
        id
    }

    pub fn create_polygon(&mut self, points: impl IntoIterator<Item = Point>) -> ShapeId {
        let offset = self.offset;
        let polygon = Polygon::new(points.into_iter().map(|p| p + offset).collect());
        self.insert_indexed_polygon(polygon.into())
    }

    pub fn create_rhombus(&mut self, left_x: i32, top_y: i32, diag_width: i32, diag_height: i32) -> ShapeId {
        let origin = self.offset + px(left_x, top_y);
        let rhombus = Rhombus::new(origin.x, origin.y, diag_width, diag_height);
        self.insert_indexed_polygon(rhombus.into())
    }

    fn insert_indexed_polygon(&mut self, kind: ShapeKind) -> ShapeId {
        let bounds = kind.bounds();
        let id = self.insert(kind);
        self.polygon_index
            .put(id, bounds.min.x, bounds.min.y, bounds.width(), bounds.height());
        id
    }

    /// Text showing `text` as its single label. The label is measured when a
    /// painter first asks for it.
    pub fn create_text(&mut self, left_x: i32, bottom_y: i32, text: &str) -> ShapeId {
        self.insert_text(left_x, bottom_y, plain_selector(text))
    }

    /// Text whose candidate labels come from `selector`
    pub fn create_text_with(
        &mut self,
        left_x: i32,
        bottom_y: i32,
        selector: impl LabelSelector + 'static,
    ) -> ShapeId {
        self.insert_text(left_x, bottom_y, Rc::new(selector))
    }

    fn insert_text(&mut self, left_x: i32, bottom_y: i32, selector: Rc<dyn LabelSelector>) -> ShapeId {
        let origin = self.offset + px(left_x, bottom_y);
        let id = self.insert(Text::new(origin.x, origin.y, selector).into());
        self.texts.push(id);
        id
    }

    /// A block of `line_styles.len()` lines fitted into `height` pixels
    /// above `bottom_y`
    pub fn create_text_group<S: Into<String>>(
        &mut self,
        left_x: i32,
        bottom_y: i32,
        height: i32,
        line_styles: impl IntoIterator<Item = S>,
    ) -> &mut TextGroup {
        let origin = self.offset + px(left_x, bottom_y);
        let styles = line_styles.into_iter().map(Into::into).collect();
        let index = self.text_groups.len();
        self.text_groups
            .push(TextGroup::new(origin.x, origin.y, height, styles));
        &mut self.text_groups[index]
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    /// `None` if `id` was invalidated by [`clear`](Self::clear) or belongs to
    /// another canvas
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    fn resolve<'a>(&'a self, ids: &'a [ShapeId]) -> impl Iterator<Item = &'a Shape> {
        ids.iter().filter_map(|id| self.shapes.get(*id))
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Shape> {
        self.resolve(&self.rectangles)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Shape> {
        self.resolve(&self.lines)
    }

    pub fn texts(&self) -> impl Iterator<Item = &Shape> {
        self.resolve(&self.texts)
    }

    /// Rhombi and polygons in creation order
    pub fn polygons(&self) -> impl Iterator<Item = &Shape> {
        self.polygon_index
            .values()
            .filter_map(|id| self.shapes.get(*id))
    }

    pub fn text_groups(&self) -> &[TextGroup] {
        &self.text_groups
    }

    pub fn text_groups_mut(&mut self) -> &mut [TextGroup] {
        &mut self.text_groups
    }

    pub fn polygon_index(&self) -> &SpatialIndex<ShapeId> {
        &self.polygon_index
    }

    pub fn text_index(&self) -> &SpatialIndex<ShapeId> {
        &self.text_index
    }

    /// Number of primitives and text groups on this canvas, layers excluded
    pub fn len(&self) -> usize {
        self.shapes.len() + self.text_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------------

    fn text_mut(&mut self, id: ShapeId) -> Result<&mut Text> {
        self.shapes
            .get_mut(id)
            .ok_or(CanvasError::UnknownShape)?
            .as_text_mut()
            .ok_or(CanvasError::NotAText)
    }

    /// Candidate labels of text `id`, computing them on first request
    pub fn text_labels(&mut self, id: ShapeId, metrics: &dyn TextMetrics) -> Result<&[Label]> {
        Ok(self.text_mut(id)?.labels(metrics))
    }

    /// Show or hide a computed label of text `id`.
    ///
    /// Showing a label with a known height makes it hit-testable. Hiding it
    /// again leaves the hit-test entry in place until [`clear`](Self::clear).
    pub fn set_label_visible(&mut self, id: ShapeId, label: usize, visible: bool) -> Result<()> {
        let text = self
            .shapes
            .get_mut(id)
            .ok_or(CanvasError::UnknownShape)?
            .as_text_mut()
            .ok_or(CanvasError::NotAText)?;
        text.set_label_visible(id, label, visible, &mut self.text_index)
    }

    // ------------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------------

    /// Paint this canvas: rectangles, rhombi and polygons, lines, texts, then
    /// text groups. Hidden shapes are skipped. Layers are not painted; see
    /// [`paint_all`](Self::paint_all).
    pub fn paint(&mut self, painter: &mut dyn Painter) {
        painter.pre_paint();

        for shape in self.resolve(&self.rectangles).filter(|s| s.is_visible()) {
            if let ShapeKind::Rectangle(rectangle) = shape.kind() {
                painter.paint_rectangle(shape, rectangle);
            }
        }

        for shape in self.polygons().filter(|s| s.is_visible()) {
            match shape.kind() {
                ShapeKind::Rhombus(rhombus) => painter.paint_rhombus(shape, rhombus),
                ShapeKind::Polygon(polygon) => painter.paint_polygon(shape, polygon),
                _ => {}
            }
        }

        for shape in self.resolve(&self.lines).filter(|s| s.is_visible()) {
            if let ShapeKind::Line(line) = shape.kind() {
                painter.paint_line(shape, line);
            }
        }

        for id in &self.texts {
            let Some(shape) = self.shapes.get_mut(*id) else {
                continue;
            };
            if !shape.is_visible() {
                continue;
            }
            let (styles, kind) = shape.parts_mut();
            if let ShapeKind::Text(text) = kind {
                painter.paint_text(TextPaint {
                    id: *id,
                    styles,
                    text,
                    index: &mut self.text_index,
                });
            }
        }

        for group in &mut self.text_groups {
            painter.paint_text_group(group);
        }
    }

    /// Paint this canvas, then every layer (recursively) in layer order
    pub fn paint_all(&mut self, painter: &mut dyn Painter) {
        self.paint(painter);
        for layer in &mut self.layers {
            layer.paint_all(painter);
        }
    }

    // ------------------------------------------------------------------------
    // Model binding
    // ------------------------------------------------------------------------

    /// Associate `model` with shape `id`, replacing any shape previously
    /// bound to the same model. The shape remembers the model weakly.
    pub fn bind<T: Any>(&mut self, id: ShapeId, model: &Rc<T>) -> Result<()> {
        let shape = self.shapes.get_mut(id).ok_or(CanvasError::UnknownShape)?;
        let weak: Weak<T> = Rc::downgrade(model);
        let weak: Weak<dyn Any> = weak;
        shape.stamp_model(weak.clone());

        self.prune_bindings();
        if let Some(old) = self
            .bindings
            .insert(model_key(model), Binding { model: weak, shape: id })
        {
            if old.shape != id {
                debug!(?old.shape, ?id, "model rebound to another shape");
            }
        }
        Ok(())
    }

    /// Shape bound to `model`, if any
    pub fn primitive_for<T: Any>(&self, model: &Rc<T>) -> Option<&Shape> {
        let binding = self.bindings.get(&model_key(model))?;
        if binding.model.strong_count() == 0 {
            return None;
        }
        self.shapes.get(binding.shape)
    }

    /// Drop bindings whose model object no longer exists. Returns how many
    /// were removed.
    pub fn prune_bindings(&mut self) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, b| b.model.strong_count() > 0);
        before - self.bindings.len()
    }

    /// Number of bindings whose model object is still alive
    pub fn live_bindings(&self) -> usize {
        self.bindings
            .values()
            .filter(|b| b.model.strong_count() > 0)
            .count()
    }

    // ------------------------------------------------------------------------
    // Hit-testing
    // ------------------------------------------------------------------------

    /// Visible primitive under `(x, y)`
    pub fn primitive_at(&self, x: i32, y: i32) -> Option<&Shape> {
        self.primitive_near(x, 0, y, 0)
    }

    /// Visible primitive within the thresholds of `(x, y)`.
    ///
    /// Rectangles are checked first, in creation order, then rhombi and
    /// polygons, then shown text labels.
    pub fn primitive_near(&self, x: i32, x_threshold: i32, y: i32, y_threshold: i32) -> Option<&Shape> {
        let rectangle = self.rectangles().find(|s| {
            s.is_visible()
                && s.as_rectangle()
                    .is_some_and(|r| r.contains(x, x_threshold, y, y_threshold))
        });
        if rectangle.is_some() {
            return rectangle;
        }

        let polygon = self
            .polygon_index
            .query(x, x_threshold, y, y_threshold)
            .find_map(|id| self.visible_shape(*id));
        if polygon.is_some() {
            return polygon;
        }

        let shifted = px(x, y) + self.offset;
        self.text_index
            .query(shifted.x, x_threshold, shifted.y, y_threshold)
            .find_map(|id| self.visible_shape(*id))
    }

    fn visible_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id).filter(|s| s.is_visible())
    }

    // ------------------------------------------------------------------------
    // Layers
    // ------------------------------------------------------------------------

    /// Append an empty layer
    pub fn new_layer(&mut self) -> &mut Canvas {
        let index = self.layers.len();
        self.layers.push(Canvas::new());
        trace!(index, "layer created");
        &mut self.layers[index]
    }

    /// Append `count` empty layers and return them
    pub fn create_layers(&mut self, count: usize) -> &mut [Canvas] {
        let start = self.layers.len();
        self.layers.extend((0..count).map(|_| Canvas::new()));
        debug!(count, total = self.layers.len(), "layers created");
        &mut self.layers[start..]
    }

    pub fn layers(&self) -> &[Canvas] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Canvas] {
        &mut self.layers
    }

    pub fn layer(&self, index: usize) -> Result<&Canvas> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(CanvasError::LayerOutOfRange { index, len })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Canvas> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(CanvasError::LayerOutOfRange { index, len })
    }

    /// Remove every primitive, index entry and binding from this canvas and
    /// all its layers. The layers themselves stay.
    pub fn clear(&mut self) {
        debug!(shapes = self.shapes.len(), layers = self.layers.len(), "clearing canvas");
        self.shapes.clear();
        self.rectangles.clear();
        self.lines.clear();
        self.texts.clear();
        self.text_groups.clear();
        self.polygon_index.clear();
        self.text_index.clear();
        self.bindings.clear();
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_applies_at_creation() {
        let mut canvas = Canvas::new();
        canvas.set_offset(10, 20);
        let rect = canvas.create_rectangle(1, 2, 3, 4);
        canvas.set_offset(100, 100);
        let line = canvas.create_line(0, 0, 5, 5);

        let r = canvas.shape(rect).unwrap().as_rectangle().unwrap();
        assert_eq!((r.left_x(), r.top_y()), (11, 22));
        let l = canvas.shape(line).unwrap().as_line().unwrap();
        assert_eq!(l.start(), px(100, 100));
        assert_eq!(l.finish(), px(105, 105));
    }

    #[test]
    fn rhombus_is_indexed() {
        let mut canvas = Canvas::new();
        let id = canvas.create_rhombus(10, 10, 8, 8);
        assert_eq!(canvas.polygon_index().len(), 1);
        assert_eq!(canvas.primitive_at(14, 14).map(Shape::id), Some(id));
        assert!(canvas.primitive_at(30, 30).is_none());
    }

    #[test]
    fn hidden_shapes_are_not_hit() {
        let mut canvas = Canvas::new();
        let id = canvas.create_rectangle(0, 0, 10, 10);
        canvas.shape_mut(id).unwrap().set_visible(false);
        assert!(canvas.primitive_at(5, 5).is_none());
    }

    #[test]
    fn stale_ids_after_clear() {
        let mut canvas = Canvas::new();
        let id = canvas.create_rectangle(0, 0, 10, 10);
        canvas.clear();
        let fresh = canvas.create_rectangle(0, 0, 10, 10);
        assert!(canvas.shape(id).is_none());
        assert_ne!(id, fresh);
    }

    #[test]
    fn bind_unknown_shape() {
        let mut canvas = Canvas::new();
        let mut other = Canvas::new();
        let foreign = other.create_rectangle(0, 0, 1, 1);
        other.clear();
        let model = Rc::new(1u8);
        assert_eq!(canvas.bind(foreign, &model), Err(CanvasError::UnknownShape));
    }

    #[test]
    fn labels_of_non_text() {
        struct Mono;
        impl TextMetrics for Mono {
            fn text_length(&self, text: &str) -> i32 {
                text.len() as i32
            }
        }
        let mut canvas = Canvas::new();
        let rect = canvas.create_rectangle(0, 0, 1, 1);
        assert!(matches!(
            canvas.text_labels(rect, &Mono),
            Err(CanvasError::NotAText)
        ));
        assert_eq!(
            canvas.set_label_visible(rect, 0, true),
            Err(CanvasError::NotAText)
        );
    }
}
