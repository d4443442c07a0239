//! Text primitives, label selection and text group font fitting
//!
//! A [`Text`] doesn't store its string directly. It stores a
//! [`LabelSelector`] which, once a [`TextMetrics`] service is available,
//! produces ranked candidate [`Label`]s: a full label, an abbreviated one,
//! and so on. The painter picks whichever fits and marks it visible.

use std::fmt;
use std::rc::Rc;

use crate::errors::{CanvasError, Result};
use crate::log::{debug, trace};
use crate::types::{Bounds, Point, px};

use super::defaults;
use super::index::SpatialIndex;
use super::shapes::{Geometry, ShapeId};
use super::style::{Color, Font, FontChooser, HAlign, VAlign};

/// Text measurement service
pub trait TextMetrics {
    /// Pixel width of `text` in the current font context
    fn text_length(&self, text: &str) -> i32;

    /// Pixel height of `text`, when the service knows it
    fn text_height(&self, _text: &str) -> Option<i32> {
        None
    }
}

/// Deferred computation of the candidate labels of a [`Text`].
///
/// Any `Fn(&dyn TextMetrics) -> Vec<Label>` closure is a selector.
pub trait LabelSelector {
    fn select(&self, metrics: &dyn TextMetrics) -> Vec<Label>;
}

impl<F> LabelSelector for F
where
    F: Fn(&dyn TextMetrics) -> Vec<Label>,
{
    fn select(&self, metrics: &dyn TextMetrics) -> Vec<Label> {
        self(metrics)
    }
}

/// Selector for a fixed string: one candidate, measured on demand
pub(crate) fn plain_selector(text: &str) -> Rc<dyn LabelSelector> {
    let text = text.to_owned();
    Rc::new(move |metrics: &dyn TextMetrics| {
        vec![Label::new(
            text.clone(),
            metrics.text_length(&text),
            metrics.text_height(&text),
        )]
    })
}

/// One candidate rendering of a [`Text`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    width: i32,
    /// `None` while the height is unknown
    height: Option<i32>,
    visible: bool,
    registered: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, width: i32, height: Option<i32>) -> Self {
        Self {
            text: text.into(),
            width,
            height,
            visible: false,
            registered: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> Option<i32> {
        self.height
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A text primitive anchored at its bottom-left corner
#[derive(Clone)]
pub struct Text {
    position: Point,
    font: Option<Font>,
    max_length: i32,
    h_align: HAlign,
    v_align: VAlign,
    selector: Rc<dyn LabelSelector>,
    labels: Option<Vec<Label>>,
}

impl Text {
    pub(crate) fn new(left_x: i32, bottom_y: i32, selector: Rc<dyn LabelSelector>) -> Self {
        Self {
            position: px(left_x, bottom_y),
            font: None,
            max_length: defaults::TEXT_MAX_LENGTH,
            h_align: HAlign::default(),
            v_align: VAlign::default(),
            selector,
            labels: None,
        }
    }

    pub fn left_x(&self) -> i32 {
        self.position.x
    }

    pub fn bottom_y(&self) -> i32 {
        self.position.y
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    pub fn max_length(&self) -> i32 {
        self.max_length
    }

    pub fn set_max_length(&mut self, max_length: i32) {
        self.max_length = max_length;
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    pub fn set_alignment(&mut self, h_align: HAlign, v_align: VAlign) {
        self.h_align = h_align;
        self.v_align = v_align;
    }

    /// Replace the selector. Cached labels are dropped; index entries of
    /// previously shown labels stay until the canvas is cleared.
    pub fn set_selector(&mut self, selector: impl LabelSelector + 'static) {
        self.selector = Rc::new(selector);
        self.labels = None;
    }

    /// Candidate labels, computed by the selector on first call and cached
    pub fn labels(&mut self, metrics: &dyn TextMetrics) -> &[Label] {
        self.labels
            .get_or_insert_with(|| self.selector.select(metrics))
            .as_slice()
    }

    /// Labels computed so far, if the selector has run
    pub fn cached_labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    /// Toggle a cached label. Showing a label with a known height registers
    /// its box in `index` the first time; hiding never removes the entry.
    pub(crate) fn set_label_visible(
        &mut self,
        owner: ShapeId,
        label: usize,
        visible: bool,
        index: &mut SpatialIndex<ShapeId>,
    ) -> Result<()> {
        let position = self.position;
        let labels = self.labels.as_deref_mut().unwrap_or_default();
        let len = labels.len();
        let label = labels
            .get_mut(label)
            .ok_or(CanvasError::LabelOutOfRange { index: label, len })?;
        label.visible = visible;
        if !visible || label.registered {
            return Ok(());
        }
        if let Some(height) = label.height {
            index.put(owner, position.x, position.y - height, label.width, height);
            label.registered = true;
            trace!(text = %label.text, width = label.width, height, "label registered");
        }
        Ok(())
    }
}

impl Geometry for Text {
    fn bounds(&self) -> Bounds {
        let (width, height) = self
            .cached_labels()
            .unwrap_or_default()
            .iter()
            .fold((0, 0), |(w, h), l| {
                (w.max(l.width), h.max(l.height.unwrap_or(0)))
            });
        Bounds::from_origin_size(self.position - px(0, height), width, height)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("position", &self.position)
            .field("font", &self.font)
            .field("max_length", &self.max_length)
            .field("h_align", &self.h_align)
            .field("v_align", &self.v_align)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Text groups
// ============================================================================

/// A run of text placed on one line of a [`TextGroup`].
///
/// Like a [`Text`], a run picks its label from ranked candidates once a
/// [`TextMetrics`] service is available.
#[derive(Clone)]
pub struct GroupText {
    left_x: i32,
    selector: Rc<dyn LabelSelector>,
    labels: Option<Vec<Label>>,
}

impl GroupText {
    /// Offset from the group's left edge
    pub fn left_x(&self) -> i32 {
        self.left_x
    }

    /// Candidate labels, computed by the selector on first call and cached
    pub fn labels(&mut self, metrics: &dyn TextMetrics) -> &[Label] {
        self.labels
            .get_or_insert_with(|| self.selector.select(metrics))
            .as_slice()
    }

    pub fn cached_labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }
}

impl fmt::Debug for GroupText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupText")
            .field("left_x", &self.left_x)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FittedLines {
    fonts: Vec<Font>,
    colors: Vec<Color>,
    baselines: Vec<i32>,
}

/// A block of lines sharing one height budget.
///
/// Fonts, colors and baselines are unknown until
/// [`fit_fonts`](Self::fit_fonts) runs.
#[derive(Debug, Clone)]
pub struct TextGroup {
    left_x: i32,
    bottom_y: i32,
    height: i32,
    line_styles: Vec<String>,
    lines: Vec<Vec<GroupText>>,
    fitted: Option<FittedLines>,
}

impl TextGroup {
    pub(crate) fn new(left_x: i32, bottom_y: i32, height: i32, line_styles: Vec<String>) -> Self {
        let lines = vec![Vec::new(); line_styles.len()];
        Self {
            left_x,
            bottom_y,
            height,
            line_styles,
            lines,
            fitted: None,
        }
    }

    pub fn left_x(&self) -> i32 {
        self.left_x
    }

    pub fn bottom_y(&self) -> i32 {
        self.bottom_y
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn line_count(&self) -> usize {
        self.line_styles.len()
    }

    pub fn line_style(&self, line: usize) -> Option<&str> {
        self.line_styles.get(line).map(String::as_str)
    }

    pub fn line(&self, line: usize) -> Option<&[GroupText]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    pub fn line_mut(&mut self, line: usize) -> Option<&mut [GroupText]> {
        self.lines.get_mut(line).map(Vec::as_mut_slice)
    }

    /// Add `text` to `line`, `left_x` pixels from the group's left edge
    pub fn add_text(&mut self, left_x: i32, line: usize, text: &str) -> Result<()> {
        self.push_run(left_x, line, plain_selector(text))
    }

    /// Add a run whose candidate labels come from `selector`
    pub fn add_text_with(
        &mut self,
        left_x: i32,
        line: usize,
        selector: impl LabelSelector + 'static,
    ) -> Result<()> {
        self.push_run(left_x, line, Rc::new(selector))
    }

    fn push_run(&mut self, left_x: i32, line: usize, selector: Rc<dyn LabelSelector>) -> Result<()> {
        let lines = self.lines.len();
        let runs = self
            .lines
            .get_mut(line)
            .ok_or(CanvasError::LineOutOfRange { line, lines })?;
        runs.push(GroupText {
            left_x,
            selector,
            labels: None,
        });
        Ok(())
    }

    /// Fonts per line, once fitted
    pub fn fonts(&self) -> Option<&[Font]> {
        self.fitted.as_ref().map(|f| f.fonts.as_slice())
    }

    /// Color of `line`, once fitted
    pub fn color(&self, line: usize) -> Option<Color> {
        self.fitted.as_ref()?.colors.get(line).copied()
    }

    /// Baseline y of `line`, once fitted: the group's bottom y plus the
    /// height of every line up to and including this one
    pub fn line_bottom_y(&self, line: usize) -> Option<i32> {
        let baseline = self.fitted.as_ref()?.baselines.get(line)?;
        Some(self.bottom_y + baseline)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit the lines into the group height by shrinking the chooser's base
    /// font size while it is at least [`MIN_FONT_SIZE`](defaults::MIN_FONT_SIZE).
    ///
    /// The last step may take the size one below the minimum. If the lines
    /// still overflow they are laid out at that size anyway. The shrunk base
    /// size stays in the chooser.
    pub fn fit_fonts(&mut self, chooser: &mut dyn FontChooser) -> &[Font] {
        let mut size = chooser.base_font_size();
        let (mut total, mut baselines) = self.measure(chooser);
        while total > self.height && size >= defaults::MIN_FONT_SIZE {
            let smaller = chooser.decrease_base_font_size();
            if smaller >= size {
                break;
            }
            size = smaller;
            (total, baselines) = self.measure(chooser);
            trace!(size, total, budget = self.height, "text group shrunk");
        }
        if total > self.height {
            debug!(size, total, budget = self.height, "text group overflows at minimum font size");
        }

        let fonts = self.line_styles.iter().map(|s| chooser.font(s)).collect();
        let colors = self.line_styles.iter().map(|s| chooser.color(s)).collect();
        let fitted = self.fitted.insert(FittedLines {
            fonts,
            colors,
            baselines,
        });
        &fitted.fonts
    }

    /// Total height and the running total after each line
    fn measure(&self, chooser: &dyn FontChooser) -> (i32, Vec<i32>) {
        let mut total = 0;
        let mut baselines = Vec::with_capacity(self.line_styles.len());
        for style in &self.line_styles {
            total += chooser.margin_top(style)
                + chooser.text_height(style)
                + chooser.margin_bottom(style);
            baselines.push(total);
        }
        (total, baselines)
    }
}
