//! Error types for canvas operations
//!
//! Only caller mistakes surface as errors. Absent lookups return `Option`
//! and font fitting never fails.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;

/// Errors raised by [`Canvas`](crate::Canvas) and its primitives
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("layer index {index} out of range (canvas has {len} layers)")]
    #[diagnostic(
        code(chart_canvas::layer_out_of_range),
        help("create layers with `new_layer` or `create_layers` before accessing them")
    )]
    LayerOutOfRange { index: usize, len: usize },

    #[error("shape does not belong to this canvas")]
    #[diagnostic(
        code(chart_canvas::unknown_shape),
        help("the id may come from another canvas or may have been invalidated by `clear`")
    )]
    UnknownShape,

    #[error("shape is not a text primitive")]
    #[diagnostic(code(chart_canvas::not_a_text))]
    NotAText,

    #[error("label index {index} out of range (text has {len} labels)")]
    #[diagnostic(code(chart_canvas::label_out_of_range))]
    LabelOutOfRange { index: usize, len: usize },

    #[error("line {line} out of range (text group has {lines} lines)")]
    #[diagnostic(code(chart_canvas::line_out_of_range))]
    LineOutOfRange { line: usize, lines: usize },
}
