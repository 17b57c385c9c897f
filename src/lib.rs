//! `paracore` - paragraph core of a rich-text editor
//!
//! A paragraph is a sequence of characters and embedded objects (insets)
//! carrying run-length font settings and change-tracking state. This crate
//! keeps those structures consistent under editing and lays the paragraph
//! out into rows: greedy row breaking, alignment and justification, row
//! heights, and bidirectional reordering within a row.
//!
//! Glyph measurement is pluggable through [`GlyphMetrics`]; rendering and
//! document I/O are left to the host.

// Crate-level lint configuration
#![deny(unsafe_code)] // Pure data-structure code, no FFI
#![allow(clippy::cast_possible_truncation)] // Intentional pixel casts
#![allow(clippy::cast_sign_loss)] // Intentional pixel conversions
#![allow(clippy::cast_precision_loss)] // Intentional for spacing math
#![allow(clippy::cast_possible_wrap)] // Intentional pixel conversions
#![allow(clippy::module_name_repetitions)] // Allow paragraph::ParagraphParams etc
#![allow(clippy::struct_excessive_bools)] // Layouts and params need multiple flags
#![allow(clippy::missing_panics_doc)] // Position preconditions are documented on the methods
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::float_cmp)] // Spacing coefficients compare exactly in tests

pub mod error;
pub mod event;
pub mod font;
pub mod inset;
pub mod layout;
pub mod metrics;
pub mod paragraph;
pub mod rows;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};
pub use font::{Font, FontAttributes, FontFamily, FontSeries, FontShape, FontSize};
pub use layout::{
    Alignment, DocumentSettings, LabelType, Layout, LayoutBuilder, LayoutKind, MarginType,
    ParagraphSeparation,
};
pub use metrics::{GlyphMetrics, MonospaceMetrics};

// Re-export paragraph types
pub use inset::{
    BoxInset, Dimension, DisplayMode, HfillInset, Inset, InsetTable, MetricsRequest, NewlineInset,
    SpaceInset, SpaceKind, TextInset,
};
pub use paragraph::{
    AuthorId, Change, ChangeKind, ChangeTracker, FontRunTable, INSET_CHAR, Paragraph,
    ParagraphParams, Unit,
};

// Re-export layout engine types
pub use rows::{
    BreakContext, CursorHit, LayoutMargins, Margins, Neighbor, Row, RowBreaker, RowMetrics,
    VerticalContext, build_rows, column_near_x, compute_row_metrics, cursor_x, row_index,
    set_row_height,
};
pub use unicode::{BidiTable, Direction, WidthMethod};
