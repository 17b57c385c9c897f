//! Paragraph content, font runs, and change tracking.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use paracore::{Change, Font, FontSeries, Layout, Paragraph};
//!
//! let mut par = Paragraph::with_text(Arc::new(Layout::standard()), "abcde");
//! par.set_font(2, Font::INHERIT.with_series(FontSeries::Bold));
//! assert_eq!(par.font_runs().runs().len(), 3);
//!
//! // Tracked deletion of unchanged text only marks it.
//! assert!(!par.erase_char(0, true));
//! assert!(par.lookup_change(0).is_deleted());
//! par.accept_changes(0, par.size() + 1);
//! assert_eq!(par.text(), "bcde");
//! ```

mod buffer;
mod changes;
mod fonts;
mod params;
pub(crate) mod ranges;

pub use buffer::{INSET_CHAR, Paragraph, Unit};
pub use changes::{AuthorId, Change, ChangeKind, ChangeTracker};
pub use fonts::FontRunTable;
pub use params::ParagraphParams;
pub use ranges::{Run, RunList};
