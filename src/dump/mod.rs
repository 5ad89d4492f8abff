//! Memory dump view
//!
//! Formats rows of target memory for the CPU dump pane. A `DumpMode` picks
//! the column layout, `DumpView` tracks the scroll position and renders rows
//! as rich text runs.

pub mod format;
pub mod layout;
pub mod view;

#[cfg(test)]
mod tests;

pub use format::{f80_to_f64, format_item, item_width};
pub use layout::{ColumnDescriptor, DataKind, DumpMode, IntWidth};
pub use view::{DumpRow, DumpView};
