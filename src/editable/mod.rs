//! Text editing primitives shared by every screenplay element.
//!
//! - [`RawText`]: what the user actually typed, independent of display
//! - [`EditConstraints`] / [`DisplayTransform`]: how raw text is shown and
//!   which offsets are editable
//! - [`Selection`]: anchor/head selection inside one element
//!
//! # Example
//!
//! ```
//! use intercut::editable::{DisplayTransform, EditConstraints, RawText};
//!
//! let mut raw = RawText::from_text("Hello World");
//! let shown = EditConstraints::uppercase().display(raw.as_str());
//! assert_eq!(shown, "HELLO WORLD");
//!
//! // The text control deleted the last character on its own
//! raw.reconcile_after_deletion("HELLO WORL", DisplayTransform::Uppercase);
//! assert_eq!(raw.as_str(), "Hello Worl");
//! ```

mod buffer;
mod constraints;
mod selection;

pub use buffer::RawText;
pub use constraints::{DisplayTransform, EditConstraints};
pub use selection::Selection;
