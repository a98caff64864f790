//! Named-placeholder template substitution.
//!
//! Templates contain `{Identifier}` tokens. [`format_string`] replaces every
//! token whose identifier exactly matches a field in a [`FieldBag`] and leaves
//! every other token verbatim, so a template can be filled in several passes:
//!
//! ```
//! use sustainly_template::{format_string, FieldBag};
//!
//! let fields = FieldBag::new().with("Name", "X").unwrap();
//! assert_eq!(format_string("Hello {Name}, {Unused}", &fields), "Hello X, {Unused}");
//! ```
//!
//! Substituted values are never rescanned, so a value that itself contains
//! `{Name}` text is emitted literally.

mod field;
mod format;

pub use field::{FieldBag, FieldValue, ToFields};
pub use format::{format_fields, format_string, placeholders};
