//! Writing lazy sequences in the style of Python generators.
//!
//! Each adapter in [`cursor`] wraps an underlying sequence and computes its
//! next value only when asked to advance. They compose by value:
//!
//! ```
//! use generative::cursor::{lines, split_fields, Cursor};
//!
//! let fields = split_fields(lines("a b\n  c\n".as_bytes()))
//!     .values()
//!     .collect::<Vec<_>>();
//! assert_eq!(fields, vec![vec!["a", "b"], vec!["c"]]);
//! ```

pub mod cursor;
pub mod pipeline;
