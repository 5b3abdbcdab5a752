//! Forward, single-pass cursors in the style of Python generators.
//!
//! A [`Cursor`] always holds its current element (it is *primed* when it is
//! built) and reports end as a state rather than a position: any two cursors
//! that are at end compare equal, whatever sequence they came from.

use std::any::type_name;
use std::iter::FusedIterator;

use thiserror::Error;

pub mod lines;
pub mod random;
pub mod split;
pub mod tee;

pub use lines::{lines, Lines};
pub use random::{uniform01, Uniform01};
pub use split::{split_fields, Split, Tokenizer};
pub use tee::{tee, tee_n, TeeBranch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("current() called on an exhausted {cursor} cursor")]
    Exhausted { cursor: &'static str },
}

pub trait Cursor {
    type Item;

    /// The element the cursor points at.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at end. Use [`Cursor::try_current`] when that
    /// has not been checked.
    fn current(&self) -> &Self::Item;

    /// Moves to the next element. A no-op once the cursor is at end.
    fn advance(&mut self);

    fn is_at_end(&self) -> bool;

    fn try_current(&self) -> Result<&Self::Item, CursorError> {
        if self.is_at_end() {
            Err(CursorError::Exhausted {
                cursor: type_name::<Self>(),
            })
        } else {
            Ok(self.current())
        }
    }

    /// End-sentinel comparison: true iff both cursors are at end.
    fn ended_with<O: Cursor + ?Sized>(&self, other: &O) -> bool {
        self.is_at_end() && other.is_at_end()
    }

    /// Bounds on the number of elements left, counting the current one.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::from(!self.is_at_end()), None)
    }

    fn values(self) -> Values<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Values { cursor: self }
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    fn current(&self) -> &Self::Item {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance()
    }

    fn is_at_end(&self) -> bool {
        (**self).is_at_end()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

#[track_caller]
pub(crate) fn exhausted<C: ?Sized>() -> ! {
    panic!(
        "{}",
        CursorError::Exhausted {
            cursor: type_name::<C>()
        }
    )
}

/// Iterator over the values of a cursor, see [`Cursor::values`].
#[derive(Debug)]
pub struct Values<C> {
    cursor: C,
}

impl<C> Values<C> {
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C> Iterator for Values<C>
where
    C: Cursor,
    C::Item: Clone,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_at_end() {
            return None;
        }
        let value = self.cursor.current().clone();
        self.cursor.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

impl<C> FusedIterator for Values<C>
where
    C: Cursor,
    C::Item: Clone,
{
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Cursor over a vector that counts how often it was advanced.
    #[derive(Debug)]
    pub(crate) struct Counted<T> {
        items: Vec<T>,
        pos: usize,
        pub(crate) advances: usize,
    }

    impl<T> Counted<T> {
        pub(crate) fn new(items: Vec<T>) -> Self {
            Self {
                items,
                pos: 0,
                advances: 0,
            }
        }
    }

    impl<T> Cursor for Counted<T> {
        type Item = T;

        fn current(&self) -> &T {
            self.items.get(self.pos).unwrap_or_else(|| exhausted::<Self>())
        }

        fn advance(&mut self) {
            if !self.is_at_end() {
                self.pos += 1;
                self.advances += 1;
            }
        }

        fn is_at_end(&self) -> bool {
            self.pos >= self.items.len()
        }
    }

    #[test]
    fn try_current_reports_exhaustion() {
        let mut cursor = Counted::new(vec![1]);
        assert_eq!(cursor.try_current(), Ok(&1));
        cursor.advance();
        let err = cursor.try_current().unwrap_err();
        assert!(matches!(err, CursorError::Exhausted { cursor } if cursor.contains("Counted")));
        assert!(err.to_string().starts_with("current() called on an exhausted"));
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn current_at_end_panics() {
        let cursor = Counted::<u8>::new(vec![]);
        cursor.current();
    }

    #[test]
    fn end_states_compare_equal_across_sequences() {
        let mut a = Counted::new(vec!["x"]);
        let b = Counted::<u32>::new(vec![]);
        assert!(!a.ended_with(&b));
        a.advance();
        assert!(a.ended_with(&b));
        assert!(b.ended_with(&a));
    }

    #[test]
    fn values_yields_every_element_once() {
        let mut cursor = Counted::new(vec![3, 1, 4]);
        let collected = (&mut cursor).values().collect::<Vec<_>>();
        assert_eq!(collected, vec![3, 1, 4]);
        assert_eq!(cursor.advances, 3);
        assert!(cursor.is_at_end());
    }
}
