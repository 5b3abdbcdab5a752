//! One cursor presented as several independently advanced cursors.
//!
//! All branches share the source and a FIFO of the values that some live
//! branch has not taken yet. The source is advanced exactly once per element
//! however the branches interleave; when the branches take turns one step at
//! a time the FIFO never holds more than one value.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use super::{exhausted, Cursor};

struct Shared<C: Cursor> {
    source: C,
    buffer: VecDeque<C::Item>,
    /// Sequence number of `buffer[0]`.
    head: usize,
    /// Per branch, how many values it has taken. `None` once dropped.
    taken: Vec<Option<usize>>,
    /// Branches dropped while `Shared` was borrowed, detached on the next release.
    dropped: Rc<RefCell<Vec<usize>>>,
}

impl<C: Cursor> Shared<C> {
    fn release(&mut self) {
        for branch in self.dropped.borrow_mut().drain(..) {
            self.taken[branch] = None;
        }
        let low = self
            .taken
            .iter()
            .flatten()
            .min()
            .copied()
            .unwrap_or(self.head + self.buffer.len());
        while self.head < low && self.buffer.pop_front().is_some() {
            self.head += 1;
        }
    }

    fn detach(&mut self, branch: usize) {
        self.taken[branch] = None;
        self.release();
    }

    fn attach(&mut self, taken: Option<usize>) -> usize {
        self.taken.push(taken);
        self.taken.len() - 1
    }
}

impl<C> Shared<C>
where
    C: Cursor,
    C::Item: Clone,
{
    fn take(&mut self, branch: usize) -> Option<C::Item> {
        let seq = self.taken[branch]?;
        let value = match self.buffer.get(seq - self.head) {
            Some(value) => value.clone(),
            None => {
                if self.source.is_at_end() {
                    tracing::debug!("Tee branch {branch} reached end after {seq} values");
                    return None;
                }
                let value = self.source.current().clone();
                self.source.advance();
                self.buffer.push_back(value.clone());
                value
            }
        };
        self.taken[branch] = Some(seq + 1);
        self.release();
        Some(value)
    }
}

/// One branch of a [`tee`].
pub struct TeeBranch<C: Cursor> {
    shared: Rc<RefCell<Shared<C>>>,
    dropped: Rc<RefCell<Vec<usize>>>,
    branch: usize,
    value: Option<C::Item>,
}

pub fn tee<C>(source: C) -> [TeeBranch<C>; 2]
where
    C: Cursor,
    C::Item: Clone,
{
    let shared = share(source, 2);
    [
        TeeBranch::primed(Rc::clone(&shared), 0),
        TeeBranch::primed(shared, 1),
    ]
}

pub fn tee_n<C>(source: C, branches: usize) -> Vec<TeeBranch<C>>
where
    C: Cursor,
    C::Item: Clone,
{
    let shared = share(source, branches);
    (0..branches)
        .map(|branch| TeeBranch::primed(Rc::clone(&shared), branch))
        .collect()
}

fn share<C: Cursor>(source: C, branches: usize) -> Rc<RefCell<Shared<C>>> {
    Rc::new(RefCell::new(Shared {
        source,
        buffer: VecDeque::new(),
        head: 0,
        taken: vec![Some(0); branches],
        dropped: Rc::default(),
    }))
}

impl<C> TeeBranch<C>
where
    C: Cursor,
    C::Item: Clone,
{
    fn primed(shared: Rc<RefCell<Shared<C>>>, branch: usize) -> Self {
        let mut state = shared.borrow_mut();
        let value = state.take(branch);
        let dropped = Rc::clone(&state.dropped);
        drop(state);
        Self {
            shared,
            dropped,
            branch,
            value,
        }
    }
}

impl<C: Cursor> TeeBranch<C> {
    pub fn branch(&self) -> usize {
        self.branch
    }

    /// Values read from the source that some live branch still has to take.
    pub fn buffered(&self) -> usize {
        self.shared.borrow().buffer.len()
    }

    /// Runs `f` on the shared source.
    ///
    /// # Panics
    ///
    /// Panics if called from within another `with_source` on the same tee.
    pub fn with_source<T>(&self, f: impl FnOnce(&mut C) -> T) -> T {
        let mut shared = self.shared.borrow_mut();
        let result = f(&mut shared.source);
        shared.release();
        result
    }
}

impl<C> Cursor for TeeBranch<C>
where
    C: Cursor,
    C::Item: Clone,
{
    type Item = C::Item;

    fn current(&self) -> &C::Item {
        self.value.as_ref().unwrap_or_else(|| exhausted::<Self>())
    }

    fn advance(&mut self) {
        if self.value.is_some() {
            self.value = self.shared.borrow_mut().take(self.branch);
        }
    }

    fn is_at_end(&self) -> bool {
        self.value.is_none()
    }
}

/// A new branch at the same position as this one.
impl<C> Clone for TeeBranch<C>
where
    C: Cursor,
    C::Item: Clone,
{
    fn clone(&self) -> Self {
        let mut shared = self.shared.borrow_mut();
        let taken = shared.taken[self.branch];
        let branch = shared.attach(taken);
        drop(shared);
        Self {
            shared: Rc::clone(&self.shared),
            dropped: Rc::clone(&self.dropped),
            branch,
            value: self.value.clone(),
        }
    }
}

impl<C: Cursor> Drop for TeeBranch<C> {
    fn drop(&mut self) {
        match self.shared.try_borrow_mut() {
            Ok(mut shared) => shared.detach(self.branch),
            Err(_) => {
                tracing::debug!("Tee branch {} dropped while borrowed", self.branch);
                self.dropped.borrow_mut().push(self.branch);
            }
        }
    }
}

impl<C, O> PartialEq<O> for TeeBranch<C>
where
    C: Cursor,
    C::Item: Clone,
    O: Cursor,
{
    fn eq(&self, other: &O) -> bool {
        self.ended_with(other)
    }
}

impl<C> std::fmt::Debug for TeeBranch<C>
where
    C: Cursor,
    C::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeBranch")
            .field("branch", &self.branch)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
