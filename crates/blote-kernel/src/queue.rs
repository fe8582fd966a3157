//! FixedLengthQueue: a bounded FIFO over a fixed-size circular store.
//!
//! Unlike most ring buffers, inserting into a full queue fails instead of
//! evicting the oldest entry. Callers that want "keep the last N" behavior
//! remove the front themselves before inserting:
//!
//! ```
//! use blote_kernel::queue::FixedLengthQueue;
//!
//! let mut recent = FixedLengthQueue::new(2).unwrap();
//! for line in ["a", "b", "c"] {
//!     if recent.is_full() {
//!         recent.remove().unwrap();
//!     }
//!     recent.insert(line).unwrap();
//! }
//! assert_eq!(recent.iter().copied().collect::<Vec<_>>(), ["b", "c"]);
//! ```

use thiserror::Error;

/// Misuse of a [`FixedLengthQueue`].
///
/// These are programming errors in the surrounding feature, not user-facing
/// command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("capacity must be a positive integer, got {0}")]
    InvalidCapacity(usize),
    #[error("queue is empty")]
    Empty,
    #[error("queue is full")]
    Full,
}

/// First-in-first-out collection whose capacity never changes.
#[derive(Debug, Clone)]
pub struct FixedLengthQueue<T> {
    slots: Vec<Option<T>>,
    /// Index of the oldest element.
    front: usize,
    /// Index the next insert writes to.
    rear: usize,
    len: usize,
}

impl<T> FixedLengthQueue<T> {
    /// Create an empty queue holding at most `capacity` elements.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity(capacity));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            front: 0,
            rear: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The element at the front of the queue.
    pub fn peek(&self) -> Result<&T, QueueError> {
        self.slots[self.front].as_ref().ok_or(QueueError::Empty)
    }

    /// Append `item` at the rear.
    pub fn insert(&mut self, item: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full);
        }
        self.slots[self.rear] = Some(item);
        self.rear = self.wrap(self.rear + 1);
        self.len += 1;
        Ok(())
    }

    /// Pop the element at the front.
    pub fn remove(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let item = self.slots[self.front].take().ok_or(QueueError::Empty)?;
        self.front = self.wrap(self.front + 1);
        self.len -= 1;
        Ok(item)
    }

    /// Iterate the held elements, oldest first.
    ///
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            queue: self,
            index: self.front,
            remaining: self.len,
        }
    }

    fn wrap(&self, index: usize) -> usize {
        index % self.capacity()
    }
}

/// Iterator over a [`FixedLengthQueue`] in FIFO order.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    queue: &'a FixedLengthQueue<T>,
    index: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.queue.slots[self.index].as_ref();
        self.index = self.queue.wrap(self.index + 1);
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a FixedLengthQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
