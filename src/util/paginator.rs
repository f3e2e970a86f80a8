//! Fixed-size pagination over a slice.

use std::iter::FusedIterator;
use std::slice::Chunks;

use crate::error::{LecternError, Result};

/// Iterator over consecutive pages of a slice.
///
/// Every page holds `page_size` items except possibly the last one.
///
/// # Examples
///
/// ```
/// use lectern::util::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// let pages: Vec<&[i32]> = paginate(&items, 2).unwrap().collect();
/// assert_eq!(pages, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Chunks<'a, T>,
}

impl<'a, T> Paginator<'a, T> {
    /// Split `items` into pages of `page_size`.
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(LecternError::invalid_argument("page size must be positive"));
        }
        Ok(Paginator {
            pages: items.chunks(page_size),
        })
    }
}

impl<'a, T> Iterator for Paginator<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.pages.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

impl<T> DoubleEndedIterator for Paginator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pages.next_back()
    }
}

impl<T> ExactSizeIterator for Paginator<'_, T> {}

impl<T> FusedIterator for Paginator<'_, T> {}

/// Paginate a slice. Fails with `InvalidArgument` on a zero page size.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}
