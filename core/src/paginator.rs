use crate::{Result, SearchError};
use std::fmt;
use std::slice::Chunks;

/// A borrowed run of up to `capacity` consecutive items.
///
/// `capacity` is the declared page size and stays the same on a short final page;
/// `len` is the number of items actually on the page.
#[derive(Debug)]
pub struct Page<'a, T> {
    items: &'a [T],
    capacity: usize,
}

impl<T> Clone for Page<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Page<'_, T> {}

impl<'a, T> Page<'a, T> {
    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn as_slice(&self) -> &'a [T] { self.items }

    pub fn iter(&self) -> std::slice::Iter<'a, T> { self.items.iter() }
}

impl<'a, T> IntoIterator for Page<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Fixed-size pages over a borrowed slice. Pages are computed on demand and
/// iterating again starts over from the first page.
#[derive(Debug)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<T> Clone for Paginator<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Paginator<'_, T> {}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SearchError::InvalidArgument("page size must be at least 1".into()));
        }
        Ok(Self { items, page_size })
    }

    pub fn page_size(&self) -> usize { self.page_size }

    /// Number of pages.
    pub fn len(&self) -> usize { self.items.len().div_ceil(self.page_size) }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn get(&self, page: usize) -> Option<Page<'a, T>> {
        let start = page.checked_mul(self.page_size)?;
        if start >= self.items.len() {
            return None;
        }
        let end = (start + self.page_size).min(self.items.len());
        Some(Page { items: &self.items[start..end], capacity: self.page_size })
    }

    pub fn iter(&self) -> Pages<'a, T> {
        Pages { chunks: self.items.chunks(self.page_size), capacity: self.page_size }
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[derive(Debug, Clone)]
pub struct Pages<'a, T> {
    chunks: Chunks<'a, T>,
    capacity: usize,
}

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|items| Page { items, capacity: self.capacity })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.chunks.size_hint() }
}

impl<T> ExactSizeIterator for Pages<'_, T> {}

impl<T> DoubleEndedIterator for Pages<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chunks.next_back().map(|items| Page { items, capacity: self.capacity })
    }
}

/// Splits any slice-like sequence (`Vec`, array, slice) into pages of `page_size`.
pub fn paginate<T, C>(items: &C, page_size: usize) -> Result<Paginator<'_, T>>
where
    C: AsRef<[T]> + ?Sized,
{
    Paginator::new(items.as_ref(), page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_full_pages_and_a_short_tail() {
        let items: Vec<i32> = (1..=7).collect();
        let pages = paginate(&items, 3).unwrap();
        assert_eq!(pages.len(), 3);
        let lens: Vec<_> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![3, 3, 1]);
        assert!(pages.iter().all(|p| p.capacity() == 3));
        assert_eq!(pages.get(2).unwrap().as_slice(), &[7]);
        assert!(pages.get(3).is_none());
    }

    #[test]
    fn iteration_is_restartable() {
        let items = ["a", "b", "c"];
        let pages = paginate(&items, 2).unwrap();
        let first: Vec<Vec<&str>> = pages.iter().map(|p| p.iter().copied().collect()).collect();
        let second: Vec<Vec<&str>> = (&pages).into_iter().map(|p| p.iter().copied().collect()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn empty_sequence_has_no_pages() {
        let items: Vec<u8> = Vec::new();
        let pages = paginate(&items, 4).unwrap();
        assert!(pages.is_empty());
        assert_eq!(pages.len(), 0);
        assert_eq!(pages.iter().count(), 0);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(paginate(&[1, 2], 0), Err(SearchError::InvalidArgument(_))));
    }

    #[test]
    fn page_display_concatenates_items() {
        let items = [1, 2, 3];
        let pages = paginate(&items, 2).unwrap();
        let rendered: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["12", "3"]);
    }
}
