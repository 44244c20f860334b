//! Pagination over a filtered view.

use serde::{Deserialize, Serialize};

/// Number of pages needed for `len` items. Zero for an empty view.
///
/// A `page_size` of zero is treated as one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice for 1-based `page`: `view[(page-1)*n .. page*n]`, clamped to the
/// view. Page 0 is treated as page 1; pages past the end are empty.
pub fn paginate<T>(view: &[T], page_size: usize, page: usize) -> &[T] {
    let size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(size).min(view.len());
    let end = start.saturating_add(size).min(view.len());
    &view[start..end]
}

/// 1-based inclusive item range shown on a page, for "Showing a-b of n".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// First item shown (1-based); 0 when nothing is shown.
    pub start: usize,
    /// Last item shown (1-based); 0 when nothing is shown.
    pub end: usize,
    /// Items in the whole view.
    pub total: usize,
}

impl PageWindow {
    /// True when the page shows nothing.
    pub fn is_empty(&self) -> bool {
        self.end == 0
    }
}

impl std::fmt::Display for PageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "No todos found")
        } else {
            write!(f, "Showing {}-{} of {}", self.start, self.end, self.total)
        }
    }
}

/// Window for `page` over a view of `total` items.
pub fn page_window(total: usize, page_size: usize, page: usize) -> PageWindow {
    let size = page_size.max(1);
    let skipped = (page.max(1) - 1).saturating_mul(size);
    if skipped >= total {
        return PageWindow {
            start: 0,
            end: 0,
            total,
        };
    }
    PageWindow {
        start: skipped + 1,
        end: skipped.saturating_add(size).min(total),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_twelve() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, 10, 2), &[11, 12]);
        assert_eq!(page_window(12, 10, 2).to_string(), "Showing 11-12 of 12");
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, 2, 0), &[1, 2]);
    }

    #[test]
    fn test_past_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, 10, 3).is_empty());
        assert!(page_window(5, 10, 3).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_slice_never_exceeds_page_size() {
        let items: Vec<usize> = (0..37).collect();
        for size in 1..12 {
            for page in 1..12 {
                assert!(paginate(&items, size, page).len() <= size);
            }
        }
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(paginate(&items, usize::MAX, usize::MAX).is_empty());
        assert_eq!(paginate(&items, usize::MAX, 1), &[1, 2, 3]);
    }
}
