use serde::Serialize;

/// Results shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of a ranked result list. Page numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub number: usize,
    pub per_page: usize,
    pub total: usize,
    pub items: &'a [T],
}

impl<T> Page<'_, T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number * self.per_page < self.total
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// Position of the first item on this page within the full list.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.number - 1) * self.per_page
    }
}

/// Slice page `number` out of `items`. Zero values for `number` or
/// `per_page` are treated as 1; a page past the end is empty.
#[must_use]
pub fn paginate<T>(items: &[T], number: usize, per_page: usize) -> Page<'_, T> {
    let number = number.max(1);
    let per_page = per_page.max(1);
    let start = (number - 1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    Page {
        number,
        per_page,
        total: items.len(),
        items: &items[start..end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_of_five() {
        let items: Vec<u32> = (1..=12).collect();

        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.items, &[1, 2, 3, 4, 5]);
        assert!(first.has_next());
        assert_eq!(first.total_pages(), 3);

        let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.items, &[11, 12]);
        assert_eq!(last.offset(), 10);
        assert!(!last.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 4, 5);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_zero_arguments_clamped() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.items, &[1]);
    }

    #[test]
    fn test_empty_results() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, 5);
        assert_eq!(page.total_pages(), 0);
        assert!(page.items.is_empty());
    }
}
