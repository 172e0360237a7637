//! Fixed-size page slicing for dashboard tables.

use serde::Serialize;

/// Rows shown per table page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of pages needed for `total_items`; an empty collection still has one page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of a table plus the navigation state around it.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Page strip with `None` marking elided ranges.
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Zero-based index of the first item, used for serial numbers.
    pub offset: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(
        items: Vec<T>,
        current_page: usize,
        total_pages: usize,
        total_items: usize,
        offset: usize,
    ) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = current_page.clamp(1, total_pages);

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total_items,
            offset,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }
}

/// Slices the page `page_index` (1-based, clamped into range) out of `visible`.
pub fn paginate<T: Clone>(visible: &[T], page_index: usize, page_size: usize) -> Paginated<T> {
    let mut window = PageWindow::new(page_size);
    window.reset(visible.len());
    window.go_to(page_index);

    Paginated::new(
        window.slice(visible).to_vec(),
        window.page_index(),
        window.total_pages(),
        window.total_items(),
        window.offset(),
    )
}

/// Current position inside a collection that may change between query cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    page_index: usize,
    page_size: usize,
    total_items: usize,
}

impl PageWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    pub fn offset(&self) -> usize {
        (self.page_index - 1) * self.page_size
    }

    /// The underlying collection changed: go back to the first page.
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page_index = 1;
    }

    /// Moves to `page`, clamped into `[1, total_pages]`; returns the new index.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page_index = page.clamp(1, self.total_pages());
        self.page_index
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.page_index + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.page_index.saturating_sub(1))
    }

    /// Items of the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_a_single_empty_page() {
        let page = paginate::<u32>(&[], 3, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.offset, 20);
        assert_eq!(page.total_items, 25);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn middle_pages_report_the_whole_collection() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 2, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.offset, 10);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 0, 10).page, 1);
        assert_eq!(paginate(&items, 99, 10).page, 3);
    }

    #[test]
    fn window_resets_when_the_collection_changes() {
        let mut window = PageWindow::new(10);
        window.reset(95);
        assert_eq!(window.go_to(7), 7);
        window.reset(4);
        assert_eq!(window.page_index(), 1);
        assert_eq!(window.next(), 1);
        assert_eq!(window.previous(), 1);
    }

    #[test]
    fn page_strip_elides_distant_pages() {
        let page = Paginated::new(vec![0u8; 10], 10, 20, 200, 90);
        assert_eq!(page.total_items, 200);
        assert_eq!(
            page.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }
}
