use serde::Serialize;

/// Rows per table page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

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

/// Current page of a table and its fixed page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PageState {
    pub fn new(per_page: usize) -> Self {
        Self {
            current: 1,
            per_page: per_page.max(1),
        }
    }

    /// 1-based page number.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.per_page)
    }

    /// Moves to `page` when it lies within `[1, total_pages]`. Out-of-range
    /// requests are rejected and leave the current page untouched.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Pulls the current page back inside `[1, total_pages]` after the
    /// underlying list shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current = self.current.min(total_pages).max(1);
    }

    /// Slice of `items` shown on the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1).saturating_mul(self.per_page);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }

    /// `true` when the filter left nothing to show ("no records" row).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
