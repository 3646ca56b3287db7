//! Pure pagination view-model, recomputed on demand from
//! `(page, page_size, total)` rather than cached.

use crate::query::total_pages;

pub const DEFAULT_PAGE_RANGE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationViewModel {
    pub total_pages: u32,
    /// Current page clamped to `[1, total_pages]`.
    pub active_page: u32,
    pub visible_pages: Vec<u32>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationViewModel {
    /// Derive the window of page numbers around the active page.
    /// `page_range` is the number of pages shown on each side; the window
    /// is clamped at both ends so it always holds at most
    /// `2 * page_range + 1` consecutive pages.
    pub fn derive(total: u64, page: u32, page_size: u32, page_range: u32) -> Self {
        let total_pages = total_pages(total, page_size);
        if total_pages == 0 {
            return Self {
                total_pages: 0,
                active_page: 1,
                visible_pages: vec![1],
                has_previous: false,
                has_next: false,
            };
        }

        let active_page = page.clamp(1, total_pages);

        let mut range_start = i64::from(active_page) - i64::from(page_range);
        let mut range_end = i64::from(active_page) + i64::from(page_range);
        if range_end > i64::from(total_pages) {
            range_end = i64::from(total_pages);
            range_start = i64::from(total_pages) - i64::from(page_range) * 2;
        }
        if range_start <= 1 {
            range_start = 1;
            range_end = i64::from((page_range * 2 + 1).min(total_pages));
        }

        let visible_pages = (range_start..=range_end).map(|p| p as u32).collect();

        Self {
            total_pages,
            active_page,
            visible_pages,
            has_previous: active_page > 1,
            has_next: active_page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_centers_on_the_active_page() {
        let vm = PaginationViewModel::derive(100, 5, 10, 2);
        assert_eq!(vm.total_pages, 10);
        assert_eq!(vm.active_page, 5);
        assert_eq!(vm.visible_pages, vec![3, 4, 5, 6, 7]);
        assert!(vm.has_previous);
        assert!(vm.has_next);
    }

    #[test]
    fn window_clamps_at_the_end() {
        let vm = PaginationViewModel::derive(70, 7, 10, 2);
        assert_eq!(vm.total_pages, 7);
        assert_eq!(vm.visible_pages, vec![3, 4, 5, 6, 7]);
        assert!(vm.has_previous);
        assert!(!vm.has_next);
    }

    #[test]
    fn window_clamps_at_the_start() {
        let vm = PaginationViewModel::derive(100, 1, 10, 2);
        assert_eq!(vm.visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(!vm.has_previous);
        assert!(vm.has_next);
    }

    #[test]
    fn short_result_sets_truncate_the_window() {
        let vm = PaginationViewModel::derive(25, 1, 10, 2);
        assert_eq!(vm.total_pages, 3);
        assert_eq!(vm.visible_pages, vec![1, 2, 3]);
    }

    #[test]
    fn empty_totals_render_a_single_inactive_page() {
        let vm = PaginationViewModel::derive(0, 4, 10, 2);
        assert_eq!(vm.total_pages, 0);
        assert_eq!(vm.active_page, 1);
        assert_eq!(vm.visible_pages, vec![1]);
        assert!(!vm.has_previous);
        assert!(!vm.has_next);
    }

    #[test]
    fn out_of_range_page_is_clamped_for_display() {
        let vm = PaginationViewModel::derive(40, 100, 10, 2);
        assert_eq!(vm.active_page, 4);
        assert!(!vm.has_next);
    }
}
