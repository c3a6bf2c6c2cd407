//! Pagination math and the pagination control.

use owo_colors::OwoColorize;

/// Page counts above this are ellipsized.
const WINDOW_THRESHOLD: usize = 5;

/// Number of pages needed for `total` records.
pub fn total_pages(total: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as usize
}

/// Navigation view of a page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub page_index: usize,
    pub total_pages: usize,
}

impl PageNav {
    pub fn new(page_index: usize, total_pages: usize) -> Self {
        Self {
            page_index,
            total_pages,
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    pub fn last_index(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }

    /// Clamp a page index into `0..total_pages` (0 when there are no pages).
    pub fn clamp(&self, page_index: usize) -> usize {
        page_index.min(self.last_index())
    }

    /// Target index for a navigation action, or `None` when it would not move.
    pub fn target(&self, action: PageAction) -> Option<usize> {
        let target = match action {
            PageAction::First => 0,
            PageAction::Previous => self.page_index.checked_sub(1)?,
            PageAction::Next if self.can_next_page() => self.page_index + 1,
            PageAction::Next => return None,
            PageAction::Last => self.last_index(),
            PageAction::GoTo(index) if index < self.total_pages => index,
            PageAction::GoTo(_) => return None,
        };
        (target != self.page_index).then_some(target)
    }
}

/// A navigation request from the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    First,
    Previous,
    Next,
    Last,
    /// Zero-based page index.
    GoTo(usize),
}

/// One slot of the numbered part of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Zero-based page index.
    Page(usize),
    Ellipsis,
}

/// Numbered page slots for the control.
///
/// Up to five pages are listed in full. Beyond that the first and last pages
/// are always shown, with the current page and its neighbours in between and
/// ellipses for the gaps.
pub fn page_items(page_index: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return vec![];
    }
    if total_pages <= WINDOW_THRESHOLD {
        return (0..total_pages).map(PageItem::Page).collect();
    }

    let last = total_pages - 1;
    let current = page_index.min(last);
    let start = current.saturating_sub(1).clamp(1, last - 1);
    let end = (current + 1).clamp(1, last - 1);

    let mut items = vec![PageItem::Page(0)];
    if start > 1 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < last - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(last));
    items
}

/// Render the pagination control, or `None` when there is at most one page.
pub fn render_pagination(nav: &PageNav, color: bool) -> Option<String> {
    if nav.total_pages <= 1 {
        return None;
    }

    let control = |label: &str, enabled: bool| {
        if !color {
            if enabled {
                label.to_string()
            } else {
                format!("({label})")
            }
        } else if enabled {
            label.to_string()
        } else {
            label.dimmed().to_string()
        }
    };

    let mut parts = vec![
        control("«", nav.can_previous_page()),
        control("‹", nav.can_previous_page()),
    ];
    for item in page_items(nav.page_index, nav.total_pages) {
        parts.push(match item {
            PageItem::Ellipsis => "…".to_string(),
            PageItem::Page(i) if i == nav.page_index => {
                let label = format!("[{}]", i + 1);
                if color {
                    label.bold().to_string()
                } else {
                    label
                }
            }
            PageItem::Page(i) => (i + 1).to_string(),
        });
    }
    parts.push(control("›", nav.can_next_page()));
    parts.push(control("»", nav.can_next_page()));

    Some(parts.join(" "))
}
