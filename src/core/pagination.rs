use std::fmt;

pub const DEFAULT_MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    EllipsisStart,
    EllipsisEnd,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::EllipsisStart | PageItem::EllipsisEnd => write!(f, "…"),
        }
    }
}

/// The page strip shown under the catalog: a window of `max_visible`
/// pages around `current`, with the first and last page pinned and an
/// ellipsis for each gap. Empty when there is at most one page.
pub fn page_items(current: u32, total: u32, max_visible: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }

    let current = i64::from(current);
    let total = i64::from(total);
    let max_visible = i64::from(max_visible.max(1));
    let half = max_visible / 2;

    let mut start = (current - half).max(1);
    let end = (start + max_visible - 1).min(total);
    if end - start < max_visible - 1 {
        start = (end - max_visible + 1).max(1);
    }

    let mut items = Vec::with_capacity((end - start + 5) as usize);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::EllipsisStart);
        }
    }
    // start..=end 都在 u32 範圍內
    items.extend((start..=end).map(|n| PageItem::Page(n as u32)));
    if end < total {
        if end < total - 1 {
            items.push(PageItem::EllipsisEnd);
        }
        items.push(PageItem::Page(total as u32));
    }
    items
}

pub fn render_strip(items: &[PageItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn prev_page(current: u32) -> u32 {
    current.saturating_sub(1).max(1)
}

pub fn next_page(current: u32, total: u32) -> u32 {
    current.saturating_add(1).min(total.max(1))
}

pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(per_page)).min(u64::from(u32::MAX)) as u32
}
