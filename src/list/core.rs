use crate::geometry::Size;
use crate::keymap::KeyAction;
use crate::style;
use crate::width::truncate_to_width;

pub const DEFAULT_LIST_WIDTH: u16 = 120;
pub const DEFAULT_LIST_HEIGHT: u16 = 20;

/// Lines taken by one entry: title, description, spacer.
const ENTRY_HEIGHT: u16 = 3;
const TITLE_BLOCK: u16 = 2;
const PAGINATION_BLOCK: u16 = 2;
/// Selection marker or indent in front of every entry line.
const ENTRY_INDENT: usize = 2;

/// Anything a [`SelectList`] can display.
pub trait ListItem {
    fn title(&self) -> &str;
    fn description(&self) -> &str;

    fn filter_value(&self) -> String {
        format!("{}{}", self.title(), self.description())
    }
}

#[derive(Debug, Clone)]
pub struct SelectList<T> {
    items: Vec<T>,
    visible: Vec<usize>,
    cursor: usize,
    size: Size,
    title: String,
    show_title: bool,
    show_pagination: bool,
    filtering_enabled: bool,
    filter: Option<String>,
}

impl<T: ListItem> SelectList<T> {
    pub fn new(items: Vec<T>, width: u16, height: u16) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            visible,
            cursor: 0,
            size: Size::new(width, height),
            title: String::new(),
            show_title: true,
            show_pagination: true,
            filtering_enabled: false,
            filter: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_show_title(&mut self, show: bool) {
        self.show_title = show;
    }

    pub fn set_show_pagination(&mut self, show: bool) {
        self.show_pagination = show;
    }

    /// Turning filtering off also drops any active filter.
    pub fn set_filtering_enabled(&mut self, enabled: bool) {
        self.filtering_enabled = enabled;
        if !enabled {
            self.clear_filter();
        }
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index into [`SelectList::items`] of the highlighted entry.
    pub fn index(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.index().and_then(|idx| self.items.get(idx))
    }

    /// Highlight the item at `index` of the full list. Out-of-range indexes
    /// clamp to the last item; items hidden by a filter are left alone.
    pub fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        let index = index.min(self.items.len() - 1);
        if let Some(position) = self.visible.iter().position(|&idx| idx == index) {
            self.cursor = position;
        }
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|&idx| self.items.get(idx))
    }

    pub fn per_page(&self) -> usize {
        let mut chrome = 0;
        if self.show_title {
            chrome += TITLE_BLOCK;
        }
        if self.show_pagination {
            chrome += PAGINATION_BLOCK;
        }
        let available = self.size.height.saturating_sub(chrome);
        usize::from(available.saturating_add(1) / ENTRY_HEIGHT).max(1)
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.visible.len().div_ceil(self.per_page()).max(1)
    }

    pub fn cursor_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn cursor_down(&mut self) -> bool {
        if self.cursor + 1 >= self.visible.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        let page = self.page();
        if page + 1 >= self.total_pages() {
            return false;
        }
        self.cursor = ((page + 1) * self.per_page()).min(self.visible.len() - 1);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        let page = self.page();
        if page == 0 {
            return false;
        }
        self.cursor = (page - 1) * self.per_page();
        true
    }

    pub fn go_to_start(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn go_to_end(&mut self) -> bool {
        let last = self.visible.len().saturating_sub(1);
        let moved = self.cursor != last;
        self.cursor = last;
        moved
    }

    /// Keep only items whose title or description contains `query`, ignoring
    /// case. Has no effect while filtering is disabled.
    pub fn set_filter(&mut self, query: &str) -> bool {
        if !self.filtering_enabled {
            return false;
        }
        if query.is_empty() {
            self.clear_filter();
            return true;
        }
        let needle = query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.filter_value().to_lowercase().contains(&needle))
            .map(|(idx, _)| idx)
            .collect();
        self.filter = Some(query.to_string());
        self.cursor = 0;
        true
    }

    pub fn clear_filter(&mut self) {
        let selected = self.index();
        self.filter = None;
        self.visible = (0..self.items.len()).collect();
        self.cursor = selected.unwrap_or(0);
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Apply a cursor action. Returns whether the highlight moved.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Up => self.cursor_up(),
            KeyAction::Down => self.cursor_down(),
            KeyAction::PrevPage => self.prev_page(),
            KeyAction::NextPage => self.next_page(),
            KeyAction::Home => self.go_to_start(),
            KeyAction::End => self.go_to_end(),
            KeyAction::Confirm | KeyAction::Cancel => false,
        }
    }

    pub fn render(&self) -> String {
        let width = usize::from(self.size.width);
        let text_width = width.saturating_sub(ENTRY_INDENT);
        let mut lines = Vec::new();

        if self.show_title {
            // Title padding takes one cell on each side.
            let title = truncate_to_width(&self.title, width.saturating_sub(2));
            lines.push(style::title_style(&title));
            lines.push(String::new());
        }

        if self.visible.is_empty() {
            lines.push(style::normal_description("No items."));
        }

        let per_page = self.per_page();
        let start = self.page() * per_page;
        let end = (start + per_page).min(self.visible.len());
        for (offset, &idx) in self.visible[start..end].iter().enumerate() {
            let item = &self.items[idx];
            let title = truncate_to_width(item.title(), text_width);
            let description = truncate_to_width(item.description(), text_width);
            if offset > 0 {
                lines.push(String::new());
            }
            if start + offset == self.cursor {
                lines.push(style::selected_title(&title));
                lines.push(style::selected_description(&description));
            } else {
                lines.push(style::normal_title(&title));
                lines.push(style::normal_description(&description));
            }
        }

        let pages = self.total_pages();
        if self.show_pagination && pages > 1 {
            let current = self.page();
            let dots: String = (0..pages)
                .map(|page| {
                    if page == current {
                        style::PAGE_ACTIVE.to_string()
                    } else {
                        style::dimmed(style::PAGE_INACTIVE)
                    }
                })
                .collect();
            lines.push(String::new());
            lines.push(format!("  {dots}"));
        }

        lines.join("\n")
    }
}
