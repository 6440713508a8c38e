//! Cursor-addressable list shared by the selection widgets.

use ratatui::text::Line;

/// An ordered list of items with an optional highlighted position.
///
/// The cursor is `None` when the list does not hold focus. When set it always
/// points at an existing item.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    selected: Option<usize>,
}

impl<T> SelectableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Move the cursor to `index`, clamped to the last item.
    pub fn select(&mut self, index: usize) {
        self.selected = if self.items.is_empty() {
            None
        } else {
            Some(index.min(self.items.len() - 1))
        };
    }

    pub fn select_last(&mut self) {
        self.select(self.items.len().saturating_sub(1));
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn next(&mut self) {
        let next = self.selected.map_or(0, |i| i + 1);
        self.select(next);
    }

    pub fn previous(&mut self) {
        let previous = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(previous);
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the highlighted item and move the cursor up by one.
    ///
    /// The cursor is cleared once the list is empty.
    pub fn remove_selected(&mut self) -> Option<T> {
        let index = self.selected?;
        let removed = self.items.remove(index);
        if self.items.is_empty() {
            self.selected = None;
        } else {
            self.select(index.saturating_sub(1));
        }
        Some(removed)
    }

    /// Render every item through `render_item(index, item, highlighted)`.
    pub fn lines<F>(&self, mut render_item: F) -> Vec<Line<'static>>
    where
        F: FnMut(usize, &T, bool) -> Line<'static>,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| render_item(i, item, self.selected == Some(i)))
            .collect()
    }
}
