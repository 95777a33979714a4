use crate::geometry::ContentSize;
use crate::geometry::LayoutRect;
use crate::geometry::VerticalMargins;
use crate::item::ItemId;
use crate::item::LayoutItem;
use crate::layout::ChatLayout;
use crate::layout::InvalidationReason;
use crate::layout::LayoutConfig;
use tracing::debug;

/// Ordered chat items plus the layout that measures them.
///
/// Every mutation goes through here so the layout hears about it with the narrowest
/// [`InvalidationReason`] that covers it.
#[derive(Clone, Debug)]
pub struct ChatCollection<T> {
    items: Vec<T>,
    layout: ChatLayout,
    item_limit: Option<usize>,
    last_width: Option<u16>,
}

impl<T> Default for ChatCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            layout: ChatLayout::default(),
            item_limit: None,
            last_width: None,
        }
    }
}

impl<T: LayoutItem> ChatCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            layout: ChatLayout::with_config(config),
            ..Self::default()
        }
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

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn layout(&self) -> &ChatLayout {
        &self.layout
    }

    pub fn item_limit(&self) -> Option<usize> {
        self.item_limit
    }

    /// Caps the number of items; the oldest ones are dropped first.
    pub fn set_item_limit(&mut self, limit: Option<usize>) {
        self.item_limit = limit;
        self.enforce_item_limit();
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.layout.set_spacing(spacing);
    }

    pub fn set_margins(&mut self, margins: VerticalMargins) {
        self.layout.set_margins(margins);
    }

    /// Records the viewport size. Only a width change touches the layout.
    ///
    /// Returns whether the layout was invalidated.
    pub fn set_viewport_size(&mut self, width: u16, _height: u16) -> bool {
        if self.last_width == Some(width) {
            return false;
        }
        self.last_width = Some(width);
        self.layout.set_width(width);
        true
    }

    pub fn add_item(&mut self, item: T) -> ItemId {
        let id = item.id();
        debug_assert!(self.index_of(id).is_none(), "duplicate item id {id}");
        self.items.push(item);
        if self.items.len() == 1 {
            self.layout.invalidate(InvalidationReason::FullReset);
        } else {
            self.layout.invalidate(InvalidationReason::CountChanged);
        }
        self.enforce_item_limit();
        id
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        debug!(count = items.len(), "reloading chat items");
        self.items = items;
        self.layout.invalidate(InvalidationReason::FullReset);
        self.enforce_item_limit();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.layout.invalidate(InvalidationReason::FullReset);
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.remove_at(index))
    }

    /// Removes every item whose id is listed, invalidating once from the lowest removed index.
    pub fn remove_items(&mut self, ids: &[ItemId]) -> Vec<T> {
        let mut lowest: Option<usize> = None;
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for (index, item) in std::mem::take(&mut self.items).into_iter().enumerate() {
            if ids.contains(&item.id()) {
                lowest.get_or_insert(index);
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        if let Some(lowest) = lowest {
            self.layout
                .invalidate(InvalidationReason::ItemsRemovedFrom(lowest));
        }
        removed
    }

    /// # Panics
    ///
    /// If `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> T {
        let item = self.items.remove(index);
        self.layout
            .invalidate(InvalidationReason::ItemsRemovedFrom(index));
        item
    }

    pub fn frame_for_item(&mut self, index: usize) -> LayoutRect {
        self.layout.frame_for_item(&self.items, index)
    }

    pub fn content_size(&mut self) -> ContentSize {
        self.layout.content_size(&self.items)
    }

    pub fn frames_intersecting(&mut self, rect: LayoutRect) -> Vec<(usize, LayoutRect)> {
        self.layout.frames_intersecting(&self.items, rect)
    }

    fn enforce_item_limit(&mut self) {
        let Some(limit) = self.item_limit else {
            return;
        };
        while self.items.len() > limit {
            let evicted = self.remove_at(0);
            debug!(id = %evicted.id(), limit, "evicted oldest chat item");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Alignment;
    use crate::item::ChatItem;
    use crate::item::PlaceholderItem;
    use pretty_assertions::assert_eq;

    fn placeholder(height: u32) -> ChatItem {
        PlaceholderItem::new(Alignment::End)
            .with_size(20, height)
            .into()
    }

    fn collection() -> ChatCollection<ChatItem> {
        let mut c = ChatCollection::with_config(LayoutConfig {
            spacing: 1,
            margins: VerticalMargins::ZERO,
        });
        c.set_viewport_size(100, 20);
        c
    }

    #[test]
    fn height_only_resize_keeps_the_cache() {
        let mut c = collection();
        c.add_item(placeholder(2));
        c.content_size();
        assert!(!c.set_viewport_size(100, 40));
        assert_eq!(c.layout().cache().len(), 1);
        assert!(c.set_viewport_size(80, 40));
        assert!(c.layout().cache().is_empty());
    }

    #[test]
    fn item_limit_evicts_oldest() {
        let mut c = collection();
        c.set_item_limit(Some(2));
        let a = c.add_item(placeholder(1));
        let b = c.add_item(placeholder(2));
        let d = c.add_item(placeholder(3));
        assert_eq!(c.len(), 2);
        assert_eq!(c.index_of(a), None);
        assert_eq!(c.index_of(b), Some(0));
        assert_eq!(c.index_of(d), Some(1));
        assert_eq!(c.frame_for_item(0).y, 0);
        assert_eq!(c.frame_for_item(1).y, 3);
    }

    #[test]
    fn lowering_the_limit_evicts_until_it_fits() {
        let mut c = collection();
        for h in 1..=5 {
            c.add_item(placeholder(h));
        }
        c.set_item_limit(Some(1));
        assert_eq!(c.len(), 1);
        assert_eq!(c.content_size().height, 5);
    }

    #[test]
    fn remove_by_id_relayouts_following_items() {
        let mut c = collection();
        c.add_item(placeholder(2));
        let middle = c.add_item(placeholder(5));
        c.add_item(placeholder(1));
        assert_eq!(c.content_size().height, 10);

        assert!(c.remove_item(middle).is_some());
        assert!(c.remove_item(middle).is_none());
        assert_eq!(c.frame_for_item(1).y, 3);
        assert_eq!(c.content_size().height, 4);
    }

    #[test]
    fn remove_items_invalidates_from_lowest_index() {
        let mut c = collection();
        let ids: Vec<ItemId> = (1..=4).map(|h| c.add_item(placeholder(h))).collect();
        c.content_size();

        let removed = c.remove_items(&[ids[3], ids[1]]);
        assert_eq!(removed.len(), 2);
        assert_eq!(c.layout().cache().len(), 1);
        assert_eq!(c.frame_for_item(1).y, 2);
    }

    #[test]
    fn set_items_and_clear_reset_layout() {
        let mut c = collection();
        c.add_item(placeholder(4));
        c.content_size();
        c.set_items(vec![placeholder(1), placeholder(1)]);
        assert!(c.layout().cache().is_empty());
        assert_eq!(c.content_size().height, 3);
        c.clear();
        assert_eq!(c.content_size(), ContentSize::ZERO);
    }
}
