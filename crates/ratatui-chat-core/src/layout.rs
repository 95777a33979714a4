//! Incremental layout for a single column of variable-height items.
//!
//! Items stack top to bottom: each item's `y` is the previous item's bottom edge plus the
//! spacing, so frames are computed strictly in index order and cached as a contiguous prefix.
//! Mutations tell the engine *why* geometry may be stale through [`InvalidationReason`]; the
//! engine throws away only the part of the cache that reason can affect.
//!
//! [`ChatLayout`] holds no authoritative state. Everything it caches is a pure function of the
//! items, the width, the spacing and the margins, and may be dropped at any time.
//!
//! The engine is single-owner: all calls are expected from the one task that owns it and the
//! item list, with mutations and their invalidation serialized by that owner.

use crate::geometry::ContentSize;
use crate::geometry::LayoutRect;
use crate::geometry::VerticalMargins;
use crate::item::Alignment;
use crate::item::LayoutItem;
use tracing::trace;

const TRACE_TARGET: &str = "ratatui_chat::layout";

/// Why cached geometry may be stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The whole item list was replaced.
    FullReset,
    /// Items were appended; existing frames are still valid.
    CountChanged,
    /// Items at or after this index were removed or moved.
    ItemsRemovedFrom(usize),
    /// The available width changed; every frame is stale.
    WidthChanged,
    /// The gap between items changed.
    SpacingChanged,
    /// The top or bottom margin changed.
    MarginsChanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Rows between two consecutive items.
    pub spacing: u32,
    pub margins: VerticalMargins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 1,
            margins: VerticalMargins::default(),
        }
    }
}

/// Frames for indices `0..len()`, plus the derived content size.
///
/// Entries are never sparse: dropping index `i` drops every index after it too.
#[derive(Clone, Debug, Default)]
pub struct GeometryCache {
    frames: Vec<LayoutRect>,
    content_size: Option<ContentSize>,
}

impl GeometryCache {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LayoutRect> {
        self.frames.get(index).copied()
    }

    pub fn last(&self) -> Option<LayoutRect> {
        self.frames.last().copied()
    }

    pub fn content_size(&self) -> Option<ContentSize> {
        self.content_size
    }

    fn push(&mut self, frame: LayoutRect) {
        self.frames.push(frame);
        self.content_size = None;
    }

    fn set_content_size(&mut self, size: ContentSize) {
        self.content_size = Some(size);
    }

    fn forget_content_size(&mut self) {
        self.content_size = None;
    }

    fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
        self.content_size = None;
    }

    fn clear(&mut self) {
        self.frames.clear();
        self.content_size = None;
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChatLayout {
    config: LayoutConfig,
    width: u16,
    cache: GeometryCache,
}

impl ChatLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
        self.invalidate(InvalidationReason::WidthChanged);
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.config.spacing = spacing;
        self.invalidate(InvalidationReason::SpacingChanged);
    }

    pub fn set_margins(&mut self, margins: VerticalMargins) {
        self.config.margins = margins;
        self.invalidate(InvalidationReason::MarginsChanged);
    }

    pub fn invalidate(&mut self, reason: InvalidationReason) {
        trace!(target: TRACE_TARGET, ?reason, cached = self.cache.len(), "invalidate");
        match reason {
            InvalidationReason::FullReset
            | InvalidationReason::WidthChanged
            | InvalidationReason::SpacingChanged
            | InvalidationReason::MarginsChanged => self.cache.clear(),
            InvalidationReason::CountChanged => self.cache.forget_content_size(),
            InvalidationReason::ItemsRemovedFrom(lowest) => self.cache.truncate(lowest),
        }
    }

    /// Frame of the item at `index`, computing any missing predecessors first.
    ///
    /// # Panics
    ///
    /// If `index >= items.len()`.
    pub fn frame_for_item<T: LayoutItem>(&mut self, items: &[T], index: usize) -> LayoutRect {
        debug_assert!(
            index < items.len(),
            "frame_for_item: index {index} out of range for {} items",
            items.len()
        );
        if let Some(frame) = self.cache.get(index) {
            return frame;
        }

        let start = self.cache.len();
        let mut y = match self.cache.last() {
            Some(prev) => prev.max_y().saturating_add(self.config.spacing),
            None => self.config.margins.top,
        };
        let mut frame = LayoutRect::default();
        for item in &items[start..=index] {
            frame = self.place(item, y);
            self.cache.push(frame);
            y = frame.max_y().saturating_add(self.config.spacing);
        }
        trace!(target: TRACE_TARGET, from = start, to = index, "computed frames");
        frame
    }

    pub fn content_size<T: LayoutItem>(&mut self, items: &[T]) -> ContentSize {
        if let Some(size) = self.cache.content_size() {
            return size;
        }
        let Some(last) = items.len().checked_sub(1) else {
            return ContentSize::ZERO;
        };
        let frame = self.frame_for_item(items, last);
        let size = ContentSize {
            width: self.width,
            height: frame.max_y().saturating_add(self.config.margins.bottom),
        };
        self.cache.set_content_size(size);
        size
    }

    /// Every item whose frame intersects `rect`, in index order.
    pub fn frames_intersecting<T: LayoutItem>(
        &mut self,
        items: &[T],
        rect: LayoutRect,
    ) -> Vec<(usize, LayoutRect)> {
        let mut out = Vec::new();
        for index in 0..items.len() {
            let frame = self.frame_for_item(items, index);
            if frame.intersects(&rect) {
                out.push((index, frame));
            }
        }
        out
    }

    fn place<T: LayoutItem>(&self, item: &T, y: u32) -> LayoutRect {
        let margins = item.horizontal_margins();
        let max_width = self.width.saturating_sub(margins.horizontal());
        let preferred = item.preferred_size(max_width);
        // The height is kept as reported even when the width gets clamped.
        let width = preferred.width.min(max_width);
        let x = match item.alignment() {
            Alignment::Start => margins.left,
            Alignment::End => self
                .width
                .saturating_sub(width)
                .saturating_sub(margins.right),
            Alignment::Center => (max_width - width) / 2,
        };
        LayoutRect::new(x, y, width, preferred.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HorizontalMargins;
    use crate::geometry::ItemSize;
    use crate::item::ItemId;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct Fixed {
        id: ItemId,
        alignment: Alignment,
        margins: HorizontalMargins,
        size: ItemSize,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(width: u16, height: u32) -> Self {
            Self {
                id: ItemId::new(),
                alignment: Alignment::Start,
                margins: HorizontalMargins::ZERO,
                size: ItemSize::new(width, height),
                calls: Cell::new(0),
            }
        }

        fn aligned(mut self, alignment: Alignment) -> Self {
            self.alignment = alignment;
            self
        }
    }

    impl LayoutItem for Fixed {
        fn id(&self) -> ItemId {
            self.id
        }

        fn alignment(&self) -> Alignment {
            self.alignment
        }

        fn horizontal_margins(&self) -> HorizontalMargins {
            self.margins
        }

        fn preferred_size(&self, _max_width: u16) -> ItemSize {
            self.calls.set(self.calls.get() + 1);
            self.size
        }
    }

    fn layout(width: u16, spacing: u32, top: u32, bottom: u32) -> ChatLayout {
        let mut l = ChatLayout::with_config(LayoutConfig {
            spacing,
            margins: VerticalMargins::new(top, bottom),
        });
        l.set_width(width);
        l
    }

    #[test]
    fn frames_stack_with_spacing_and_top_margin() {
        let items = vec![Fixed::new(10, 2), Fixed::new(10, 3), Fixed::new(10, 1)];
        let mut l = layout(40, 1, 2, 2);
        assert_eq!(l.frame_for_item(&items, 2), LayoutRect::new(0, 9, 10, 1));
        assert_eq!(l.frame_for_item(&items, 0), LayoutRect::new(0, 2, 10, 2));
        assert_eq!(l.frame_for_item(&items, 1), LayoutRect::new(0, 5, 10, 3));
        assert_eq!(l.cache().len(), 3);
    }

    #[test]
    fn cached_frames_are_not_measured_again() {
        let items = vec![Fixed::new(10, 2), Fixed::new(10, 3)];
        let mut l = layout(40, 1, 0, 0);
        let first = l.frame_for_item(&items, 1);
        let second = l.frame_for_item(&items, 1);
        assert_eq!(first, second);
        assert_eq!(items[0].calls.get(), 1);
        assert_eq!(items[1].calls.get(), 1);
    }

    #[test]
    fn alignment_places_items() {
        let items = vec![
            Fixed::new(100, 1).aligned(Alignment::Start),
            Fixed::new(100, 1).aligned(Alignment::End),
            Fixed::new(100, 1).aligned(Alignment::Center),
        ];
        let mut l = layout(300, 0, 0, 0);
        assert_eq!(l.frame_for_item(&items, 0).x, 0);
        assert_eq!(l.frame_for_item(&items, 1).x, 200);
        assert_eq!(l.frame_for_item(&items, 2).x, 100);
    }

    #[test]
    fn margins_shrink_and_offset() {
        let mut start = Fixed::new(200, 1).aligned(Alignment::Start);
        start.margins = HorizontalMargins::new(3, 5);
        let mut end = Fixed::new(10, 1).aligned(Alignment::End);
        end.margins = HorizontalMargins::new(3, 5);
        let mut center = Fixed::new(10, 1).aligned(Alignment::Center);
        center.margins = HorizontalMargins::new(3, 5);
        let items = vec![start, end, center];
        let mut l = layout(100, 0, 0, 0);

        // Clamped to 100 - 8.
        assert_eq!(l.frame_for_item(&items, 0), LayoutRect::new(3, 0, 92, 1));
        assert_eq!(l.frame_for_item(&items, 1).x, 85);
        // Centered within the available width, not offset by the left margin.
        assert_eq!(l.frame_for_item(&items, 2).x, 41);
    }

    #[test]
    fn clamped_width_keeps_reported_height() {
        let items = vec![Fixed::new(500, 7)];
        let mut l = layout(50, 0, 0, 0);
        assert_eq!(l.frame_for_item(&items, 0), LayoutRect::new(0, 0, 50, 7));
    }

    #[test]
    fn empty_list_has_zero_content_size() {
        let items: Vec<Fixed> = Vec::new();
        let mut l = layout(80, 1, 3, 3);
        assert_eq!(l.content_size(&items), ContentSize::ZERO);
    }

    #[test]
    fn count_changed_keeps_frames() {
        let mut items = vec![Fixed::new(10, 2)];
        let mut l = layout(40, 1, 1, 1);
        assert_eq!(l.content_size(&items).height, 4);

        items.push(Fixed::new(10, 3));
        l.invalidate(InvalidationReason::CountChanged);
        assert_eq!(l.cache().len(), 1);
        assert_eq!(l.content_size(&items).height, 8);
        assert_eq!(items[0].calls.get(), 1);
    }

    #[test]
    fn removal_drops_only_the_suffix() {
        let mut items = vec![
            Fixed::new(10, 1),
            Fixed::new(10, 2),
            Fixed::new(10, 3),
            Fixed::new(10, 4),
        ];
        let mut l = layout(40, 0, 0, 0);
        l.content_size(&items);

        items.remove(1);
        l.invalidate(InvalidationReason::ItemsRemovedFrom(1));
        assert_eq!(l.cache().len(), 1);
        assert_eq!(l.cache().content_size(), None);

        assert_eq!(l.frame_for_item(&items, 2), LayoutRect::new(0, 4, 10, 4));
        assert_eq!(items[0].calls.get(), 1);
    }

    #[test]
    fn width_change_recomputes_everything() {
        let items = vec![
            Fixed::new(10, 1).aligned(Alignment::End),
            Fixed::new(10, 2),
        ];
        let mut l = layout(40, 1, 0, 0);
        assert_eq!(l.frame_for_item(&items, 0).x, 30);
        l.set_width(60);
        assert!(l.cache().is_empty());
        assert_eq!(l.frame_for_item(&items, 0).x, 50);
        assert_eq!(l.frame_for_item(&items, 1).y, 2);
    }

    #[test]
    fn spacing_change_restacks_every_frame() {
        let items = vec![Fixed::new(10, 2), Fixed::new(10, 3), Fixed::new(10, 1)];
        let mut l = layout(40, 1, 1, 1);
        assert_eq!(l.content_size(&items).height, 1 + 2 + 1 + 3 + 1 + 1 + 1);

        l.set_spacing(4);
        assert!(l.cache().is_empty());
        assert_eq!(l.cache().content_size(), None);
        assert_eq!(l.frame_for_item(&items, 1).y, 7);
        assert_eq!(l.frame_for_item(&items, 2).y, 14);
        assert_eq!(l.content_size(&items).height, 1 + 2 + 4 + 3 + 4 + 1 + 1);
        assert_eq!(items[0].calls.get(), 2);
    }

    #[test]
    fn margin_change_moves_every_frame() {
        let items = vec![Fixed::new(10, 2), Fixed::new(10, 3)];
        let mut l = layout(40, 1, 1, 1);
        assert_eq!(l.content_size(&items).height, 8);

        l.set_margins(VerticalMargins::new(5, 2));
        assert!(l.cache().is_empty());
        assert_eq!(l.cache().content_size(), None);
        assert_eq!(l.frame_for_item(&items, 0), LayoutRect::new(0, 5, 10, 2));
        assert_eq!(l.frame_for_item(&items, 1), LayoutRect::new(0, 8, 10, 3));
        assert_eq!(l.content_size(&items).height, 13);
    }

    #[test]
    fn intersecting_frames_are_filtered() {
        let items = vec![Fixed::new(10, 2), Fixed::new(10, 2), Fixed::new(10, 2)];
        let mut l = layout(40, 1, 0, 0);
        let hits = l.frames_intersecting(&items, LayoutRect::new(0, 3, 40, 2));
        assert_eq!(hits, vec![(1, LayoutRect::new(0, 3, 10, 2))]);
        assert_eq!(l.cache().len(), 3);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let items = vec![Fixed::new(10, 1)];
        let mut l = layout(40, 0, 0, 0);
        l.frame_for_item(&items, 1);
    }
}
