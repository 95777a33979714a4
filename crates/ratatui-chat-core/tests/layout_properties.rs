use pretty_assertions::assert_eq;
use ratatui_chat_core::collection::ChatCollection;
use ratatui_chat_core::geometry::ContentSize;
use ratatui_chat_core::geometry::HorizontalMargins;
use ratatui_chat_core::geometry::ItemSize;
use ratatui_chat_core::geometry::LayoutRect;
use ratatui_chat_core::geometry::VerticalMargins;
use ratatui_chat_core::item::Alignment;
use ratatui_chat_core::item::ChatItem;
use ratatui_chat_core::item::ItemId;
use ratatui_chat_core::item::LayoutItem;
use ratatui_chat_core::item::PlaceholderItem;
use ratatui_chat_core::layout::LayoutConfig;
use std::cell::Cell;
use std::rc::Rc;

/// Item whose size tracks the width it is offered, and which counts its measurements.
struct Measured {
    id: ItemId,
    alignment: Alignment,
    height: u32,
    measured: Rc<Cell<usize>>,
}

impl Measured {
    fn new(height: u32, measured: &Rc<Cell<usize>>) -> Self {
        Self {
            id: ItemId::new(),
            alignment: Alignment::End,
            height,
            measured: measured.clone(),
        }
    }
}

impl LayoutItem for Measured {
    fn id(&self) -> ItemId {
        self.id
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn horizontal_margins(&self) -> HorizontalMargins {
        HorizontalMargins::symmetric(2)
    }

    fn preferred_size(&self, max_width: u16) -> ItemSize {
        self.measured.set(self.measured.get() + 1);
        ItemSize::new(max_width / 2, self.height)
    }
}

fn collection(width: u16, spacing: u32, top: u32, bottom: u32) -> ChatCollection<ChatItem> {
    let mut chat = ChatCollection::with_config(LayoutConfig {
        spacing,
        margins: VerticalMargins::new(top, bottom),
    });
    chat.set_viewport_size(width, 40);
    chat
}

fn placeholder(height: u32) -> ChatItem {
    PlaceholderItem::new(Alignment::Start)
        .with_size(20, height)
        .into()
}

#[test]
fn scenario_grows_content_item_by_item() {
    let mut chat = collection(300, 10, 4, 6);
    assert_eq!(chat.content_size(), ContentSize::ZERO);

    chat.add_item(placeholder(50));
    assert_eq!(chat.frame_for_item(0), LayoutRect::new(0, 4, 60, 50));
    assert_eq!(
        chat.content_size(),
        ContentSize {
            width: 300,
            height: 50 + 4 + 6,
        }
    );

    chat.add_item(placeholder(80));
    assert_eq!(chat.frame_for_item(1), LayoutRect::new(0, 64, 60, 80));
    assert_eq!(
        chat.content_size(),
        ContentSize {
            width: 300,
            height: 50 + 80 + 10 + 4 + 6,
        }
    );
}

#[test]
fn content_height_sums_heights_spacing_and_margins() {
    let heights = [3u32, 7, 1, 12, 5];
    let mut chat = collection(80, 2, 1, 3);
    for h in heights {
        chat.add_item(placeholder(h));
    }
    let expected = heights.iter().sum::<u32>() + 2 * (heights.len() as u32 - 1) + 1 + 3;
    assert_eq!(chat.content_size().height, expected);
}

#[test]
fn frames_are_stable_until_invalidated() {
    let mut chat = collection(120, 1, 1, 1);
    for h in [2, 4, 6] {
        chat.add_item(placeholder(h));
    }
    let first: Vec<_> = (0..3).map(|i| chat.frame_for_item(i)).collect();
    let second: Vec<_> = (0..3).map(|i| chat.frame_for_item(i)).collect();
    assert_eq!(first, second);
}

#[test]
fn width_change_recomputes_without_gaps() {
    let measured = Rc::new(Cell::new(0));
    let mut chat = ChatCollection::with_config(LayoutConfig {
        spacing: 3,
        margins: VerticalMargins::ZERO,
    });
    chat.set_viewport_size(100, 20);
    for h in [2, 5, 1] {
        chat.add_item(Measured::new(h, &measured));
    }
    assert_eq!(chat.frame_for_item(2), LayoutRect::new(50, 13, 48, 1));

    assert!(chat.set_viewport_size(60, 20));
    let frames: Vec<_> = (0..3).map(|i| chat.frame_for_item(i)).collect();
    assert_eq!(
        frames,
        vec![
            LayoutRect::new(30, 0, 28, 2),
            LayoutRect::new(30, 5, 28, 5),
            LayoutRect::new(30, 13, 28, 1),
        ]
    );
    for pair in frames.windows(2) {
        assert_eq!(pair[1].y, pair[0].max_y() + 3);
    }
    assert_eq!(measured.get(), 6);
}

#[test]
fn height_only_resize_keeps_the_cache() {
    let measured = Rc::new(Cell::new(0));
    let mut chat = ChatCollection::new();
    chat.set_viewport_size(100, 20);
    chat.add_item(Measured::new(2, &measured));
    chat.frame_for_item(0);

    assert!(!chat.set_viewport_size(100, 50));
    chat.frame_for_item(0);
    assert_eq!(measured.get(), 1);
}

#[test]
fn removal_reuses_frames_before_the_removed_index() {
    let measured = Rc::new(Cell::new(0));
    let mut chat = ChatCollection::new();
    chat.set_viewport_size(100, 20);
    let ids: Vec<_> = [1, 2, 3, 4]
        .into_iter()
        .map(|h| chat.add_item(Measured::new(h, &measured)))
        .collect();
    let before = chat.frame_for_item(1);
    chat.content_size();
    assert_eq!(measured.get(), 4);

    chat.remove_item(ids[2]);
    assert_eq!(chat.frame_for_item(1), before);
    assert_eq!(measured.get(), 4);

    let moved = chat.frame_for_item(2);
    assert_eq!(moved.y, before.max_y() + 1);
    assert_eq!(moved.height, 4);
    assert_eq!(measured.get(), 5);
}

#[test]
fn item_limit_evicts_the_oldest() {
    let mut chat = collection(100, 1, 1, 1);
    chat.set_item_limit(Some(3));
    let ids: Vec<_> = (1..=5).map(|h| chat.add_item(placeholder(h))).collect();

    assert_eq!(chat.len(), 3);
    let kept: Vec<_> = chat.items().iter().map(|i| i.id()).collect();
    assert_eq!(kept, ids[2..].to_vec());
    assert_eq!(chat.frame_for_item(0).y, 1);
    assert_eq!(chat.frame_for_item(0).height, 3);
}

#[test]
fn visible_query_returns_only_intersecting_items() {
    let mut chat = collection(100, 0, 0, 0);
    for _ in 0..10 {
        chat.add_item(placeholder(10));
    }
    let visible: Vec<_> = chat
        .frames_intersecting(LayoutRect::new(0, 25, 100, 20))
        .into_iter()
        .map(|(index, _)| index)
        .collect();
    assert_eq!(visible, vec![2, 3, 4]);
}

#[test]
fn spacing_and_margin_changes_relayout_the_whole_list() {
    let mut chat = collection(80, 2, 1, 3);
    for h in [3, 7, 1] {
        chat.add_item(placeholder(h));
    }
    assert_eq!(chat.content_size().height, 1 + 3 + 2 + 7 + 2 + 1 + 3);

    chat.set_spacing(0);
    assert!(chat.layout().cache().is_empty());
    assert_eq!(chat.frame_for_item(2).y, 1 + 3 + 7);
    assert_eq!(chat.content_size().height, 1 + 3 + 7 + 1 + 3);

    chat.set_margins(VerticalMargins::new(10, 0));
    assert!(chat.layout().cache().is_empty());
    assert_eq!(chat.frame_for_item(0).y, 10);
    assert_eq!(chat.content_size().height, 10 + 3 + 7 + 1);
}
