use crate::bubble;
use crate::collection::ChatCollection;
use crate::geometry::LayoutRect;
use crate::geometry::VerticalMargins;
use crate::input::InputEvent;
use crate::input::MouseEvent;
use crate::input_bar::InputBar;
use crate::input_bar::InputBarAction;
use crate::input_bar::InputBarOptions;
use crate::item::ChatItem;
use crate::item::ItemId;
use crate::layout::LayoutConfig;
use crate::render;
use crate::scroll::ScrollBindings;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct ChatViewOptions {
    pub show_scrollbar: bool,
    /// Keep the newest item in view when items are added.
    pub follow_tail: bool,
    pub item_limit: Option<usize>,
    pub spacing: u32,
    pub margins: VerticalMargins,
    /// Rows scrolled per mouse wheel notch.
    pub wheel_step: i32,
    pub input_bar: InputBarOptions,
    pub bindings: ScrollBindings,
}

impl Default for ChatViewOptions {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            show_scrollbar: true,
            follow_tail: true,
            item_limit: None,
            spacing: layout.spacing,
            margins: layout.margins,
            wheel_step: 3,
            input_bar: InputBarOptions::default(),
            bindings: ScrollBindings::default(),
        }
    }
}

/// Where [`ChatView::scroll_to_item`] puts the item within the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollPosition {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatViewAction {
    None,
    Redraw,
    /// The user sent the draft. The view does not add it to the list by itself.
    Submitted(String),
}

/// A scrollable list of chat items with an input bar underneath.
///
/// Layout happens lazily during [`ChatView::render_ref`]; only items intersecting the viewport
/// are drawn.
#[derive(Clone, Debug)]
pub struct ChatView {
    items: ChatCollection<ChatItem>,
    input: InputBar,
    pub viewport: ViewportState,
    options: ChatViewOptions,
    pinned: bool,
    pending_scroll: Option<(usize, ScrollPosition)>,
    last_input_height: Option<u16>,
    last_input_area: Rect,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self::with_options(ChatViewOptions::default())
    }

    pub fn with_options(options: ChatViewOptions) -> Self {
        let mut items = ChatCollection::with_config(LayoutConfig {
            spacing: options.spacing,
            margins: options.margins,
        });
        items.set_item_limit(options.item_limit);
        Self {
            items,
            input: InputBar::with_options(options.input_bar.clone()),
            viewport: ViewportState::default(),
            options,
            pinned: true,
            pending_scroll: None,
            last_input_height: None,
            last_input_area: Rect::default(),
        }
    }

    pub fn options(&self) -> &ChatViewOptions {
        &self.options
    }

    pub fn items(&self) -> &[ChatItem] {
        self.items.items()
    }

    pub fn collection(&self) -> &ChatCollection<ChatItem> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: impl Into<ChatItem>) -> ItemId {
        let id = self.items.add_item(item.into());
        if self.options.follow_tail {
            self.pin_to_bottom();
        }
        id
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<ChatItem> {
        self.items.remove_item(id)
    }

    pub fn remove_items(&mut self, ids: &[ItemId]) -> Vec<ChatItem> {
        self.items.remove_items(ids)
    }

    /// Replaces every item, e.g. after loading a saved history.
    pub fn set_items(&mut self, items: Vec<ChatItem>) {
        self.items.set_items(items);
        self.pin_to_bottom();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pin_to_bottom();
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.options.spacing = spacing;
        self.items.set_spacing(spacing);
    }

    pub fn set_margins(&mut self, margins: VerticalMargins) {
        self.options.margins = margins;
        self.items.set_margins(margins);
    }

    pub fn set_item_limit(&mut self, limit: Option<usize>) {
        self.options.item_limit = limit;
        self.items.set_item_limit(limit);
    }

    pub fn input_bar(&self) -> &InputBar {
        &self.input
    }

    pub fn input_bar_mut(&mut self) -> &mut InputBar {
        &mut self.input
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    /// Clears the draft, returning it.
    pub fn remove_text(&mut self) -> String {
        self.input.clear()
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.input.set_placeholder(placeholder);
    }

    pub fn is_pinned_to_bottom(&self) -> bool {
        self.pinned
    }

    pub fn scroll_to_bottom(&mut self) {
        self.pin_to_bottom();
        if self.is_laid_out() {
            self.viewport.to_bottom();
        }
    }

    /// Scrolls so that the item at `index` sits at `position`. Indices past the end are ignored.
    ///
    /// Before the first render the request is kept and applied once the width is known.
    pub fn scroll_to_item(&mut self, index: usize, position: ScrollPosition) {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "scroll target out of range");
            return;
        }
        self.pinned = false;
        self.pending_scroll = Some((index, position));
        if self.is_laid_out() {
            self.apply_pending_scroll();
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ChatViewAction {
        match event {
            InputEvent::Mouse(MouseEvent::ScrollUp) => {
                self.scroll_by(-self.options.wheel_step);
                ChatViewAction::Redraw
            }
            InputEvent::Mouse(MouseEvent::ScrollDown) => {
                self.scroll_by(self.options.wheel_step);
                ChatViewAction::Redraw
            }
            InputEvent::Key(key) => match self.options.bindings.action_for(&key) {
                Some(action) => {
                    self.options.bindings.apply(&mut self.viewport, action);
                    self.pending_scroll = None;
                    self.pinned = self.viewport.is_at_bottom();
                    ChatViewAction::Redraw
                }
                None => self.forward_to_input(InputEvent::Key(key)),
            },
            event => self.forward_to_input(event),
        }
    }

    fn forward_to_input(&mut self, event: InputEvent) -> ChatViewAction {
        match self.input.input(event) {
            InputBarAction::None => ChatViewAction::None,
            InputBarAction::Changed | InputBarAction::HeightChanged(_) => ChatViewAction::Redraw,
            InputBarAction::Submitted(text) => ChatViewAction::Submitted(text),
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            return;
        }

        let input_h = self.input.desired_height(area.width).min(area.height);
        if self.last_input_height.is_some_and(|h| h != input_h) {
            self.pin_to_bottom();
        }
        self.last_input_height = Some(input_h);

        let list_area = Rect::new(area.x, area.y, area.width, area.height - input_h);
        let input_area = Rect::new(area.x, list_area.bottom(), area.width, input_h);
        let (content_area, scrollbar_x) = if self.options.show_scrollbar && list_area.width >= 2 {
            (
                Rect::new(list_area.x, list_area.y, list_area.width - 1, list_area.height),
                Some(list_area.right() - 1),
            )
        } else {
            (list_area, None)
        };

        self.items
            .set_viewport_size(content_area.width, content_area.height);
        let size = self.items.content_size();
        self.viewport
            .set_viewport(content_area.width, content_area.height);
        self.viewport.set_content(size.width as u32, size.height);
        self.apply_pending_scroll();
        if self.pinned {
            self.viewport.to_bottom();
        }

        if !content_area.is_empty() {
            let visible = LayoutRect::new(
                0,
                self.viewport.y,
                content_area.width,
                content_area.height as u32,
            );
            for (index, frame) in self.items.frames_intersecting(visible) {
                if let Some(item) = self.items.get(index) {
                    bubble::render_item_clipped(
                        item,
                        frame,
                        self.viewport.y,
                        content_area,
                        buf,
                        theme,
                    );
                }
            }
        }

        if let Some(x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(x, list_area.y, 1, list_area.height),
                buf,
                &self.viewport,
                theme.scrollbar,
            );
        }

        self.input.render_ref(input_area, buf, theme);
        self.last_input_area = input_area;
    }

    /// Cursor position inside the input bar as of the last render.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        self.input.cursor_pos(self.last_input_area)
    }

    fn scroll_by(&mut self, delta: i32) {
        self.viewport.scroll_y_by(delta);
        self.pending_scroll = None;
        self.pinned = self.viewport.is_at_bottom();
    }

    fn pin_to_bottom(&mut self) {
        self.pinned = true;
        self.pending_scroll = None;
    }

    fn is_laid_out(&self) -> bool {
        self.items.layout().width() > 0 && self.viewport.viewport_h > 0
    }

    fn apply_pending_scroll(&mut self) {
        let Some((index, position)) = self.pending_scroll.take() else {
            return;
        };
        if index >= self.items.len() {
            return;
        }
        let frame = self.items.frame_for_item(index);
        let view_h = self.viewport.viewport_h as u32;
        self.viewport.y = match position {
            ScrollPosition::Top => frame.y,
            ScrollPosition::Center => (frame.y + frame.height / 2).saturating_sub(view_h / 2),
            ScrollPosition::Bottom => frame.max_y().saturating_sub(view_h),
        };
        self.viewport.clamp();
    }
}
