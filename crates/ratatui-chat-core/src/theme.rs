use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub placeholder_item: Style,
    pub input_bar: Style,
    pub input_placeholder: Style,
    pub scrollbar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            placeholder_item: Style::default().dark_gray(),
            input_bar: Style::default(),
            input_placeholder: Style::default().dark_gray().italic(),
            scrollbar: Style::default().dark_gray(),
        }
    }
}
