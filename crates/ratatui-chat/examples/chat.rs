use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_chat::border::Border;
use ratatui_chat::border::BorderKind;
use ratatui_chat::border::Corner;
use ratatui_chat::border::CornerOrnaments;
use ratatui_chat::chat_view::ChatView;
use ratatui_chat::chat_view::ChatViewAction;
use ratatui_chat::chat_view::ChatViewOptions;
use ratatui_chat::crossterm_input::input_event_from_crossterm;
use ratatui_chat::item::Alignment;
use ratatui_chat::item::Avatar;
use ratatui_chat::item::ChatItem;
use ratatui_chat::item::LayoutItem;
use ratatui_chat::item::PlaceholderItem;
use ratatui_chat::item::SenderStyles;
use ratatui_chat::item::TextItemStyle;
use ratatui_chat::state::ChatHistory;
use ratatui_chat::state::PostQueue;
use ratatui_chat::theme::Theme;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const ITEM_LIMIT: usize = 20;
const REPLY_DELAY: Duration = Duration::from_secs(1);
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    init_logging()?;

    let history_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("ratatui-chat-demo.json"));
    let styles = sender_styles();

    let mut view = ChatView::with_options(ChatViewOptions {
        item_limit: Some(ITEM_LIMIT),
        ..Default::default()
    });
    view.set_items(ChatHistory::load_or_empty(&history_path, &styles).into_items());

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut view, &styles, &history_path);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = ChatHistory::new(view.items().to_vec()).save(&history_path) {
        eprintln!("{err}");
    }
    res
}

/// Logs go to the file named by `RATATUI_CHAT_LOG`; `RUST_LOG` picks the levels.
fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os("RATATUI_CHAT_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ratatui_chat=debug,ratatui_chat_core=debug"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_filter(filter);
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    Ok(())
}

fn sender_styles() -> SenderStyles {
    let me = TextItemStyle {
        alignment: Alignment::End,
        border: Border::new(BorderKind::Ornamented(
            CornerOrnaments::rounded().with_bottom_right(Corner::BubbleTail),
        ))
        .with_fill(Style::default().bg(Color::Blue).fg(Color::White))
        .with_stroke(None),
        ..TextItemStyle::default()
    };
    let bot = TextItemStyle {
        alignment: Alignment::Start,
        border: Border::new(BorderKind::Ornamented(
            CornerOrnaments::rounded().with_bottom_left(Corner::BubbleTail),
        ))
        .with_fill(Style::default().bg(Color::DarkGray).fg(Color::White))
        .with_stroke(None),
        avatar: Some(Avatar::new("🤖", Style::default())),
        ..TextItemStyle::default()
    };
    SenderStyles::new(me.clone()).with("me", me).with("bot", bot)
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    view: &mut ChatView,
    styles: &SenderStyles,
    history_path: &Path,
) -> io::Result<()> {
    let theme = Theme::default();
    let mut replies: PostQueue<ChatItem> = PostQueue::new(REPLY_DELAY);
    let mut status = format!("history: {}", history_path.display());

    loop {
        terminal.draw(|f| {
            let [main, footer] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(f.area());

            view.render_ref(main, f.buffer_mut(), &theme);
            let help = format!(
                "^L/^R/^E placeholder  ^D remove last  ^S save  Esc quit  {} items  {status}",
                view.len()
            );
            let span = Span::styled(help, theme.text_muted);
            f.buffer_mut()
                .set_span(footer.x, footer.y, &span, footer.width);
            if let Some((x, y)) = view.cursor_pos() {
                f.set_cursor_position((x, y));
            }
        })?;

        let timeout = replies
            .time_until_flush(Instant::now())
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));
        if crossterm::event::poll(timeout)? {
            let ev = crossterm::event::read()?;
            if let Event::Key(key) = &ev
                && key.kind == KeyEventKind::Press
            {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if ctrl => return Ok(()),
                    KeyCode::Char('l') if ctrl => {
                        view.add_item(PlaceholderItem::new(Alignment::Start));
                        continue;
                    }
                    KeyCode::Char('r') if ctrl => {
                        view.add_item(PlaceholderItem::new(Alignment::End));
                        continue;
                    }
                    KeyCode::Char('e') if ctrl => {
                        view.add_item(PlaceholderItem::new(Alignment::Center));
                        continue;
                    }
                    KeyCode::Char('d') if ctrl => {
                        if let Some(last) = view.items().last().map(LayoutItem::id) {
                            view.remove_item(last);
                        }
                        continue;
                    }
                    KeyCode::Char('s') if ctrl => {
                        status = match ChatHistory::new(view.items().to_vec()).save(history_path)
                        {
                            Ok(()) => format!("saved {}", history_path.display()),
                            Err(err) => err.to_string(),
                        };
                        continue;
                    }
                    _ => {}
                }
            }

            if let Some(input) = input_event_from_crossterm(ev)
                && let ChatViewAction::Submitted(text) = view.handle_event(input)
            {
                let reply = format!("You said: {}", text.trim());
                view.add_item(styles.text_item("me", text));
                replies.push(styles.text_item("bot", reply).into(), Instant::now());
            }
        }

        for item in replies.poll(Instant::now()) {
            view.add_item(item);
        }
    }
}
