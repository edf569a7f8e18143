use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quillbar_config::Config;
use quillbar_engine::{InlineSpan, PreviewBlock, render_preview};
use quillbar_session::{EditorSession, Mode, SaveState};
use quillbar_store::JsonFileStore;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::stdout,
    path::PathBuf,
    process,
    time::{Duration, Instant},
};

struct App {
    session: EditorSession<JsonFileStore>,
    list_state: ListState,
}

impl App {
    fn new(notes_file: PathBuf, autosave: Duration) -> Result<Self> {
        let store = JsonFileStore::new(notes_file);
        let mut session = EditorSession::with_window(store, autosave);
        session.refresh()?;

        let mut app = Self {
            session,
            list_state: ListState::default(),
        };
        if !app.session.notes().is_empty() {
            app.list_state.select(Some(0));
        }
        Ok(app)
    }

    fn next_note(&mut self) {
        let count = self.session.notes().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_note(&mut self) {
        let count = self.session.notes().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_id(&self) -> Option<String> {
        let i = self.list_state.selected()?;
        self.session.notes().get(i).map(|n| n.id.clone())
    }

    fn open_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.session.view(&id)?;
        }
        Ok(())
    }

    fn create_note(&mut self) -> Result<()> {
        let note = self.session.create("Untitled")?;
        // The CLI has no editing surface; drop straight back to the list
        self.session.close()?;
        let i = self.session.notes().iter().position(|n| n.id == note.id);
        self.list_state.select(i.or(Some(0)));
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_id() {
            self.session.delete(&id)?;
            let count = self.session.notes().len();
            if count == 0 {
                self.list_state.select(None);
            } else if let Some(i) = self.list_state.selected() {
                self.list_state.select(Some(i.min(count - 1)));
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Determine notes file from CLI args or config file
    let args: Vec<String> = env::args().collect();

    let config = match args.len() {
        1 => match Config::load() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} [notes-file-path]", args[0]);
                process::exit(1);
            }
        },
        2 => Config {
            notes_file: PathBuf::from(&args[1]),
            ..Config::default()
        },
        _ => {
            eprintln!("Usage: {} [notes-file-path]", args[0]);
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let autosave = Duration::from_millis(config.autosave_ms);
    let res = App::new(config.notes_file, autosave).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Poll with a timeout so the debounce clock keeps ticking while idle
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            match key.code {
                KeyCode::Char('q') => {
                    app.session.close()?;
                    return Ok(());
                }
                KeyCode::Down | KeyCode::Char('j') => app.next_note(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_note(),
                KeyCode::Enter => app.open_selected()?,
                KeyCode::Esc => {
                    app.session.close()?;
                }
                KeyCode::Char('n') => app.create_note()?,
                KeyCode::Char('d') => app.delete_selected()?,
                _ => {}
            }
        }
        app.session.tick(Instant::now());
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(chunks[0]);

    // Note list panel: title plus one-line snippet
    let entries = app.session.list_entries();
    let note_items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let title = Line::from(Span::styled(
                entry.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            let snippet = Line::from(Span::styled(
                format!("  {}", entry.snippet),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(vec![title, snippet])
        })
        .collect();

    let notes_list = List::new(note_items)
        .block(Block::default().borders(Borders::ALL).title("Notes"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(notes_list, panes[0], &mut app.list_state);

    // Preview panel for the selected note
    let selected_content = app
        .list_state
        .selected()
        .and_then(|i| app.session.notes().get(i))
        .map(|n| n.content.clone());

    let preview_text = match selected_content {
        Some(content) => preview_lines(&render_preview(&content)),
        None => vec![Line::from("Select a note to preview it")],
    };

    let title = match app.session.mode() {
        Mode::View => "Preview (viewing)",
        _ => "Preview",
    };
    let preview = Paragraph::new(preview_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(preview, panes[1]);

    // Status line: keys plus save indicator
    let save_label = match app.session.save_state() {
        SaveState::Idle => String::new(),
        SaveState::Dirty => " [unsaved]".to_string(),
        SaveState::Saving => " [saving…]".to_string(),
        SaveState::Saved => " [saved]".to_string(),
        SaveState::Error(e) => format!(" [save failed: {e}]"),
    };
    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | ↑/k ↓/j: Select | Enter: View | n: New | d: Delete"),
        Span::styled(save_label, Style::default().fg(Color::Red)),
    ]));
    f.render_widget(help, chunks[1]);
}

/// Maps display nodes to styled terminal lines.
fn preview_lines(blocks: &[PreviewBlock]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            PreviewBlock::Spacer => lines.push(Line::default()),
            PreviewBlock::Heading { spans } => {
                let mut styled = styled_spans(spans);
                for span in &mut styled {
                    span.style = span.style.add_modifier(Modifier::BOLD);
                }
                lines.push(Line::from(styled));
            }
            PreviewBlock::Bullets { items } => {
                for item in items {
                    let mut line = vec![Span::raw("• ")];
                    line.extend(styled_spans(item));
                    lines.push(Line::from(line));
                }
            }
            PreviewBlock::Paragraph { spans } => lines.push(Line::from(styled_spans(spans))),
        }
    }
    lines
}

fn styled_spans(spans: &[InlineSpan]) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Text(text) => Span::raw(text.clone()),
            InlineSpan::Bold(text) => Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            InlineSpan::Italic(text) => Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
            InlineSpan::Code(text) => {
                Span::styled(text.clone(), Style::default().fg(Color::Yellow))
            }
        })
        .collect()
}
