use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

use rolodex::app::App;
use rolodex::config::Config;
use rolodex::handlers::{handle_key_event, KeyAction};
use rolodex::ui::{
    render_contact_details, render_contact_list, render_dialog, render_help_panel,
    render_status_bar, ContactListState, InputMode, StatusBarState,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::load()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            eprintln!("Failed to initialize app: {}", e);
            return Err(e);
        }
    };
    app.start_sync();

    let res = run_app(&mut terminal, &mut app).await;

    app.store.stop_polling();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

/// The terminal owns stdout, so tracing output goes to a file instead.
/// Set ROLODEX_LOG to a path to enable it; RUST_LOG controls the filter.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("ROLODEX_LOG") else {
        return Ok(());
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create log file at {}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        app.sync_from_store();
        app.clear_expired_status();

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(app.config.ui.tick_rate())? {
            if let Event::Key(key) = event::read()? {
                match handle_key_event(app, key).await {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Continue => {}
                }
            }
        }
    }
}

fn render_ui(f: &mut Frame, app: &mut App) {
    let mut constraints = vec![
        Constraint::Length(3), // Header
    ];

    if app.show_debug {
        constraints.push(Constraint::Percentage(50)); // Main content
        constraints.push(Constraint::Percentage(25)); // Debug panel
    } else {
        constraints.push(Constraint::Min(10)); // Main content takes all remaining space
    }
    constraints.push(Constraint::Length(3)); // Status bar

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.area());

    let mut chunk_index = 0;

    // Header
    let header_text = format!(
        "Rolodex - {} contacts - refresh every {}s",
        app.contacts.len(),
        app.refresh_interval_secs
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[chunk_index]);
    chunk_index += 1;

    // Main content: contact list on the left, details on the right
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[chunk_index]);

    let list_state = ContactListState {
        contacts: &app.contacts,
        selected: app.selected,
        sort_order: app.store.sort_order(),
    };
    render_contact_list(f, &list_state, content_chunks[0]);
    render_contact_details(f, app.selected_contact(), content_chunks[1]);
    chunk_index += 1;

    // Debug panel (only shown when enabled)
    if app.show_debug {
        let debug_text: String = app
            .debug_log
            .iter()
            .rev()
            .take(10)
            .rev()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let debug_panel = Paragraph::new(debug_text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Debug Log [`: hide]")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(debug_panel, main_chunks[chunk_index]);
        chunk_index += 1;
    }

    // Status bar
    let status_state = StatusBarState {
        status_message: app
            .status_message
            .as_ref()
            .map(|m| (m.message.clone(), m.is_error)),
        mode: InputMode::from(&app.dialog),
    };
    render_status_bar(f, &status_state, main_chunks[chunk_index]);

    // Render help panel as overlay (last, so it's on top)
    if app.show_help {
        render_help_panel(f, f.area());
    }

    // Render dialog as topmost overlay
    if app.is_dialog_open() {
        render_dialog(f, &app.dialog, f.area());
    }
}
