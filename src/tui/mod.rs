// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Dispatching keys to dashboard actions

pub mod app;
pub mod components;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::dashboard::Shell;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Run the TUI until the user quits
pub async fn run_tui(shell: Shell, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(shell, log_buffer);

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal even when the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input and a periodic tick. The tick drives the
/// notification auto-clear and redraws the log strip.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Map a key press to a dashboard action
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }

        // Stage cards, numbered as shown
        KeyCode::Char(c @ '1'..='4') => app.select_stage_card(c as usize - '1' as usize),

        KeyCode::Char('r') => app.reset_filters(),
        KeyCode::Char('c') => app.copy_all_codes(),
        KeyCode::Char('y') => app.copy_code_strip(),
        KeyCode::Char('s') => app.save_snapshot(),
        KeyCode::Char('u') => app.copy_selected_quote_url(),

        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.move_right(),
        KeyCode::Enter => app.activate(),
        _ => {}
    }
}
