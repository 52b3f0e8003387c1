//! TUI runner - main loop and review actions.
//!
//! Every key maps to a [`ReviewSession`] call; failures are shown in the
//! status bar rather than ending the session.

use crate::{App, AppMode, Event, EventHandler};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use postwright_core::PostFilter;
use postwright_error::{PostwrightResult, TuiError, TuiErrorKind, TuiResult};
use postwright_generation::ReviewSession;
use postwright_interface::PostRepository;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future::Future;
use std::io;
use tracing::{info, instrument, warn};

const HISTORY_LIMIT: i64 = 20;

/// Run the review TUI over a session until the user quits.
///
/// Must be called from a multi-threaded tokio runtime; regeneration blocks
/// the UI thread while the pipeline runs.
#[instrument(skip_all, fields(topic = %session.topic()))]
pub fn run_review_tui<R: PostRepository>(session: &mut ReviewSession<R>) -> TuiResult<()> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to setup terminal: {}",
            e
        )))
    })?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })?;

    let mut app = App::new(session.topic(), session.platforms());
    let events = EventHandler::new(250);

    let outcome = event_loop(&mut terminal, &mut app, session, &events);

    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to cleanup terminal: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })?;

    info!(succeeded = session.succeeded(), "Review finished");
    outcome
}

fn event_loop<R: PostRepository>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut ReviewSession<R>,
    events: &EventHandler,
) -> TuiResult<()> {
    while !app.should_quit {
        terminal
            .draw(|f| crate::ui::draw(f, app, session))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e))))?;

        if let Some(Event::Key(key)) = events.next()? {
            handle_key(app, session, key);
        }
    }
    Ok(())
}

/// Drive an async session call from the synchronous UI loop.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Put the outcome of an action in the status bar.
fn report<T>(app: &mut App, result: PostwrightResult<T>, success: impl FnOnce(T) -> String) {
    app.status_message = match result {
        Ok(value) => success(value),
        Err(e) => {
            warn!(error = %e, "Review action failed");
            format!("Error: {}", e)
        }
    };
}

/// Handle a single key press.
pub fn handle_key<R: PostRepository>(
    app: &mut App,
    session: &mut ReviewSession<R>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::List | AppMode::Detail => handle_browse_key(app, session, key),
        AppMode::Edit => handle_edit_key(app, session, key),
        AppMode::Reject => handle_reject_key(app, session, key),
        AppMode::History => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => app.return_to_list(),
            _ => {}
        },
    }
}

fn handle_browse_key<R: PostRepository>(
    app: &mut App,
    session: &mut ReviewSession<R>,
    key: KeyEvent,
) {
    let Some(platform) = app.selected_platform().map(str::to_string) else {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.quit();
        }
        return;
    };

    match key.code {
        KeyCode::Esc if app.mode == AppMode::Detail => app.return_to_list(),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => app.enter_detail(),
        KeyCode::Char('a') => {
            let result = session.approve(&platform);
            report(app, result, |record| {
                format!("Approved {} (post #{})", platform, record.id)
            });
        }
        KeyCode::Char('r') => {
            if session.post(&platform).is_some() {
                app.enter_reject();
            } else {
                app.status_message = format!("No post for {} to reject", platform);
            }
        }
        KeyCode::Char('e') => match session.post(&platform) {
            Some(post) => app.enter_edit(post),
            None => app.status_message = format!("No post for {} to edit", platform),
        },
        KeyCode::Char('g') => {
            let result = block_on(session.regenerate_post(&platform));
            report(app, result, |()| format!("Regenerated {} post", platform));
        }
        KeyCode::Char('i') => {
            let result = block_on(session.regenerate_image(&platform));
            report(app, result, |()| format!("Regenerated {} image", platform));
        }
        KeyCode::Char('h') => {
            let result = session
                .repository()
                .list_posts(&PostFilter::default().with_limit(HISTORY_LIMIT));
            match result {
                Ok(records) => {
                    app.status_message = format!("{} saved posts", records.len());
                    app.enter_history(records);
                }
                Err(e) => app.status_message = format!("Error: {}", e),
            }
        }
        _ => {}
    }
}

fn handle_edit_key<R: PostRepository>(
    app: &mut App,
    session: &mut ReviewSession<R>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            app.return_to_list();
            app.status_message = "Edit cancelled".to_string();
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let Some(platform) = app.selected_platform().map(str::to_string) else {
                return;
            };
            if let Some(buffer) = app.take_edit() {
                let result = session.edit(&platform, &buffer.content, &buffer.hashtags);
                app.return_to_list();
                report(app, result, |()| format!("Saved edits to {}", platform));
            }
        }
        KeyCode::Tab => app.toggle_edit_field(),
        KeyCode::Enter => {
            let in_content = app
                .edit_buffer
                .as_ref()
                .is_some_and(|b| b.focused_field == crate::EditField::Content);
            if in_content {
                app.push_char('\n');
            }
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

fn handle_reject_key<R: PostRepository>(
    app: &mut App,
    session: &mut ReviewSession<R>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            app.return_to_list();
            app.status_message = "Rejection cancelled".to_string();
        }
        KeyCode::Enter => {
            let Some(platform) = app.selected_platform().map(str::to_string) else {
                return;
            };
            let reason = std::mem::take(&mut app.reject_reason);
            let result = session.reject(&platform, &reason);
            app.return_to_list();
            report(app, result, |record| {
                format!("Rejected {} (post #{})", platform, record.id)
            });
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}
