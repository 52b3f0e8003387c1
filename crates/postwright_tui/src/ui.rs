//! UI rendering for TUI.

use crate::app::{App, AppMode, EditField};
use postwright_core::{CharStatus, PostStatus};
use postwright_generation::ReviewSession;
use postwright_interface::PostRepository;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

const PREVIEW_CHARS: usize = 50;

/// Draw the main UI.
#[tracing::instrument(skip_all)]
pub fn draw<R: PostRepository>(f: &mut Frame, app: &App, session: &ReviewSession<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, session, chunks[0]);

    match app.mode {
        AppMode::List => draw_list_view(f, app, session, chunks[1]),
        AppMode::Detail => draw_detail_view(f, app, session, chunks[1]),
        AppMode::Edit => draw_edit_view(f, app, session, chunks[1]),
        AppMode::Reject => draw_reject_view(f, app, chunks[1]),
        AppMode::History => draw_history_view(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

fn char_status_style(status: CharStatus) -> Style {
    match status {
        CharStatus::Ok => Style::default().fg(Color::Green),
        CharStatus::Warning => Style::default().fg(Color::Yellow),
        CharStatus::Over => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn post_status_style(status: PostStatus) -> Style {
    match status {
        PostStatus::Approved | PostStatus::Published => Style::default().fg(Color::Green),
        PostStatus::Rejected => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

fn draw_header<R: PostRepository>(f: &mut Frame, app: &App, session: &ReviewSession<R>, area: Rect) {
    let title = format!(
        "Postwright Review - {} ({}/{} generated)",
        app.topic,
        session.succeeded(),
        app.platforms.len()
    );
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::List => {
            "↑↓: Navigate | Enter: Detail | A: Approve | R: Reject | E: Edit | G: Regenerate | I: New image | H: History | Q: Quit"
        }
        AppMode::Detail => {
            "Esc: Back | A: Approve | R: Reject | E: Edit | G: Regenerate | I: New image | Q: Quit"
        }
        AppMode::Edit => "Tab: Switch field | Ctrl+S: Save | Esc: Cancel",
        AppMode::Reject => "Enter: Reject | Esc: Cancel",
        AppMode::History => "Esc: Back",
    };

    let status_text = format!("{} | {}", app.status_message, help_text);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

fn draw_list_view<R: PostRepository>(
    f: &mut Frame,
    app: &App,
    session: &ReviewSession<R>,
    area: Rect,
) {
    let header = Row::new(vec!["Platform", "Status", "Chars", "Length", "Preview"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .platforms
        .iter()
        .enumerate()
        .map(|(i, platform)| {
            let cells = match (session.post(platform), session.error(platform)) {
                (Some(post), _) => {
                    let char_status = session.char_status(platform).unwrap_or(CharStatus::Ok);
                    let mut status = session.status(platform).to_string();
                    if session.is_edited(platform) {
                        status.push_str(" *");
                    }
                    vec![
                        platform.clone(),
                        status,
                        format!("{}/{}", post.char_count(), post.metadata().char_limit()),
                        char_status.to_string(),
                        preview(post.content()),
                    ]
                }
                (None, Some(e)) => vec![
                    platform.clone(),
                    "failed".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    preview(&e.to_string()),
                ],
                (None, None) => vec![platform.clone(), "-".to_string()],
            };

            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if session.error(platform).is_some() {
                Style::default().fg(Color::Red)
            } else {
                post_status_style(session.status(platform))
            };

            Row::new(cells).style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(8),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Posts"))
    .row_highlight_style(Style::default().add_modifier(Modifier::BOLD));

    f.render_widget(table, area);
}

fn draw_detail_view<R: PostRepository>(
    f: &mut Frame,
    app: &App,
    session: &ReviewSession<R>,
    area: Rect,
) {
    let Some(platform) = app.selected_platform() else {
        return;
    };

    let (title, body, style) = match (session.post(platform), session.error(platform)) {
        (Some(post), _) => {
            let char_status = session.char_status(platform).unwrap_or(CharStatus::Ok);
            let metadata = post.metadata();
            let details = [
                format!("Status: {}", session.status(platform)),
                format!(
                    "Characters: {}/{} ({})",
                    post.char_count(),
                    metadata.char_limit(),
                    char_status
                ),
                format!("Brand voice: {}", metadata.brand_voice_used()),
                format!(
                    "Hashtags: {}",
                    postwright_generation::format_hashtags(post.hashtags())
                ),
                format!(
                    "Image: {} ({})",
                    post.image_path().display(),
                    metadata.image_dimensions()
                ),
                format!("Image prompt: {}", post.image_prompt()),
                format!("Generated: {}", metadata.generated_at().format("%Y-%m-%d %H:%M:%S")),
                String::new(),
                post.content().clone(),
            ];
            (
                format!("{} post", platform),
                details.join("\n"),
                char_status_style(char_status),
            )
        }
        (None, Some(e)) => (
            format!("{} failed", platform),
            e.to_string(),
            Style::default().fg(Color::Red),
        ),
        (None, None) => return,
    };

    let detail = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(style),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(detail, area);
}

fn draw_edit_view<R: PostRepository>(
    f: &mut Frame,
    app: &App,
    session: &ReviewSession<R>,
    area: Rect,
) {
    let Some(buffer) = &app.edit_buffer else {
        return;
    };
    let limit = app
        .selected_platform()
        .and_then(|platform| session.post(platform))
        .map(|post| *post.metadata().char_limit())
        .unwrap_or(usize::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .margin(1)
        .split(area);

    let focused = |field: EditField| {
        if buffer.focused_field == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    let count = buffer.content.chars().count();
    let content_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Content ({}/{})", count, limit))
        .border_style(focused(EditField::Content))
        .title_style(char_status_style(CharStatus::classify(count, limit)));
    let content = Paragraph::new(buffer.content.as_str())
        .block(content_block)
        .wrap(Wrap { trim: false });
    f.render_widget(content, chunks[0]);

    let hashtags_block = Block::default()
        .borders(Borders::ALL)
        .title("Hashtags (space or comma separated)")
        .border_style(focused(EditField::Hashtags));
    let hashtags = Paragraph::new(buffer.hashtags.as_str()).block(hashtags_block);
    f.render_widget(hashtags, chunks[1]);
}

fn draw_reject_view(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .margin(2)
        .split(area);

    let title = format!(
        "Reason for rejecting {} (optional)",
        app.selected_platform().unwrap_or("post")
    );
    let reason = Paragraph::new(app.reject_reason.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(reason, chunks[0]);
}

fn draw_history_view(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["ID", "Platform", "Status", "Edited", "Saved", "Preview"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .history
        .iter()
        .map(|record| {
            let content = record
                .final_content
                .as_deref()
                .unwrap_or(&record.generated_content);
            Row::new(vec![
                record.id.to_string(),
                record.platform.clone(),
                record.status.to_string(),
                if record.was_edited() { "yes" } else { "no" }.to_string(),
                record.created_at.format("%Y-%m-%d %H:%M").to_string(),
                preview(content),
            ])
            .style(post_status_style(record.status))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(17),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Recent posts"));

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_flattens_and_cuts() {
        assert_eq!(preview("a\nb"), "a b");
        let long = "x".repeat(60);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(50)));
    }
}
