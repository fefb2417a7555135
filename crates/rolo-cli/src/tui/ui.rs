//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use rolo_core::{NoticeLevel, SyncStatus, Theme};

use super::app::{App, InputMode};

/// Colors derived from the active theme
struct Palette {
    fg: Color,
    dim: Color,
    accent: Color,
    success: Color,
    error: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            success: Color::Green,
            error: Color::Red,
        },
    }
}

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let colors = palette(app.theme);

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, &colors, outer_chunks[0]);

    // Split the main area: clients table left, detail and tasks right
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[1]);

    draw_clients_table(frame, app, &colors, pane_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(pane_chunks[1]);

    draw_detail_pane(frame, app, &colors, right_chunks[0]);
    draw_tasks_pane(frame, app, &colors, right_chunks[1]);

    // Draw status bar or search input
    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, &colors, outer_chunks[2]),
        InputMode::Search => draw_search_input(frame, app, &colors, outer_chunks[2]),
    }

    // Draw help overlay if visible
    if app.show_help {
        draw_help_overlay(frame, &colors);
    }
}

/// Draw the header line: title, stats summary, sync indicator
fn draw_header(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let stats = &app.stats;
    let summary = format!(
        " {} clients · {} leads · {} active · {} open tasks",
        stats.total, stats.leads, stats.active, stats.open_tasks
    );

    let (sync_text, sync_color) = match app.sync_status {
        SyncStatus::Idle => ("", colors.dim),
        SyncStatus::Syncing => ("⟳ syncing ", colors.accent),
        SyncStatus::Synced => ("✓ synced ", colors.success),
        SyncStatus::SyncFailed => ("✗ sync failed ", colors.error),
    };

    let line = Line::from(vec![
        Span::styled(
            " rolo ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(summary, Style::default().fg(colors.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if !sync_text.is_empty() {
        let indicator = Paragraph::new(Line::from(Span::styled(
            sync_text,
            Style::default().fg(sync_color),
        )))
        .alignment(ratatui::layout::Alignment::Right);
        frame.render_widget(indicator, area);
    }
}

/// Draw the clients table (left)
fn draw_clients_table(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let header = Row::new(["Name", "Company", "Status", "Tasks"]).style(
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .clients
        .iter()
        .map(|client| {
            let open = client.open_task_count();
            Row::new([
                client.name.clone(),
                client.company.clone().unwrap_or_else(|| "-".to_string()),
                client.status.to_string(),
                if open == 0 {
                    String::new()
                } else {
                    open.to_string()
                },
            ])
            .style(Style::default().fg(colors.fg))
        })
        .collect();

    let title = format!(" Clients ({}) ", app.clients.len());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL))
    .row_highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = TableState::default();
    if !app.clients.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Draw the detail pane (top right)
fn draw_detail_pane(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let content = if let Some(client) = app.current_client() {
        let mut lines = vec![Line::from(vec![
            Span::styled("Name: ", bold),
            Span::raw(client.name.clone()),
        ])];

        if let Some(ref company) = client.company {
            lines.push(Line::from(vec![
                Span::styled("Company: ", bold),
                Span::raw(company.clone()),
            ]));
        }
        if let Some(ref email) = client.email {
            lines.push(Line::from(vec![
                Span::styled("Email: ", bold),
                Span::raw(email.clone()),
            ]));
        }
        if let Some(ref phone) = client.phone {
            lines.push(Line::from(vec![
                Span::styled("Phone: ", bold),
                Span::raw(phone.clone()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Status: ", bold),
            Span::styled(
                client.status.to_string(),
                Style::default().fg(colors.accent),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Updated: ", bold),
            Span::styled(
                client.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                Style::default().fg(colors.dim),
            ),
        ]));

        if !client.notes.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Notes", bold)));
            for note_line in client.notes.lines() {
                lines.push(Line::from(Span::raw(note_line.to_string())));
            }
        }

        if !client.tasks.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Tasks ({})", client.tasks.len()),
                bold,
            )));
            for task in &client.tasks {
                let marker = if task.done { "[x]" } else { "[ ]" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{} ", marker), Style::default().fg(colors.dim)),
                    Span::raw(task.description.clone()),
                    Span::styled(
                        format!(" ({})", task.assignee),
                        Style::default().fg(colors.dim),
                    ),
                ]));
            }
        }

        lines
    } else {
        vec![Line::from(Span::styled(
            "No client selected",
            Style::default().fg(colors.dim),
        ))]
    };

    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draw the per-assignee task lists (bottom right)
fn draw_tasks_pane(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();

    for group in &app.task_groups {
        let open: Vec<_> = group.tasks.iter().filter(|e| !e.task.done).collect();
        if open.is_empty() {
            continue;
        }

        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} ({})", group.assignee, open.len()),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))));

        for entry in open {
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("  {} ", entry.task.description)),
                Span::styled(
                    format!("— {}", entry.client_name),
                    Style::default().fg(colors.dim),
                ),
            ])));
        }
    }

    if items.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No open tasks",
            Style::default().fg(colors.dim),
        ))));
    }

    let list = List::new(items).block(Block::default().title(" Tasks ").borders(Borders::ALL));
    frame.render_widget(list, area);
}

/// Draw the bottom status bar: notice if present, key hints otherwise
fn draw_status_bar(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let line = match app.notice {
        Some(ref notice) => {
            let color = match notice.level {
                NoticeLevel::Info => colors.accent,
                NoticeLevel::Success => colors.success,
                NoticeLevel::Error => colors.error,
            };
            Line::from(Span::styled(
                format!(" {}", notice.text),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            " j/k move · / search · d delete · s sync · t theme · ? help · q quit",
            Style::default().fg(colors.dim),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the search input line
fn draw_search_input(frame: &mut Frame, app: &App, colors: &Palette, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(colors.accent)),
        Span::raw(app.search_input.clone()),
        Span::styled("█", Style::default().fg(colors.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the help overlay
fn draw_help_overlay(frame: &mut Frame, colors: &Palette) {
    let area = centered_rect(46, 14, frame.area());

    let lines = vec![
        Line::from(""),
        Line::from("  j/k or ↑/↓   Move selection"),
        Line::from("  /            Search clients"),
        Line::from("  Esc          Clear search"),
        Line::from("  d            Delete selected client"),
        Line::from("  s            Sync to remote"),
        Line::from("  t            Toggle light/dark theme"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(colors.dim),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Help ").borders(Borders::ALL)),
        area,
    );
}

/// Center a fixed-size rect inside an area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
