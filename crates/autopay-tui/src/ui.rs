use autopay_state::{time_ago, Route, StatCard};
use autopay_types::{AgentStatus, PaymentStatus, ServiceType, SettingField};
use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use crate::app::{App, FormField, InputMode};

const ACCENT: Color = Color::Cyan;

pub(crate) fn draw_ui(frame: &mut Frame<'_>, app: &App, now: DateTime<Utc>) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, vertical[0], app, now);
    render_tabs(frame, vertical[1], &app.route);

    match &app.route {
        Route::Dashboard => render_dashboard(frame, vertical[2], app, now),
        Route::Agents => render_agents(frame, vertical[2], app),
        Route::Simulate => render_simulate(frame, vertical[2], app),
        Route::PaymentLogs => render_logs(frame, vertical[2], app),
        Route::Settings => render_settings(frame, vertical[2], app),
        Route::NotFound(path) => render_not_found(frame, vertical[2], path),
    }

    render_notice(frame, vertical[3], app);

    let footer_text = if app.mode == InputMode::Goto {
        format!(":{}_   {}", app.goto_input, app.hotkeys())
    } else {
        app.hotkeys().to_string()
    };
    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"));
    frame.render_widget(footer, vertical[4]);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App, now: DateTime<Utc>) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " AutoPay ",
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " AI Agent Payment Network | {} UTC | wallet: {}",
            now.format("%H:%M:%S"),
            app.wallet.label()
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, route: &Route) {
    let titles: Vec<Line<'_>> = Route::TABS
        .iter()
        .enumerate()
        .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.title())))
        .collect();
    let mut tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    if let Some(index) = route.tab_index() {
        tabs = tabs.select(index);
    }
    frame.render_widget(tabs, area);
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let line = match app.state.notices.latest() {
        Some(notice) => {
            let color = if notice.is_error() { Color::Red } else { Color::Green };
            Line::from(vec![
                Span::styled(
                    format!("{}: ", notice.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(notice.description.clone()),
            ])
        }
        None => Line::from("No notifications"),
    };
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Last notice")),
        area,
    );
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

fn render_dashboard(frame: &mut Frame<'_>, area: Rect, app: &App, now: DateTime<Utc>) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(4)])
        .split(area);

    let cards = app.state.stats.stat_cards();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(5)])
        .split(split[0]);
    for (row_index, chunk) in cards.chunks(3).enumerate() {
        let Some(row_area) = rows.get(row_index) else {
            break;
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row_area);
        for (card, cell) in chunk.iter().zip(columns.iter()) {
            render_stat_card(frame, *cell, card);
        }
    }

    let items: Vec<ListItem<'_>> = app
        .state
        .feed
        .entries()
        .iter()
        .map(|tx| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", tx.id), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{} {} -> {} {} | {} | {} | {} ETH | ",
                    tx.sender_role.icon(),
                    tx.sender,
                    tx.recipient_role.icon(),
                    tx.recipient,
                    tx.service,
                    tx.amount.to_display_string(),
                    tx.gas_used
                )),
                status_span(tx.status),
                Span::raw(format!(" {}", time_ago(now, tx.timestamp))),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Live Transaction Feed"),
        ),
        split[1],
    );
}

fn render_stat_card(frame: &mut Frame<'_>, area: Rect, card: &StatCard) {
    let value_style = if card.highlight {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut lines = vec![
        Line::from(Span::styled(card.value.clone(), value_style)),
        Line::from(card.description),
    ];
    if let Some(trend) = card.trend {
        lines.push(Line::from(Span::styled(trend, Style::default().fg(Color::Green))));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(card.title)),
        area,
    );
}

fn status_span(status: PaymentStatus) -> Span<'static> {
    let color = match status {
        PaymentStatus::Completed => Color::Green,
        PaymentStatus::Pending => Color::Yellow,
        PaymentStatus::Failed => Color::Red,
    };
    Span::styled(status.as_str(), Style::default().fg(color))
}

// ----------------------------------------------------------------------------
// Agents
// ----------------------------------------------------------------------------

fn render_agents(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if app.agent_form.is_some() {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(area);

    let rows: Vec<Row<'_>> = app
        .state
        .registry
        .agents()
        .iter()
        .enumerate()
        .map(|(idx, agent)| {
            let marker = if idx == app.selected_agent { ">" } else { " " };
            let status_style = match agent.status {
                AgentStatus::Active => Style::default().fg(Color::Green),
                AgentStatus::Inactive => Style::default().fg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(agent.id.clone()),
                Cell::from(agent.name.clone()),
                Cell::from(format!("{} {}", agent.role.icon(), agent.role)),
                Cell::from(agent.short_address()),
                Cell::from(agent.spending_limit.to_display_string()),
                Cell::from(agent.status.to_string()).style(status_style),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(10),
            Constraint::Min(18),
            Constraint::Length(16),
            Constraint::Length(14),
            Constraint::Length(16),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["", "ID", "Name", "Role", "Wallet", "Limit", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(format!(
        "Registered Agents ({}, {} active)",
        app.state.registry.len(),
        app.state.registry.active_count()
    )));
    frame.render_widget(table, split[0]);

    if let Some(form) = app.agent_form.as_ref() {
        let lines: Vec<Line<'_>> = FormField::ALL
            .iter()
            .map(|field| {
                let value = match field {
                    FormField::Name => form.draft.name.as_str(),
                    FormField::Role if form.draft.role.is_empty() => "<space to choose>",
                    FormField::Role => form.draft.role.as_str(),
                    FormField::Wallet => form.draft.wallet_address.as_str(),
                    FormField::Limit => form.draft.spending_limit.as_str(),
                };
                let style = if *field == form.focus {
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{}: ", field.label()), style),
                    Span::raw(value.to_string()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Register New Agent"),
            ),
            split[1],
        );
    }
}

// ----------------------------------------------------------------------------
// Simulation
// ----------------------------------------------------------------------------

fn render_simulate(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let form = &app.simulation_form;
    let agent_label = |id: Option<&String>| {
        id.and_then(|id| app.state.registry.get(id))
            .map(|a| format!("{} {} ({})", a.role.icon(), a.name, a.id))
            .unwrap_or_else(|| "-".to_string())
    };
    let request = form.request();
    let preview = request
        .preview()
        .map(|amount| amount.to_display_string())
        .unwrap_or_else(|| "-".to_string());
    let units_suffix = if app.mode == InputMode::Units { "_" } else { "" };

    let mut lines = vec![
        Line::from(format!("Sender:     {}", agent_label(form.sender.as_ref()))),
        Line::from(format!("Recipient:  {}", agent_label(form.recipient.as_ref()))),
        Line::from(format!(
            "Service:    {}",
            form.service.map_or("-", |s| s.label())
        )),
        Line::from(format!("Units:      {}{}", form.units, units_suffix)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Estimated:  {}", preview),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for service in ServiceType::ALL {
        lines.push(Line::from(format!(
            "{}: {} tokens/unit",
            service.label(),
            service.rate().to_decimal_string()
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Simulation Parameters"),
        ),
        split[0],
    );

    let result_lines: Vec<Line<'_>> = if app.simulating {
        vec![Line::from(Span::styled(
            "Simulating payment...",
            Style::default().fg(Color::Yellow),
        ))]
    } else if let Some(result) = app.state.last_simulation.as_ref() {
        vec![
            Line::from(vec![Span::raw("Status:      "), status_span(result.status)]),
            Line::from(format!("Transaction: {}", result.transaction_id)),
            Line::from(format!(
                "From:        {} {}",
                result.sender.role.icon(),
                result.sender.name
            )),
            Line::from(format!(
                "To:          {} {}",
                result.recipient.role.icon(),
                result.recipient.name
            )),
            Line::from(format!("Service:     {}", result.service_type.label())),
            Line::from(format!("Units:       {}", result.usage_units)),
            Line::from(Span::styled(
                format!("Amount:      {}", result.amount.to_display_string()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Time:        {}",
                result.timestamp.format("%Y-%m-%d %H:%M:%S")
            )),
        ]
    } else {
        vec![Line::from("Configure and run a simulation to see results")]
    };
    frame.render_widget(
        Paragraph::new(result_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Simulation Results")),
        split[1],
    );
}

// ----------------------------------------------------------------------------
// Payment logs
// ----------------------------------------------------------------------------

fn render_logs(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let filter = &app.log_filter;
    let records = app.state.filtered_logs(filter);
    let summary = app.state.log_summary(filter);
    let cursor = if app.mode == InputMode::Search { "_" } else { "" };
    let header = vec![
        Line::from(format!(
            "Search: {}{}   Service: {}   Status: {}",
            filter.search, cursor, filter.service, filter.status
        )),
        Line::from(format!(
            "Transactions: {}   Volume: {}   Success rate: {}",
            summary.count,
            summary.volume.to_display_string(),
            summary.success_rate_display()
        )),
    ];
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Filters")),
        split[0],
    );

    let rows: Vec<Row<'_>> = records
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(record.id.clone()),
                Cell::from(record.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(format!("{} {}", record.sender_role.icon(), record.sender)),
                Cell::from(format!("{} {}", record.recipient_role.icon(), record.recipient)),
                Cell::from(record.service_type.as_str()),
                Cell::from(record.units.to_string()),
                Cell::from(record.amount.to_decimal_string()),
                Cell::from(status_span(record.status)),
            ])
        })
        .collect();
    let title = if records.is_empty() {
        "Payment Logs (no transactions match the current filters)".to_string()
    } else {
        format!("Payment Logs ({})", records.len())
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(17),
            Constraint::Min(20),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec![
            "ID", "Time", "Sender", "Recipient", "Service", "Units", "Amount", "Status",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, split[1]);
}

// ----------------------------------------------------------------------------
// Settings
// ----------------------------------------------------------------------------

fn render_settings(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let settings = app.state.settings.settings();
    let selected = app.selected_setting_field();
    let items: Vec<ListItem<'_>> = SettingField::ALL
        .iter()
        .map(|field| {
            let marker = if *field == selected { ">" } else { " " };
            let style = if *field == selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {:<30}", marker, field.label()), style),
                Span::raw(settings.display_value(*field)),
            ]))
        })
        .collect();
    let title = if app.state.settings.is_default() {
        "Settings"
    } else {
        "Settings (modified)"
    };
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn render_not_found(frame: &mut Frame<'_>, area: Rect, path: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Oops! Page not found: {}", path)),
        Line::from("Press Enter to return to the dashboard"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Not Found")),
        area,
    );
}
