/*
 * This file is part of Armtune.
 *
 * Copyright (C) 2025 Armtune contributors
 *
 * Armtune is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Armtune is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Armtune. If not, see <https://www.gnu.org/licenses/>.
 */

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

use crate::app::App;
use crate::characteristics::CharKind;
use crate::delta;

/// Render the tuning screen: header, sidebar + grid, footer.
pub fn render_tuning(f: &mut Frame, app: &App) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(40)])
        .split(chunks[1]);
    render_sidebar(f, app, body[0]);
    render_grid(f, app, body[1]);

    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Span::styled(
        "Armtune — Joint Characteristic Finetuner",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let kind = app.selected_kind();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("  Joint:  ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("Joint {}", app.joint_idx),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "  Characteristic:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("    {}", kind.label()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("  Increment: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{:.2e}", app.increment),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "  ------------------------------",
        Style::default().fg(Color::DarkGray),
    )));

    if let (Some(cur), Some(base)) = (app.selected_value(), app.selected_baseline()) {
        let d = delta::delta(cur, base);
        let delta_style = if d > 0.0 {
            Style::default().fg(Color::Green)
        } else if d < 0.0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!("  Current:  {:+.8}", cur),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  Original: {:+.8}", base),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("  Delta:    {:+.8}", d),
            delta_style,
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("  ({})", kind.unit()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "  Tip: start small (1e-3) and",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  double with + until behavior",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  changes.",
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" Controls "),
    );
    f.render_widget(panel, area);
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let header = Row::new(
        std::iter::once(Cell::from("Joint"))
            .chain(CharKind::ALL.iter().map(|k| Cell::from(k.label())))
            .collect::<Vec<_>>(),
    )
    .style(header_style);

    let mut rows: Vec<Row> = Vec::with_capacity(app.characteristics.len());
    for (j, jc) in app.characteristics.iter().enumerate() {
        let selected_row = j == app.joint_idx;
        let marker = if selected_row { "> " } else { "  " };
        let mut cells: Vec<Cell> = Vec::with_capacity(CharKind::COUNT + 1);
        cells.push(Cell::from(format!("{}Joint {}", marker, j)));

        for (ci, kind) in CharKind::ALL.iter().enumerate() {
            let v = kind.get(jc);
            let mut text = format!("{:+.6}", v);
            let mut style = Style::default();
            if let Some(base) = app.baseline.get(j) {
                let bv = kind.get(base);
                if delta::changed(v, bv) {
                    text.push_str(&format!(" ({:+.2e})", delta::delta(v, bv)));
                    style = Style::default().fg(Color::Cyan);
                }
            }
            if selected_row && ci == app.char_idx {
                style = Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD);
            }
            cells.push(Cell::from(text).style(style));
        }

        let row = Row::new(cells);
        rows.push(if selected_row {
            row.style(
                Style::default()
                    .bg(Color::Rgb(0, 80, 0))
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            row
        });
    }

    let widths = std::iter::once(Constraint::Length(10))
        .chain(std::iter::repeat(Constraint::Min(16)).take(CharKind::COUNT))
        .collect::<Vec<_>>();
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" All Joint Characteristics (cyan = changed) "),
    );
    f.render_widget(table, area);
}

const FOOTER_ITEMS: [(&str, &str); 7] = [
    ("<->", "characteristic"),
    ("^/v", "joint"),
    ("w/s", "nudge"),
    ("W/S", "10x"),
    ("+/-", "increment"),
    ("r", "refresh"),
    ("q/Esc", "quit"),
];

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (keys, desc) in FOOTER_ITEMS {
        spans.push(Span::styled(
            format!(" {}", keys),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {} ", desc),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if !app.status.is_empty() {
        spans.push(Span::styled(
            format!("| {}", app.status),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
