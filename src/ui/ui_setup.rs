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

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::app::{App, SetupField};
use crate::ui::centered_rect;

/// Render the connection setup screen.
pub fn render_setup(f: &mut Frame, app: &App) {
    let size = f.area();
    let area = centered_rect(50, 60, size);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Setup ");
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Armtune — Joint Characteristic Finetuner",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    let fields = [
        (
            SetupField::EndEffector,
            "End Effector",
            format!("< {} >", app.end_effector().label()),
        ),
        (SetupField::Address, "Robot IP", app.address.clone()),
        (
            SetupField::ClearError,
            "Clear Error",
            if app.clear_error { "Yes" } else { "No" }.to_string(),
        ),
    ];

    for (field, label, value) in fields {
        let focused = app.setup_field == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}:  ", marker, label), label_style),
            Span::styled(format!(" {} ", value), value_style),
        ]));
    }

    lines.push(Line::default());
    if app.setup_field == SetupField::Connect {
        lines.push(Line::from(Span::styled(
            "> [ Connect ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  [ Connect ]",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if !app.connect_error.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {}", app.connect_error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        app.status.as_str(),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}
