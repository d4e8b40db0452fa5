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

//! Presentation boundary. Everything here is a pure function of `&App`;
//! no hardware calls happen during rendering.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;

use crate::app::{App, Phase};

pub mod ui_setup;
pub mod ui_tuning;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn ui(f: &mut Frame, app: &App) {
    match app.phase {
        Phase::Setup => ui_setup::render_setup(f, app),
        Phase::Tuning => ui_tuning::render_tuning(f, app),
    }
}
