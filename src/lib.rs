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

//! Armtune - Joint characteristic tuning TUI for Trossen-style robot arms
//!
//! This library provides the session state, driver capability seam, and
//! editing logic behind the interactive finetuner: one joint is held in
//! external-effort mode while the operator nudges friction terms, position
//! offset, and effort correction, watching deltas against a baseline.

pub mod app;
pub mod characteristics;
pub mod delta;
pub mod driver;
pub mod events;
pub mod handlers;
pub mod logger;
pub mod sim;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
