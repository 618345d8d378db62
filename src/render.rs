/// Plain-text rendering of the grids for the terminal.
///
/// Cells are laid out from the grid models only; colour is applied after
/// padding so escape codes never disturb column widths.
use std::fmt::Write as _;

use colored::{Color, Colorize};

use crate::day_view::{DayCell, DayGrid};
use crate::details::AppointmentDetails;
use crate::grid::CalendarGrid;
use crate::status_style::{legend, style_for, CURRENT_TIME_COLOR, CURRENT_TIME_MARKER};
use crate::week_view::{WeekCellContent, WeekGrid};

const TIME_COLUMN: usize = 7;
const WEEK_COLUMN: usize = 12;
const DAY_COLUMN: usize = 7;
const DOCTOR_COLUMN: usize = 22;
const CREATE_MARK: &str = "+";

/// Text pieces of one cell, each optionally coloured.
#[derive(Debug, Default)]
struct Segments(Vec<(String, Option<Color>)>);

impl Segments {
    fn push(&mut self, text: impl Into<String>, color: Option<Color>) {
        self.0.push((text.into(), color));
    }

    fn width(&self) -> usize {
        self.0.iter().map(|(text, _)| text.chars().count()).sum()
    }

    /// Left-aligned in `width` columns, truncated when too long.
    fn render(&self, width: usize, use_color: bool) -> String {
        let mut out = String::new();
        let mut used = 0;
        for (text, color) in &self.0 {
            let room = width.saturating_sub(used);
            let piece: String = text.chars().take(room).collect();
            used += piece.chars().count();
            out.push_str(&paint(&piece, *color, use_color));
        }
        out.push_str(&" ".repeat(width.saturating_sub(self.width().min(width))));
        out
    }
}

fn paint(text: &str, color: Option<Color>, use_color: bool) -> String {
    match color {
        Some(color) if use_color => text.color(color).to_string(),
        _ => text.to_string(),
    }
}

fn heading(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut segments = Segments::default();
    segments.push(text, None);
    segments.render(width, false)
}

pub fn render_grid(grid: &CalendarGrid<'_>, use_color: bool) -> String {
    match grid {
        CalendarGrid::Week(week) => render_week(week, use_color),
        CalendarGrid::Day(day) => render_day(day, use_color),
    }
}

pub fn render_week(grid: &WeekGrid, use_color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(&grid.title, use_color));

    let mut header = pad("Time", TIME_COLUMN);
    for day in &grid.days {
        let label = day.date.format("%a %d").to_string();
        let mut segments = Segments::default();
        if day.is_today {
            segments.push(format!("{}*", label), Some(Color::Blue));
        } else {
            segments.push(label, None);
        }
        header.push('|');
        header.push_str(&segments.render(WEEK_COLUMN, use_color));
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(TIME_COLUMN + grid.days.len() * (WEEK_COLUMN + 1)));

    for row in &grid.rows {
        let mut line = time_label(&row.time, row.is_current_time, TIME_COLUMN, use_color);
        for cell in &row.cells {
            let mut segments = Segments::default();
            if cell.is_current_slot {
                segments.push(CURRENT_TIME_MARKER, Some(CURRENT_TIME_COLOR));
            }
            match cell.content() {
                WeekCellContent::CreateAffordance => segments.push(CREATE_MARK, Some(Color::BrightBlack)),
                WeekCellContent::Badges(badges) => {
                    for (i, (status, count)) in badges.iter().enumerate() {
                        if i > 0 {
                            segments.push(" ", None);
                        }
                        let style = style_for(*status);
                        segments.push(format!("{}{}", style.glyph, count), Some(style.color));
                    }
                }
            }
            line.push('|');
            line.push_str(&segments.render(WEEK_COLUMN, use_color));
        }
        let _ = writeln!(out, "{}", line);
    }

    out.push_str(&render_legend(use_color));
    out
}

pub fn render_day(grid: &DayGrid<'_>, use_color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(&grid.title, use_color));

    if grid.rows.is_empty() {
        let _ = writeln!(out, "No doctors to show");
        out.push_str(&render_legend(use_color));
        return out;
    }

    let mut header = pad("Doctor / Time", DOCTOR_COLUMN);
    for time in &grid.time_headers {
        header.push('|');
        header.push_str(&time_label(&time.time, time.is_current, DAY_COLUMN, use_color));
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(
        out,
        "{}",
        "-".repeat(DOCTOR_COLUMN + grid.time_headers.len() * (DAY_COLUMN + 1))
    );

    for row in &grid.rows {
        let mut name = Segments::default();
        let name_color = if row.works_on_day { None } else { Some(Color::BrightBlack) };
        name.push(format!("{} ({})", row.name, row.specialization), name_color);
        let mut line = name.render(DOCTOR_COLUMN, use_color);
        for cell in &row.cells {
            line.push('|');
            line.push_str(&day_cell(cell).render(DAY_COLUMN, use_color));
        }
        let _ = writeln!(out, "{}", line);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Entries (row, column, entry):");
    for (r, row) in grid.rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            for (e, entry) in cell.entries.iter().enumerate() {
                let style = style_for(entry.status);
                let _ = writeln!(
                    out,
                    "  [{} {} {}] {} {} {} - {} ({} min)",
                    r,
                    c,
                    e,
                    paint(style.glyph, Some(style.color), use_color),
                    cell.key.time,
                    row.name,
                    entry.patient_name,
                    entry.duration
                );
            }
            if let Some(overflow) = cell.overflow {
                let _ = writeln!(out, "  [{} {} +] {} {}", r, c, cell.key.time, overflow.label());
            }
        }
    }

    out.push_str(&render_legend(use_color));
    let _ = writeln!(out, "Up to {} entries per cell", grid.max_visible);
    out
}

fn day_cell(cell: &DayCell<'_>) -> Segments {
    let mut segments = Segments::default();
    if cell.is_current_slot {
        segments.push(CURRENT_TIME_MARKER, Some(CURRENT_TIME_COLOR));
    }
    if cell.is_empty() {
        segments.push(CREATE_MARK, Some(Color::BrightBlack));
        return segments;
    }
    for entry in &cell.entries {
        let style = style_for(entry.status);
        segments.push(style.glyph, Some(style.color));
    }
    if let Some(overflow) = cell.overflow {
        segments.push(overflow.short_label(), Some(Color::Cyan));
    }
    segments
}

fn time_label(time: &str, is_current: bool, width: usize, use_color: bool) -> String {
    let mut segments = Segments::default();
    if is_current {
        segments.push(format!("{}{}", CURRENT_TIME_MARKER, time), Some(CURRENT_TIME_COLOR));
    } else {
        segments.push(time, None);
    }
    segments.render(width, use_color)
}

pub fn render_legend(use_color: bool) -> String {
    let mut line = String::from("Legend: ");
    for style in legend() {
        let _ = write!(line, "{} {}  ", paint(style.glyph, Some(style.color), use_color), style.label);
    }
    let _ = write!(
        line,
        "{} current time  {} free slot",
        paint(CURRENT_TIME_MARKER, Some(CURRENT_TIME_COLOR), use_color),
        CREATE_MARK
    );
    format!("{}\n", line.trim_end())
}

pub fn render_details(details: &AppointmentDetails, use_color: bool) -> String {
    let mut out = String::new();
    let status = format!("{} {}", details.style.glyph, details.style.label);
    let _ = writeln!(out, "Patient:      {}", details.patient_name);
    let _ = writeln!(out, "Appointment:  {}  {}", details.date_label, details.time_range);
    let _ = writeln!(out, "Created:      {}", details.created_at.format("%b %-d, %Y %H:%M"));
    if let Some(updated) = details.updated_at {
        let _ = writeln!(out, "Updated:      {}", updated.format("%b %-d, %Y %H:%M"));
    }
    let _ = writeln!(out, "Symptoms:     {}", dash_if_empty(&details.symptoms));
    let _ = writeln!(out, "Notes:        {}", dash_if_empty(&details.notes));
    let _ = writeln!(out, "Type:         {}", details.type_label);
    let _ = writeln!(out, "Doctor:       {}", details.doctor_label);
    let _ = writeln!(out, "Status:       {}", paint(&status, Some(details.style.color), use_color));
    if let Some(diagnosis) = &details.diagnosis {
        let _ = writeln!(out, "Diagnosis:    {}", diagnosis);
    }
    if let Some(prescription) = &details.prescription {
        let _ = writeln!(out, "Prescription: {}", prescription);
    }
    out
}

fn dash_if_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
