/// Fixed visual treatment for each appointment status.
///
/// The same mapping is used by the week badges, the day entries, the
/// detail view and the legend.
use colored::Color;

use crate::models::AppointmentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub status: AppointmentStatus,
    pub glyph: &'static str,
    pub color: Color,
    pub label: &'static str,
}

pub fn style_for(status: AppointmentStatus) -> StatusStyle {
    let (glyph, color) = match status {
        AppointmentStatus::Scheduled => ("●", Color::Blue),
        AppointmentStatus::Completed => ("✓", Color::Green),
        AppointmentStatus::Cancelled => ("✕", Color::Red),
        AppointmentStatus::NoShow => ("○", Color::BrightBlack),
    };
    StatusStyle {
        status,
        glyph,
        color,
        label: status.label(),
    }
}

/// Marker for the slot containing the current time.
pub const CURRENT_TIME_COLOR: Color = Color::Red;
pub const CURRENT_TIME_MARKER: &str = "▸";

/// Legend rows in display order.
pub fn legend() -> Vec<StatusStyle> {
    AppointmentStatus::ALL.iter().map(|s| style_for(*s)).collect()
}
