/// Week grid: one row per time slot, one column per visible day.
///
/// A week cell may gather appointments from several doctors, so it carries
/// per-status tallies rather than individual entries.
use chrono::NaiveDate;
use tracing::debug;

use crate::grid::CurrentSlot;
use crate::models::{Appointment, AppointmentStatus};
use crate::navigator::PeriodNavigator;
use crate::resolver::{SlotIndex, SlotKey, StatusCounts};
use crate::slots::TimeSlots;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCell {
    pub key: SlotKey,
    pub counts: StatusCounts,
    pub is_current_slot: bool,
}

/// What a week cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekCellContent {
    /// Nothing booked; offers to create a booking.
    CreateAffordance,
    /// One badge per non-zero status.
    Badges(Vec<(AppointmentStatus, usize)>),
}

impl WeekCell {
    pub fn content(&self) -> WeekCellContent {
        if self.counts.is_empty() {
            WeekCellContent::CreateAffordance
        } else {
            WeekCellContent::Badges(self.counts.badges())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub time: String,
    pub is_current_time: bool,
    pub cells: Vec<WeekCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub title: String,
    pub days: Vec<DayHeader>,
    pub rows: Vec<WeekRow>,
}

impl WeekGrid {
    pub fn build(
        navigator: &PeriodNavigator,
        appointments: &[Appointment],
        slots: &TimeSlots,
        now: &CurrentSlot,
    ) -> Self {
        let index = SlotIndex::build(appointments);
        let includes_today = navigator.contains(now.date);

        let days: Vec<DayHeader> = navigator
            .visible_days()
            .iter()
            .map(|date| DayHeader {
                date: *date,
                is_today: *date == now.date,
            })
            .collect();

        let rows: Vec<WeekRow> = slots
            .restarted()
            .map(|time| {
                let is_current_time = includes_today && now.is_time(&time);
                let cells = days
                    .iter()
                    .map(|day| {
                        let key = SlotKey::new(day.date, time.clone());
                        WeekCell {
                            counts: index.counts(&key),
                            is_current_slot: day.is_today && is_current_time,
                            key,
                        }
                    })
                    .collect();
                WeekRow {
                    time,
                    is_current_time,
                    cells,
                }
            })
            .collect();

        debug!(
            title = %navigator.title(),
            rows = rows.len(),
            columns = days.len(),
            "Built week grid"
        );

        WeekGrid {
            title: navigator.title(),
            days,
            rows,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&WeekCell> {
        self.rows.get(row)?.cells.get(column)
    }

    /// Tallies across the whole visible period.
    pub fn totals(&self) -> StatusCounts {
        let mut totals = StatusCounts::default();
        for cell in self.rows.iter().flat_map(|row| row.cells.iter()) {
            totals.merge(&cell.counts);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::ViewMode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn not_today() -> CurrentSlot {
        CurrentSlot {
            date: date(1999, 1, 1),
            time: None,
        }
    }

    #[test]
    fn week_grid_is_slots_by_days() {
        let nav = PeriodNavigator::new(date(2025, 3, 5), ViewMode::Week);
        let grid = WeekGrid::build(&nav, &[], &TimeSlots::new(8, 19, 30), &not_today());
        assert_eq!(grid.rows.len(), 24);
        assert!(grid.rows.iter().all(|r| r.cells.len() == 7));
        assert_eq!(grid.days[0].date, date(2025, 3, 3));
        assert_eq!(grid.title, "March 2025");
    }

    #[test]
    fn empty_cells_offer_creation() {
        let nav = PeriodNavigator::new(date(2025, 3, 5), ViewMode::Week);
        let grid = WeekGrid::build(&nav, &[], &TimeSlots::new(8, 9, 30), &not_today());
        assert_eq!(
            grid.cell(0, 0).unwrap().content(),
            WeekCellContent::CreateAffordance
        );
    }

    #[test]
    fn collisions_aggregate_across_doctors() {
        let apts = vec![
            Appointment::new("P1", "D1", "2025-03-10", "09:00", 30),
            Appointment::new("P2", "D2", "2025-03-10", "09:00", 30)
                .with_status(AppointmentStatus::Cancelled),
        ];
        let nav = PeriodNavigator::new(date(2025, 3, 10), ViewMode::Week);
        let grid = WeekGrid::build(&nav, &apts, &TimeSlots::new(8, 19, 30), &not_today());
        // 09:00 is the third slot, Monday the first column
        let cell = grid.cell(2, 0).unwrap();
        assert_eq!(cell.key.time, "09:00");
        assert_eq!(cell.counts.scheduled, 1);
        assert_eq!(cell.counts.cancelled, 1);
        assert_eq!(grid.totals().total(), 2);
    }

    #[test]
    fn appointments_outside_the_grid_hours_are_not_drawn() {
        let apts = vec![Appointment::new("P1", "D1", "2025-03-10", "07:30", 30)];
        let nav = PeriodNavigator::new(date(2025, 3, 10), ViewMode::Week);
        let grid = WeekGrid::build(&nav, &apts, &TimeSlots::new(8, 19, 30), &not_today());
        assert_eq!(grid.totals().total(), 0);
    }

    #[test]
    fn current_slot_only_marked_on_today() {
        let nav = PeriodNavigator::new(date(2025, 3, 10), ViewMode::Week);
        let now = CurrentSlot {
            date: date(2025, 3, 12),
            time: Some("10:30".to_string()),
        };
        let grid = WeekGrid::build(&nav, &[], &TimeSlots::new(8, 19, 30), &now);
        let marked: Vec<(usize, usize)> = grid
            .rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.cells
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.is_current_slot)
                    .map(move |(c, _)| (r, c))
            })
            .collect();
        assert_eq!(marked, vec![(5, 2)]);
        assert!(grid.rows[5].is_current_time);
        assert!(grid.days[2].is_today);
    }

    #[test]
    fn no_current_row_when_today_is_not_visible() {
        let nav = PeriodNavigator::new(date(2025, 3, 10), ViewMode::Week);
        let now = CurrentSlot {
            date: date(2025, 3, 20),
            time: Some("10:30".to_string()),
        };
        let grid = WeekGrid::build(&nav, &[], &TimeSlots::new(8, 19, 30), &now);
        assert!(grid.rows.iter().all(|r| !r.is_current_time));
    }
}
