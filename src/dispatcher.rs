/// Translation of grid gestures into the two outward intents.
///
/// A gesture lands on exactly one target and fires at most one callback:
/// activating an appointment entry never also counts as a click on the cell
/// underneath it.
use serde::Serialize;
use tracing::{debug, info};

use crate::grid::CalendarGrid;
use crate::models::Appointment;
use crate::resolver::SlotKey;

/// Receiver of grid intents, usually the booking/editing workflow.
pub trait CalendarEvents {
    fn on_appointment_click(&mut self, appointment: &Appointment);
    fn on_time_slot_click(&mut self, date: &str, time: &str);
}

/// A pointer activation addressed by grid coordinates.
///
/// Week grids are time rows by day columns; day grids are doctor rows by
/// time columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// The empty area of a cell, or the cell itself when it has no entries.
    Cell { row: usize, column: usize },
    /// One of the visible entries of a day cell.
    Entry {
        row: usize,
        column: usize,
        entry: usize,
    },
    /// The `+K more` marker of a crowded day cell.
    Overflow { row: usize, column: usize },
}

/// What a gesture resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    OpenAppointment { appointment_id: String },
    RequestBooking { date: String, time: String },
}

impl Intent {
    fn booking(key: &SlotKey) -> Self {
        Intent::RequestBooking {
            date: key.date.clone(),
            time: key.time.clone(),
        }
    }
}

/// Resolve `gesture` against `grid` without firing anything.
///
/// Coordinates outside the grid, entries past the visible ones, and
/// overflow clicks on cells that are not crowded resolve to `None`.
pub fn resolve<'a>(grid: &CalendarGrid<'a>, gesture: Gesture) -> Option<Resolved<'a>> {
    match (grid, gesture) {
        (CalendarGrid::Week(week), Gesture::Cell { row, column }) => {
            week.cell(row, column).map(|cell| Resolved::Slot(cell.key.clone()))
        }
        // Week cells carry badges only
        (CalendarGrid::Week(_), _) => None,
        (CalendarGrid::Day(day), Gesture::Cell { row, column }) => {
            day.cell(row, column).map(|cell| Resolved::Slot(cell.key.clone()))
        }
        (CalendarGrid::Day(day), Gesture::Entry { row, column, entry }) => day
            .cell(row, column)?
            .entries
            .get(entry)
            .map(|e| Resolved::Appointment(e.appointment)),
        (CalendarGrid::Day(day), Gesture::Overflow { row, column }) => {
            let cell = day.cell(row, column)?;
            cell.overflow.map(|_| Resolved::Slot(cell.key.clone()))
        }
    }
}

/// Target of a resolved gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Appointment(&'a Appointment),
    Slot(SlotKey),
}

/// Fire the callback for `gesture`, returning the intent that was emitted.
pub fn dispatch<H: CalendarEvents + ?Sized>(
    grid: &CalendarGrid<'_>,
    gesture: Gesture,
    handler: &mut H,
) -> Option<Intent> {
    let Some(target) = resolve(grid, gesture) else {
        debug!(?gesture, "Gesture hit no target");
        return None;
    };

    let intent = match target {
        Resolved::Appointment(appointment) => {
            handler.on_appointment_click(appointment);
            Intent::OpenAppointment {
                appointment_id: appointment.id.clone(),
            }
        }
        Resolved::Slot(key) => {
            handler.on_time_slot_click(&key.date, &key.time);
            Intent::booking(&key)
        }
    };
    info!(?gesture, ?intent, "Dispatched calendar intent");
    Some(intent)
}

/// Handler that keeps every intent it receives, in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IntentLog {
    pub intents: Vec<Intent>,
}

impl CalendarEvents for IntentLog {
    fn on_appointment_click(&mut self, appointment: &Appointment) {
        self.intents.push(Intent::OpenAppointment {
            appointment_id: appointment.id.clone(),
        });
    }

    fn on_time_slot_click(&mut self, date: &str, time: &str) {
        self.intents.push(Intent::RequestBooking {
            date: date.to_string(),
            time: time.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::RenderInput;
    use crate::models::{Doctor, WorkingHours};
    use crate::navigator::{PeriodNavigator, ViewMode};
    use chrono::{NaiveDate, NaiveDateTime};

    fn doctor(id: &str) -> Doctor {
        Doctor {
            id: id.into(),
            first_name: "Doc".into(),
            last_name: id.into(),
            specialization: "Surgeon".into(),
            phone: String::new(),
            email: String::new(),
            working_hours: WorkingHours::default(),
            consultation_fee: 0.0,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn day_nav() -> PeriodNavigator {
        PeriodNavigator::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), ViewMode::Day)
    }

    #[test]
    fn entry_click_opens_appointment_only() {
        let apts = vec![Appointment::new("P1", "D1", "2025-03-10", "09:00", 30)];
        let doctors = vec![doctor("D1")];
        let input = RenderInput {
            appointments: &apts,
            doctors: &doctors,
            patients: &[],
        };
        let grid = CalendarGrid::build(&day_nav(), input, &GridConfig::default(), now());
        let mut log = IntentLog::default();

        let intent = dispatch(&grid, Gesture::Entry { row: 0, column: 2, entry: 0 }, &mut log);

        assert_eq!(
            intent,
            Some(Intent::OpenAppointment {
                appointment_id: apts[0].id.clone()
            })
        );
        assert_eq!(log.intents.len(), 1);
    }

    #[test]
    fn empty_area_of_busy_day_cell_requests_booking() {
        let apts = vec![Appointment::new("P1", "D1", "2025-03-10", "09:00", 30)];
        let doctors = vec![doctor("D1")];
        let input = RenderInput {
            appointments: &apts,
            doctors: &doctors,
            patients: &[],
        };
        let grid = CalendarGrid::build(&day_nav(), input, &GridConfig::default(), now());
        let mut log = IntentLog::default();

        dispatch(&grid, Gesture::Cell { row: 0, column: 2 }, &mut log);

        assert_eq!(
            log.intents,
            vec![Intent::RequestBooking {
                date: "2025-03-10".into(),
                time: "09:00".into()
            }]
        );
    }

    #[test]
    fn overflow_requests_booking_for_the_cell() {
        let apts: Vec<Appointment> = (0..5)
            .map(|i| Appointment::new(format!("P{}", i), "D1", "2025-03-10", "11:00", 30))
            .collect();
        let doctors = vec![doctor("D1")];
        let input = RenderInput {
            appointments: &apts,
            doctors: &doctors,
            patients: &[],
        };
        let grid = CalendarGrid::build(&day_nav(), input, &GridConfig::default(), now());
        let mut log = IntentLog::default();

        dispatch(&grid, Gesture::Overflow { row: 0, column: 6 }, &mut log);
        // hidden entries are not reachable individually
        dispatch(&grid, Gesture::Entry { row: 0, column: 6, entry: 4 }, &mut log);

        assert_eq!(
            log.intents,
            vec![Intent::RequestBooking {
                date: "2025-03-10".into(),
                time: "11:00".into()
            }]
        );
    }

    #[test]
    fn overflow_on_uncrowded_cell_is_ignored() {
        let doctors = vec![doctor("D1")];
        let input = RenderInput {
            appointments: &[],
            doctors: &doctors,
            patients: &[],
        };
        let grid = CalendarGrid::build(&day_nav(), input, &GridConfig::default(), now());
        let mut log = IntentLog::default();
        assert_eq!(dispatch(&grid, Gesture::Overflow { row: 0, column: 0 }, &mut log), None);
        assert!(log.intents.is_empty());
    }

    #[test]
    fn out_of_range_gesture_fires_nothing() {
        let input = RenderInput {
            appointments: &[],
            doctors: &[],
            patients: &[],
        };
        let nav = PeriodNavigator::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), ViewMode::Week);
        let grid = CalendarGrid::build(&nav, input, &GridConfig::default(), now());
        let mut log = IntentLog::default();
        assert_eq!(dispatch(&grid, Gesture::Cell { row: 99, column: 0 }, &mut log), None);
        assert_eq!(dispatch(&grid, Gesture::Cell { row: 0, column: 7 }, &mut log), None);
        assert!(log.intents.is_empty());
    }

    #[test]
    fn week_entry_gestures_do_not_resolve() {
        let input = RenderInput {
            appointments: &[],
            doctors: &[],
            patients: &[],
        };
        let nav = PeriodNavigator::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), ViewMode::Week);
        let grid = CalendarGrid::build(&nav, input, &GridConfig::default(), now());
        assert_eq!(resolve(&grid, Gesture::Entry { row: 0, column: 0, entry: 0 }), None);
    }
}
