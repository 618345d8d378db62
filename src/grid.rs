/// Composition of slots, navigation and resolution into a renderable grid.
///
/// Every call recomputes the grid from its inputs; nothing is cached
/// between render passes.
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::GridConfig;
use crate::day_view::DayGrid;
use crate::models::{Appointment, Doctor, Patient};
use crate::navigator::{PeriodNavigator, ViewMode};
use crate::slots::TimeSlots;
use crate::week_view::WeekGrid;

/// Wall-clock position used for the "now" highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSlot {
    pub date: NaiveDate,
    /// Label of the slot containing the current time, if the grid covers it.
    pub time: Option<String>,
}

impl CurrentSlot {
    pub fn at(now: NaiveDateTime, slots: &TimeSlots) -> Self {
        CurrentSlot {
            date: now.date(),
            time: slots.slot_containing(now.time()),
        }
    }

    pub fn is_time(&self, label: &str) -> bool {
        self.time.as_deref() == Some(label)
    }
}

/// Snapshot slices supplied by the collaborators for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub appointments: &'a [Appointment],
    pub doctors: &'a [Doctor],
    pub patients: &'a [Patient],
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarGrid<'a> {
    Week(WeekGrid),
    Day(DayGrid<'a>),
}

impl<'a> CalendarGrid<'a> {
    /// Build the grid for the navigator's current mode.
    pub fn build(
        navigator: &PeriodNavigator,
        input: RenderInput<'a>,
        config: &GridConfig,
        now: NaiveDateTime,
    ) -> Self {
        let slots = TimeSlots::from_config(config);
        let current = CurrentSlot::at(now, &slots);
        match navigator.mode() {
            ViewMode::Week => {
                CalendarGrid::Week(WeekGrid::build(navigator, input.appointments, &slots, &current))
            }
            ViewMode::Day => CalendarGrid::Day(DayGrid::build(
                navigator.title(),
                navigator.reference(),
                input.appointments,
                input.doctors,
                input.patients,
                &slots,
                config.max_visible_per_cell,
                &current,
            )),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CalendarGrid::Week(grid) => &grid.title,
            CalendarGrid::Day(grid) => &grid.title,
        }
    }
}
