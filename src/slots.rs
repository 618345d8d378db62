/// Bookable time labels for a working day.
///
/// The sequence depends only on configuration, never on appointments. Each
/// listed hour contributes labels up to its last step, so 8..=19 at 30
/// minutes yields `08:00` through `19:30`. A step that does not divide an
/// hour keeps counting across hour boundaries (`08:00`, `08:45`, `09:30`).
use chrono::{NaiveTime, Timelike};

use crate::config::GridConfig;

/// Ordered, finite sequence of `HH:MM` labels. Clone it to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlots {
    first_minute: u32,
    next_minute: u32,
    end_minute: u32,
    step: u32,
}

impl TimeSlots {
    /// Labels from `start_hour:00` through the last step of `end_hour`.
    ///
    /// A zero step, a start past 23 or an end before the start give an
    /// empty sequence. `end_hour` is clamped to 23.
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Self {
        let first_minute = start_hour * 60;
        let end_minute = if step_minutes == 0 || start_hour > 23 || end_hour < start_hour {
            first_minute
        } else {
            (end_hour.min(23) + 1) * 60
        };

        TimeSlots {
            first_minute,
            next_minute: first_minute,
            end_minute,
            step: step_minutes,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.start_hour, config.end_hour, config.step_minutes)
    }

    /// Collect the full sequence, regardless of how far this copy has advanced.
    pub fn labels(&self) -> Vec<String> {
        self.restarted().collect()
    }

    /// A fresh copy positioned at the first label.
    pub fn restarted(&self) -> Self {
        TimeSlots {
            next_minute: self.first_minute,
            ..*self
        }
    }

    /// Label of the slot that contains `time`, if the grid covers it.
    pub fn slot_containing(&self, time: NaiveTime) -> Option<String> {
        let minute = time.hour() * 60 + time.minute();
        if self.step == 0 || minute < self.first_minute || minute >= self.end_minute {
            return None;
        }
        let floored = self.first_minute + (minute - self.first_minute) / self.step * self.step;
        Some(format_minute(floored))
    }
}

impl Iterator for TimeSlots {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next_minute >= self.end_minute {
            return None;
        }
        let label = format_minute(self.next_minute);
        self.next_minute += self.step;
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_minute >= self.end_minute {
            0
        } else {
            ((self.end_minute - self.next_minute + self.step - 1) / self.step) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimeSlots {}

/// Labels for the given working day configuration.
pub fn generate_time_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<String> {
    TimeSlots::new(start_hour, end_hour, step_minutes).collect()
}

fn format_minute(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
