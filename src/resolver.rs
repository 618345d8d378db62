/// Slot resolution: which appointments occupy a grid cell.
///
/// Matching is exact equality on the normalized `YYYY-MM-DD` date and
/// `HH:MM` time strings (plus doctor id when scoped). Duration is ignored,
/// so an appointment occupies exactly one slot. Results keep source order.
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{format_date, Appointment, AppointmentStatus};

/// A (date, time) grid coordinate in normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SlotKey {
    pub date: String,
    pub time: String,
}

impl SlotKey {
    pub fn new(date: NaiveDate, time: impl Into<String>) -> Self {
        SlotKey {
            date: format_date(date),
            time: time.into(),
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        appointment.date == self.date && appointment.time == self.time
    }
}

/// Appointments at (date, time) across all doctors.
pub fn appointments_for_slot<'a>(
    appointments: &'a [Appointment],
    key: &SlotKey,
) -> Vec<&'a Appointment> {
    appointments.iter().filter(|apt| key.matches(apt)).collect()
}

/// Appointments at (date, time) booked with `doctor_id`.
pub fn appointments_for_doctor_slot<'a>(
    appointments: &'a [Appointment],
    key: &SlotKey,
    doctor_id: &str,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| apt.doctor_id == doctor_id && key.matches(apt))
        .collect()
}

/// All appointments on `date`, any time.
pub fn appointments_for_day(appointments: &[Appointment], date: NaiveDate) -> Vec<&Appointment> {
    let date = format_date(date);
    appointments.iter().filter(|apt| apt.date == date).collect()
}

/// Per-status tallies for a set of appointments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub no_show: usize,
}

impl StatusCounts {
    pub fn from_appointments<'a, I>(appointments: I) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut counts = StatusCounts::default();
        for apt in appointments {
            counts.add(apt.status);
        }
        counts
    }

    pub fn add(&mut self, status: AppointmentStatus) {
        match status {
            AppointmentStatus::Scheduled => self.scheduled += 1,
            AppointmentStatus::Completed => self.completed += 1,
            AppointmentStatus::Cancelled => self.cancelled += 1,
            AppointmentStatus::NoShow => self.no_show += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.scheduled += other.scheduled;
        self.completed += other.completed;
        self.cancelled += other.cancelled;
        self.no_show += other.no_show;
    }

    pub fn get(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Scheduled => self.scheduled,
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Cancelled => self.cancelled,
            AppointmentStatus::NoShow => self.no_show,
        }
    }

    pub fn total(&self) -> usize {
        self.scheduled + self.completed + self.cancelled + self.no_show
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero tallies in display order, one badge each.
    pub fn badges(&self) -> Vec<(AppointmentStatus, usize)> {
        AppointmentStatus::ALL
            .iter()
            .map(|status| (*status, self.get(*status)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Appointments grouped by slot once per render pass.
///
/// Lookups return the same appointments in the same order as the linear
/// functions above; building the index just avoids rescanning the snapshot
/// for every cell.
#[derive(Debug, Default)]
pub struct SlotIndex<'a> {
    by_slot: HashMap<&'a str, HashMap<&'a str, Vec<&'a Appointment>>>,
}

impl<'a> SlotIndex<'a> {
    pub fn build(appointments: &'a [Appointment]) -> Self {
        let mut by_slot: HashMap<&'a str, HashMap<&'a str, Vec<&'a Appointment>>> =
            HashMap::new();
        for apt in appointments {
            by_slot
                .entry(apt.date.as_str())
                .or_default()
                .entry(apt.time.as_str())
                .or_default()
                .push(apt);
        }
        SlotIndex { by_slot }
    }

    pub fn slot(&self, key: &SlotKey) -> &[&'a Appointment] {
        self.by_slot
            .get(key.date.as_str())
            .and_then(|times| times.get(key.time.as_str()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn doctor_slot(&self, key: &SlotKey, doctor_id: &str) -> Vec<&'a Appointment> {
        self.slot(key)
            .iter()
            .copied()
            .filter(|apt| apt.doctor_id == doctor_id)
            .collect()
    }

    pub fn counts(&self, key: &SlotKey) -> StatusCounts {
        StatusCounts::from_appointments(self.slot(key).iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(date: &str, time: &str) -> SlotKey {
        SlotKey {
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    fn sample() -> Vec<Appointment> {
        vec![
            Appointment::new("P1", "D1", "2025-03-10", "09:00", 30),
            Appointment::new("P2", "D2", "2025-03-10", "09:00", 30)
                .with_status(AppointmentStatus::Completed),
            Appointment::new("P3", "D1", "2025-03-10", "09:30", 30),
            Appointment::new("P4", "D1", "2025-03-10", "09:00", 60)
                .with_status(AppointmentStatus::NoShow),
            Appointment::new("P5", "D1", "2025-03-11", "09:00", 30),
        ]
    }

    #[test]
    fn slot_match_is_exact_and_ordered() {
        let apts = sample();
        let found = appointments_for_slot(&apts, &key("2025-03-10", "09:00"));
        let patients: Vec<&str> = found.iter().map(|a| a.patient_id.as_str()).collect();
        assert_eq!(patients, vec!["P1", "P2", "P4"]);
    }

    #[test]
    fn duration_does_not_spill_into_next_slot() {
        let apts = sample();
        let found = appointments_for_slot(&apts, &key("2025-03-10", "09:30"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient_id, "P3");
    }

    #[test]
    fn doctor_scope_filters_collisions() {
        let apts = sample();
        let found = appointments_for_doctor_slot(&apts, &key("2025-03-10", "09:00"), "D1");
        let patients: Vec<&str> = found.iter().map(|a| a.patient_id.as_str()).collect();
        assert_eq!(patients, vec!["P1", "P4"]);
    }

    #[test]
    fn malformed_time_never_matches() {
        let apts = vec![Appointment::new("P1", "D1", "2025-03-10", "9:00", 30)];
        assert!(appointments_for_slot(&apts, &key("2025-03-10", "09:00")).is_empty());
    }

    #[test]
    fn resolver_is_idempotent() {
        let apts = sample();
        let k = key("2025-03-10", "09:00");
        let first: Vec<&str> = appointments_for_slot(&apts, &k).iter().map(|a| a.id.as_str()).collect();
        let second: Vec<&str> = appointments_for_slot(&apts, &k).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn counts_sum_to_subset_size() {
        let apts = sample();
        let subset = appointments_for_day(&apts, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let counts = StatusCounts::from_appointments(subset.iter().copied());
        assert_eq!(counts.total(), subset.len());
        assert_eq!(counts.scheduled, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.no_show, 1);
        assert_eq!(counts.cancelled, 0);
    }

    #[test]
    fn badges_skip_zero_counts() {
        let counts = StatusCounts {
            scheduled: 2,
            completed: 0,
            cancelled: 1,
            no_show: 0,
        };
        assert_eq!(
            counts.badges(),
            vec![
                (AppointmentStatus::Scheduled, 2),
                (AppointmentStatus::Cancelled, 1)
            ]
        );
    }

    #[test]
    fn index_agrees_with_linear_scan() {
        let apts = sample();
        let index = SlotIndex::build(&apts);
        for k in [
            key("2025-03-10", "09:00"),
            key("2025-03-10", "09:30"),
            key("2025-03-11", "09:00"),
            key("2025-03-12", "09:00"),
        ] {
            let linear: Vec<&str> = appointments_for_slot(&apts, &k).iter().map(|a| a.id.as_str()).collect();
            let indexed: Vec<&str> = index.slot(&k).iter().map(|a| a.id.as_str()).collect();
            assert_eq!(linear, indexed);
            let linear_d1: Vec<&str> = appointments_for_doctor_slot(&apts, &k, "D1")
                .iter()
                .map(|a| a.id.as_str())
                .collect();
            let indexed_d1: Vec<&str> = index.doctor_slot(&k, "D1").iter().map(|a| a.id.as_str()).collect();
            assert_eq!(linear_d1, indexed_d1);
        }
    }
}
