/// Day grid: one row per doctor, one column per time slot.
///
/// Cells list individual appointments up to a visible maximum; anything
/// beyond it collapses into a single `+K more` indicator that opens the
/// booking flow for the cell instead of listing the hidden entries.
use chrono::NaiveDate;
use tracing::debug;

use crate::grid::CurrentSlot;
use crate::models::{Appointment, AppointmentStatus, Doctor, Patient};
use crate::resolver::{SlotIndex, SlotKey};
use crate::slots::TimeSlots;

/// Label used when an appointment points at a patient missing from the snapshot.
pub const UNKNOWN_PATIENT: &str = "Unknown patient";

/// A glanceable appointment inside a day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry<'a> {
    pub appointment: &'a Appointment,
    pub patient_name: String,
    pub duration: u32,
    pub status: AppointmentStatus,
    /// Zero-based position among the visible entries of the cell.
    pub stack_position: usize,
    /// Number of visible entries sharing the cell height.
    pub stack_size: usize,
}

impl CellEntry<'_> {
    /// Share of the fixed cell height this entry occupies.
    pub fn height_fraction(&self) -> f32 {
        1.0 / self.stack_size.max(1) as f32
    }
}

/// The `+K more` marker for a crowded cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub hidden: usize,
}

impl Overflow {
    pub fn label(&self) -> String {
        format!("+{} more", self.hidden)
    }

    pub fn short_label(&self) -> String {
        format!("+{}", self.hidden)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub key: SlotKey,
    pub doctor_id: String,
    pub entries: Vec<CellEntry<'a>>,
    pub overflow: Option<Overflow>,
    pub is_current_slot: bool,
}

impl DayCell<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visible entries plus hidden ones.
    pub fn total(&self) -> usize {
        self.entries.len() + self.overflow.map_or(0, |o| o.hidden)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorRow<'a> {
    pub doctor_id: String,
    pub name: String,
    pub specialization: String,
    /// Display-only: the doctor does not normally work this weekday.
    pub works_on_day: bool,
    pub cells: Vec<DayCell<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeHeader {
    pub time: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid<'a> {
    pub title: String,
    pub date: NaiveDate,
    pub is_today: bool,
    pub max_visible: usize,
    pub time_headers: Vec<TimeHeader>,
    pub rows: Vec<DoctorRow<'a>>,
}

impl<'a> DayGrid<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        title: String,
        date: NaiveDate,
        appointments: &'a [Appointment],
        doctors: &[Doctor],
        patients: &[Patient],
        slots: &TimeSlots,
        max_visible: usize,
        now: &CurrentSlot,
    ) -> Self {
        let index = SlotIndex::build(appointments);
        let is_today = date == now.date;

        let time_headers: Vec<TimeHeader> = slots
            .restarted()
            .map(|time| TimeHeader {
                is_current: is_today && now.is_time(&time),
                time,
            })
            .collect();

        let rows: Vec<DoctorRow<'a>> = doctors
            .iter()
            .map(|doctor| DoctorRow {
                doctor_id: doctor.id.clone(),
                name: doctor.full_name(),
                specialization: doctor.specialization.clone(),
                works_on_day: doctor.works_on(date),
                cells: time_headers
                    .iter()
                    .map(|header| {
                        let key = SlotKey::new(date, header.time.clone());
                        let booked = index.doctor_slot(&key, &doctor.id);
                        layout_cell(key, &doctor.id, &booked, patients, max_visible, header.is_current)
                    })
                    .collect(),
            })
            .collect();

        let crowded = rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.overflow.is_some())
            .count();
        debug!(%date, doctors = rows.len(), crowded, "Built day grid");

        DayGrid {
            title,
            date,
            is_today,
            max_visible,
            time_headers,
            rows,
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&DayCell<'a>> {
        self.rows.get(row)?.cells.get(column)
    }
}

/// Apply the overflow policy to the appointments of one (doctor, time) cell.
pub fn layout_cell<'a>(
    key: SlotKey,
    doctor_id: &str,
    booked: &[&'a Appointment],
    patients: &[Patient],
    max_visible: usize,
    is_current_slot: bool,
) -> DayCell<'a> {
    let max_visible = max_visible.max(1);
    let shown = booked.len().min(max_visible);
    let overflow = (booked.len() > max_visible).then(|| Overflow {
        hidden: booked.len() - max_visible,
    });

    let entries = booked
        .iter()
        .copied()
        .take(shown)
        .enumerate()
        .map(|(position, apt)| CellEntry {
            appointment: apt,
            patient_name: patient_label(patients, &apt.patient_id),
            duration: apt.duration,
            status: apt.status,
            stack_position: position,
            stack_size: shown,
        })
        .collect();

    DayCell {
        key,
        doctor_id: doctor_id.to_string(),
        entries,
        overflow,
        is_current_slot,
    }
}

pub fn patient_label(patients: &[Patient], patient_id: &str) -> String {
    patients
        .iter()
        .find(|p| p.id == patient_id)
        .map(Patient::full_name)
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}
