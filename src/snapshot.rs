/// Immutable per-render snapshot of the records owned by other screens.
///
/// The grid never mutates these; it reads them once per render pass.
use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GridConfig;
use crate::error::{CalendarError, Result};
use crate::grid::RenderInput;
use crate::models::{
    format_date, format_time, Appointment, AppointmentStatus, AppointmentType, Doctor, Patient,
    WorkingHours,
};
use crate::slots::TimeSlots;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicSnapshot {
    pub appointments: Vec<Appointment>,
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
}

/// Why an appointment cannot be placed or labelled in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityIssue {
    MalformedDate,
    MalformedTime,
    /// Valid time that is not one of the configured slot labels.
    OffGrid,
    UnknownDoctor,
    UnknownPatient,
}

impl IntegrityIssue {
    pub fn describe(&self) -> &'static str {
        match self {
            IntegrityIssue::MalformedDate => "date is not YYYY-MM-DD; hidden from the grid",
            IntegrityIssue::MalformedTime => "time is not HH:MM; hidden from the grid",
            IntegrityIssue::OffGrid => "time is not a grid slot; hidden from the grid",
            IntegrityIssue::UnknownDoctor => "doctor is not in the snapshot; hidden from day view",
            IntegrityIssue::UnknownPatient => "patient is not in the snapshot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityFinding {
    pub appointment_id: String,
    pub issue: IntegrityIssue,
}

impl ClinicSnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a snapshot file and log what the grid built from `config` cannot show.
    pub fn load(path: &Path, config: &GridConfig) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            appointments = snapshot.appointments.len(),
            doctors = snapshot.doctors.len(),
            patients = snapshot.patients.len(),
            "Loaded clinic snapshot"
        );
        for finding in snapshot.integrity_report(&TimeSlots::from_config(config)) {
            warn!(
                appointment_id = %finding.appointment_id,
                "Appointment {}",
                finding.issue.describe()
            );
        }
        Ok(snapshot)
    }

    pub fn input(&self) -> RenderInput<'_> {
        RenderInput {
            appointments: &self.appointments,
            doctors: &self.doctors,
            patients: &self.patients,
        }
    }

    pub fn find_appointment(&self, id: &str) -> Result<&Appointment> {
        self.appointments
            .iter()
            .find(|apt| apt.id == id)
            .ok_or_else(|| CalendarError::AppointmentNotFound(id.to_string()))
    }

    /// Appointments the grid will silently omit or mislabel.
    ///
    /// Dates and times must be stored exactly in normalized form, and the
    /// time must be one of the `slots` labels, for the appointment to land
    /// in a cell.
    pub fn integrity_report(&self, slots: &TimeSlots) -> Vec<IntegrityFinding> {
        let labels = slots.labels();
        let mut findings = Vec::new();
        for apt in &self.appointments {
            let mut flag = |issue| {
                findings.push(IntegrityFinding {
                    appointment_id: apt.id.clone(),
                    issue,
                })
            };
            if apt.slot_date().is_none() {
                flag(IntegrityIssue::MalformedDate);
            }
            match apt.slot_time() {
                None => flag(IntegrityIssue::MalformedTime),
                Some(time) if !labels.contains(&format_time(time)) => {
                    flag(IntegrityIssue::OffGrid)
                }
                Some(_) => {}
            }
            if !self.doctors.iter().any(|d| d.id == apt.doctor_id) {
                flag(IntegrityIssue::UnknownDoctor);
            }
            if !self.patients.iter().any(|p| p.id == apt.patient_id) {
                flag(IntegrityIssue::UnknownPatient);
            }
        }
        findings
    }

    /// Small clinic around `today`, used when no snapshot file is given.
    pub fn demo(today: NaiveDate) -> Self {
        let doctors = vec![
            demo_doctor("D1", "Anna", "Ivanova", "Therapist", vec![1, 2, 3, 4, 5]),
            demo_doctor("D2", "Pavel", "Smirnov", "Cardiologist", vec![1, 3, 5]),
            demo_doctor("D3", "Maria", "Kuznetsova", "Pediatrician", vec![2, 4, 6]),
        ];
        let patients: Vec<Patient> = [
            ("P1", "John", "Smith"),
            ("P2", "Jane", "Doe"),
            ("P3", "Bob", "Wilson"),
            ("P4", "Alice", "Brown"),
            ("P5", "Carl", "Green"),
            ("P6", "Dana", "White"),
        ]
        .iter()
        .map(|(id, first, last)| Patient {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: String::new(),
            email: String::new(),
        })
        .collect();

        let day = |offset: u64| format_date(today.checked_add_days(Days::new(offset)).unwrap_or(today));
        let mut appointments = vec![
            Appointment::new("P1", "D1", day(0), "09:00", 30),
            Appointment::new("P2", "D1", day(0), "09:00", 30)
                .with_status(AppointmentStatus::Completed),
            Appointment::new("P3", "D2", day(0), "10:30", 60)
                .with_kind(AppointmentType::Procedure),
            Appointment::new("P4", "D2", day(1), "14:00", 30)
                .with_status(AppointmentStatus::Cancelled),
            Appointment::new("P5", "D3", day(1), "11:00", 30)
                .with_kind(AppointmentType::FollowUp),
            Appointment::new("P6", "D1", day(2), "16:30", 30)
                .with_status(AppointmentStatus::NoShow),
        ];
        // One crowded cell to show the overflow marker
        for patient in &patients {
            appointments.push(
                Appointment::new(patient.id.clone(), "D3", day(0), "12:00", 15)
                    .with_kind(AppointmentType::Emergency),
            );
        }

        ClinicSnapshot {
            appointments,
            doctors,
            patients,
        }
    }
}

fn demo_doctor(id: &str, first: &str, last: &str, specialization: &str, days: Vec<u32>) -> Doctor {
    Doctor {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        specialization: specialization.to_string(),
        phone: String::new(),
        email: String::new(),
        working_hours: WorkingHours {
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            working_days: days,
        },
        consultation_fee: 50.0,
    }
}
