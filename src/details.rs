/// Detail summary for an opened appointment and the actions it offers.
///
/// Actions are returned as intents; applying them is up to the owner of
/// the appointment records.
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::day_view::patient_label;
use crate::error::{CalendarError, Result};
use crate::models::{Appointment, AppointmentStatus, Doctor, Patient};
use crate::status_style::{style_for, StatusStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailAction {
    Edit,
    Duplicate,
    MarkCompleted,
    Cancel,
}

impl DetailAction {
    pub fn label(&self) -> &'static str {
        match self {
            DetailAction::Edit => "Edit appointment",
            DetailAction::Duplicate => "Duplicate appointment",
            DetailAction::MarkCompleted => "Mark as completed",
            DetailAction::Cancel => "Cancel appointment",
        }
    }
}

/// Change requested from the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum DetailIntent {
    Edit { appointment_id: String },
    /// A fresh scheduled copy for the booking form to prefill.
    Duplicate { draft: Box<Appointment> },
    SetStatus {
        appointment_id: String,
        status: AppointmentStatus,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment_id: String,
    pub patient_name: String,
    /// `First Last (Specialization)`.
    pub doctor_label: String,
    pub date_label: String,
    /// `HH:MM - HH:MM`.
    pub time_range: String,
    pub status: AppointmentStatus,
    pub style: StatusStyle,
    pub type_label: &'static str,
    pub symptoms: String,
    pub notes: String,
    pub diagnosis: Option<String>,
    pub prescription: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppointmentDetails {
    pub fn build(appointment: &Appointment, patients: &[Patient], doctors: &[Doctor]) -> Self {
        let doctor_label = doctors
            .iter()
            .find(|d| d.id == appointment.doctor_id)
            .map(|d| format!("{} ({})", d.full_name(), d.specialization))
            .unwrap_or_else(|| "Unknown doctor".to_string());

        let date_label = appointment
            .slot_date()
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| appointment.date.clone());

        let time_range = match appointment.end_time() {
            Some(end) => format!("{} - {}", appointment.time, end),
            None => appointment.time.clone(),
        };

        AppointmentDetails {
            appointment_id: appointment.id.clone(),
            patient_name: patient_label(patients, &appointment.patient_id),
            doctor_label,
            date_label,
            time_range,
            status: appointment.status,
            style: style_for(appointment.status),
            type_label: appointment.kind.label(),
            symptoms: appointment.symptoms.clone(),
            notes: appointment.notes.clone(),
            diagnosis: appointment.diagnosis.clone(),
            prescription: appointment.prescription.clone(),
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }

    /// Edit and duplicate are always offered; status changes only while scheduled.
    pub fn available_actions(&self) -> Vec<DetailAction> {
        let mut actions = vec![DetailAction::Duplicate, DetailAction::Edit];
        if self.status == AppointmentStatus::Scheduled {
            actions.push(DetailAction::MarkCompleted);
            actions.push(DetailAction::Cancel);
        }
        actions
    }
}

/// Turn a chosen action into an intent for the record owner.
pub fn choose_action(appointment: &Appointment, action: DetailAction) -> Result<DetailIntent> {
    let status_change = matches!(action, DetailAction::MarkCompleted | DetailAction::Cancel);
    if status_change && appointment.status != AppointmentStatus::Scheduled {
        return Err(CalendarError::ActionUnavailable {
            action: action.label(),
            status: appointment.status.label(),
        });
    }

    let intent = match action {
        DetailAction::Edit => DetailIntent::Edit {
            appointment_id: appointment.id.clone(),
        },
        DetailAction::Duplicate => {
            let mut draft = appointment.clone();
            draft.id = Uuid::new_v4().to_string();
            draft.status = AppointmentStatus::Scheduled;
            draft.created_at = Utc::now();
            draft.updated_at = None;
            draft.diagnosis = None;
            draft.prescription = None;
            DetailIntent::Duplicate {
                draft: Box::new(draft),
            }
        }
        DetailAction::MarkCompleted => DetailIntent::SetStatus {
            appointment_id: appointment.id.clone(),
            status: AppointmentStatus::Completed,
        },
        DetailAction::Cancel => DetailIntent::SetStatus {
            appointment_id: appointment.id.clone(),
            status: AppointmentStatus::Cancelled,
        },
    };
    tracing::info!(appointment_id = %appointment.id, ?action, "Detail action chosen");
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentType, WorkingHours};

    fn doctor() -> Doctor {
        Doctor {
            id: "D1".into(),
            first_name: "Olga".into(),
            last_name: "Petrova".into(),
            specialization: "Cardiologist".into(),
            phone: String::new(),
            email: String::new(),
            working_hours: WorkingHours::default(),
            consultation_fee: 80.0,
        }
    }

    fn patient() -> Patient {
        Patient {
            id: "P1".into(),
            first_name: "Ivan".into(),
            last_name: "Sidorov".into(),
            phone: String::new(),
            email: String::new(),
        }
    }

    #[test]
    fn details_label_patient_doctor_and_range() {
        let apt = Appointment::new("P1", "D1", "2025-03-10", "09:30", 45)
            .with_kind(AppointmentType::Procedure);
        let details = AppointmentDetails::build(&apt, &[patient()], &[doctor()]);
        assert_eq!(details.patient_name, "Ivan Sidorov");
        assert_eq!(details.doctor_label, "Olga Petrova (Cardiologist)");
        assert_eq!(details.date_label, "Mar 10, 2025");
        assert_eq!(details.time_range, "09:30 - 10:15");
        assert_eq!(details.type_label, "Procedure");
    }

    #[test]
    fn missing_references_fall_back_to_placeholders() {
        let apt = Appointment::new("PX", "DX", "10/03/2025", "09:30", 45);
        let details = AppointmentDetails::build(&apt, &[], &[]);
        assert_eq!(details.doctor_label, "Unknown doctor");
        assert_eq!(details.date_label, "10/03/2025");
    }

    #[test]
    fn scheduled_offers_status_changes() {
        let apt = Appointment::new("P1", "D1", "2025-03-10", "09:30", 45);
        let actions = AppointmentDetails::build(&apt, &[], &[]).available_actions();
        assert!(actions.contains(&DetailAction::MarkCompleted));
        assert!(actions.contains(&DetailAction::Cancel));
    }

    #[test]
    fn completed_offers_only_edit_and_duplicate() {
        let apt = Appointment::new("P1", "D1", "2025-03-10", "09:30", 45)
            .with_status(AppointmentStatus::Completed);
        let actions = AppointmentDetails::build(&apt, &[], &[]).available_actions();
        assert_eq!(actions, vec![DetailAction::Duplicate, DetailAction::Edit]);
        assert!(choose_action(&apt, DetailAction::Cancel).is_err());
    }

    #[test]
    fn duplicate_gets_new_id_and_resets_status() {
        let mut apt = Appointment::new("P1", "D1", "2025-03-10", "09:30", 45)
            .with_status(AppointmentStatus::NoShow);
        apt.diagnosis = Some("flu".into());
        let DetailIntent::Duplicate { draft } = choose_action(&apt, DetailAction::Duplicate).unwrap() else {
            panic!("expected a duplicate draft");
        };
        assert_ne!(draft.id, apt.id);
        assert_eq!(draft.status, AppointmentStatus::Scheduled);
        assert_eq!(draft.date, apt.date);
        assert!(draft.diagnosis.is_none());
    }

    #[test]
    fn cancel_emits_status_change() {
        let apt = Appointment::new("P1", "D1", "2025-03-10", "09:30", 45);
        assert_eq!(
            choose_action(&apt, DetailAction::Cancel).unwrap(),
            DetailIntent::SetStatus {
                appointment_id: apt.id.clone(),
                status: AppointmentStatus::Cancelled
            }
        );
    }
}
