/// Data models consumed by the calendar grid.
///
/// This module defines the snapshots handed over by the collaborators that
/// own persistence:
/// - AppointmentStatus / AppointmentType: exhaustive enums with labels
/// - Doctor: read-only input, one grid row per doctor in day view
/// - Patient: consumed only for cell labels
/// - Appointment: a booking keyed by (date, time, doctor), collisions allowed
///
/// Field names follow the camelCase shape of the clinic's client-side store.
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CalendarError, Result};

/// Normalized slot date format (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Normalized slot time format (`HH:MM`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every status in display order.
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Convert a string to a status value.
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" | "noshow" => Ok(AppointmentStatus::NoShow),
            _ => Err(CalendarError::InvalidStatus(value.to_string())),
        }
    }

    /// Wire name used by the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No-show",
        }
    }
}

/// Category of visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Procedure,
    Emergency,
}

impl AppointmentType {
    pub fn from_string(value: &str) -> Result<Self> {
        match value.to_lowercase().trim() {
            "consultation" => Ok(AppointmentType::Consultation),
            "follow-up" | "followup" => Ok(AppointmentType::FollowUp),
            "procedure" => Ok(AppointmentType::Procedure),
            "emergency" => Ok(AppointmentType::Emergency),
            _ => Err(CalendarError::InvalidType(value.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "Consultation",
            AppointmentType::FollowUp => "Follow-up visit",
            AppointmentType::Procedure => "Procedure",
            AppointmentType::Emergency => "Emergency visit",
        }
    }
}

/// Daily working window and working weekdays (Sunday = 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
    #[serde(default = "default_working_days")]
    pub working_days: Vec<u32>,
}

fn default_working_days() -> Vec<u32> {
    vec![1, 2, 3, 4, 5]
}

impl Default for WorkingHours {
    fn default() -> Self {
        WorkingHours {
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            working_days: default_working_days(),
        }
    }
}

/// A doctor as supplied by the staff registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub consultation_fee: f64,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Whether `date` falls on one of the doctor's working weekdays.
    pub fn works_on(&self, date: NaiveDate) -> bool {
        self.working_hours
            .working_days
            .contains(&date.weekday().num_days_from_sunday())
    }
}

/// A patient, used only to label appointment cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A booking. Several appointments may share the same (date, time, doctor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Create a scheduled consultation with a fresh id.
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        duration: u32,
    ) -> Self {
        Appointment {
            id: Uuid::new_v4().to_string(),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            date: date.into(),
            time: time.into(),
            duration,
            status: AppointmentStatus::Scheduled,
            kind: AppointmentType::Consultation,
            symptoms: String::new(),
            notes: String::new(),
            diagnosis: None,
            prescription: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: AppointmentType) -> Self {
        self.kind = kind;
        self
    }

    /// Parsed date, or `None` unless the stored string is exactly the
    /// normalized `YYYY-MM-DD` form the grid matches on.
    pub fn slot_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
            .ok()
            .filter(|date| format_date(*date) == self.date)
    }

    /// Parsed start time, or `None` unless the stored string is exactly `HH:MM`.
    pub fn slot_time(&self) -> Option<NaiveTime> {
        parse_time(&self.time)
            .ok()
            .filter(|time| format_time(*time) == self.time)
    }

    /// End of the appointment as `HH:MM`.
    ///
    /// Computed from minutes since midnight, so a visit running past
    /// midnight reads `24:15` rather than wrapping.
    pub fn end_time(&self) -> Option<String> {
        let start = self.slot_time()?;
        let total = start.hour() * 60 + start.minute() + self.duration;
        Some(format!("{:02}:{:02}", total / 60, total % 60))
    }
}

/// Parse a normalized `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

/// Parse a normalized `HH:MM` time. Seconds are not accepted.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return Err(CalendarError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| CalendarError::InvalidTime(value.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
