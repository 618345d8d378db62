/// Period navigation for the calendar grid.
///
/// The navigator owns exactly two pieces of state: a reference date and a
/// view mode. Everything it reports is derived from those two fields.
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grid granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    Day,
}

impl ViewMode {
    /// Days moved by one navigation step.
    pub fn step_days(&self) -> u64 {
        match self {
            ViewMode::Week => 7,
            ViewMode::Day => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        }
    }
}

/// Reference dates are kept a week clear of chrono's date limits so the
/// visible week always has seven days.
const EDGE_MARGIN: Days = Days::new(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodNavigator {
    reference: NaiveDate,
    mode: ViewMode,
}

impl PeriodNavigator {
    /// Dates closer than a week to chrono's limits are clamped inward.
    pub fn new(reference: NaiveDate, mode: ViewMode) -> Self {
        PeriodNavigator {
            reference: clamp_reference(reference),
            mode,
        }
    }

    /// Week view anchored on the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive(), ViewMode::Week)
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch granularity without moving the reference date.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Step forward; a step that would leave the supported range is ignored.
    pub fn next(&mut self) {
        let step = Days::new(self.mode.step_days());
        if let Some(date) = self.reference.checked_add_days(step).filter(|d| is_supported(*d)) {
            self.reference = date;
        }
    }

    /// Step back; a step that would leave the supported range is ignored.
    pub fn previous(&mut self) {
        let step = Days::new(self.mode.step_days());
        if let Some(date) = self.reference.checked_sub_days(step).filter(|d| is_supported(*d)) {
            self.reference = date;
        }
    }

    /// Reset the reference date to `today`; the mode is kept.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference = clamp_reference(today);
    }

    /// Monday of the ISO week containing the reference date.
    pub fn week_start(&self) -> NaiveDate {
        week_start(clamp_reference(self.reference))
    }

    /// Seven ascending days Monday..Sunday in week mode, the reference date in day mode.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.mode {
            ViewMode::Week => self.week_start().iter_days().take(7).collect(),
            ViewMode::Day => vec![self.reference],
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.visible_days().contains(&date)
    }

    /// Heading for the visible period.
    ///
    /// Week mode: `March 2025`, or `March – April 2025` across a month
    /// boundary, or `December 2025 – January 2026` across a year boundary.
    /// Day mode: `Wednesday, March 5, 2025`.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Week => {
                let first = self.week_start();
                let last = first + Days::new(6);
                if first.month() == last.month() {
                    first.format("%B %Y").to_string()
                } else if first.year() == last.year() {
                    format!("{} – {}", first.format("%B"), last.format("%B %Y"))
                } else {
                    format!("{} – {}", first.format("%B %Y"), last.format("%B %Y"))
                }
            }
            ViewMode::Day => self.reference.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

fn supported_range() -> (NaiveDate, NaiveDate) {
    let earliest = NaiveDate::MIN.checked_add_days(EDGE_MARGIN).unwrap_or(NaiveDate::MIN);
    let latest = NaiveDate::MAX.checked_sub_days(EDGE_MARGIN).unwrap_or(NaiveDate::MAX);
    (earliest, latest)
}

fn is_supported(date: NaiveDate) -> bool {
    clamp_reference(date) == date
}

fn clamp_reference(date: NaiveDate) -> NaiveDate {
    let (earliest, latest) = supported_range();
    date.clamp(earliest, latest)
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = Days::new(date.weekday().num_days_from_monday() as u64);
    date.checked_sub_days(offset).unwrap_or(date)
}
