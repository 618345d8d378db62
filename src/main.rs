/// Command-line interface for the clinic calendar.
///
/// This module provides an interactive CLI for browsing the week and day
/// grids, navigating between periods and clicking cells or appointments.
/// Clicks are printed as the intents a booking form would receive.
use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use clinic_calendar::details::{choose_action, AppointmentDetails};
use clinic_calendar::models::parse_date;
use clinic_calendar::render::{render_details, render_grid};
use clinic_calendar::{
    config, dispatch, Appointment, CalendarEvents, CalendarGrid, ClinicSnapshot, Gesture,
    GridConfig, IntentLog, PeriodNavigator, TimeSlots, ViewMode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Prints every intent and keeps it for the history view.
#[derive(Default)]
struct ConsoleEvents {
    log: IntentLog,
}

impl CalendarEvents for ConsoleEvents {
    fn on_appointment_click(&mut self, appointment: &Appointment) {
        println!(
            "\n-> open appointment {} ({} {})",
            appointment.id, appointment.date, appointment.time
        );
        self.log.on_appointment_click(appointment);
    }

    fn on_time_slot_click(&mut self, date: &str, time: &str) {
        println!("\n-> new booking requested at {} {}", date, time);
        self.log.on_time_slot_click(date, time);
    }
}

struct CalendarCLI {
    snapshot: ClinicSnapshot,
    config: GridConfig,
    navigator: PeriodNavigator,
    events: ConsoleEvents,
    running: bool,
}

impl CalendarCLI {
    fn new(snapshot: ClinicSnapshot, config: GridConfig) -> Self {
        CalendarCLI {
            snapshot,
            config,
            navigator: PeriodNavigator::today(),
            events: ConsoleEvents::default(),
            running: true,
        }
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       CLINIC APPOINTMENT CALENDAR");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- {} ({} view) ---", self.navigator.title(), self.navigator.mode().name());
        println!("1. Show grid");
        println!("2. Week view");
        println!("3. Day view");
        println!("4. Next period");
        println!("5. Previous period");
        println!("6. Today");
        println!("7. Go to date");
        println!("8. Click a cell");
        println!("9. Click an appointment entry (day view)");
        println!("10. Click a +K marker (day view)");
        println!("11. Appointment details");
        println!("12. Intent history");
        println!("13. Data integrity report");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&mut self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => {
                // stdin closed
                self.running = false;
                return default.unwrap_or("0").to_string();
            }
            Ok(_) => {}
        }
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_index_input(&mut self, prompt: &str, default: Option<usize>) -> usize {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());
            if let Ok(value) = input.parse::<usize>() {
                return value;
            }
            if !self.running {
                return default.unwrap_or(0);
            }
            println!("Please enter a valid number");
        }
    }

    fn build_grid(&self) -> CalendarGrid<'_> {
        CalendarGrid::build(&self.navigator, self.snapshot.input(), &self.config, Self::now())
    }

    fn show_grid(&self) {
        let grid = self.build_grid();
        println!("\n{}", render_grid(&grid, self.config.use_color));
    }

    fn set_mode(&mut self, mode: ViewMode) {
        self.navigator.set_mode(mode);
        self.show_grid();
    }

    fn go_to_date(&mut self) {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let input = self.get_input("Date (YYYY-MM-DD)", Some(&today));
        match parse_date(&input) {
            Ok(date) => {
                self.navigator.go_to_today(date);
                self.show_grid();
            }
            Err(e) => println!("\n{}", e),
        }
    }

    fn click(&mut self, gesture: Gesture) {
        let grid = CalendarGrid::build(
            &self.navigator,
            self.snapshot.input(),
            &self.config,
            Self::now(),
        );
        if dispatch(&grid, gesture, &mut self.events).is_none() {
            println!("\nNothing there to click");
        }
    }

    fn click_cell(&mut self) {
        let row = self.get_index_input("Row", Some(0));
        let column = self.get_index_input("Column", Some(0));
        self.click(Gesture::Cell { row, column });
    }

    fn click_entry(&mut self) {
        if self.navigator.mode() != ViewMode::Day {
            println!("\nWeek cells show totals only; switch to day view (option 3)");
            return;
        }
        let row = self.get_index_input("Doctor row", Some(0));
        let column = self.get_index_input("Time column", Some(0));
        let entry = self.get_index_input("Entry", Some(0));
        self.click(Gesture::Entry { row, column, entry });
    }

    fn click_overflow(&mut self) {
        if self.navigator.mode() != ViewMode::Day {
            println!("\nWeek cells have no +K markers; switch to day view (option 3)");
            return;
        }
        let row = self.get_index_input("Doctor row", Some(0));
        let column = self.get_index_input("Time column", Some(0));
        self.click(Gesture::Overflow { row, column });
    }

    fn show_details(&mut self) {
        let last_opened = self.events.log.intents.iter().rev().find_map(|intent| match intent {
            clinic_calendar::Intent::OpenAppointment { appointment_id } => Some(appointment_id.clone()),
            _ => None,
        });
        let id = self.get_input("Appointment id", last_opened.as_deref());

        let appointment = match self.snapshot.find_appointment(&id) {
            Ok(apt) => apt.clone(),
            Err(e) => {
                println!("\n{}", e);
                return;
            }
        };
        let details = AppointmentDetails::build(
            &appointment,
            &self.snapshot.patients,
            &self.snapshot.doctors,
        );
        println!("\n{}", render_details(&details, self.config.use_color));

        let actions = details.available_actions();
        for (i, action) in actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action.label());
        }
        let choice = self.get_index_input("Select action (0 to go back)", Some(0));
        if choice == 0 || choice > actions.len() {
            return;
        }
        match choose_action(&appointment, actions[choice - 1]) {
            Ok(intent) => match serde_json::to_string_pretty(&intent) {
                Ok(json) => println!("\n-> {}", json),
                Err(e) => error!("Failed to encode intent: {}", e),
            },
            Err(e) => println!("\n{}", e),
        }
    }

    fn show_history(&self) {
        if self.events.log.intents.is_empty() {
            println!("\nNo intents emitted yet");
            return;
        }
        println!("\n--- Emitted intents ({}) ---", self.events.log.intents.len());
        for intent in &self.events.log.intents {
            match serde_json::to_string(intent) {
                Ok(json) => println!("  {}", json),
                Err(e) => error!("Failed to encode intent: {}", e),
            }
        }
    }

    fn show_integrity(&self) {
        let findings = self
            .snapshot
            .integrity_report(&TimeSlots::from_config(&self.config));
        if findings.is_empty() {
            println!("\nAll appointments can be placed in the grid");
            return;
        }
        println!("\n--- Data integrity ({} findings) ---", findings.len());
        for finding in findings {
            println!("  {}: {}", finding.appointment_id, finding.issue.describe());
        }
    }

    fn run(&mut self) {
        self.print_header();
        self.show_grid();

        while self.running {
            self.print_menu();

            let choice = self.get_index_input("Enter choice", Some(1));
            if !self.running {
                break;
            }

            match choice {
                1 => self.show_grid(),
                2 => self.set_mode(ViewMode::Week),
                3 => self.set_mode(ViewMode::Day),
                4 => {
                    self.navigator.next();
                    self.show_grid();
                }
                5 => {
                    self.navigator.previous();
                    self.show_grid();
                }
                6 => {
                    self.navigator.go_to_today(Local::now().date_naive());
                    self.show_grid();
                }
                7 => self.go_to_date(),
                8 => self.click_cell(),
                9 => self.click_entry(),
                10 => self.click_overflow(),
                11 => self.show_details(),
                12 => self.show_history(),
                13 => self.show_integrity(),
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut args = std::env::args().skip(1);
    let snapshot_path = args.next();
    let grid_config = match args.next() {
        Some(path) => match GridConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GridConfig::default(),
    };
    let snapshot = match snapshot_path {
        Some(path) => match ClinicSnapshot::load(Path::new(&path), &grid_config) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No snapshot given, using demo data");
            ClinicSnapshot::demo(Local::now().date_naive())
        }
    };

    let mut cli = CalendarCLI::new(snapshot, grid_config);
    cli.run();
}
