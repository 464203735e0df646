//! Line-oriented console for the parking facility engine.
//! Reads configuration from TOML file (~/.config/parking-facility/config.toml).

use std::io::{self, BufRead, Write};

use tracing::{error, info};

use parking_facility::application::dto::{ChargingStart, FacilityStatus, SessionState};
use parking_facility::domain::VehicleKind;
use parking_facility::{default_config_path, AppConfig, FacilityService, ParkRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PARKING_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging.level);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing("info");
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    let mut facility = FacilityService::new(&config);
    println!("{}", facility.summary());
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["park", reg, make, model, color, kind, rest @ ..] => {
                park(&mut facility, reg, make, model, color, kind, rest.first());
            }
            ["remove", reg, rest @ ..] => remove(&mut facility, reg, rest.first()),
            ["status"] => print_status(&facility.facility_status()),
            ["charging"] => print_charging(&facility),
            ["disable", charger_id] => {
                report(facility.mark_charger_out_of_service(charger_id), || {
                    format!("Charger {} taken out of service", charger_id)
                });
            }
            ["enable", charger_id] => {
                report(facility.return_charger_to_service(charger_id), || {
                    format!("Charger {} back in service", charger_id)
                });
            }
            _ => println!("Unrecognized command. Type 'help' for usage."),
        }
    }
    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn print_help() {
    println!("Commands:");
    println!("  park <reg> <make> <model> <color> <kind> [charge%]");
    println!("       kinds: car, truck, motorcycle, bus, electric_car, electric_bike");
    println!("  remove <reg> [kwh]");
    println!("  status");
    println!("  charging");
    println!("  disable <charger-id> / enable <charger-id>");
    println!("  quit");
}

fn park(
    facility: &mut FacilityService,
    reg: &str,
    make: &str,
    model: &str,
    color: &str,
    kind: &str,
    charge: Option<&&str>,
) {
    let kind = match VehicleKind::parse(kind) {
        Ok(kind) => kind,
        Err(e) => {
            println!("Error parking vehicle: {}", e);
            return;
        }
    };
    let initial_charge = match charge.map(|c| c.parse::<f64>()) {
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => {
            println!("Error parking vehicle: charge must be a number");
            return;
        }
        None => None,
    };
    let request = ParkRequest {
        registration_id: reg.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        color: color.to_string(),
        kind,
        initial_charge,
    };
    match facility.park_vehicle(request) {
        Ok(outcome) => {
            print!(
                "Vehicle {} parked in {} slot {} (Fee: ${})",
                outcome.registration_id, outcome.lot, outcome.slot, outcome.fee
            );
            match outcome.charging {
                ChargingStart::Started { charger_id, .. } => {
                    println!(" and started charging at {}", charger_id)
                }
                ChargingStart::Waiting => println!(" (No charging stations available)"),
                ChargingStart::NotElectric => println!(),
            }
        }
        Err(e) => println!("Error parking vehicle: {}", e),
    }
}

fn remove(facility: &mut FacilityService, reg: &str, kwh: Option<&&str>) {
    let kwh_used = match kwh.map(|k| k.parse::<f64>()) {
        Some(Ok(value)) => Some(value),
        Some(Err(_)) => {
            println!("Error removing vehicle: kwh must be a number");
            return;
        }
        None => None,
    };
    match facility.remove_vehicle(reg, kwh_used) {
        Ok(outcome) => {
            println!("Vehicle {} removed.", outcome.vehicle.registration_id);
            if let Some(session) = outcome.session {
                println!(
                    "Charged {} kWh at {}/kWh = {}",
                    session.kwh_used, session.rate_per_kwh, session.cost
                );
            }
        }
        Err(e) => println!("Error removing vehicle: {}", e),
    }
}

fn print_status(status: &FacilityStatus) {
    println!("--- Parking Lot Status (level {}) ---", status.level);
    println!(
        "Regular: {}/{} used, EV: {}/{} used",
        status.occupancy.regular_used,
        status.occupancy.regular_capacity,
        status.occupancy.ev_used,
        status.occupancy.ev_capacity
    );
    for v in &status.parked {
        print!(
            "{}: {} ({} {} {})",
            v.lot, v.registration_id, v.color, v.make, v.model
        );
        match v.charge {
            Some(charge) => println!(" [Charge: {}%]", charge),
            None => println!(),
        }
    }
    println!();
    println!("EV Charging Status:");
    for c in &status.chargers {
        print!(
            "{}: {} ({}, {}kW)",
            c.charger_id, c.status, c.connector_type, c.max_kw
        );
        match &c.charging {
            Some(reg) => println!(" - Charging {}", reg),
            None => println!(),
        }
    }
    if !status.waiting.is_empty() {
        println!();
        println!("Vehicles waiting to charge:");
        for reg in &status.waiting {
            println!("- {}", reg);
        }
    }
}

fn print_charging(facility: &FacilityService) {
    let sessions = facility.charging_status();
    if sessions.is_empty() {
        println!("No charging sessions.");
        return;
    }
    for s in sessions {
        println!("Session {}:", s.session_id);
        println!("  Vehicle: {}", s.registration_id);
        println!("  Charger: {}", s.charger_id);
        println!("  Started: {}", s.started_at);
        println!("  Duration: {:.1} minutes", s.duration_minutes);
        match s.state {
            SessionState::Charging => println!("  Status: Charging"),
            SessionState::Completed { kwh_used, cost } => {
                println!("  Status: Completed");
                println!("  Energy used: {:.2} kWh", kwh_used);
                println!("  Cost: {}", cost);
            }
        }
    }
}

fn report(result: parking_facility::domain::DomainResult<()>, success: impl Fn() -> String) {
    match result {
        Ok(()) => println!("{}", success()),
        Err(e) => println!("Error: {}", e),
    }
}
