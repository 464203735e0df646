//! # Parking Facility
//!
//! Allocation and charging-session engine for a parking facility with regular
//! and EV-reserved slots and a finite pool of chargers.
//!
//! ## Architecture
//!
//! - **domain**: Core entities and component state machines — vehicles, the
//!   charger pool, the charging session ledger, the slot allocator, fees and
//!   the error taxonomy
//! - **application**: The facility coordinator composing the domain components
//!   into the park/remove lifecycle, plus read-only snapshot types
//! - **config**: TOML configuration

pub mod application;
pub mod config;
pub mod domain;

pub use application::dto::{ParkOutcome, ParkRequest, RemoveOutcome};
pub use application::services::{FacilityService, SharedFacility};
pub use config::{default_config_path, AppConfig};
