//! Domain error taxonomy

use thiserror::Error;

use super::charger::ChargerStatus;
use super::slots::LotKind;
use super::vehicle::VehicleKind;

/// Local, recoverable failures returned to the caller.
///
/// Each variant carries enough context (offending id, requested vs. available
/// capacity) for a presentation layer to render a useful message. None of these
/// are process-fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Charger already registered: {0}")]
    DuplicateCharger(String),

    #[error("Charger not found: {0}")]
    ChargerNotFound(String),

    #[error("Charger {charger_id} is not available ({status})")]
    ChargerUnavailable {
        charger_id: String,
        status: ChargerStatus,
    },

    #[error("Session already exists: {0}")]
    DuplicateSession(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already closed: {0}")]
    SessionAlreadyClosed(String),

    #[error("Invalid energy amount: {0} kWh")]
    InvalidEnergyAmount(f64),

    #[error("Vehicle {registration_id} is a {kind} and cannot charge")]
    VehicleIneligible {
        registration_id: String,
        kind: VehicleKind,
    },

    #[error("{lot} lot is full: requested {requested} slot(s), {available} free")]
    LotFull {
        lot: LotKind,
        requested: usize,
        available: usize,
    },

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Vehicle already parked: {0}")]
    DuplicateVehicle(String),

    #[error("Unknown vehicle kind: {0}")]
    UnknownKind(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
