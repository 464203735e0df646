//! Read-only snapshots and request/outcome types for presentation layers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    ChargerStatus, ChargingSession, ConnectorType, LotKind, Occupancy, Vehicle, VehicleKind,
};

/// A park request as received from the boundary.
#[derive(Debug, Clone)]
pub struct ParkRequest {
    pub registration_id: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub kind: VehicleKind,
    /// Charge level in percent for electric kinds; defaults to 0.
    pub initial_charge: Option<f64>,
}

/// How the charging side of a park request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChargingStart {
    /// A charger was occupied and a session opened.
    Started {
        charger_id: String,
        session_id: String,
    },
    /// Electric vehicle parked, but no charger was free.
    Waiting,
    /// Not an electric vehicle.
    NotElectric,
}

/// Result of a successful park.
#[derive(Debug, Clone, Serialize)]
pub struct ParkOutcome {
    pub registration_id: String,
    pub lot: LotKind,
    /// 1-based position within the lot.
    pub slot: usize,
    pub fee: Decimal,
    pub charging: ChargingStart,
}

/// Result of a successful removal.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveOutcome {
    pub vehicle: Vehicle,
    /// The charging session closed on departure, if one was open.
    pub session: Option<ChargingSession>,
}

/// Per-charger line in the facility snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ChargerSnapshot {
    pub charger_id: String,
    pub connector_type: ConnectorType,
    pub max_kw: f64,
    pub status: ChargerStatus,
    /// Registration id of the vehicle charging on this charger, if any.
    pub charging: Option<String>,
}

/// Parked vehicle line in the facility snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ParkedVehicle {
    pub registration_id: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub kind: VehicleKind,
    pub charge: Option<f64>,
    pub lot: LotKind,
}

impl From<&Vehicle> for ParkedVehicle {
    fn from(v: &Vehicle) -> Self {
        Self {
            registration_id: v.registration_id.clone(),
            make: v.make.clone(),
            model: v.model.clone(),
            color: v.color.clone(),
            kind: v.kind,
            charge: v.charge(),
            lot: if v.kind.is_electric() {
                LotKind::Ev
            } else {
                LotKind::Regular
            },
        }
    }
}

/// Snapshot-consistent view of the whole facility.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityStatus {
    pub level: u32,
    pub occupancy: Occupancy,
    pub chargers: Vec<ChargerSnapshot>,
    pub parked: Vec<ParkedVehicle>,
    /// Parked electric vehicles with no open session.
    pub waiting: Vec<String>,
}

/// Charging session state for status listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionState {
    Charging,
    Completed { kwh_used: f64, cost: Decimal },
}

/// One line of the charging status listing.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub registration_id: String,
    pub charger_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: f64,
    pub state: SessionState,
}

impl From<&ChargingSession> for SessionSummary {
    fn from(s: &ChargingSession) -> Self {
        let state = if s.is_open() {
            SessionState::Charging
        } else {
            SessionState::Completed {
                kwh_used: s.kwh_used,
                cost: s.cost,
            }
        };
        Self {
            session_id: s.session_id.clone(),
            registration_id: s.registration_id.clone(),
            charger_id: s.charger_id.clone(),
            started_at: s.started_at,
            duration_minutes: s.duration().num_seconds() as f64 / 60.0,
            state,
        }
    }
}
