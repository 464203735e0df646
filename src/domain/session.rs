//! Charging session ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{DomainError, DomainResult};
use super::vehicle::Vehicle;

/// Fraction of metered energy that ends up in the battery.
///
/// Closing a session raises the vehicle's charge by `kwh_used / efficiency`
/// percentage points.
pub const CHARGING_EFFICIENCY: f64 = 0.8;

/// A charging session on one charger for one vehicle.
///
/// The session references the vehicle by registration id only; the slot
/// allocator owns the vehicle record. A session is mutated exactly once, on
/// close, and is terminal afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ChargingSession {
    pub session_id: String,
    pub charger_id: String,
    pub registration_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub kwh_used: f64,
    pub rate_per_kwh: Decimal,
    pub cost: Decimal,
}

impl ChargingSession {
    fn new(
        session_id: String,
        charger_id: String,
        registration_id: String,
        rate_per_kwh: Decimal,
    ) -> Self {
        Self {
            session_id,
            charger_id,
            registration_id,
            started_at: Utc::now(),
            ended_at: None,
            kwh_used: 0.0,
            rate_per_kwh,
            cost: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Session duration: start to end, or start to now while still open.
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at.unwrap_or_else(Utc::now) - self.started_at
    }
}

/// Ledger of active and completed charging sessions.
///
/// The ledger never touches the charger pool: the caller occupies a charger
/// before opening a session and releases it after closing one.
#[derive(Debug)]
pub struct SessionLedger {
    /// Open and completed sessions, in open order.
    sessions: Vec<ChargingSession>,
    /// Base rate applied to every new session.
    rate_per_kwh: Decimal,
}

impl SessionLedger {
    pub fn new(rate_per_kwh: Decimal) -> Self {
        Self {
            sessions: Vec::new(),
            rate_per_kwh,
        }
    }

    /// Open a session for an electric vehicle on an already-occupied charger.
    ///
    /// Fails with `DuplicateSession` if the id exists or the vehicle already
    /// holds an open session, and with `VehicleIneligible` for non-electric
    /// kinds.
    pub fn open(
        &mut self,
        session_id: impl Into<String>,
        charger_id: impl Into<String>,
        vehicle: &Vehicle,
    ) -> DomainResult<&ChargingSession> {
        let session_id = session_id.into();
        if self.get(&session_id).is_some() {
            return Err(DomainError::DuplicateSession(session_id));
        }
        if !vehicle.kind.is_electric() {
            return Err(DomainError::VehicleIneligible {
                registration_id: vehicle.registration_id.clone(),
                kind: vehicle.kind,
            });
        }
        // At most one open session per vehicle
        if let Some(existing) = self.open_session_for(&vehicle.registration_id) {
            return Err(DomainError::DuplicateSession(existing.session_id.clone()));
        }
        self.sessions.push(ChargingSession::new(
            session_id,
            charger_id.into(),
            vehicle.registration_id.clone(),
            self.rate_per_kwh,
        ));
        let idx = self.sessions.len() - 1;
        Ok(&self.sessions[idx])
    }

    /// Close a session, bill the energy and update the vehicle's charge.
    ///
    /// `cost = round(kwh_used × rate, 2 dp)`; the charge level rises by
    /// `kwh_used / CHARGING_EFFICIENCY`, clamped by the vehicle record itself.
    /// Returns the closed session; the caller releases the associated charger.
    pub fn close(
        &mut self,
        session_id: &str,
        kwh_used: f64,
        vehicle: &mut Vehicle,
    ) -> DomainResult<ChargingSession> {
        if !kwh_used.is_finite() || kwh_used < 0.0 {
            return Err(DomainError::InvalidEnergyAmount(kwh_used));
        }
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.session_id == session_id)
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))?;
        if session.ended_at.is_some() {
            return Err(DomainError::SessionAlreadyClosed(session_id.to_string()));
        }
        debug_assert_eq!(session.registration_id, vehicle.registration_id);

        session.ended_at = Some(Utc::now());
        session.kwh_used = kwh_used;
        session.cost = (Decimal::from_f64_retain(kwh_used).unwrap_or_default()
            * session.rate_per_kwh)
            .round_dp(2);
        vehicle.add_charge(kwh_used / CHARGING_EFFICIENCY);
        Ok(session.clone())
    }

    /// The open session referencing a vehicle, if any.
    pub fn open_session_for(&self, registration_id: &str) -> Option<&ChargingSession> {
        self.sessions
            .iter()
            .find(|s| s.is_open() && s.registration_id == registration_id)
    }

    pub fn get(&self, session_id: &str) -> Option<&ChargingSession> {
        self.sessions.iter().find(|s| s.session_id == session_id)
    }

    /// All sessions, open and completed, in open order.
    pub fn iter(&self) -> impl Iterator<Item = &ChargingSession> {
        self.sessions.iter()
    }
}

// ── Tests ──────────────────────────────────────────────────────
