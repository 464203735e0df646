//! Facility coordinator service
//!
//! Composes the slot allocator, charger pool and session ledger into the
//! park/remove lifecycle. The service is the single owner of all mutable
//! facility state: mutating operations take `&mut self`, queries return owned
//! snapshots, so sharing it across threads only needs a mutex around the whole
//! instance.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::application::dto::{
    ChargerSnapshot, ChargingStart, FacilityStatus, ParkOutcome, ParkRequest, ParkedVehicle,
    RemoveOutcome, SessionSummary,
};
use crate::config::AppConfig;
use crate::domain::{
    ChargerPool, ConnectorType, DomainResult, FeeStrategy, FlatRateFee, SessionLedger,
    SlotAllocator, Vehicle,
};

/// A facility service behind a single mutual-exclusion domain.
pub type SharedFacility = Arc<Mutex<FacilityService>>;

/// Coordinator for one parking facility.
pub struct FacilityService {
    level: u32,
    default_session_kwh: f64,
    slots: SlotAllocator,
    chargers: ChargerPool,
    ledger: SessionLedger,
    fees: Box<dyn FeeStrategy>,
}

impl FacilityService {
    /// Create a facility with the default flat-rate fees.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_fees(config, Box::new(FlatRateFee::default()))
    }

    /// Create a facility with a custom fee strategy.
    ///
    /// Registers one charger per configured EV slot (`EV001`, `EV002`, ...),
    /// alternating 22 kW Type2 and 50 kW CCS units.
    pub fn with_fees(config: &AppConfig, fees: Box<dyn FeeStrategy>) -> Self {
        let mut chargers = ChargerPool::new();
        for i in 1..=config.facility.ev_capacity {
            let charger_id = format!("EV{:03}", i);
            let (connector, max_kw) = if i % 2 == 0 {
                (ConnectorType::Ccs, 50.0)
            } else {
                (ConnectorType::Type2, 22.0)
            };
            // Generated ids are unique by construction
            let registered = chargers.register(&charger_id, connector, max_kw);
            debug_assert!(registered.is_ok());
        }
        info!(
            "Facility created: {} regular, {} EV slots on level {}, {} chargers",
            config.facility.regular_capacity,
            config.facility.ev_capacity,
            config.facility.level,
            chargers.len()
        );
        Self {
            level: config.facility.level,
            default_session_kwh: config.charging.default_session_kwh,
            slots: SlotAllocator::new(
                config.facility.regular_capacity,
                config.facility.ev_capacity,
            ),
            chargers,
            ledger: SessionLedger::new(config.charging.rate_per_kwh),
            fees,
        }
    }

    /// Wrap the service for use from multiple threads.
    pub fn into_shared(self) -> SharedFacility {
        Arc::new(Mutex::new(self))
    }

    /// Human-readable creation summary for the boundary.
    pub fn summary(&self) -> String {
        let occ = self.slots.occupancy();
        format!(
            "Created parking lot: {} regular, {} EV slots on level {}. Registered {} EV chargers.",
            occ.regular_capacity,
            occ.ev_capacity,
            self.level,
            self.chargers.len()
        )
    }

    /// Park a vehicle, auto-starting a charging session for electric kinds.
    ///
    /// Allocation failures surface unchanged. The charging start is
    /// best-effort: a missing or failing charger leaves the vehicle parked and
    /// waiting, never rolls the park back.
    pub fn park_vehicle(&mut self, request: ParkRequest) -> DomainResult<ParkOutcome> {
        let vehicle = Vehicle::new(
            request.kind,
            request.registration_id,
            request.make,
            request.model,
            request.color,
            request.initial_charge,
        );
        let kind = vehicle.kind;
        let registration_id = vehicle.registration_id.clone();
        let fee = self.fees.fee_for(kind);

        let placed = self.slots.park(vehicle)?;
        info!(
            "Vehicle {} parked in {} slot {} (fee {})",
            registration_id, placed.lot, placed.slot, fee
        );

        let charging = if kind.is_electric() {
            self.start_charging(&registration_id)
        } else {
            ChargingStart::NotElectric
        };

        Ok(ParkOutcome {
            registration_id,
            lot: placed.lot,
            slot: placed.slot,
            fee,
            charging,
        })
    }

    /// Best-effort charging start for a freshly parked electric vehicle.
    ///
    /// Finds a free charger, occupies it and opens a session with the
    /// deterministic id `SESS_<registration_id>`. A charger occupied for an
    /// open that then fails is released again.
    fn start_charging(&mut self, registration_id: &str) -> ChargingStart {
        let Some(charger_id) = self.chargers.find_available().map(str::to_string) else {
            info!(
                "No charging station free for {}; vehicle is waiting",
                registration_id
            );
            return ChargingStart::Waiting;
        };
        if let Err(e) = self.chargers.occupy(&charger_id) {
            warn!("Could not occupy charger {}: {}", charger_id, e);
            return ChargingStart::Waiting;
        }
        let session_id = format!("SESS_{}", registration_id);
        let vehicle = match self.slots.vehicle(registration_id) {
            Some(vehicle) => vehicle,
            None => {
                warn!("Vehicle {} vanished before charging start", registration_id);
                let _ = self.chargers.release(&charger_id);
                return ChargingStart::Waiting;
            }
        };
        match self.ledger.open(&session_id, &charger_id, vehicle) {
            Ok(_) => {
                info!(
                    "Charging started for {} on {} ({})",
                    registration_id, charger_id, session_id
                );
                ChargingStart::Started {
                    charger_id,
                    session_id,
                }
            }
            Err(e) => {
                warn!(
                    "Could not open charging session for {}: {}",
                    registration_id, e
                );
                let _ = self.chargers.release(&charger_id);
                ChargingStart::Waiting
            }
        }
    }

    /// Remove a vehicle, closing any open charging session first.
    ///
    /// The session close is best-effort and the charger is released even when
    /// it fails; slot removal always proceeds. `kwh_used` defaults to the
    /// configured per-departure energy when the caller supplies none.
    pub fn remove_vehicle(
        &mut self,
        registration_id: &str,
        kwh_used: Option<f64>,
    ) -> DomainResult<RemoveOutcome> {
        let open = self
            .ledger
            .open_session_for(registration_id)
            .map(|s| (s.session_id.clone(), s.charger_id.clone()));

        let mut closed = None;
        if let Some((session_id, charger_id)) = open {
            // An unusable reading must not leave the session open forever;
            // bill the configured default instead.
            let kwh = match kwh_used {
                Some(kwh) if kwh.is_finite() && kwh >= 0.0 => kwh,
                Some(kwh) => {
                    warn!(
                        "Invalid energy reading {} for {}; billing default {} kWh",
                        kwh, session_id, self.default_session_kwh
                    );
                    self.default_session_kwh
                }
                None => self.default_session_kwh,
            };
            match self.slots.vehicle_mut(registration_id) {
                Some(vehicle) => match self.ledger.close(&session_id, kwh, vehicle) {
                    Ok(session) => {
                        info!(
                            "Charging stopped for {}: {} kWh at {}/kWh = {}",
                            registration_id, session.kwh_used, session.rate_per_kwh, session.cost
                        );
                        closed = Some(session);
                    }
                    Err(e) => warn!("Could not close session {}: {}", session_id, e),
                },
                None => warn!(
                    "Open session {} references a vehicle that is not parked",
                    session_id
                ),
            }
            // Free the charger even when the close failed
            if let Err(e) = self.chargers.release(&charger_id) {
                warn!("Could not release charger {}: {}", charger_id, e);
            }
        }

        let vehicle = self.slots.remove(registration_id)?;
        info!("Vehicle {} removed", registration_id);
        Ok(RemoveOutcome {
            vehicle,
            session: closed,
        })
    }

    /// Take a charger out of rotation.
    pub fn mark_charger_out_of_service(&mut self, charger_id: &str) -> DomainResult<()> {
        self.chargers.mark_out_of_service(charger_id)?;
        info!("Charger {} marked out of service", charger_id);
        Ok(())
    }

    /// Return a charger to rotation.
    pub fn return_charger_to_service(&mut self, charger_id: &str) -> DomainResult<()> {
        self.chargers.return_to_service(charger_id)?;
        info!("Charger {} returned to service", charger_id);
        Ok(())
    }

    /// Snapshot of occupancy, chargers and their session associations.
    pub fn facility_status(&self) -> FacilityStatus {
        let chargers = self
            .chargers
            .iter()
            .map(|c| ChargerSnapshot {
                charger_id: c.charger_id.clone(),
                connector_type: c.connector_type,
                max_kw: c.max_kw,
                status: c.status,
                charging: self
                    .ledger
                    .iter()
                    .find(|s| s.is_open() && s.charger_id == c.charger_id)
                    .map(|s| s.registration_id.clone()),
            })
            .collect();

        let parked: Vec<ParkedVehicle> =
            self.slots.list_parked().into_iter().map(Into::into).collect();

        let waiting = parked
            .iter()
            .filter(|v| {
                v.kind.is_electric() && self.ledger.open_session_for(&v.registration_id).is_none()
            })
            .map(|v| v.registration_id.clone())
            .collect();

        FacilityStatus {
            level: self.level,
            occupancy: self.slots.occupancy(),
            chargers,
            parked,
            waiting,
        }
    }

    /// Summaries of every charging session, open and completed.
    pub fn charging_status(&self) -> Vec<SessionSummary> {
        self.ledger.iter().map(Into::into).collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────
