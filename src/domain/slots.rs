//! Slot inventory and allocation

use serde::Serialize;

use super::error::{DomainError, DomainResult};
use super::vehicle::Vehicle;

/// Which lot a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LotKind {
    Regular,
    Ev,
}

impl std::fmt::Display for LotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Ev => write!(f, "EV"),
        }
    }
}

/// A parked vehicle together with the regular-slot units recorded for it at
/// park time. Removal frees exactly this recorded space, never a value
/// re-derived from the kind.
#[derive(Debug, Clone)]
struct Placement {
    vehicle: Vehicle,
    space: usize,
}

/// Where a vehicle ended up after a successful park.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedVehicle {
    pub lot: LotKind,
    /// 1-based position within its lot.
    pub slot: usize,
}

/// Occupancy counters, placeholder units included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub regular_used: usize,
    pub regular_capacity: usize,
    pub ev_used: usize,
    pub ev_capacity: usize,
}

/// Owns the regular and EV slot arrays and every parked vehicle record.
///
/// Multi-slot vehicles are stored as a single placement with a run length
/// instead of repeated placeholder entries, so the capacity invariant is
/// checkable without scanning.
#[derive(Debug)]
pub struct SlotAllocator {
    capacity: usize,
    ev_capacity: usize,
    regular: Vec<Placement>,
    ev: Vec<Vehicle>,
}

impl SlotAllocator {
    pub fn new(capacity: usize, ev_capacity: usize) -> Self {
        Self {
            capacity,
            ev_capacity,
            regular: Vec::new(),
            ev: Vec::new(),
        }
    }

    /// Place a vehicle: electric kinds go to the EV lot (one slot each), the
    /// rest to the regular lot honoring their space requirement.
    pub fn park(&mut self, vehicle: Vehicle) -> DomainResult<PlacedVehicle> {
        if self.contains(&vehicle.registration_id) {
            return Err(DomainError::DuplicateVehicle(vehicle.registration_id));
        }
        if vehicle.kind.is_electric() {
            if self.ev.len() >= self.ev_capacity {
                return Err(DomainError::LotFull {
                    lot: LotKind::Ev,
                    requested: 1,
                    available: self.ev_capacity.saturating_sub(self.ev.len()),
                });
            }
            self.ev.push(vehicle);
            Ok(PlacedVehicle {
                lot: LotKind::Ev,
                slot: self.ev.len(),
            })
        } else {
            let space = vehicle.kind.space_requirement();
            let available = self.capacity.saturating_sub(self.regular_used());
            if available < space {
                return Err(DomainError::LotFull {
                    lot: LotKind::Regular,
                    requested: space,
                    available,
                });
            }
            self.regular.push(Placement { vehicle, space });
            Ok(PlacedVehicle {
                lot: LotKind::Regular,
                slot: self.regular.len(),
            })
        }
    }

    /// Remove a vehicle and free exactly the space recorded at park time.
    /// Relative order of the remaining vehicles is preserved.
    pub fn remove(&mut self, registration_id: &str) -> DomainResult<Vehicle> {
        if let Some(i) = self
            .regular
            .iter()
            .position(|p| p.vehicle.registration_id == registration_id)
        {
            return Ok(self.regular.remove(i).vehicle);
        }
        if let Some(i) = self
            .ev
            .iter()
            .position(|v| v.registration_id == registration_id)
        {
            return Ok(self.ev.remove(i));
        }
        Err(DomainError::VehicleNotFound(registration_id.to_string()))
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            regular_used: self.regular_used(),
            regular_capacity: self.capacity,
            ev_used: self.ev.len(),
            ev_capacity: self.ev_capacity,
        }
    }

    /// Parked vehicles in stable order: regular lot first, then EV lot.
    pub fn list_parked(&self) -> Vec<&Vehicle> {
        self.regular
            .iter()
            .map(|p| &p.vehicle)
            .chain(self.ev.iter())
            .collect()
    }

    pub fn contains(&self, registration_id: &str) -> bool {
        self.vehicle(registration_id).is_some()
    }

    pub fn vehicle(&self, registration_id: &str) -> Option<&Vehicle> {
        self.regular
            .iter()
            .map(|p| &p.vehicle)
            .chain(self.ev.iter())
            .find(|v| v.registration_id == registration_id)
    }

    /// Mutable access for the session-close charge update.
    pub fn vehicle_mut(&mut self, registration_id: &str) -> Option<&mut Vehicle> {
        self.regular
            .iter_mut()
            .map(|p| &mut p.vehicle)
            .chain(self.ev.iter_mut())
            .find(|v| v.registration_id == registration_id)
    }

    /// Occupied regular units, multi-slot runs included.
    fn regular_used(&self) -> usize {
        self.regular.iter().map(|p| p.space).sum()
    }
}

// ── Tests ──────────────────────────────────────────────────────
