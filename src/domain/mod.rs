//! Core domain entities and component state machines

pub mod charger;
pub mod error;
pub mod fee;
pub mod session;
pub mod slots;
pub mod vehicle;

pub use charger::{Charger, ChargerPool, ChargerStatus, ConnectorType};
pub use error::{DomainError, DomainResult};
pub use fee::{FeeStrategy, FlatRateFee};
pub use session::{ChargingSession, SessionLedger, CHARGING_EFFICIENCY};
pub use slots::{LotKind, Occupancy, PlacedVehicle, SlotAllocator};
pub use vehicle::{Vehicle, VehicleKind};
